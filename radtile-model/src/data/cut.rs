use crate::data::{AzimuthMap, Radial};
use crate::result::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Version word prefixed to a persisted cut so the schema can evolve without
/// silently misreading old files.
const FORMAT_VERSION: u32 = 1;

/// One elevation cut: a full rotation of the antenna at a fixed elevation
/// angle, reduced to a single moment per radial and keyed by azimuth.
///
/// The cut's site identity (identifier, position, VCP) is taken from the
/// radial that started the volume scan and never changes afterwards. Once
/// built, a cut is immutable and may be shared freely across render threads.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Cut {
    radar_identifier: String,
    latitude_degrees: f32,
    longitude_degrees: f32,
    geo_elevation_meters: f32,
    vcp: u16,
    start_timestamp_millis: i64,
    end_timestamp_millis: i64,
    radials: AzimuthMap,
}

impl Cut {
    /// Create an empty cut with the given site identity and start time.
    pub fn new(
        radar_identifier: String,
        latitude_degrees: f32,
        longitude_degrees: f32,
        geo_elevation_meters: f32,
        vcp: u16,
        start_timestamp_millis: i64,
    ) -> Self {
        Self {
            radar_identifier,
            latitude_degrees,
            longitude_degrees,
            geo_elevation_meters,
            vcp,
            start_timestamp_millis,
            end_timestamp_millis: start_timestamp_millis,
            radials: AzimuthMap::new(),
        }
    }

    /// Add a radial collected at `timestamp_millis`, keyed by its azimuth.
    /// The cut's end timestamp advances to the latest radial seen.
    pub fn push(&mut self, timestamp_millis: i64, radial: Radial) -> Result<()> {
        self.radials.insert(radial.azimuth_degrees(), radial)?;

        if timestamp_millis > self.end_timestamp_millis {
            self.end_timestamp_millis = timestamp_millis;
        }

        Ok(())
    }

    /// The ICAO identifier of the radar site, e.g. "KLVX".
    pub fn radar_identifier(&self) -> &str {
        &self.radar_identifier
    }

    /// The latitude of the radar site in degrees.
    pub fn latitude_degrees(&self) -> f32 {
        self.latitude_degrees
    }

    /// The longitude of the radar site in degrees.
    pub fn longitude_degrees(&self) -> f32 {
        self.longitude_degrees
    }

    /// Site elevation plus feedhorn height in meters.
    pub fn geo_elevation_meters(&self) -> f32 {
        self.geo_elevation_meters
    }

    /// The volume coverage pattern the antenna was executing.
    pub fn vcp(&self) -> u16 {
        self.vcp
    }

    /// Collection time of the radial that started the volume, in milliseconds
    /// since the UNIX epoch.
    pub fn start_timestamp_millis(&self) -> i64 {
        self.start_timestamp_millis
    }

    /// Collection time of the latest radial in the cut, in milliseconds since
    /// the UNIX epoch. Always >= the start timestamp.
    pub fn end_timestamp_millis(&self) -> i64 {
        self.end_timestamp_millis
    }

    /// The azimuth-keyed radials comprising this cut.
    pub fn radials(&self) -> &AzimuthMap {
        &self.radials
    }

    /// Serialize this cut to its persisted binary form: a little-endian
    /// format version word followed by the bincode-encoded body. The bucket
    /// index is not written; loading rebuilds it.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = FORMAT_VERSION.to_le_bytes().to_vec();
        bytes.extend(bincode::serialize(self)?);
        Ok(bytes)
    }

    /// Load a cut from its persisted binary form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 4 {
            return Err(Error::TruncatedCutFile);
        }

        let mut version = [0; 4];
        version.copy_from_slice(&bytes[..4]);
        let version = u32::from_le_bytes(version);
        if version != FORMAT_VERSION {
            return Err(Error::UnsupportedFormatVersion(version));
        }

        Ok(bincode::deserialize(&bytes[4..])?)
    }
}

impl Debug for Cut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cut")
            .field("radar_identifier", &self.radar_identifier)
            .field("latitude_degrees", &self.latitude_degrees)
            .field("longitude_degrees", &self.longitude_degrees)
            .field("geo_elevation_meters", &self.geo_elevation_meters)
            .field("vcp", &self.vcp)
            .field("start_timestamp_millis", &self.start_timestamp_millis)
            .field("end_timestamp_millis", &self.end_timestamp_millis)
            .field("radials", &self.radials)
            .finish()
    }
}

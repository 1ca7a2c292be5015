use crate::result::Result;
use crate::slice_reader::SliceReader;

/// Site constants carried in a radial's `RVOL` data block: the radar's
/// position, its elevation (site plus feedhorn height), and the volume
/// coverage pattern in effect.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct VolumeConstants {
    latitude_degrees: f32,
    longitude_degrees: f32,
    geo_elevation_meters: i32,
    vcp: u16,
}

impl VolumeConstants {
    /// Decode an `RVOL` data block. The caller has already matched the tag.
    pub(crate) fn decode(block: &[u8]) -> Result<Self> {
        let mut reader = SliceReader::new(block);
        reader.take_bytes(8)?; // tag, block size, version

        let latitude_degrees = reader.read_f32()?;
        let longitude_degrees = reader.read_f32()?;

        let site_elevation = reader.read_i16()? as i32;
        let feedhorn_height = reader.read_u16()? as i32;

        reader.take_bytes(20)?; // calibration and transmitter constants

        let vcp = reader.read_u16()?;

        Ok(Self {
            latitude_degrees,
            longitude_degrees,
            geo_elevation_meters: site_elevation + feedhorn_height,
            vcp,
        })
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
    pub fn geo_elevation_meters(&self) -> i32 {
        self.geo_elevation_meters
    }

    /// The volume coverage pattern the antenna is executing.
    pub fn vcp(&self) -> u16 {
        self.vcp
    }
}

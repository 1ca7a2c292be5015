use crate::messages::radial::raw::{Header, DATA_BLOCK_POINTER_SLOTS};
use crate::messages::radial::{MomentBlock, VolumeConstants};
use crate::messages::segment::DIGITAL_RADIAL_MESSAGE_TYPE;
use crate::messages::Message;
use crate::result::{Error, Result};
use crate::slice_reader::SliceReader;
use crate::util::nexrad_timestamp_millis;
use log::debug;
use std::fmt::Debug;

/// Describes a radial's position within the sequence of radials comprising a
/// volume scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadialStatus {
    /// First radial of an elevation sweep (not the first sweep in the volume).
    ElevationStart,
    /// A radial within an elevation sweep.
    IntermediateRadialData,
    /// Last radial of an elevation sweep.
    ElevationEnd,
    /// First radial of the first elevation sweep in a volume scan.
    VolumeScanStart,
    /// Last radial of the last elevation sweep in a volume scan.
    VolumeScanEnd,
    /// A status code not described by the ICD.
    Unknown(u8),
}

impl RadialStatus {
    fn from_code(code: u8) -> Self {
        match code {
            0 => RadialStatus::ElevationStart,
            1 => RadialStatus::IntermediateRadialData,
            2 => RadialStatus::ElevationEnd,
            3 => RadialStatus::VolumeScanStart,
            4 => RadialStatus::VolumeScanEnd,
            other => RadialStatus::Unknown(other),
        }
    }
}

/// A decoded type 31 message: one radial with its geometry, volume constants
/// (when an `RVOL` block is present), and moment data blocks in the order the
/// pointer table lists them.
#[derive(Clone, PartialEq)]
pub struct RadialMessage {
    radar_identifier: [u8; 4],
    timestamp_millis: i64,
    azimuth_number: u16,
    azimuth_degrees: f32,
    compression_indicator: u8,
    azimuth_resolution_degrees: f32,
    radial_status: RadialStatus,
    elevation_number: u8,
    cut_sector_number: u8,
    elevation_degrees: f32,
    azimuth_indexing_degrees: f32,
    volume_constants: Option<VolumeConstants>,
    moments: Vec<MomentBlock>,
}

impl RadialMessage {
    /// Decode a radial from a reassembled message. Fails with
    /// [Error::WrongMessageType] when handed any other message type, which
    /// callers working through mixed streams treat as a skip.
    pub fn decode(message: &Message) -> Result<Self> {
        if message.message_type() != DIGITAL_RADIAL_MESSAGE_TYPE {
            return Err(Error::WrongMessageType(message.message_type()));
        }

        Self::decode_payload(message.payload())
    }

    /// Decode a radial from a type 31 message payload.
    pub fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut reader = SliceReader::new(payload);
        let header = reader.take_ref::<Header>()?.clone();

        let declared_count = header.data_block_count.get() as usize;
        let block_count = declared_count.min(DATA_BLOCK_POINTER_SLOTS);
        if block_count < declared_count {
            debug!("radial declares {declared_count} data blocks, clamping to {block_count}");
        }

        let mut pointers = Vec::with_capacity(block_count);
        for _ in 0..block_count {
            pointers.push(reader.read_u32()?);
        }
        for _ in block_count..DATA_BLOCK_POINTER_SLOTS {
            reader.take_bytes(4)?;
        }

        // The pointers are consumed as lengths: each block runs to the next
        // pointer, and the last runs to the end of the payload. A pointer pair
        // that doesn't increase, or a length past the end of the payload,
        // drops the block (and the rest of the table) without failing the
        // radial.
        let mut blocks: Vec<&[u8]> = Vec::with_capacity(block_count);
        for (position, pointer) in pointers.iter().enumerate() {
            if position + 1 == pointers.len() {
                blocks.push(reader.remaining());
                break;
            }

            let length = match pointers[position + 1].checked_sub(*pointer) {
                Some(length) => length as usize,
                None => {
                    debug!("radial data block pointers not increasing, dropping remainder");
                    break;
                }
            };
            match reader.take_bytes(length) {
                Ok(block) => blocks.push(block),
                Err(_) => {
                    debug!("radial data block overruns payload, dropping remainder");
                    break;
                }
            }
        }

        let mut moments = Vec::new();
        let mut volume_constants = None;
        for block in blocks {
            if block.first() == Some(&b'D') {
                match MomentBlock::decode(block) {
                    Ok(moment) => moments.push(moment),
                    Err(err) => debug!("dropping malformed moment block: {err}"),
                }
            } else if block.len() >= 4 && &block[..4] == b"RVOL" {
                match VolumeConstants::decode(block) {
                    Ok(constants) => volume_constants = Some(constants),
                    Err(err) => debug!("dropping malformed volume constants block: {err}"),
                }
            }
        }

        Ok(Self {
            radar_identifier: header.radar_identifier,
            timestamp_millis: nexrad_timestamp_millis(
                header.date.get() as u32,
                header.time.get(),
            ),
            azimuth_number: header.azimuth_number.get(),
            azimuth_degrees: header.azimuth_angle.get(),
            compression_indicator: header.compression_indicator,
            azimuth_resolution_degrees: match header.azimuth_resolution_spacing {
                2 => 1.0,
                _ => 0.5,
            },
            radial_status: RadialStatus::from_code(header.radial_status),
            elevation_number: header.elevation_number,
            cut_sector_number: header.cut_sector_number,
            elevation_degrees: header.elevation_angle.get(),
            azimuth_indexing_degrees: header.azimuth_indexing_mode as f32 / 100.0,
            volume_constants,
            moments,
        })
    }

    /// ICAO radar identifier, e.g. "KLVX".
    pub fn radar_identifier(&self) -> String {
        String::from_utf8_lossy(&self.radar_identifier).to_string()
    }

    /// Collection time in milliseconds since the UNIX epoch.
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }

    /// Radial number within the elevation scan.
    pub fn azimuth_number(&self) -> u16 {
        self.azimuth_number
    }

    /// Azimuth angle at which the radial was collected, degrees [0, 360).
    pub fn azimuth_degrees(&self) -> f32 {
        self.azimuth_degrees
    }

    /// Whether the message body was compressed: 0 none, 1 BZIP2, 2 ZLIB.
    pub fn compression_indicator(&self) -> u8 {
        self.compression_indicator
    }

    /// Azimuthal spacing between adjacent radials, 0.5 or 1.0 degrees.
    pub fn azimuth_resolution_degrees(&self) -> f32 {
        self.azimuth_resolution_degrees
    }

    /// The radial's position within the scan sequence.
    pub fn radial_status(&self) -> RadialStatus {
        self.radial_status
    }

    /// The radial's elevation number within the volume scan.
    pub fn elevation_number(&self) -> u8 {
        self.elevation_number
    }

    /// The sector number within the cut.
    pub fn cut_sector_number(&self) -> u8 {
        self.cut_sector_number
    }

    /// The radial's collection elevation angle in degrees.
    pub fn elevation_degrees(&self) -> f32 {
        self.elevation_degrees
    }

    /// Azimuth indexing angle in degrees, 0 when not indexed.
    pub fn azimuth_indexing_degrees(&self) -> f32 {
        self.azimuth_indexing_degrees
    }

    /// Volume constants from the radial's `RVOL` block, if one was present.
    pub fn volume_constants(&self) -> Option<&VolumeConstants> {
        self.volume_constants.as_ref()
    }

    /// Moment data blocks in pointer-table order.
    pub fn moments(&self) -> &[MomentBlock] {
        &self.moments
    }

    /// Flatten this radial to the model form, keeping only the moment at
    /// `moment_index` (index 0 is the default reflectivity moment). Returns
    /// `None` when the radial carries no such moment.
    pub fn into_radial(mut self, moment_index: usize) -> Option<radtile_model::data::Radial> {
        if moment_index >= self.moments.len() {
            return None;
        }
        let moment = self.moments.swap_remove(moment_index);

        Some(radtile_model::data::Radial::new(
            self.azimuth_number,
            self.azimuth_degrees,
            self.elevation_degrees,
            moment.first_gate_range_km() * 1000.0,
            moment.gate_interval_km() * 1000.0,
            moment.scale(),
            moment.offset(),
            moment.into_gates(),
        ))
    }
}

impl Debug for RadialMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadialMessage")
            .field("radar_identifier", &self.radar_identifier())
            .field("timestamp_millis", &self.timestamp_millis)
            .field("azimuth_number", &self.azimuth_number)
            .field("azimuth_degrees", &self.azimuth_degrees)
            .field("radial_status", &self.radial_status)
            .field("elevation_number", &self.elevation_number)
            .field("elevation_degrees", &self.elevation_degrees)
            .field("moments", &self.moments)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    /// Build the encoded payload of a type 31 message for synthetic fixtures.
    pub(crate) struct RadialPayloadBuilder {
        pub radar_identifier: [u8; 4],
        pub time: u32,
        pub date: u16,
        pub azimuth_number: u16,
        pub azimuth_degrees: f32,
        pub radial_status: u8,
        pub elevation_number: u8,
        pub elevation_degrees: f32,
        pub volume_constants: Option<(f32, f32, i16, u16, u16)>,
        pub moment_gates: Option<Vec<u8>>,
    }

    impl RadialPayloadBuilder {
        pub(crate) fn new() -> Self {
            Self {
                radar_identifier: *b"KLVX",
                time: 3_600_000,
                date: 15000,
                azimuth_number: 1,
                azimuth_degrees: 0.0,
                radial_status: 1,
                elevation_number: 1,
                elevation_degrees: 0.48,
                volume_constants: Some((37.975, -85.944, 190, 34, 212)),
                moment_gates: Some(vec![0; 8]),
            }
        }

        pub(crate) fn build(&self) -> Vec<u8> {
            let mut blocks: Vec<Vec<u8>> = Vec::new();

            if let Some((lat, lon, site, feedhorn, vcp)) = self.volume_constants {
                let mut block = Vec::new();
                block.extend_from_slice(b"RVOL");
                block.extend_from_slice(&[0; 4]); // size, version
                block.extend_from_slice(&lat.to_bits().to_be_bytes());
                block.extend_from_slice(&lon.to_bits().to_be_bytes());
                block.extend_from_slice(&site.to_be_bytes());
                block.extend_from_slice(&feedhorn.to_be_bytes());
                block.extend_from_slice(&[0; 20]);
                block.extend_from_slice(&vcp.to_be_bytes());
                blocks.push(block);
            }

            if let Some(gates) = &self.moment_gates {
                let mut block = Vec::new();
                block.push(b'D');
                block.extend_from_slice(b"REF");
                block.extend_from_slice(&[0; 4]);
                block.extend_from_slice(&(gates.len() as u16).to_be_bytes());
                block.extend_from_slice(&2125u16.to_be_bytes()); // 2.125 km
                block.extend_from_slice(&250u16.to_be_bytes()); // 0.25 km
                block.extend_from_slice(&[0; 6]);
                block.extend_from_slice(&2.0f32.to_bits().to_be_bytes());
                block.extend_from_slice(&66.0f32.to_bits().to_be_bytes());
                block.extend_from_slice(gates);
                blocks.push(block);
            }

            let mut payload = Vec::new();
            payload.extend_from_slice(&self.radar_identifier);
            payload.extend_from_slice(&self.time.to_be_bytes());
            payload.extend_from_slice(&self.date.to_be_bytes());
            payload.extend_from_slice(&self.azimuth_number.to_be_bytes());
            payload.extend_from_slice(&self.azimuth_degrees.to_bits().to_be_bytes());
            payload.push(0); // compression indicator
            payload.push(0); // spare
            payload.extend_from_slice(&0u16.to_be_bytes()); // radial length
            payload.push(1); // azimuth resolution code: 0.5 degrees
            payload.push(self.radial_status);
            payload.push(self.elevation_number);
            payload.push(0); // cut sector number
            payload.extend_from_slice(&self.elevation_degrees.to_bits().to_be_bytes());
            payload.push(0); // spot blanking
            payload.push(0); // azimuth indexing
            payload.extend_from_slice(&(blocks.len() as u16).to_be_bytes());

            let table_end = payload.len() + 4 * super::DATA_BLOCK_POINTER_SLOTS;
            let mut pointer = table_end as u32;
            for block in &blocks {
                payload.extend_from_slice(&pointer.to_be_bytes());
                pointer += block.len() as u32;
            }
            for _ in blocks.len()..super::DATA_BLOCK_POINTER_SLOTS {
                payload.extend_from_slice(&0u32.to_be_bytes());
            }
            for block in &blocks {
                payload.extend_from_slice(block);
            }

            payload
        }
    }
}

use crate::result::Result;
use crate::slice_reader::SliceReader;
use std::fmt::Debug;

/// Gate data begins at this offset within a moment data block.
const GATE_DATA_OFFSET: usize = 28;

/// One moment data block from a radial: a three-character product tag (for
/// example `REF` or `VEL`), gate geometry, the fixed-point encoding
/// parameters, and the raw gate bytes.
#[derive(Clone, PartialEq)]
pub struct MomentBlock {
    moment_type: [u8; 3],
    gate_count: u16,
    first_gate_range_km: f32,
    gate_interval_km: f32,
    scale: f32,
    offset: f32,
    gates: Vec<u8>,
}

impl MomentBlock {
    /// Decode a moment data block. The caller has already matched the leading
    /// `'D'` tag byte.
    pub(crate) fn decode(block: &[u8]) -> Result<Self> {
        let mut reader = SliceReader::new(block);
        reader.take_bytes(1)?; // 'D' tag

        let mut moment_type = [0u8; 3];
        moment_type.copy_from_slice(reader.take_bytes(3)?);

        reader.take_bytes(4)?; // reserved

        let gate_count = reader.read_u16()?;
        let first_gate_range_km = reader.read_u16()? as f32 / 1000.0;
        let gate_interval_km = reader.read_u16()? as f32 / 1000.0;

        reader.take_bytes(6)?; // tover, SNR threshold, control flags, word size

        let scale = reader.read_f32()?;
        let offset = reader.read_f32()?;

        debug_assert_eq!(reader.position(), GATE_DATA_OFFSET);
        let gates = reader.take_bytes(gate_count as usize)?.to_vec();

        Ok(Self {
            moment_type,
            gate_count,
            first_gate_range_km,
            gate_interval_km,
            scale,
            offset,
            gates,
        })
    }

    /// The three-character product tag, e.g. "REF".
    pub fn moment_type(&self) -> String {
        String::from_utf8_lossy(&self.moment_type).to_string()
    }

    /// The number of gates in this moment.
    pub fn gate_count(&self) -> u16 {
        self.gate_count
    }

    /// The range to the center of the first gate in kilometers.
    pub fn first_gate_range_km(&self) -> f32 {
        self.first_gate_range_km
    }

    /// The range between the centers of consecutive gates in kilometers.
    pub fn gate_interval_km(&self) -> f32 {
        self.gate_interval_km
    }

    /// The scale factor used to decode raw gate values.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// The offset used to decode raw gate values. The decoded value is
    /// `(raw - offset) / scale`; raw codes 0 and 1 are the below-threshold
    /// and range-folded sentinels.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// The raw encoded gate values, one byte per gate.
    pub fn gates(&self) -> &[u8] {
        &self.gates
    }

    /// Consume the block, yielding its raw gate bytes.
    pub fn into_gates(self) -> Vec<u8> {
        self.gates
    }
}

impl Debug for MomentBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MomentBlock")
            .field("moment_type", &self.moment_type())
            .field("gate_count", &self.gate_count)
            .field("first_gate_range_km", &self.first_gate_range_km)
            .field("gate_interval_km", &self.gate_interval_km)
            .field("scale", &self.scale)
            .field("offset", &self.offset)
            .finish()
    }
}

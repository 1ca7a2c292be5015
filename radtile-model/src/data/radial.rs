use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A single radar ray flattened to one moment's worth of data. This carries the
/// azimuth and elevation the ray was collected at along with the gate geometry
/// (range to the first gate and the interval between gates, both in meters),
/// the fixed-point encoding parameters, and the raw encoded gate bytes.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Radial {
    azimuth_number: u16,
    azimuth_degrees: f32,
    elevation_degrees: f32,

    first_gate_range_meters: f32,
    gate_interval_meters: f32,

    scale: f32,
    offset: f32,

    gates: Vec<u8>,
}

impl Radial {
    /// Create a new radial with the given properties.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        azimuth_number: u16,
        azimuth_degrees: f32,
        elevation_degrees: f32,
        first_gate_range_meters: f32,
        gate_interval_meters: f32,
        scale: f32,
        offset: f32,
        gates: Vec<u8>,
    ) -> Self {
        Self {
            azimuth_number,
            azimuth_degrees,
            elevation_degrees,
            first_gate_range_meters,
            gate_interval_meters,
            scale,
            offset,
            gates,
        }
    }

    /// The index number for this radial's azimuth in the elevation sweep,
    /// ranging up to 720 depending on the azimuthal resolution.
    pub fn azimuth_number(&self) -> u16 {
        self.azimuth_number
    }

    /// Azimuth angle this radial's data was collected at in degrees, [0, 360).
    pub fn azimuth_degrees(&self) -> f32 {
        self.azimuth_degrees
    }

    /// Elevation angle this radial's data was collected at in degrees.
    pub fn elevation_degrees(&self) -> f32 {
        self.elevation_degrees
    }

    /// The range to the center of the first gate in meters.
    pub fn first_gate_range_meters(&self) -> f32 {
        self.first_gate_range_meters
    }

    /// The range between the centers of consecutive gates in meters.
    pub fn gate_interval_meters(&self) -> f32 {
        self.gate_interval_meters
    }

    /// The scale factor used to decode raw gate values into floating-point
    /// values.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// The offset used to decode raw gate values. The decoded value is
    /// `(raw - offset) / scale`.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// The number of gates in this radial.
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// The raw encoded gate values, one byte per gate.
    pub fn gates(&self) -> &[u8] {
        &self.gates
    }

    /// Decode the gate at `index` with standard moment semantics: raw codes 0
    /// and 1 are the "below threshold" and "range folded" sentinels, anything
    /// else is a fixed-point encoded measurement.
    pub fn decode_gate(&self, index: usize) -> Option<GateValue> {
        self.gates.get(index).map(|&raw| match raw {
            0 => GateValue::BelowThreshold,
            1 => GateValue::RangeFolded,
            _ => GateValue::Value((raw as f32 - self.offset) / self.scale),
        })
    }
}

impl Debug for Radial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Radial")
            .field("azimuth_number", &self.azimuth_number)
            .field("azimuth_degrees", &self.azimuth_degrees)
            .field("elevation_degrees", &self.elevation_degrees)
            .field("first_gate_range_meters", &self.first_gate_range_meters)
            .field("gate_interval_meters", &self.gate_interval_meters)
            .field("gate_count", &self.gates.len())
            .finish()
    }
}

/// The decoded value of a single gate. The value may be a floating-point
/// measurement or a special case such as "below threshold" or "range folded",
/// both of which are invalid as samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateValue {
    /// A decoded measurement for the gate.
    Value(f32),
    /// The return for this gate was below the signal threshold.
    BelowThreshold,
    /// The return for this gate exceeded the maximum unambiguous range.
    RangeFolded,
}

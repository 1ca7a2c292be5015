//!
//! Accumulates decoded radials into a single elevation cut.
//!
//! The builder is a small state machine over the message stream: it ignores
//! everything until a radial flagged as the start of a volume scan arrives,
//! accumulates radials from there, and freezes the cut when the next
//! elevation sweep begins. Only the first moment of each radial (the default
//! reflectivity moment) is kept.
//!

use crate::messages::radial::{RadialMessage, RadialStatus};
use crate::messages::Message;
use crate::result::{Error, Result};
use log::debug;
use radtile_model::data::Cut;

/// Index of the moment kept from each radial.
const REFLECTIVITY_MOMENT_INDEX: usize = 0;

enum State {
    /// Waiting for the radial that starts the volume scan.
    Init,
    /// Collecting radials into the cut.
    Accumulating(Cut),
    /// The elevation ended; the cut is frozen.
    Done(Cut),
}

/// Builds one elevation cut from a stream of reassembled messages.
pub struct CutBuilder {
    state: State,
}

impl CutBuilder {
    /// Create a builder awaiting the start of a volume scan.
    pub fn new() -> Self {
        Self { state: State::Init }
    }

    /// Whether the cut has been frozen by the start of the next elevation.
    /// Feeding further messages after this point has no effect, so callers
    /// streaming a large archive may stop early.
    pub fn is_complete(&self) -> bool {
        matches!(self.state, State::Done(_))
    }

    /// Feed one message. Messages of types other than the generic radial
    /// format, and radials that fail to decode, are skipped.
    pub fn process_message(&mut self, message: &Message) -> Result<()> {
        let radial = match RadialMessage::decode(message) {
            Ok(radial) => radial,
            Err(Error::WrongMessageType(_)) => return Ok(()),
            Err(err) => {
                debug!("skipping undecodable radial: {err}");
                return Ok(());
            }
        };

        self.process_radial(radial)
    }

    /// Feed one decoded radial.
    pub fn process_radial(&mut self, radial: RadialMessage) -> Result<()> {
        match &mut self.state {
            State::Init => {
                if radial.radial_status() == RadialStatus::VolumeScanStart {
                    let mut cut = cut_from_radial(&radial);
                    push_radial(&mut cut, radial)?;
                    self.state = State::Accumulating(cut);
                }
            }
            State::Accumulating(cut) => {
                if radial.radial_status() == RadialStatus::ElevationStart {
                    if let State::Accumulating(cut) =
                        std::mem::replace(&mut self.state, State::Init)
                    {
                        self.state = State::Done(cut);
                    }
                } else {
                    push_radial(cut, radial)?;
                }
            }
            State::Done(_) => {}
        }

        Ok(())
    }

    /// Consume the builder, yielding the cut. Returns the frozen cut, or the
    /// partial accumulation when the stream ended before the next elevation
    /// began, or `None` when no volume scan start was ever seen.
    pub fn into_cut(self) -> Option<Cut> {
        match self.state {
            State::Init => None,
            State::Accumulating(cut) | State::Done(cut) => Some(cut),
        }
    }
}

impl Default for CutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a cut whose site identity comes from the given radial. Radials
/// without an `RVOL` block fall back to zeroed constants.
fn cut_from_radial(radial: &RadialMessage) -> Cut {
    let constants = radial.volume_constants().copied().unwrap_or_default();

    Cut::new(
        radial.radar_identifier(),
        constants.latitude_degrees(),
        constants.longitude_degrees(),
        constants.geo_elevation_meters() as f32,
        constants.vcp(),
        radial.timestamp_millis(),
    )
}

/// Flatten a radial to its reflectivity moment and add it to the cut.
/// Radials without moment data are skipped.
fn push_radial(cut: &mut Cut, radial: RadialMessage) -> Result<()> {
    let timestamp_millis = radial.timestamp_millis();
    let azimuth_number = radial.azimuth_number();

    match radial.into_radial(REFLECTIVITY_MOMENT_INDEX) {
        Some(flattened) => Ok(cut.push(timestamp_millis, flattened)?),
        None => {
            debug!("radial {azimuth_number} carries no moment data, skipping");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::radial::message::test_support::RadialPayloadBuilder;

    fn radial(azimuth_degrees: f32, azimuth_number: u16, status: u8) -> RadialMessage {
        let mut builder = RadialPayloadBuilder::new();
        builder.azimuth_degrees = azimuth_degrees;
        builder.azimuth_number = azimuth_number;
        builder.radial_status = status;
        builder.time = 3_600_000 + azimuth_number as u32 * 40;
        RadialMessage::decode_payload(&builder.build()).unwrap()
    }

    #[test]
    fn radials_before_volume_start_are_ignored() {
        let mut builder = CutBuilder::new();
        builder.process_radial(radial(10.0, 1, 1)).unwrap();
        builder.process_radial(radial(10.5, 2, 1)).unwrap();

        assert!(builder.into_cut().is_none());
    }

    #[test]
    fn cut_spans_volume_start_to_elevation_start() {
        let mut builder = CutBuilder::new();
        builder.process_radial(radial(0.0, 1, 3)).unwrap();
        builder.process_radial(radial(0.5, 2, 1)).unwrap();
        builder.process_radial(radial(1.0, 3, 1)).unwrap();
        builder.process_radial(radial(1.5, 4, 0)).unwrap();
        assert!(builder.is_complete());

        // Radials after the freeze are ignored.
        builder.process_radial(radial(2.0, 5, 1)).unwrap();

        let cut = builder.into_cut().unwrap();
        assert_eq!(cut.radials().len(), 3);
        assert_eq!(cut.radar_identifier(), "KLVX");
        assert_eq!(cut.vcp(), 212);
        assert_eq!(cut.latitude_degrees(), 37.975);
    }

    #[test]
    fn end_timestamp_tracks_latest_radial() {
        let mut builder = CutBuilder::new();
        builder.process_radial(radial(0.0, 1, 3)).unwrap();
        builder.process_radial(radial(0.5, 2, 1)).unwrap();
        builder.process_radial(radial(1.0, 3, 1)).unwrap();

        let cut = builder.into_cut().unwrap();
        assert_eq!(
            cut.end_timestamp_millis() - cut.start_timestamp_millis(),
            2 * 40
        );
    }

    #[test]
    fn partial_accumulation_is_still_a_cut() {
        let mut builder = CutBuilder::new();
        builder.process_radial(radial(0.0, 1, 3)).unwrap();
        builder.process_radial(radial(0.5, 2, 1)).unwrap();
        assert!(!builder.is_complete());

        let cut = builder.into_cut().unwrap();
        assert_eq!(cut.radials().len(), 2);
    }

    #[test]
    fn non_radial_messages_are_skipped() {
        let mut builder = CutBuilder::new();
        let status_message = Message::new(2, 0, vec![0; 16]);
        builder.process_message(&status_message).unwrap();

        assert!(builder.into_cut().is_none());
    }
}

//!
//! Message segments and their reassembly into whole RDA messages.
//!
//! A decompressed block carries message segments packed end to end. Type 0
//! segments are filler and are dropped at the block boundary. Segments of a
//! multi-segment message may arrive out of order and are stitched back
//! together by [assemble_messages] in segment-number order.
//!

pub mod radial;

mod segment;
pub use segment::Segment;

mod message;
pub use message::Message;

mod assemble;
pub use assemble::assemble_messages;

use crate::result::Result;
use crate::slice_reader::SliceReader;
use log::warn;

/// Message type used for filler segments, dropped during block decode.
const FILLER_MESSAGE_TYPE: u8 = 0;

/// Decode message segments packed end to end in a decompressed block body,
/// discarding filler segments. A partial trailing segment ends the stream
/// with a warning rather than an error, matching how archives are written.
pub fn decode_segments(input: &[u8]) -> Result<Vec<Segment>> {
    let mut reader = SliceReader::new(input);

    let mut segments = Vec::new();
    while !reader.is_empty() {
        match Segment::decode(&mut reader) {
            Ok(segment) => segments.push(segment),
            Err(err) => {
                warn!(
                    "discarding partial segment at byte {}: {err}",
                    reader.position()
                );
                break;
            }
        }
    }

    segments.retain(|segment| segment.message_type() != FILLER_MESSAGE_TYPE);

    Ok(segments)
}

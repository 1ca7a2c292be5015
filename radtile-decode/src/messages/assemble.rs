use crate::messages::{Message, Segment};
use crate::result::{Error, Result};

/// Reassemble whole messages from a stream of segments.
///
/// Segments are consumed in FIFO order. Each unconsumed head segment fixes a
/// message's sequence number, type, timestamp, and segment count; the rest of
/// the queue is then walked to collect the remaining segments of that message,
/// which may arrive in any order. Messages are emitted in the order their
/// first segment appeared in the input.
///
/// Duplicate segment numbers are not reliably detected; a duplicate counts
/// toward the expected total while leaving another slot empty. This limitation
/// is inherited from the source format.
pub fn assemble_messages(segments: Vec<Segment>) -> Result<Vec<Message>> {
    let mut pending: Vec<Option<Segment>> = segments.into_iter().map(Some).collect();
    let mut messages = Vec::new();

    for head_position in 0..pending.len() {
        let head = match pending[head_position].take() {
            Some(segment) => segment,
            None => continue,
        };

        if head.segment_count() == 1 {
            messages.push(Message::new(
                head.message_type(),
                head.timestamp_millis(),
                head.into_payload(),
            ));
            continue;
        }

        let sequence_number = head.sequence_number();
        let segment_count = head.segment_count();
        let message_type = head.message_type();
        let timestamp_millis = head.timestamp_millis();

        let mut slots: Vec<Option<Vec<u8>>> = (0..segment_count).map(|_| None).collect();
        let mut consumed = 0usize;

        place_segment(&mut slots, segment_count, head)?;
        consumed += 1;

        for position in head_position + 1..pending.len() {
            if consumed == segment_count as usize {
                break;
            }

            let candidate = match &pending[position] {
                Some(segment) => segment,
                None => continue,
            };

            // The bounds check comes before the sequence check, so a bogus
            // segment anywhere in the walk aborts reassembly.
            let segment_number = candidate.segment_number();
            if segment_number < 1 || segment_number > segment_count {
                return Err(Error::BadSegment {
                    segment_number,
                    segment_count,
                });
            }

            if candidate.sequence_number() != sequence_number {
                continue;
            }

            let segment = match pending[position].take() {
                Some(segment) => segment,
                None => continue,
            };
            place_segment(&mut slots, segment_count, segment)?;
            consumed += 1;
        }

        if consumed != segment_count as usize {
            return Err(Error::ReassemblyIncomplete {
                sequence_number,
                found: consumed,
                expected: segment_count as usize,
            });
        }

        let payload: Vec<u8> = slots.into_iter().flatten().flatten().collect();
        messages.push(Message::new(message_type, timestamp_millis, payload));
    }

    Ok(messages)
}

/// Place a segment's payload into its slot, validating the segment number.
fn place_segment(
    slots: &mut [Option<Vec<u8>>],
    segment_count: u16,
    segment: Segment,
) -> Result<()> {
    let segment_number = segment.segment_number();
    if segment_number < 1 || segment_number > segment_count {
        return Err(Error::BadSegment {
            segment_number,
            segment_count,
        });
    }

    slots[segment_number as usize - 1] = Some(segment.into_payload());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::segment::test_support::encode_segment;
    use crate::messages::Segment;
    use crate::slice_reader::SliceReader;

    fn segment(
        message_type: u8,
        sequence_number: u16,
        segment_count: u16,
        segment_number: u16,
        payload: &[u8],
    ) -> Segment {
        let bytes = encode_segment(
            message_type,
            sequence_number,
            1,
            0,
            segment_count,
            segment_number,
            payload,
        );
        let mut reader = SliceReader::new(&bytes);
        Segment::decode(&mut reader).unwrap()
    }

    #[test]
    fn out_of_order_segments_reassemble_in_number_order() {
        let segments = vec![
            segment(31, 5, 3, 2, b"BB"),
            segment(31, 5, 3, 3, b"CC"),
            segment(31, 5, 3, 1, b"AA"),
        ];

        let messages = assemble_messages(segments).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].payload(), b"AABBCC");
    }

    #[test]
    fn interleaved_messages_emit_in_first_segment_order() {
        let segments = vec![
            segment(31, 1, 2, 1, b"a1"),
            segment(31, 2, 2, 1, b"b1"),
            segment(31, 2, 2, 2, b"b2"),
            segment(31, 1, 2, 2, b"a2"),
        ];

        let messages = assemble_messages(segments).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].payload(), b"a1a2");
        assert_eq!(messages[1].payload(), b"b1b2");
    }

    #[test]
    fn payload_length_is_conserved() {
        let segments = vec![
            segment(31, 9, 2, 2, b"late"),
            segment(31, 9, 2, 1, b"ever"),
            segment(2, 10, 1, 1, b"solo"),
        ];
        let total: usize = segments.iter().map(|s| s.payload().len()).sum();

        let messages = assemble_messages(segments).unwrap();
        let reassembled: usize = messages.iter().map(|m| m.payload().len()).sum();
        assert_eq!(reassembled, total);
    }

    #[test]
    fn missing_segment_is_an_error() {
        let segments = vec![segment(31, 5, 3, 1, b"AA"), segment(31, 5, 3, 2, b"BB")];

        let result = assemble_messages(segments);
        assert!(matches!(
            result,
            Err(Error::ReassemblyIncomplete {
                found: 2,
                expected: 3,
                ..
            })
        ));
    }

    #[test]
    fn bogus_segment_of_another_message_aborts_the_walk() {
        // The bounds check runs against the head's segment count before the
        // sequence-number skip, so a segment that is valid for its own
        // (larger) message still aborts reassembly of the current one.
        let segments = vec![
            segment(31, 5, 2, 1, b"AA"),
            segment(2, 6, 3, 3, b"XX"),
            segment(31, 5, 2, 2, b"BB"),
        ];

        let result = assemble_messages(segments);
        assert!(matches!(
            result,
            Err(Error::BadSegment {
                segment_number: 3,
                segment_count: 2,
            })
        ));
    }

    #[test]
    fn out_of_range_segment_number_is_an_error() {
        let segments = vec![segment(31, 5, 2, 1, b"AA"), segment(31, 5, 2, 9, b"XX")];

        let result = assemble_messages(segments);
        assert!(matches!(result, Err(Error::BadSegment { .. })));
    }
}

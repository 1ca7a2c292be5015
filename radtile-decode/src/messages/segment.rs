use crate::result::Result;
use crate::slice_reader::SliceReader;
use crate::util::{get_datetime, nexrad_timestamp_millis};
use chrono::{DateTime, Duration, Utc};
use std::fmt::Debug;
use zerocopy::{big_endian, FromBytes, Immutable, KnownLayout};

/// Message type of the generic radial format, which uses variable-length
/// segments. All other message types occupy a fixed segment slot.
pub(crate) const DIGITAL_RADIAL_MESSAGE_TYPE: u8 = 31;

/// Fixed on-disk slot size in bytes for non-type-31 message segments.
const FIXED_SEGMENT_SLOT_BYTES: usize = 2416;

/// The segment length field counts from partway into the header, leaving this
/// many bytes already accounted for when sizing a type-31 payload.
const RADIAL_HEADER_OFFSET_BYTES: usize = 4;

/// Message and system configuration information prefixed to every segment.
#[repr(C)]
#[derive(Clone, PartialEq, Eq, Hash, Debug, FromBytes, Immutable, KnownLayout)]
pub(crate) struct RawSegmentHeader {
    /// Size of this segment in half-words.
    pub length_halfwords: big_endian::U16,

    /// Whether the RDA is operating on a redundant channel. Unused here.
    pub redundant_channel: u8,

    /// Type discriminator.
    pub message_type: u8,

    /// Message sequence number shared by all segments of one message.
    pub sequence_number: big_endian::U16,

    /// This segment's date represented as a count of days since 1 January 1970
    /// 00:00 GMT, where day 1 is the epoch itself.
    pub date: big_endian::U16,

    /// Milliseconds past midnight, GMT.
    pub time: big_endian::U32,

    /// Number of segments in the full message.
    pub segment_count: big_endian::U16,

    /// This segment's number within the message, counted from 1.
    pub segment_number: big_endian::U16,
}

/// One message segment parsed from a decompressed block: the fixed header plus
/// an owned payload sized by the message type's length rules.
#[derive(Clone, PartialEq)]
pub struct Segment {
    header: RawSegmentHeader,
    payload: Vec<u8>,
}

impl Segment {
    /// Decode a segment from the reader, consuming the full on-disk slot.
    ///
    /// Type 31 segments are variable-length: the payload is
    /// `2 * length_halfwords` minus the header offset. All other types occupy
    /// a fixed slot which is read whole and then truncated to the declared
    /// message length.
    pub(crate) fn decode(reader: &mut SliceReader) -> Result<Self> {
        let header = reader.take_ref::<RawSegmentHeader>()?.clone();

        let message_len = header.length_halfwords.get() as usize * 2;
        let payload = if header.message_type == DIGITAL_RADIAL_MESSAGE_TYPE {
            let len = message_len.saturating_sub(RADIAL_HEADER_OFFSET_BYTES);
            reader.take_bytes(len)?.to_vec()
        } else {
            let mut payload = reader.take_bytes(FIXED_SEGMENT_SLOT_BYTES)?.to_vec();
            payload.truncate(message_len);
            payload
        };

        Ok(Self { header, payload })
    }

    /// Type discriminator for the message this segment belongs to.
    pub fn message_type(&self) -> u8 {
        self.header.message_type
    }

    /// Message sequence number shared by all segments of one message.
    pub fn sequence_number(&self) -> u16 {
        self.header.sequence_number.get()
    }

    /// Number of segments in the full message.
    pub fn segment_count(&self) -> u16 {
        self.header.segment_count.get()
    }

    /// This segment's number within the message, counted from 1.
    pub fn segment_number(&self) -> u16 {
        self.header.segment_number.get()
    }

    /// Collection time in milliseconds since the UNIX epoch.
    pub fn timestamp_millis(&self) -> i64 {
        nexrad_timestamp_millis(self.header.date.get() as u32, self.header.time.get())
    }

    /// Collection date and time.
    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        get_datetime(
            self.header.date.get() as u32,
            Duration::milliseconds(self.header.time.get() as i64),
        )
    }

    /// The segment's payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consume the segment, yielding its payload.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

impl Debug for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Segment")
            .field("message_type", &self.message_type())
            .field("sequence_number", &self.sequence_number())
            .field("segment_count", &self.segment_count())
            .field("segment_number", &self.segment_number())
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

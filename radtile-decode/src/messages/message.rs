use std::fmt::Debug;

/// A whole RDA message reassembled from one or more segments. The payload is
/// the concatenation of the member segment payloads in segment-number order.
#[derive(Clone, PartialEq)]
pub struct Message {
    message_type: u8,
    timestamp_millis: i64,
    payload: Vec<u8>,
}

impl Message {
    pub(crate) fn new(message_type: u8, timestamp_millis: i64, payload: Vec<u8>) -> Self {
        Self {
            message_type,
            timestamp_millis,
            payload,
        }
    }

    /// Type discriminator from the message's first segment.
    pub fn message_type(&self) -> u8 {
        self.message_type
    }

    /// Collection time in milliseconds since the UNIX epoch, from the
    /// message's first segment.
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }

    /// The reassembled message payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consume the message, yielding its payload.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

impl Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Message")
            .field("message_type", &self.message_type)
            .field("timestamp_millis", &self.timestamp_millis)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

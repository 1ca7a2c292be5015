use crate::result::{Error, Result};
use crate::volume::header::HEADER_SIZE_BYTES;
use crate::volume::{split_blocks, Block, Header};
use log::warn;
use radtile_decode::cut_builder::CutBuilder;
use radtile_decode::messages::{assemble_messages, Message, Segment};
use radtile_model::data::Cut;

/// A NEXRAD Archive-2 volume data file held in memory.
///
/// The decoder performs no I/O of its own; callers hand it a fully read byte
/// buffer, whether that came from a file, a pipe, or a network fetch.
pub struct File(Vec<u8>);

impl File {
    /// Creates a new Archive-2 volume file with the provided data.
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    /// The file's encoded and compressed data.
    pub fn data(&self) -> &[u8] {
        &self.0
    }

    /// The file's decoded volume header.
    pub fn header(&self) -> Result<Header> {
        Header::decode(&self.0)
    }

    /// The compressed blocks following the volume header.
    pub fn blocks(&self) -> Result<Vec<Block>> {
        if self.0.len() < HEADER_SIZE_BYTES {
            return Err(Error::Truncated);
        }

        Ok(split_blocks(&self.0[HEADER_SIZE_BYTES..]))
    }

    /// All message segments from all blocks, in stream order.
    ///
    /// A block whose payload is empty or fails to decompress is skipped with
    /// a warning and decoding continues with the next block.
    pub fn segments(&self) -> Result<Vec<Segment>> {
        let mut segments = Vec::new();

        for (number, block) in self.blocks()?.iter().enumerate() {
            match block.segments() {
                Ok(block_segments) => segments.extend(block_segments),
                Err(err @ (Error::EmptyBzip2 | Error::Bzip2Decode(_) | Error::Truncated)) => {
                    warn!("skipping block {number}: {err}");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(segments)
    }

    /// Whole messages reassembled from the file's segments, in the order
    /// their first segment appears in the stream.
    pub fn messages(&self) -> Result<Vec<Message>> {
        Ok(assemble_messages(self.segments()?)?)
    }

    /// Decode the file and build the first reflectivity elevation cut:
    /// radials from the start of the volume scan up to the start of the next
    /// elevation. Returns `None` when the file contains no volume scan start.
    pub fn cut(&self) -> Result<Option<Cut>> {
        let mut builder = CutBuilder::new();

        for message in self.messages()? {
            builder.process_message(&message)?;

            if builder.is_complete() {
                break;
            }
        }

        Ok(builder.into_cut())
    }
}

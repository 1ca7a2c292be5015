use crate::result::{Error, Result};
use bzip2::read::BzDecoder;
use log::warn;
use radtile_decode::messages::{decode_segments, Segment};
use std::io::Read;

/// The decompressed stream opens with an opaque channel-terminal header that
/// carries no message data.
const DECOMPRESSED_HEADER_SKIP_BYTES: usize = 12;

enum BlockData<'a> {
    Borrowed(&'a [u8]),
    Owned(Vec<u8>),
}

/// One compressed block from an Archive-2 file: a bzip2 payload preceded by a
/// signed four-byte length word, carrying a stream of message segments.
pub struct Block<'a>(BlockData<'a>);

impl<'a> Block<'a> {
    /// Creates a new block with the provided data.
    pub fn new(data: Vec<u8>) -> Self {
        Block(BlockData::Owned(data))
    }

    /// Creates a new block borrowing the provided data slice.
    pub fn from_slice(data: &'a [u8]) -> Self {
        Block(BlockData::Borrowed(data))
    }

    /// The block's data, including the length prefix.
    pub fn data(&self) -> &[u8] {
        match &self.0 {
            BlockData::Borrowed(data) => data,
            BlockData::Owned(data) => data,
        }
    }

    /// Decompresses this block's payload.
    ///
    /// Fails with [Error::EmptyBzip2] on a zero-length payload: feeding an
    /// empty input to a bzip2 decoder can hang rather than fail.
    pub fn decompress(&self) -> Result<Vec<u8>> {
        // Skip the four-byte length prefix.
        let payload = self.data().split_at(4).1;
        if payload.is_empty() {
            return Err(Error::EmptyBzip2);
        }

        let mut decompressed = Vec::new();
        BzDecoder::new(payload).read_to_end(&mut decompressed)?;

        Ok(decompressed)
    }

    /// Decompresses the block and decodes the message segments it carries,
    /// skipping the opaque header that opens the decompressed stream. Filler
    /// segments have already been dropped from the result.
    pub fn segments(&self) -> Result<Vec<Segment>> {
        let decompressed = self.decompress()?;
        if decompressed.len() < DECOMPRESSED_HEADER_SKIP_BYTES {
            return Err(Error::Truncated);
        }

        Ok(decode_segments(
            &decompressed[DECOMPRESSED_HEADER_SKIP_BYTES..],
        )?)
    }
}

/// Splits the region of an archive following the volume header into
/// compressed blocks.
///
/// Each block is prefixed with a signed big-endian length word whose absolute
/// value is the compressed payload size; the sign bit is reserved and the ICD
/// only notes the word is "negative under some circumstances", so negative
/// prefixes are tolerated and logged. A truncated trailing block ends the
/// stream with a warning.
pub fn split_blocks(data: &[u8]) -> Vec<Block> {
    let mut blocks = Vec::new();

    let mut position = 0;
    while position < data.len() {
        if position + 4 > data.len() {
            warn!("dangling {} bytes after the last block", data.len() - position);
            break;
        }

        let mut word = [0; 4];
        word.copy_from_slice(&data[position..position + 4]);
        let control_word = i32::from_be_bytes(word);
        if control_word < 0 {
            warn!("block at byte {position} carries a negative length prefix {control_word}");
        }
        let block_size = control_word.unsigned_abs() as usize;

        if position + 4 + block_size > data.len() {
            warn!("final block truncated: {block_size} bytes declared, fewer remain");
            break;
        }

        blocks.push(Block::from_slice(&data[position..position + 4 + block_size]));
        position += 4 + block_size;
    }

    blocks
}

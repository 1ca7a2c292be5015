//! Synthetic Archive-2 fixtures built in memory for the integration tests.
#![allow(dead_code)]

use bzip2::write::BzEncoder;
use bzip2::Compression;
use std::io::Write;

/// Fixed on-disk slot size for non-type-31 message segments.
const FIXED_SEGMENT_SLOT_BYTES: usize = 2416;

/// Encode a 24-byte volume header record.
pub fn encode_volume_header(
    version: &str,
    extension: &str,
    date: u32,
    time: u32,
    icao: &[u8; 4],
) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"AR2V00");
    bytes.extend_from_slice(version.as_bytes());
    bytes.push(b'.');
    bytes.extend_from_slice(extension.as_bytes());
    bytes.extend_from_slice(&date.to_be_bytes());
    bytes.extend_from_slice(&time.to_be_bytes());
    bytes.extend_from_slice(icao);
    bytes
}

/// Encode one message segment. Type 31 segments are variable-length; all
/// other types occupy the fixed slot.
pub fn encode_segment(
    message_type: u8,
    sequence_number: u16,
    segment_count: u16,
    segment_number: u16,
    payload: &[u8],
) -> Vec<u8> {
    let mut bytes = Vec::new();

    let (length_halfwords, slot) = if message_type == 31 {
        let halfwords = (payload.len() + 4).div_ceil(2);
        (halfwords as u16, payload.to_vec())
    } else {
        let mut slot = payload.to_vec();
        slot.resize(FIXED_SEGMENT_SLOT_BYTES, 0);
        (payload.len().div_ceil(2) as u16, slot)
    };

    bytes.extend_from_slice(&length_halfwords.to_be_bytes());
    bytes.push(0); // redundant channel
    bytes.push(message_type);
    bytes.extend_from_slice(&sequence_number.to_be_bytes());
    bytes.extend_from_slice(&15000u16.to_be_bytes());
    bytes.extend_from_slice(&3_600_000u32.to_be_bytes());
    bytes.extend_from_slice(&segment_count.to_be_bytes());
    bytes.extend_from_slice(&segment_number.to_be_bytes());
    bytes.extend_from_slice(&slot);

    bytes
}

/// Encode a type 31 payload carrying an `RVOL` constants block and a `REF`
/// moment block.
pub fn radial_payload(
    azimuth_degrees: f32,
    azimuth_number: u16,
    radial_status: u8,
    gates: &[u8],
) -> Vec<u8> {
    let mut rvol = Vec::new();
    rvol.extend_from_slice(b"RVOL");
    rvol.extend_from_slice(&[0; 4]);
    rvol.extend_from_slice(&37.975f32.to_bits().to_be_bytes());
    rvol.extend_from_slice(&(-85.944f32).to_bits().to_be_bytes());
    rvol.extend_from_slice(&190i16.to_be_bytes());
    rvol.extend_from_slice(&34u16.to_be_bytes());
    rvol.extend_from_slice(&[0; 20]);
    rvol.extend_from_slice(&212u16.to_be_bytes());

    let mut moment = Vec::new();
    moment.push(b'D');
    moment.extend_from_slice(b"REF");
    moment.extend_from_slice(&[0; 4]);
    moment.extend_from_slice(&(gates.len() as u16).to_be_bytes());
    moment.extend_from_slice(&2125u16.to_be_bytes());
    moment.extend_from_slice(&250u16.to_be_bytes());
    moment.extend_from_slice(&[0; 6]);
    moment.extend_from_slice(&2.0f32.to_bits().to_be_bytes());
    moment.extend_from_slice(&66.0f32.to_bits().to_be_bytes());
    moment.extend_from_slice(gates);

    let mut payload = Vec::new();
    payload.extend_from_slice(b"KLVX");
    payload.extend_from_slice(&(3_600_000 + azimuth_number as u32 * 40).to_be_bytes());
    payload.extend_from_slice(&15000u16.to_be_bytes());
    payload.extend_from_slice(&azimuth_number.to_be_bytes());
    payload.extend_from_slice(&azimuth_degrees.to_bits().to_be_bytes());
    payload.push(0); // compression indicator
    payload.push(0); // spare
    payload.extend_from_slice(&0u16.to_be_bytes()); // radial length
    payload.push(1); // azimuth resolution: 0.5 degrees
    payload.push(radial_status);
    payload.push(1); // elevation number
    payload.push(0); // cut sector number
    payload.extend_from_slice(&0.48f32.to_bits().to_be_bytes());
    payload.push(0); // spot blanking
    payload.push(0); // azimuth indexing
    payload.extend_from_slice(&2u16.to_be_bytes()); // data block count

    let table_end = (payload.len() + 4 * 9) as u32;
    payload.extend_from_slice(&table_end.to_be_bytes());
    payload.extend_from_slice(&(table_end + rvol.len() as u32).to_be_bytes());
    for _ in 2..9 {
        payload.extend_from_slice(&0u32.to_be_bytes());
    }
    payload.extend_from_slice(&rvol);
    payload.extend_from_slice(&moment);

    payload
}

/// Compress a segment stream into an archive block: the opaque 12-byte
/// header, the segments, bzip2, and the big-endian length prefix.
pub fn compress_block(segments: &[u8], negate_prefix: bool) -> Vec<u8> {
    let mut body = vec![0u8; 12];
    body.extend_from_slice(segments);

    let mut encoder = BzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&body).expect("compression should succeed");
    let compressed = encoder.finish().expect("compression should succeed");

    let prefix = if negate_prefix {
        -(compressed.len() as i32)
    } else {
        compressed.len() as i32
    };

    let mut block = prefix.to_be_bytes().to_vec();
    block.extend_from_slice(&compressed);
    block
}

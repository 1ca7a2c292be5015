mod common;

use common::encode_volume_header;
use radtile_data::result::Error;
use radtile_data::volume;

#[test]
fn header_decodes_fields() {
    let bytes = encode_volume_header("06", "879", 15000, 3_600_000, b"KLVX");
    let header = volume::Header::decode(&bytes).expect("header should decode");

    assert_eq!(header.version(), 6);
    assert_eq!(header.extension_number(), 879);
    assert_eq!(header.icao_identifier(), "KLVX");
    assert_eq!(
        header.date_time().expect("timestamp should convert").to_rfc3339(),
        "2011-01-25T01:00:00+00:00"
    );
}

#[test]
fn bad_magic_is_fatal() {
    let mut bytes = encode_volume_header("06", "879", 15000, 0, b"KLVX");
    bytes[0] = b'X';

    assert!(matches!(
        volume::Header::decode(&bytes),
        Err(Error::BadMagic)
    ));
}

#[test]
fn non_decimal_version_is_fatal() {
    let bytes = encode_volume_header("q7", "879", 15000, 0, b"KLVX");

    assert!(matches!(
        volume::Header::decode(&bytes),
        Err(Error::BadVersion(_))
    ));
}

#[test]
fn short_header_is_truncated() {
    assert!(matches!(
        volume::Header::decode(&[0u8; 10]),
        Err(Error::Truncated)
    ));
}

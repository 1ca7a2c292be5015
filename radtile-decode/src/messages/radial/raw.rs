use zerocopy::{big_endian, FromBytes, Immutable, KnownLayout};

/// The pointer table following the radial header always occupies nine
/// four-byte slots; only the first `data_block_count` are meaningful.
pub(crate) const DATA_BLOCK_POINTER_SLOTS: usize = 9;

/// The fixed-layout header of a type 31 message payload.
#[repr(C)]
#[derive(Clone, PartialEq, Debug, FromBytes, Immutable, KnownLayout)]
pub(crate) struct Header {
    /// ICAO radar identifier.
    pub radar_identifier: [u8; 4],

    /// Collection time in milliseconds past midnight, GMT.
    pub time: big_endian::U32,

    /// Collection date as a count of days since 1 January 1970 00:00 GMT,
    /// where day 1 is the epoch itself.
    pub date: big_endian::U16,

    /// Radial number within the elevation scan, up to 720 at 0.5 degrees.
    pub azimuth_number: big_endian::U16,

    /// Azimuth angle at which the radial was collected, degrees.
    pub azimuth_angle: big_endian::F32,

    /// Whether the message is compressed: 0 none, 1 BZIP2, 2 ZLIB.
    pub compression_indicator: u8,

    /// Spare byte.
    pub spare: u8,

    /// Uncompressed length of the radial in bytes.
    pub radial_length: big_endian::U16,

    /// Azimuthal spacing code: 1 = 0.5 degrees, 2 = 1.0 degrees.
    pub azimuth_resolution_spacing: u8,

    /// The radial's position within the scan sequence.
    pub radial_status: u8,

    /// The radial's elevation number within the volume scan.
    pub elevation_number: u8,

    /// The sector number within the cut.
    pub cut_sector_number: u8,

    /// The radial's collection elevation angle, degrees.
    pub elevation_angle: big_endian::F32,

    /// Spot blanking status for the radial, elevation, and volume.
    pub radial_spot_blanking_status: u8,

    /// Azimuth indexing mode, hundredths of a degree, 0 = none.
    pub azimuth_indexing_mode: u8,

    /// The number of data block pointers that follow this header.
    pub data_block_count: big_endian::U16,
}

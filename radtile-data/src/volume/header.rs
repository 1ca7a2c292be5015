use crate::result::{Error, Result};
use crate::util::get_datetime;
use chrono::{DateTime, Duration, Utc};
use std::fmt::Debug;

/// Encoded size of the volume header record at the start of every file.
pub(crate) const HEADER_SIZE_BYTES: usize = 24;

const MAGIC: &[u8] = b"AR2V00";

/// The volume header record at the beginning of an Archive-2 file: a
/// `AR2V00xx.yyy` tape name carrying the data version and extension number,
/// the volume's collection timestamp, and the ICAO site identifier.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Header {
    version: u32,
    extension_number: u32,

    /// The volume's date as a count of days since 1 January 1970 00:00 GMT,
    /// where day 1 is the epoch itself.
    date: u32,

    /// Milliseconds past midnight, GMT.
    time: u32,

    icao_identifier: [u8; 4],
}

impl Header {
    /// Decode a volume header from the first bytes of an archive.
    ///
    /// Fails with [Error::BadMagic] unless the record opens with `AR2V00`,
    /// and with [Error::BadVersion] when the two version characters are not
    /// ASCII decimal.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE_BYTES {
            return Err(Error::Truncated);
        }

        if &data[..MAGIC.len()] != MAGIC {
            return Err(Error::BadMagic);
        }

        let version_text = String::from_utf8_lossy(&data[6..8]).to_string();
        let version = version_text
            .parse::<u32>()
            .map_err(|_| Error::BadVersion(version_text.clone()))?;

        // Byte 8 is the period separating the version from the extension.
        let extension_text = String::from_utf8_lossy(&data[9..12]).to_string();
        let extension_number = extension_text.parse::<u32>().map_err(|_| {
            Error::DecodingError(format!("extension number {extension_text:?} is not decimal"))
        })?;

        let mut word = [0u8; 4];
        word.copy_from_slice(&data[12..16]);
        let date = u32::from_be_bytes(word);
        word.copy_from_slice(&data[16..20]);
        let time = u32::from_be_bytes(word);

        let mut icao_identifier = [0u8; 4];
        icao_identifier.copy_from_slice(&data[20..24]);

        Ok(Self {
            version,
            extension_number,
            date,
            time,
            icao_identifier,
        })
    }

    /// The data format version from the tape name, e.g. 6 for `AR2V0006`.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Sequential number assigned to each volume in the queue, rolling over
    /// to 001 after 999.
    pub fn extension_number(&self) -> u32 {
        self.extension_number
    }

    /// The date and time the volume was recorded.
    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        get_datetime(self.date, Duration::milliseconds(self.time as i64))
    }

    /// The ICAO identifier of the radar site.
    pub fn icao_identifier(&self) -> String {
        String::from_utf8_lossy(&self.icao_identifier).to_string()
    }
}

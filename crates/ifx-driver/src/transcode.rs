//! Character-set conversion between the application and the database.
//!
//! Informix installations frequently store text in a legacy code page
//! while the application works in UTF-8. When the configured client and
//! database encodings differ, outgoing strings are encoded into the
//! database character set and incoming character data is decoded back.

use encoding_rs::Encoding;

use crate::error::{DriverError, Result};

/// Converts string values across the client/database encoding boundary.
///
/// Conversion is lossy by policy: unmappable characters are replaced
/// instead of failing the statement. Values are trimmed on the way
/// through, since `char(n)` columns come back space-padded.
#[derive(Debug, Clone, Copy)]
pub struct Transcoder {
    db: &'static Encoding,
}

impl Transcoder {
    /// Builds a transcoder from the configured encoding labels.
    ///
    /// Returns `Ok(None)` when either label is missing or both resolve to
    /// the same encoding; conversion only happens when the sides differ.
    /// An unrecognized label is an error.
    pub fn from_labels(client: Option<&str>, db: Option<&str>) -> Result<Option<Self>> {
        let (Some(client), Some(db)) = (client, db) else {
            return Ok(None);
        };
        let client_encoding = Encoding::for_label(client.as_bytes())
            .ok_or_else(|| DriverError::UnknownEncoding(client.to_string()))?;
        let db_encoding = Encoding::for_label(db.as_bytes())
            .ok_or_else(|| DriverError::UnknownEncoding(db.to_string()))?;
        if client_encoding == db_encoding {
            return Ok(None);
        }
        Ok(Some(Self { db: db_encoding }))
    }

    /// Encodes an outgoing string into database-encoded bytes.
    #[must_use]
    pub fn encode_to_db(&self, value: &str) -> Vec<u8> {
        let (bytes, _, _) = self.db.encode(value.trim());
        bytes.into_owned()
    }

    /// Decodes incoming database bytes into a string.
    #[must_use]
    pub fn decode_from_db(&self, bytes: &[u8]) -> String {
        let (text, _, _) = self.db.decode(bytes);
        text.trim().to_string()
    }
}

/// Converts bytes from one labeled encoding to another.
///
/// The byte-level primitive under both transcoding directions; unknown
/// labels are errors, unmappable characters are replaced.
pub fn convert(from: &str, to: &str, bytes: &[u8]) -> Result<Vec<u8>> {
    let from_encoding = Encoding::for_label(from.as_bytes())
        .ok_or_else(|| DriverError::UnknownEncoding(from.to_string()))?;
    let to_encoding = Encoding::for_label(to.as_bytes())
        .ok_or_else(|| DriverError::UnknownEncoding(to.to_string()))?;
    let (text, _, _) = from_encoding.decode(bytes);
    let (out, _, _) = to_encoding.encode(&text);
    Ok(out.into_owned())
}

//! Payload record serialization
//!
//! A record is the {ciphertext, key digest} pair that gets appended to a
//! carrier file. It is serialized as a small JSON object with two fields:
//!
//! - `message`: the cipher bytes armored as base64url without padding, so
//!   arbitrary byte values round-trip safely through the textual record
//! - `keyHash`: the decimal key digest string
//!
//! Records are constructed fresh on each encode and discarded after decode.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorCategory, ErrorKind, Result, StowboxError};

/// The serialized {ciphertext, key digest} pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadRecord {
    /// Armored ciphertext.
    pub message: String,
    /// Decimal digest of the key the ciphertext was produced with.
    #[serde(rename = "keyHash")]
    pub key_hash: String,
}

impl PayloadRecord {
    /// Builds a record from raw cipher bytes and a key digest.
    pub fn from_parts(ciphertext: &[u8], key_digest: String) -> Self {
        Self {
            message: URL_SAFE_NO_PAD.encode(ciphertext),
            key_hash: key_digest,
        }
    }

    /// Recovers the raw cipher bytes from the armored `message` field.
    pub fn ciphertext(&self) -> Result<Vec<u8>> {
        URL_SAFE_NO_PAD.decode(&self.message).map_err(|e| {
            StowboxError::with_kind_and_source(
                ErrorCategory::User,
                ErrorKind::RecordMalformed,
                format!("record ciphertext is not valid base64: {}", e),
                e,
            )
        })
    }

    /// Serializes the record to UTF-8 JSON bytes.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| {
            StowboxError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::InternalInvariant,
                format!("failed to serialize payload record: {}", e),
                e,
            )
        })
    }

    /// Parses record bytes back into a `PayloadRecord`.
    ///
    /// Fails with `RecordMalformed` when the bytes are not a JSON object
    /// carrying the two required string fields.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            StowboxError::with_kind_and_source(
                ErrorCategory::User,
                ErrorKind::RecordMalformed,
                format!("record is not a well-formed payload object: {}", e),
                e,
            )
        })
    }
}

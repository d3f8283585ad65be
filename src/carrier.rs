//! Append-based embedding of payload records in carrier files
//!
//! Hiding is concatenation, not sample-level steganography: the carrier's
//! interior bytes are never touched, which makes the scheme work for any
//! file type at the cost of an observable size increase.
//!
//! The record is framed with an explicit trailer so extraction never has to
//! guess where a record starts inside arbitrary binary content:
//!
//! ```text
//! carrier bytes | record bytes | record length (u32, big-endian) | "stowbox1"
//! ```
//!
//! Extraction reads the fixed-size trailer at the end of the stream. A
//! carrier whose bytes happen to contain brace characters or other
//! record-like content can never be misparsed, and embedding into an
//! already-encoded file simply stacks records, with the most recent one
//! winning at extraction time.

use crate::error::{ErrorCategory, ErrorKind, Result, StowboxError};

/// Magic marker terminating every embedded record.
const MAGIC: &[u8] = b"stowbox1";

/// Trailer size: 4-byte length field plus the magic marker.
const TRAILER_LEN: usize = 4 + MAGIC.len();

/// Appends `record_bytes` and its trailer to a copy of `host`.
///
/// Fails only when the record cannot be represented in the trailer's 32-bit
/// length field; unreachable for the short messages this format carries.
pub fn embed(host: &[u8], record_bytes: &[u8]) -> Result<Vec<u8>> {
    let record_len = record_len_field(record_bytes.len())?;
    let mut out = Vec::with_capacity(host.len() + record_bytes.len() + TRAILER_LEN);
    out.extend_from_slice(host);
    out.extend_from_slice(record_bytes);
    out.extend_from_slice(&record_len.to_be_bytes());
    out.extend_from_slice(MAGIC);
    Ok(out)
}

fn record_len_field(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        StowboxError::with_kind(
            ErrorCategory::Internal,
            ErrorKind::InternalInvariant,
            "record too large for the trailer's 32-bit length field",
        )
    })
}

/// Locates the most recent record in `bytes` and returns its exact span.
///
/// Fails with `RecordMissing` when the stream does not end in a stowbox
/// trailer, and with `RecordMalformed` when a trailer is present but its
/// length field overruns the available bytes.
pub fn extract(bytes: &[u8]) -> Result<&[u8]> {
    if bytes.len() < TRAILER_LEN || !bytes.ends_with(MAGIC) {
        return Err(StowboxError::with_kind(
            ErrorCategory::User,
            ErrorKind::RecordMissing,
            "no embedded record found (missing stowbox trailer)",
        ));
    }

    let len_start = bytes.len() - TRAILER_LEN;
    let len_bytes: [u8; 4] = bytes[len_start..len_start + 4]
        .try_into()
        .map_err(|_| {
            StowboxError::with_kind(
                ErrorCategory::Internal,
                ErrorKind::InternalInvariant,
                "failed to read record length field",
            )
        })?;
    let record_len = u32::from_be_bytes(len_bytes) as usize;

    if record_len > len_start {
        return Err(StowboxError::with_kind(
            ErrorCategory::User,
            ErrorKind::RecordMalformed,
            "truncated or corrupt input; record length exceeds available bytes",
        ));
    }

    Ok(&bytes[len_start - record_len..len_start])
}

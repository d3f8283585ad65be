//! File concealing/revealing operations
//!
//! This module composes the cipher, record codec, and carrier framing into
//! the byte-level encode/decode pipeline, plus high-level file operations
//! used by the CLI.

use crate::carrier;
use crate::cipher;
use crate::error::{ErrorCategory, ErrorKind, Result, StowboxError};
use crate::key::Key;
use crate::key_input::KeyReader;
use crate::record::PayloadRecord;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Conceals `message` in a copy of `host`, returning the output blob.
///
/// The blob is the host bytes followed by the framed payload record; the
/// host's interior bytes are never modified.
pub fn conceal_bytes(host: &[u8], message: &str, key: &Key) -> Result<Vec<u8>> {
    let ciphertext = cipher::transform(message.as_bytes(), key);
    let record = PayloadRecord::from_parts(&ciphertext, key.digest());
    let record_bytes = record.serialize()?;
    carrier::embed(host, &record_bytes)
}

/// Recovers the message hidden in `bytes` using `key`.
///
/// Fails with `RecordMissing` when no record is embedded, `RecordMalformed`
/// when a record is present but undecodable, and `KeyMismatch` when the
/// record's digest disagrees with the candidate key. A digest match with a
/// wrong key is possible (32-bit digest space) but overwhelmingly unlikely
/// for short keys.
pub fn reveal_bytes(bytes: &[u8], key: &Key) -> Result<String> {
    let record_bytes = carrier::extract(bytes)?;
    let record = PayloadRecord::parse(record_bytes)?;

    if record.key_hash != key.digest() {
        return Err(StowboxError::with_kind(
            ErrorCategory::User,
            ErrorKind::KeyMismatch,
            "key does not match the embedded record",
        ));
    }

    let plaintext = cipher::transform(&record.ciphertext()?, key);
    String::from_utf8(plaintext).map_err(|e| {
        StowboxError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::RecordMalformed,
            "key digest matched but the recovered message is not valid UTF-8",
            e,
        )
    })
}

/// Conceal a message in a carrier file
///
/// Reads carrier bytes from `host_path`, hides `message` using a key from
/// `key_reader`, and writes the output blob to `output_path`.
///
/// The output file is created with mode 0o600 (read/write for owner only) on Unix systems.
pub fn conceal_file(
    host_path: &Path,
    output_path: &Path,
    message: &str,
    key_reader: &mut dyn KeyReader,
) -> Result<()> {
    let host = fs::read(host_path).map_err(|e| read_error(host_path, e))?;
    let key_text = key_reader.read_key()?;
    let key = Key::new(&key_text)?;
    let blob = conceal_bytes(&host, message, &key)?;
    write_file_secure(output_path, &blob)
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;
    Ok(())
}

/// Reveal the message hidden in an encoded file
///
/// Reads the blob from `input_path` and recovers the message using a key
/// from `key_reader`.
pub fn reveal_file(input_path: &Path, key_reader: &mut dyn KeyReader) -> Result<String> {
    let bytes = fs::read(input_path).map_err(|e| read_error(input_path, e))?;
    let key_text = key_reader.read_key()?;
    let key = Key::new(&key_text)?;
    reveal_bytes(&bytes, &key)
        .map_err(|e| e.with_context(format!("failed to reveal {}", input_path.display())))
}

/// Write file with secure permissions (0o600 on Unix)
fn write_file_secure(path: &Path, contents: &[u8]) -> Result<()> {
    #[cfg(unix)]
    {
        use std::fs::OpenOptions;
        use std::os::unix::fs::OpenOptionsExt;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .map_err(|e| {
                StowboxError::with_kind_and_source(
                    ErrorCategory::User,
                    ErrorKind::Io,
                    format!("failed to open {}", path.display()),
                    e,
                )
            })?;

        file.write_all(contents).map_err(|e| {
            StowboxError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::Io,
                format!("failed to write {}", path.display()),
                e,
            )
        })?;
        Ok(())
    }

    #[cfg(not(unix))]
    {
        fs::write(path, contents).map_err(|e| {
            StowboxError::with_kind_and_source(
                ErrorCategory::User,
                ErrorKind::Io,
                format!("failed to write {}", path.display()),
                e,
            )
        })?;
        Ok(())
    }
}

fn read_error(path: &Path, err: io::Error) -> StowboxError {
    let category = if err.kind() == io::ErrorKind::NotFound {
        ErrorCategory::User
    } else {
        ErrorCategory::Internal
    };
    StowboxError::with_kind_and_source(
        category,
        ErrorKind::Io,
        format!("failed to read from {}", path.display()),
        err,
    )
}

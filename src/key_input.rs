//! Key reading functionality

use crate::error::{ErrorCategory, ErrorKind, Result, StowboxError};
use std::io::{self, IsTerminal, Read, Write};
use zeroize::Zeroizing;

/// Trait for reading key text from various sources
pub trait KeyReader {
    /// Read key text.
    ///
    /// Returns the text wrapped in `Zeroizing` to ensure it is securely
    /// wiped from memory when dropped. Validation into a `Key` happens at
    /// the call site so every source reports constraint violations the
    /// same way.
    fn read_key(&mut self) -> Result<Zeroizing<String>>;
}

/// Returns a fixed key (for testing)
pub struct ConstantKeyReader {
    key: Zeroizing<String>,
}

impl ConstantKeyReader {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Zeroizing::new(key.into()),
        }
    }
}

impl KeyReader for ConstantKeyReader {
    fn read_key(&mut self) -> Result<Zeroizing<String>> {
        Ok(Zeroizing::new((*self.key).clone()))
    }
}

/// Reads a key from any io::Read source
///
/// Trailing newline characters are stripped so piped input such as
/// `echo key | stowbox --key-stdin ...` works as expected.
pub struct ReaderKeyReader {
    reader: Box<dyn Read>,
}

impl ReaderKeyReader {
    pub fn new(reader: Box<dyn Read>) -> Self {
        Self { reader }
    }
}

impl KeyReader for ReaderKeyReader {
    fn read_key(&mut self) -> Result<Zeroizing<String>> {
        let mut text = Zeroizing::new(String::new());
        self.reader.read_to_string(&mut text).map_err(|e| {
            StowboxError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::Io,
                format!("error reading key: {}", e),
                e,
            )
        })?;
        while text.ends_with('\n') || text.ends_with('\r') {
            text.pop();
        }
        Ok(text)
    }
}

/// Reads a key from the terminal with no echo
pub struct TerminalKeyReader;

impl TerminalKeyReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalKeyReader {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyReader for TerminalKeyReader {
    fn read_key(&mut self) -> Result<Zeroizing<String>> {
        if !io::stdin().is_terminal() {
            return Err(StowboxError::with_kind(
                ErrorCategory::User,
                ErrorKind::KeyUnavailable,
                "cannot read key from terminal - stdin is not a terminal",
            ));
        }

        io::stderr().write_all(b"Key (stowbox): ").map_err(|e| {
            StowboxError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::Io,
                format!("failed to write prompt: {}", e),
                e,
            )
        })?;
        io::stderr().flush().map_err(|e| {
            StowboxError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::Io,
                format!("failed to flush prompt: {}", e),
                e,
            )
        })?;

        // Read key *without echo*
        let key = rpassword::read_password().map_err(|e| {
            StowboxError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::KeyUnavailable,
                format!("failure reading key: {}", e),
                e,
            )
        })?;

        Ok(Zeroizing::new(key))
    }
}

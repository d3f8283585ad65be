//! Shared-key validation and digesting
//!
//! A key is a short shared secret of 1-8 ASCII alphanumeric characters. The
//! key itself is never stored in an encoded file; only its digest is, so a
//! decoder can check key correctness without learning the key.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::{ErrorCategory, ErrorKind, Result, StowboxError};

/// Maximum key length in characters.
pub const MAX_KEY_LEN: usize = 8;

/// A validated shared key.
///
/// Construction enforces the 1-8 ASCII alphanumeric constraint, which also
/// guarantees the key is non-empty wherever the cipher cycles over it.
///
/// The inner text is kept in `Zeroizing` so this copy is wiped from memory
/// on drop, matching the hygiene of the key readers that produce it.
#[derive(Clone)]
pub struct Key(Zeroizing<String>);

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Key(<redacted>)")
    }
}

impl Key {
    /// Validates and wraps key text.
    pub fn new(text: &str) -> Result<Self> {
        if text.is_empty() || text.len() > MAX_KEY_LEN {
            return Err(StowboxError::with_kind(
                ErrorCategory::User,
                ErrorKind::InvalidKey,
                format!("key must be 1-{} characters", MAX_KEY_LEN),
            ));
        }
        if !text.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(StowboxError::with_kind(
                ErrorCategory::User,
                ErrorKind::InvalidKey,
                "key must contain only ASCII letters and digits",
            ));
        }
        Ok(Self(Zeroizing::new(text.to_owned())))
    }

    /// The key bytes used by the cipher. Never empty.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Derives the key's digest: fold code points left-to-right with
    /// `h = h*31 + cp` over a wrapping signed 32-bit accumulator, rendered
    /// as a decimal string.
    ///
    /// Wrap-around is intentional and must stay bit-exact so digests written
    /// by other implementations of the format keep verifying.
    pub fn digest(&self) -> String {
        let mut h: i32 = 0;
        for c in self.0.chars() {
            h = h.wrapping_mul(31).wrapping_add(c as i32);
        }
        h.to_string()
    }
}

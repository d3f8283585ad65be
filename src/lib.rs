//! Stowbox - hide a short message in any file by appending a key-obfuscated
//! payload record
//!
//! The pipeline on the hide path is: message -> key-cycled XOR cipher ->
//! payload record (JSON with armored ciphertext and key digest) -> append to
//! carrier with explicit trailer framing. The reveal path runs it in reverse
//! and verifies the key digest before undoing the cipher.
//!
//! This is concealment, not cryptography: the cipher is a reversible stream
//! obfuscator and the digest is a 32-bit fingerprint, not an authentication
//! tag.

#![forbid(unsafe_code)]

pub mod carrier;
pub mod cipher;
pub mod error;
pub mod file_ops;
pub mod key;
pub mod key_input;
pub mod record;

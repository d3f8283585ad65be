//! Reversible key-cycled XOR obfuscation
//!
//! This is a lightweight stream obfuscator, NOT cryptographically secure
//! authenticated encryption. It exists so the hidden message is not readable
//! by casually inspecting the carrier file.
//!
//! The transform operates on raw UTF-8 bytes rather than code points.
//! XOR-ing code points can land on unpaired surrogates or other invalid
//! scalars; byte-level XOR is total and loses nothing.

use crate::key::Key;

/// Applies the key-cycled XOR transform to `data`.
///
/// Byte `i` is XOR-ed with key byte `i mod key_len`. The key-index cycling is
/// purely positional, so the transform is its own inverse: applying it twice
/// with the same key returns the original bytes.
pub fn transform(data: &[u8], key: &Key) -> Vec<u8> {
    let key_bytes = key.as_bytes();
    data.iter()
        .enumerate()
        .map(|(i, b)| b ^ key_bytes[i % key_bytes.len()])
        .collect()
}

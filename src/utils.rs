// ============================================================================
// FILE: src/utils.rs
// ============================================================================

//! Utility functions used across the library.

use std::io::{self, Read};

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// Used by both CBC directions: plaintext ⊕ previous ciphertext before
/// encryption, decrypted block ⊕ previous ciphertext after decryption.
///
/// # Panics (by contract)
///
/// Panics if any of the three slices is shorter than 16 bytes. Callers pass
/// `expose_secret()` of 16-byte `SpanBuffer` aliases or `chunks_exact(16)` slices.
#[inline(always)]
pub const fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < 16 {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}

/// Read until `buf` is full or the reader reports EOF.
///
/// Returns the number of bytes placed in `buf`; anything less than
/// `buf.len()` means the input is exhausted. Interrupted reads are retried.
pub fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

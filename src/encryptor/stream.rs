//! src/encryptor/stream.rs
//! AES-256-CBC streaming encryption with PKCS#7 padding

use crate::aliases::{Aes256Key32, Block16, ChunkBuffer, ExposeSecret, ExposeSecretMut, Iv16};
use crate::consts::{BLOCK_SIZE, CHUNK_SIZE};
use crate::error::CipherShellError;
use crate::utils::{read_full, xor_blocks};
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes256Enc, Block as AesBlock};
use std::io::{Read, Write};
use zeroize::Zeroizing;

/// Encrypt everything `source` yields into `destination`.
///
/// Input is consumed in [`CHUNK_SIZE`] pieces; each piece is encrypted in
/// place and written before the next one is read. The last piece is padded,
/// so the output is always a whole, non-zero number of blocks. Returns the
/// number of ciphertext bytes written.
pub fn encrypt_stream<R, W>(
    mut source: R,
    mut destination: W,
    key: &Aes256Key32,
    iv: &Iv16,
) -> Result<u64, CipherShellError>
where
    R: Read,
    W: Write,
{
    let cipher = Aes256Enc::new(key.expose_secret().into());

    // previous ciphertext block, seeded with the IV
    let mut prev_block = Block16::new(Box::new(*iv.expose_secret()));
    let mut chunk: ChunkBuffer = Zeroizing::new(vec![0u8; CHUNK_SIZE]);
    let mut written = 0u64;

    loop {
        let n = read_full(&mut source, &mut chunk[..])?;
        let is_final = n < CHUNK_SIZE;
        let len = if is_final { pad_pkcs7(&mut chunk, n) } else { n };

        encrypt_blocks(&cipher, prev_block.expose_secret_mut(), &mut chunk[..len]);
        destination.write_all(&chunk[..len])?;
        written += len as u64;

        if is_final {
            break;
        }
    }

    destination.flush()?;
    tracing::debug!(bytes = written, "encrypted body");
    Ok(written)
}

/// Append PKCS#7 padding after `len` bytes and return the padded length.
///
/// `len` is below `buf.len()` and `buf.len()` is a block multiple, so the
/// padding always fits.
fn pad_pkcs7(buf: &mut [u8], len: usize) -> usize {
    let pad = BLOCK_SIZE - len % BLOCK_SIZE;
    buf[len..len + pad].fill(pad as u8);
    len + pad
}

/// CBC-encrypt whole blocks in place, carrying the chain in `prev`.
fn encrypt_blocks(cipher: &Aes256Enc, prev: &mut [u8; 16], data: &mut [u8]) {
    let mut xored = Block16::new(Box::new([0u8; 16]));
    for block in data.chunks_exact_mut(BLOCK_SIZE) {
        xor_blocks(block, &prev[..], xored.expose_secret_mut());

        let mut aes_block = AesBlock::from(*xored.expose_secret());
        cipher.encrypt_block(&mut aes_block);

        block.copy_from_slice(aes_block.as_slice());
        prev.copy_from_slice(block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encrypt_bytes(plaintext: &[u8]) -> Vec<u8> {
        let key = Aes256Key32::new(Box::new([0x42; 32]));
        let iv = Iv16::new(Box::new([0x24; 16]));
        let mut out = Vec::new();
        let written = encrypt_stream(Cursor::new(plaintext), &mut out, &key, &iv).unwrap();
        assert_eq!(written, out.len() as u64);
        out
    }

    #[test]
    fn cipher_state_is_wiped_on_drop() {
        fn wiped<T: zeroize::ZeroizeOnDrop>() {}
        wiped::<Aes256Enc>();
    }

    #[test]
    fn padding_lengths() {
        assert_eq!(encrypt_bytes(b"").len(), 16);
        assert_eq!(encrypt_bytes(&[7u8; 15]).len(), 16);
        assert_eq!(encrypt_bytes(&[7u8; 16]).len(), 32);
        assert_eq!(encrypt_bytes(&[7u8; CHUNK_SIZE]).len(), CHUNK_SIZE + 16);
        assert_eq!(encrypt_bytes(&[7u8; CHUNK_SIZE + 1]).len(), CHUNK_SIZE + 16);
    }

    #[test]
    fn pkcs7_fills_with_pad_length() {
        let mut buf = [0u8; 32];
        buf[..13].copy_from_slice(b"hello, world!");
        assert_eq!(pad_pkcs7(&mut buf, 13), 16);
        assert_eq!(&buf[13..16], &[3, 3, 3]);

        assert_eq!(pad_pkcs7(&mut buf, 16), 32);
        assert_eq!(&buf[16..32], &[16u8; 16]);
    }

    #[test]
    fn chaining_hides_repeated_blocks() {
        let ciphertext = encrypt_bytes(&[0u8; 48]);
        assert_ne!(ciphertext[0..16], ciphertext[16..32]);
        assert_ne!(ciphertext[16..32], ciphertext[32..48]);
    }
}

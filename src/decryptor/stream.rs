//! src/decryptor/stream.rs
//! AES-256-CBC streaming decryption with PKCS#7 unpadding
//!
//! Every failure here, truncated ciphertext and bad padding included, comes
//! back as `CipherShellError::Stream`, whose message does not say which.

use crate::aliases::{Aes256Key32, Block16, ChunkBuffer, ExposeSecret, ExposeSecretMut, Iv16};
use crate::consts::{BLOCK_SIZE, CHUNK_SIZE};
use crate::error::CipherShellError;
use crate::utils::{read_full, xor_blocks};
use aes::cipher::{BlockDecrypt, KeyInit};
use aes::{Aes256Dec, Block as AesBlock};
use std::io::{self, Read, Write};
use zeroize::{Zeroize, Zeroizing};

/// Decrypt the ciphertext body in `source` into `destination`.
///
/// Works chunk by chunk like [`encrypt_stream`](crate::encryptor::encrypt_stream).
/// The last plaintext block of each chunk is held back until more input shows
/// up, because only the final block carries padding. Returns the number of
/// plaintext bytes written.
pub fn decrypt_stream<R, W>(
    mut source: R,
    mut destination: W,
    key: &Aes256Key32,
    iv: &Iv16,
) -> Result<u64, CipherShellError>
where
    R: Read,
    W: Write,
{
    let cipher = Aes256Dec::new(key.expose_secret().into());

    let mut prev_block = Block16::new(Box::new(*iv.expose_secret()));
    let mut chunk: ChunkBuffer = Zeroizing::new(vec![0u8; CHUNK_SIZE]);
    let mut held = Block16::new(Box::new([0u8; 16]));
    let mut holding = false;
    let mut written = 0u64;

    loop {
        let n = read_full(&mut source, &mut chunk[..])?;
        if n == 0 {
            break;
        }
        if n % BLOCK_SIZE != 0 {
            return Err(corrupt("ciphertext is not a whole number of blocks"));
        }

        decrypt_blocks(&cipher, prev_block.expose_secret_mut(), &mut chunk[..n]);

        if holding {
            destination.write_all(held.expose_secret())?;
            written += BLOCK_SIZE as u64;
        }
        let (body, last) = chunk[..n].split_at(n - BLOCK_SIZE);
        destination.write_all(body)?;
        written += body.len() as u64;
        held.expose_secret_mut().copy_from_slice(last);
        holding = true;

        if n < CHUNK_SIZE {
            break;
        }
    }

    if !holding {
        return Err(corrupt("ciphertext is empty"));
    }

    let keep = unpad_pkcs7(held.expose_secret())?;
    destination.write_all(&held.expose_secret()[..keep])?;
    written += keep as u64;

    destination.flush()?;
    tracing::debug!(bytes = written, "decrypted body");
    Ok(written)
}

fn corrupt(reason: &'static str) -> CipherShellError {
    CipherShellError::Stream(io::Error::new(io::ErrorKind::InvalidData, reason))
}

/// Length of the message part of the final block.
///
/// The pad bytes are compared without an early exit.
fn unpad_pkcs7(block: &[u8; 16]) -> Result<usize, CipherShellError> {
    let pad = block[BLOCK_SIZE - 1] as usize;
    if pad == 0 || pad > BLOCK_SIZE {
        return Err(corrupt("invalid PKCS#7 padding"));
    }
    let mismatch = block[BLOCK_SIZE - pad..]
        .iter()
        .fold(0u8, |acc, &b| acc | (b ^ pad as u8));
    if mismatch != 0 {
        return Err(corrupt("invalid PKCS#7 padding"));
    }
    Ok(BLOCK_SIZE - pad)
}

/// CBC-decrypt whole blocks in place, carrying the chain in `prev`.
fn decrypt_blocks(cipher: &Aes256Dec, prev: &mut [u8; 16], data: &mut [u8]) {
    let mut aes_block = AesBlock::default();
    let mut ciphertext = [0u8; 16];
    for block in data.chunks_exact_mut(BLOCK_SIZE) {
        ciphertext.copy_from_slice(block);
        aes_block.copy_from_slice(&ciphertext);
        cipher.decrypt_block(&mut aes_block);

        xor_blocks(aes_block.as_slice(), &prev[..], block);
        *prev = ciphertext;
    }
    aes_block.as_mut_slice().zeroize();
}

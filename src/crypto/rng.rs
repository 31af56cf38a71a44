// src/crypto/rng.rs
//! Secure randomness for fixed-size values
//!
//! Adds `T::random()` to every `SecretBox<[u8; N]>` alias (`Salt16`, `Iv16`, …)
//! backed by the operating system CSPRNG.

use crate::aliases::{Iv16, Salt16};
use crate::error::CipherShellError;
use rand::{rngs::OsRng, TryRngCore};
use secrecy::SecretBox;

/// Extension trait – gives `.random()` to all fixed-size secret types
pub trait SecureRandomExt: Sized {
    /// Generate a cryptographically secure random instance of this type.
    ///
    /// An all-zero draw is discarded and redrawn, so the result is never all
    /// zeros.
    fn random() -> Result<Self, CipherShellError>;
}

impl<const N: usize> SecureRandomExt for SecretBox<[u8; N]> {
    fn random() -> Result<Self, CipherShellError> {
        let mut bytes = [0u8; N];
        loop {
            OsRng
                .try_fill_bytes(&mut bytes)
                .map_err(|e| CipherShellError::Crypto(format!("OS random source failed: {e}")))?;
            if N == 0 || bytes.iter().any(|&b| b != 0) {
                return Ok(SecretBox::new(Box::new(bytes)));
            }
        }
    }
}

/// Fresh random 16-byte PBKDF2 salt.
#[inline]
pub fn generate_salt() -> Result<Salt16, CipherShellError> {
    Salt16::random()
}

/// Fresh random 16-byte CBC initialization vector.
#[inline]
pub fn generate_initial_vector() -> Result<Iv16, CipherShellError> {
    Iv16::random()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aliases::ExposeSecret;
    use std::collections::HashSet;

    #[test]
    fn salts_are_unique_and_nonzero() {
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let salt = generate_salt().unwrap();
            assert_ne!(salt.expose_secret(), &[0u8; 16]);
            assert!(seen.insert(*salt.expose_secret()), "duplicate salt");
        }
    }

    #[test]
    fn ivs_are_unique_and_nonzero() {
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let iv = generate_initial_vector().unwrap();
            assert_eq!(iv.expose_secret().len(), 16);
            assert_ne!(iv.expose_secret(), &[0u8; 16]);
            assert!(seen.insert(*iv.expose_secret()), "duplicate iv");
        }
    }
}

//! src/crypto/kdf/pbkdf2.rs

use crate::aliases::{Aes256Key32, ExposeSecret, ExposeSecretMut, HmacSha256, PasswordString, Salt16};
use crate::consts::{KEY_LENGTH, PBKDF2_ITERATIONS};
use crate::error::CipherShellError;

use pbkdf2::pbkdf2;

/// Derive PBKDF2-HMAC-SHA256 directly into an `Aes256Key32` buffer.
///
/// The passphrase bytes are borrowed straight out of the secure wrapper, so no
/// unguarded copy of the passphrase exists at any point.
#[inline(always)]
pub fn derive_secure_pbkdf2_key(
    password: &PasswordString,
    salt: &Salt16,
    iterations: u32,
    out_key: &mut Aes256Key32,
) -> Result<(), CipherShellError> {
    if iterations == 0 {
        return Err(CipherShellError::Crypto("PBKDF2 iterations must be ≥1".into()));
    }

    pbkdf2::<HmacSha256>(
        password.expose_secret().as_bytes(),
        salt.expose_secret(),
        iterations,
        out_key.expose_secret_mut(),
    )
    .map_err(|e| CipherShellError::Crypto(format!("Key generation failed: {e}")))?;

    Ok(())
}

/// Derive the file key for `password` and `salt` with the fixed iteration count.
pub fn derive_key(password: &PasswordString, salt: &Salt16) -> Result<Aes256Key32, CipherShellError> {
    let mut key = Aes256Key32::new(Box::new([0u8; KEY_LENGTH]));
    derive_secure_pbkdf2_key(password, salt, PBKDF2_ITERATIONS, &mut key)?;
    tracing::debug!(iterations = PBKDF2_ITERATIONS, "derived file key");
    Ok(key)
}

//! # Secret Type Aliases
//!
//! Every buffer that holds a passphrase, a derived key or raw cipher state is
//! a [`secrecy::SecretBox`]. Its `Drop` overwrites the contents with zeros
//! before the allocation is released, and the value can only be read through
//! an explicit `.expose_secret()` / `.expose_secret_mut()`.
//!
//! ## Type Categories
//!
//! ### HMAC Primitive
//! - [`HmacSha256`] - PRF for PBKDF2 key derivation
//!
//! ### Fixed-Size Secrets
//! - [`Aes256Key32`] - 32-byte AES-256 key derived from the passphrase
//! - [`Block16`] - one AES block of plaintext or cipher state
//! - [`Iv16`] - 16-byte CBC initialization vector
//! - [`Salt16`] - 16-byte PBKDF2 salt
//!
//! ### Dynamic Secrets
//! - [`PasswordString`] - passphrase as typed by the user
//! - [`ChunkBuffer`] - heap buffer for one streaming chunk

use crate::consts::KEY_LENGTH;
use hmac::Hmac;
use secrecy::SecretBox;
use sha2::Sha256;
use zeroize::Zeroizing;

pub use secrecy::{ExposeSecret, ExposeSecretMut};

pub type HmacSha256 = Hmac<Sha256>;

// ─────────────────────────────────────────────────────────────────────────────
// SpanBuffer: generic fixed-size secret, wiped on drop
// ─────────────────────────────────────────────────────────────────────────────
pub type SpanBuffer<const N: usize> = SecretBox<[u8; N]>;

pub type Aes256Key32 = SpanBuffer<KEY_LENGTH>;
pub type Block16 = SpanBuffer<16>;
pub type Iv16 = SpanBuffer<16>;
pub type Salt16 = SpanBuffer<16>;

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────

/// Wiping covers the whole capacity of the string, not just its length.
pub type PasswordString = SecretBox<String>;

/// Plaintext passes through this buffer in both directions, so it is wiped too.
pub type ChunkBuffer = Zeroizing<Vec<u8>>;

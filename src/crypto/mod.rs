// src/crypto/mod.rs

//! Low-level crypto primitives: passphrase key derivation and secure randomness.
//!
//! HMAC types are defined in `aliases.rs`.

pub mod kdf;
pub mod rng;

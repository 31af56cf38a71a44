// src/decryptor/mod.rs

//! High-level decryption facade.
//!
//! Core API: `decrypt_file(path, password)?` for the whole file operation.
//! Helpers: `decrypt` for reader/writer pairs, `decrypt_body` when the header
//! has already been read, `decrypt_stream` for the raw CBC body.

pub(crate) mod decrypt;
pub(crate) mod stream;

pub use decrypt::{decrypt, decrypt_body, decrypt_file};
pub use stream::decrypt_stream;

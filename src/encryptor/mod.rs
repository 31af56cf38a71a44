// src/encryptor/mod.rs

//! High-level encryption facade.
//!
//! Core API: `encrypt_file(path, password)?` for the whole file operation.
//! Building blocks: `encrypt(input, output, &password, extension)?` for any
//! reader/writer pair, and `encrypt_stream` for the raw CBC body.

pub(crate) mod encrypt;
pub(crate) mod stream;

pub use encrypt::{encrypt, encrypt_file, encrypt_with_material};
pub use stream::encrypt_stream;

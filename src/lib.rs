// src/lib.rs

pub mod aliases;
pub mod consts;
pub mod crypto;
pub mod decryptor;
pub mod encryptor;
pub mod error;
pub mod header;
pub mod mode;
pub mod passphrase;
pub mod paths;
pub mod process;
pub mod utils;

// High-level API
pub use decryptor::{decrypt, decrypt_file};
pub use encryptor::{encrypt, encrypt_file};
pub use error::CipherShellError;
pub use mode::Mode;
pub use process::process_file;

pub use crypto::kdf::pbkdf2::{derive_key, derive_secure_pbkdf2_key};
pub use crypto::rng::{generate_initial_vector, generate_salt};
pub use header::{decode_header, encode_header, read_magic, FileHeader};
pub use passphrase::{acquire_passphrase, PassphraseSource, ReaderSource, TerminalSource};

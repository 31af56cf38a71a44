//! tests/common.rs
//! Common constants and utilities shared across test files

use ciphershell::ReaderSource;
use std::io::Cursor;

/// Passphrase used throughout the test suite.
#[allow(dead_code)] // Used across multiple test files
pub const TEST_PASSPHRASE: &str = "This is my super duper secret passphrase.";

/// Long enough to pass validation, but not the one used to encrypt.
#[allow(dead_code)]
pub const WRONG_PASSPHRASE: &str = "This is NOT my super duper secret passphrase.";

/// Salt and IV of the known-answer container below.
#[allow(dead_code)]
pub const VECTOR_SALT: [u8; 16] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
];
#[allow(dead_code)]
pub const VECTOR_IV: [u8; 16] = [
    0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f,
];
#[allow(dead_code)]
pub const VECTOR_PLAINTEXT: &[u8] = b"Hello, CipherShell!\n";

/// `VECTOR_PLAINTEXT` encrypted under `TEST_PASSPHRASE` with extension
/// "txt", `VECTOR_SALT` and `VECTOR_IV`. Produced with an independent
/// AES-256-CBC / PBKDF2-HMAC-SHA256 implementation.
#[allow(dead_code)]
pub const VECTOR_CONTAINER_HEX: &str = concat!(
    "454e4337333774787420",
    "000102030405060708090a0b0c0d0e0f",
    "101112131415161718191a1b1c1d1e1f",
    "596ef7cb628fb38a4cce7b9a96bf44a3",
    "cc3aac2c1dea2efd9bad9e3230e50b78",
);

#[allow(dead_code)]
pub fn vector_container() -> Vec<u8> {
    hex::decode(VECTOR_CONTAINER_HEX).expect("valid hex")
}

/// Passphrase source that answers prompts from a fixed script.
#[allow(dead_code)]
pub fn scripted(lines: &[&str]) -> ReaderSource<Cursor<String>, Vec<u8>> {
    let mut script = lines.join("\n");
    script.push('\n');
    ReaderSource::new(Cursor::new(script), Vec::new())
}

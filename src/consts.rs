//! # Constants
//!
//! Container layout, key-derivation parameters and passphrase policy.

/// Tag at offset 0 of every container written by this tool.
pub const MAGIC: [u8; 6] = *b"ENC737";

/// Width of the magic field.
pub const MAGIC_LENGTH: usize = 6;

/// Width of the stored original extension (space-padded / truncated).
pub const EXTENSION_LENGTH: usize = 4;

/// PBKDF2 salt size.
pub const SALT_LENGTH: usize = 16;

/// CBC initialization vector size (one AES block).
pub const IV_LENGTH: usize = 16;

/// Total header size: magic + extension + salt + iv.
pub const HEADER_LENGTH: usize = MAGIC_LENGTH + EXTENSION_LENGTH + SALT_LENGTH + IV_LENGTH;

/// PBKDF2-HMAC-SHA256 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 65_536;

/// Derived key length (AES-256).
pub const KEY_LENGTH: usize = 32;

/// AES block size.
pub const BLOCK_SIZE: usize = 16;

/// Streaming chunk size. Always a multiple of [`BLOCK_SIZE`].
pub const CHUNK_SIZE: usize = 8192;

/// Extension given to encrypted output files.
pub const ENCRYPTED_FILE_EXTENSION: &str = "enc";

/// Shortest passphrase accepted, in characters.
pub const MIN_PASSPHRASE_LENGTH: usize = 16;

/// Passphrase attempts before the operation is abandoned.
pub const MAX_PASSPHRASE_ATTEMPTS: u32 = 3;

const _: () = assert!(HEADER_LENGTH == 42);
const _: () = assert!(CHUNK_SIZE % BLOCK_SIZE == 0);

//! # Error Types
//!
//! Every fallible operation in the crate returns
//! [`Result<T, CipherShellError>`](CipherShellError). The `Display` text of
//! each variant is the single line shown to the user.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// The error type for all CipherShell operations.
#[derive(Error, Debug)]
pub enum CipherShellError {
    /// Bad invocation: wrong arguments, missing file, unknown operation,
    /// or an output path that would clobber the input.
    #[error("{0}")]
    Usage(String),

    /// The input is not a container produced by this tool. The path is
    /// attached once the failing file is known.
    #[error("{}", not_ours(.0.as_deref()))]
    Format(Option<PathBuf>),

    /// Passphrase acquisition failed for good: attempts exhausted or no
    /// input available.
    #[error("{0}")]
    Passphrase(String),

    /// Key derivation, randomness or cipher setup failed.
    #[error("Cryptographic error: {0}")]
    Crypto(String),

    /// Any failure while streaming the body, including a padding check that
    /// fails because of a wrong passphrase.
    ///
    /// The message is the same for every cause so a wrong passphrase cannot be
    /// told apart from a corrupted file.
    #[error("File processing error: Bad passphrase or corrupted file.")]
    Stream(#[from] std::io::Error),
}

fn not_ours(path: Option<&Path>) -> String {
    match path {
        Some(path) => format!("{} was not encrypted using this application.", path.display()),
        None => "Input was not encrypted using this application.".to_string(),
    }
}

impl CipherShellError {
    /// Format error for `path`.
    pub fn format(path: impl AsRef<Path>) -> Self {
        CipherShellError::Format(Some(path.as_ref().to_path_buf()))
    }

    /// Attach `path` to a format error that does not name its file yet.
    pub fn with_path(self, path: impl AsRef<Path>) -> Self {
        match self {
            CipherShellError::Format(None) => CipherShellError::format(path),
            other => other,
        }
    }

    /// Process exit status for this error. Every failure exits with 1.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

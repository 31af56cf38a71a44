//! Operation selector.

use crate::error::CipherShellError;
use std::fmt;
use std::str::FromStr;

/// Which direction a run goes. Passed explicitly to everything that cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encrypt,
    Decrypt,
}

impl Mode {
    /// Encryption asks for the passphrase twice.
    pub const fn needs_confirmation(self) -> bool {
        matches!(self, Mode::Encrypt)
    }
}

impl FromStr for Mode {
    type Err = CipherShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "encrypt" | "-e" => Ok(Mode::Encrypt),
            "decrypt" | "-d" => Ok(Mode::Decrypt),
            other => Err(CipherShellError::Usage(format!(
                "Unknown argument: {other}. Use 'encrypt' or 'decrypt'."
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Encrypt => "encrypt",
            Mode::Decrypt => "decrypt",
        })
    }
}

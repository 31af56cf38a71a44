//! One run of the tool: acquire a passphrase, then encrypt or decrypt a file.

use crate::decryptor::decrypt_file;
use crate::encryptor::encrypt_file;
use crate::error::CipherShellError;
use crate::header::read_magic;
use crate::mode::Mode;
use crate::passphrase::{acquire_passphrase, PassphraseSource};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Process `path` in `mode`, reading the passphrase from `source`.
///
/// The file must exist before any passphrase is requested. Returns the path
/// of the file that was written.
pub fn process_file<S>(path: &Path, mode: Mode, source: &mut S) -> Result<PathBuf, CipherShellError>
where
    S: PassphraseSource + ?Sized,
{
    if !path.is_file() {
        return Err(CipherShellError::Usage(format!(
            "File '{}' does not exist.",
            path.display()
        )));
    }

    if mode == Mode::Encrypt {
        if let Ok(true) = File::open(path).map_err(CipherShellError::from).and_then(read_magic) {
            tracing::warn!(path = %path.display(), "input already looks like an encrypted file");
        }
    }

    let passphrase = acquire_passphrase(source, mode)?;
    tracing::debug!(%mode, path = %path.display(), "passphrase accepted");

    match mode {
        Mode::Encrypt => encrypt_file(path, passphrase),
        Mode::Decrypt => decrypt_file(path, passphrase),
    }
}

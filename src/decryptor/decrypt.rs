//! src/decryptor/decrypt.rs
//! Container decryption: header check first, then the AES-256-CBC body

use crate::aliases::PasswordString;
use crate::crypto::kdf::pbkdf2::derive_key;
use crate::decryptor::stream::decrypt_stream;
use crate::error::CipherShellError;
use crate::header::{read_header, FileHeader};
use crate::paths::{decrypted_output_path, open_input, write_output};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// Decrypt a complete container from `input` into `output`.
///
/// The magic is checked before any key derivation or cipher work. Returns
/// the decoded header so callers can recover the original extension.
pub fn decrypt<R, W>(
    mut input: R,
    output: W,
    password: &PasswordString,
) -> Result<FileHeader, CipherShellError>
where
    R: Read,
    W: Write,
{
    let header = read_header(&mut input)?;
    header.validate_magic()?;
    decrypt_body(input, output, password, &header)?;
    Ok(header)
}

/// Decrypt the body that follows an already validated `header`.
pub fn decrypt_body<R, W>(
    input: R,
    output: W,
    password: &PasswordString,
    header: &FileHeader,
) -> Result<u64, CipherShellError>
where
    R: Read,
    W: Write,
{
    let key = derive_key(password, header.salt())?;
    decrypt_stream(input, output, &key, header.iv())
}

/// Decrypt the container at `path` next to it, restoring the extension kept
/// in the header, and return the output path.
///
/// Nothing is created unless the header is ours. Takes the passphrase by
/// value so it is wiped as soon as the key exists.
pub fn decrypt_file(path: &Path, password: PasswordString) -> Result<PathBuf, CipherShellError> {
    let mut input = BufReader::new(open_input(path)?);

    let header = read_header(&mut input).map_err(|e| e.with_path(path))?;
    header.validate_magic().map_err(|e| e.with_path(path))?;
    tracing::debug!(header = ?header, "read header");

    let output_path = decrypted_output_path(path, &header.extension())?;

    let key = derive_key(&password, header.salt())?;
    drop(password);

    let written = write_output(&output_path, |writer| {
        decrypt_stream(&mut input, writer, &key, header.iv())
    })?;

    tracing::info!(
        input = %path.display(),
        output = %output_path.display(),
        bytes = written,
        "file decrypted"
    );
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encryptor::encrypt;
    use std::io::Cursor;

    const PASSPHRASE: &str = "This is my super duper secret passphrase.";

    #[test]
    fn round_trip_recovers_extension() {
        let password = PasswordString::new(Box::new(PASSPHRASE.to_string()));
        let mut sealed = Vec::new();
        encrypt(Cursor::new(b"quarterly numbers"), &mut sealed, &password, "xlsx").unwrap();

        let mut opened = Vec::new();
        let header = decrypt(Cursor::new(&sealed), &mut opened, &password).unwrap();
        assert_eq!(opened, b"quarterly numbers");
        assert_eq!(header.extension(), "xlsx");
    }

    #[test]
    fn foreign_magic_stops_before_body() {
        let password = PasswordString::new(Box::new(PASSPHRASE.to_string()));
        let mut data = b"AESCRYPT-NOT-OURS".to_vec();
        data.resize(200, 0);

        let mut opened = Vec::new();
        let err = decrypt(Cursor::new(&data), &mut opened, &password).unwrap_err();
        assert!(matches!(err, CipherShellError::Format(None)));
        assert!(opened.is_empty());
    }
}

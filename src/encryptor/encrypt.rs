//! src/encryptor/encrypt.rs
//! Container encryption: header, then AES-256-CBC body

use crate::aliases::{Aes256Key32, Iv16, PasswordString, Salt16};
use crate::consts::HEADER_LENGTH;
use crate::crypto::kdf::pbkdf2::derive_key;
use crate::crypto::rng::{generate_initial_vector, generate_salt};
use crate::encryptor::stream::encrypt_stream;
use crate::error::CipherShellError;
use crate::header::{encode_header, write_header};
use crate::paths::{encrypted_output_path, open_input, original_extension, write_output};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// Encrypt `input` into a complete container on `output`.
///
/// A fresh salt and IV are drawn for every call. `extension` is the original
/// file extension to remember in the header (truncated to 4 bytes). Returns
/// the total number of bytes written, header included.
pub fn encrypt<R, W>(
    input: R,
    output: W,
    password: &PasswordString,
    extension: &str,
) -> Result<u64, CipherShellError>
where
    R: Read,
    W: Write,
{
    let salt = generate_salt()?;
    let iv = generate_initial_vector()?;
    encrypt_with_material(input, output, password, extension, &salt, &iv)
}

/// Like [`encrypt`], with caller-supplied salt and IV.
///
/// Output is fully deterministic, which is what known-answer tests and
/// benchmarks need. Never reuse an IV with the same passphrase and salt for
/// real data.
pub fn encrypt_with_material<R, W>(
    input: R,
    output: W,
    password: &PasswordString,
    extension: &str,
    salt: &Salt16,
    iv: &Iv16,
) -> Result<u64, CipherShellError>
where
    R: Read,
    W: Write,
{
    let key = derive_key(password, salt)?;
    write_container(input, output, &key, extension, salt, iv)
}

fn write_container<R, W>(
    input: R,
    mut output: W,
    key: &Aes256Key32,
    extension: &str,
    salt: &Salt16,
    iv: &Iv16,
) -> Result<u64, CipherShellError>
where
    R: Read,
    W: Write,
{
    write_header(&mut output, &encode_header(extension, salt, iv))?;
    tracing::debug!(extension, "wrote header");
    let body = encrypt_stream(input, &mut output, key, iv)?;
    Ok(HEADER_LENGTH as u64 + body)
}

/// Encrypt the file at `path` to `<stem>.enc` and return the output path.
///
/// Takes the passphrase by value: it is dropped, and so wiped, right after
/// the key has been derived.
pub fn encrypt_file(path: &Path, password: PasswordString) -> Result<PathBuf, CipherShellError> {
    let output_path = encrypted_output_path(path)?;
    let extension = original_extension(path);

    let salt = generate_salt()?;
    let iv = generate_initial_vector()?;
    let key = derive_key(&password, &salt)?;
    drop(password);

    let input = BufReader::new(open_input(path)?);
    let written = write_output(&output_path, |writer| {
        write_container(input, writer, &key, &extension, &salt, &iv)
    })?;

    tracing::info!(
        input = %path.display(),
        output = %output_path.display(),
        bytes = written,
        "file encrypted"
    );
    Ok(output_path)
}

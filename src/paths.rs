//! Output naming and output-file lifecycle.
//!
//! Encryption writes `<stem>.enc` next to the input; decryption writes
//! `<stem>.<extension from header>`. Output is staged in a temporary file and
//! only renamed into place once the transform has succeeded, so a failed run
//! neither leaves a plausible-looking file nor damages one that was there.

use crate::consts::ENCRYPTED_FILE_EXTENSION;
use crate::error::CipherShellError;
use std::fs::File;
use std::io::BufWriter;
use tempfile::NamedTempFile;
use std::path::{Path, PathBuf};

/// Extension of `path` without the dot, or `""` when it has none.
pub fn original_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `<stem>.enc` next to `path`.
pub fn encrypted_output_path(path: &Path) -> Result<PathBuf, CipherShellError> {
    let output = path.with_extension(ENCRYPTED_FILE_EXTENSION);
    refuse_overwrite(path, output)
}

/// `<stem>.<extension>` next to `path`, or just `<stem>` for an empty extension.
///
/// The extension comes out of a file header, so anything that is not a plain
/// extension (separators, NUL, dot segments) marks the header as foreign.
pub fn decrypted_output_path(path: &Path, extension: &str) -> Result<PathBuf, CipherShellError> {
    if extension.starts_with('.') || extension.contains(['/', '\\', '\0']) {
        return Err(CipherShellError::format(path));
    }
    let output = path.with_extension(extension);
    refuse_overwrite(path, output)
}

fn refuse_overwrite(input: &Path, output: PathBuf) -> Result<PathBuf, CipherShellError> {
    if output == input {
        return Err(CipherShellError::Usage(format!(
            "Refusing to overwrite '{}' with its own output.",
            input.display()
        )));
    }
    Ok(output)
}

/// Open an input file, reporting failures as usage errors.
pub(crate) fn open_input(path: &Path) -> Result<File, CipherShellError> {
    File::open(path).map_err(|e| {
        CipherShellError::Usage(format!("Cannot open '{}': {e}", path.display()))
    })
}

/// Run `write` against a temporary file next to `path`, then move it into
/// place.
///
/// Nothing at `path` is touched unless `write` succeeds; on failure the
/// temporary file is deleted and an existing file at `path` survives as is.
pub(crate) fn write_output<F>(path: &Path, write: F) -> Result<u64, CipherShellError>
where
    F: FnOnce(&mut BufWriter<NamedTempFile>) -> Result<u64, CipherShellError>,
{
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staged = NamedTempFile::new_in(parent).map_err(|e| {
        CipherShellError::Usage(format!("Cannot create '{}': {e}", path.display()))
    })?;
    let mut writer = BufWriter::new(staged);

    let written = match write(&mut writer) {
        Ok(written) => written,
        Err(e) => {
            tracing::warn!(path = %path.display(), "discarded incomplete output");
            return Err(e);
        }
    };

    let mut staged = writer.into_inner().map_err(|e| e.into_error())?;
    staged.as_file_mut().sync_all()?;
    staged.persist(path).map_err(|e| {
        CipherShellError::Usage(format!("Cannot create '{}': {}", path.display(), e.error))
    })?;
    Ok(written)
}

//! # Container Header
//!
//! Every container starts with a fixed 42-byte header:
//!
//! | Offset | Size | Field                                  |
//! |--------|------|----------------------------------------|
//! | 0      | 6    | magic `ENC737`                         |
//! | 6      | 4    | original extension, space-padded       |
//! | 10     | 16   | PBKDF2 salt                            |
//! | 26     | 16   | CBC initialization vector              |
//!
//! The ciphertext body follows immediately at offset 42.

use crate::aliases::{ExposeSecret, Iv16, Salt16};
use crate::consts::{
    EXTENSION_LENGTH, HEADER_LENGTH, IV_LENGTH, MAGIC, MAGIC_LENGTH, SALT_LENGTH,
};
use crate::error::CipherShellError;
use std::fmt;
use std::io::{self, Read, Write};

const EXTENSION_OFFSET: usize = MAGIC_LENGTH;
const SALT_OFFSET: usize = EXTENSION_OFFSET + EXTENSION_LENGTH;
const IV_OFFSET: usize = SALT_OFFSET + SALT_LENGTH;

/// Decoded container header.
pub struct FileHeader {
    magic: [u8; MAGIC_LENGTH],
    extension: [u8; EXTENSION_LENGTH],
    salt: Salt16,
    iv: Iv16,
}

impl FileHeader {
    pub fn magic(&self) -> &[u8; MAGIC_LENGTH] {
        &self.magic
    }

    /// Stored extension exactly as written, padding included.
    pub fn extension_bytes(&self) -> &[u8; EXTENSION_LENGTH] {
        &self.extension
    }

    /// Stored extension with the trailing padding spaces removed.
    pub fn extension(&self) -> String {
        String::from_utf8_lossy(&self.extension)
            .trim_end_matches(' ')
            .to_string()
    }

    pub fn salt(&self) -> &Salt16 {
        &self.salt
    }

    pub fn iv(&self) -> &Iv16 {
        &self.iv
    }

    /// Reject headers whose magic is not ours.
    ///
    /// The error carries no path; callers that know the file attach it with
    /// [`CipherShellError::with_path`].
    pub fn validate_magic(&self) -> Result<(), CipherShellError> {
        if self.magic != MAGIC {
            return Err(CipherShellError::Format(None));
        }
        Ok(())
    }

    /// Re-encode into the 42-byte wire form.
    pub fn to_bytes(&self) -> [u8; HEADER_LENGTH] {
        let mut out = [0u8; HEADER_LENGTH];
        out[..EXTENSION_OFFSET].copy_from_slice(&self.magic);
        out[EXTENSION_OFFSET..SALT_OFFSET].copy_from_slice(&self.extension);
        out[SALT_OFFSET..IV_OFFSET].copy_from_slice(self.salt.expose_secret());
        out[IV_OFFSET..].copy_from_slice(self.iv.expose_secret());
        out
    }
}

impl fmt::Display for FileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Magic Number: {}", String::from_utf8_lossy(&self.magic))?;
        writeln!(f, "File extension: {}", String::from_utf8_lossy(&self.extension))?;
        write!(f, "Total length of header in bytes: {HEADER_LENGTH}")
    }
}

impl fmt::Debug for FileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHeader")
            .field("magic", &String::from_utf8_lossy(&self.magic))
            .field("extension", &String::from_utf8_lossy(&self.extension))
            .finish_non_exhaustive()
    }
}

/// Fit an extension into the 4-byte field.
///
/// Keeps at most the first four characters, stopping early if the next
/// character's UTF-8 encoding would not fit, then pads with spaces.
pub fn pad_extension(extension: &str) -> [u8; EXTENSION_LENGTH] {
    let mut field = [b' '; EXTENSION_LENGTH];
    let mut len = 0;
    for ch in extension.chars().take(EXTENSION_LENGTH) {
        let width = ch.len_utf8();
        if len + width > EXTENSION_LENGTH {
            break;
        }
        ch.encode_utf8(&mut field[len..len + width]);
        len += width;
    }
    field
}

/// Build the header for a new container.
pub fn encode_header(extension: &str, salt: &Salt16, iv: &Iv16) -> [u8; HEADER_LENGTH] {
    let mut out = [0u8; HEADER_LENGTH];
    out[..EXTENSION_OFFSET].copy_from_slice(&MAGIC);
    out[EXTENSION_OFFSET..SALT_OFFSET].copy_from_slice(&pad_extension(extension));
    out[SALT_OFFSET..IV_OFFSET].copy_from_slice(salt.expose_secret());
    out[IV_OFFSET..].copy_from_slice(iv.expose_secret());
    out
}

/// Split a raw header into its fields. No validation happens here.
pub fn decode_header(bytes: &[u8; HEADER_LENGTH]) -> FileHeader {
    let mut magic = [0u8; MAGIC_LENGTH];
    let mut extension = [0u8; EXTENSION_LENGTH];
    let mut salt = [0u8; SALT_LENGTH];
    let mut iv = [0u8; IV_LENGTH];

    magic.copy_from_slice(&bytes[..EXTENSION_OFFSET]);
    extension.copy_from_slice(&bytes[EXTENSION_OFFSET..SALT_OFFSET]);
    salt.copy_from_slice(&bytes[SALT_OFFSET..IV_OFFSET]);
    iv.copy_from_slice(&bytes[IV_OFFSET..]);

    FileHeader {
        magic,
        extension,
        salt: Salt16::new(Box::new(salt)),
        iv: Iv16::new(Box::new(iv)),
    }
}

/// Read and decode the first [`HEADER_LENGTH`] bytes of `reader`.
///
/// An input too short to hold a header cannot be one of ours, so a premature
/// EOF is reported as a format error rather than an I/O failure.
pub fn read_header<R: Read>(reader: &mut R) -> Result<FileHeader, CipherShellError> {
    let mut bytes = [0u8; HEADER_LENGTH];
    match reader.read_exact(&mut bytes) {
        Ok(()) => Ok(decode_header(&bytes)),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(CipherShellError::Format(None)),
        Err(e) => Err(CipherShellError::Stream(e)),
    }
}

#[inline]
pub fn write_header<W: Write>(
    writer: &mut W,
    header: &[u8; HEADER_LENGTH],
) -> Result<(), CipherShellError> {
    writer.write_all(header).map_err(CipherShellError::Stream)
}

/// Quick check whether `reader` starts with the container magic.
///
/// Consumes at most [`MAGIC_LENGTH`] bytes. Inputs shorter than the magic
/// are simply not containers.
pub fn read_magic<R: Read>(mut reader: R) -> Result<bool, CipherShellError> {
    let mut magic = [0u8; MAGIC_LENGTH];
    match reader.read_exact(&mut magic) {
        Ok(()) => Ok(magic == MAGIC),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(CipherShellError::Stream(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn material() -> (Salt16, Iv16) {
        (Salt16::new(Box::new([0x11; 16])), Iv16::new(Box::new([0x22; 16])))
    }

    #[test]
    fn known_layout() {
        let (salt, iv) = material();
        let header = encode_header("txt", &salt, &iv);
        let expected = hex::decode(concat!(
            "454e43373337",                     // ENC737
            "74787420",                         // "txt "
            "11111111111111111111111111111111", // salt
            "22222222222222222222222222222222", // iv
        ))
        .unwrap();
        assert_eq!(header.as_slice(), expected.as_slice());
    }

    #[test]
    fn extension_padding_and_truncation() {
        assert_eq!(&pad_extension(""), b"    ");
        assert_eq!(&pad_extension("md"), b"md  ");
        assert_eq!(&pad_extension("json"), b"json");
        assert_eq!(&pad_extension("jpeg2000"), b"jpeg");
    }

    #[test]
    fn multibyte_extension_never_overflows_field() {
        // "é" is two bytes; the third one no longer fits.
        assert_eq!(&pad_extension("ééé"), "éé".as_bytes());
        assert_eq!(&pad_extension("aéé"), "aé ".as_bytes());
    }

    #[test]
    fn decode_splits_positionally() {
        let (salt, iv) = material();
        let header = decode_header(&encode_header("markdown", &salt, &iv));
        assert_eq!(header.magic(), &MAGIC);
        assert_eq!(header.extension_bytes(), b"mark");
        assert_eq!(header.extension(), "mark");
        assert_eq!(header.salt().expose_secret(), &[0x11; 16]);
        assert_eq!(header.iv().expose_secret(), &[0x22; 16]);
        assert!(header.validate_magic().is_ok());
    }

    #[test]
    fn to_bytes_reproduces_wire_form() {
        let (salt, iv) = material();
        let bytes = encode_header("rs", &salt, &iv);
        assert_eq!(decode_header(&bytes).to_bytes(), bytes);
    }

    #[test]
    fn foreign_magic_rejected() {
        let (salt, iv) = material();
        let mut bytes = encode_header("txt", &salt, &iv);
        bytes[..6].copy_from_slice(b"AES\x03\x00\x00");
        let err = decode_header(&bytes).validate_magic().unwrap_err();
        assert!(matches!(err, CipherShellError::Format(None)));
    }

    #[test]
    fn short_input_is_a_format_error() {
        let err = read_header(&mut Cursor::new(b"ENC737txt")).unwrap_err();
        assert!(matches!(err, CipherShellError::Format(None)));
    }

    #[test]
    fn read_header_leaves_body_in_reader() {
        let (salt, iv) = material();
        let mut data = encode_header("txt", &salt, &iv).to_vec();
        data.extend_from_slice(b"BODY");
        let mut reader = Cursor::new(data);
        let header = read_header(&mut reader).unwrap();
        assert_eq!(header.extension(), "txt");
        let mut rest = Vec::new();
        reader.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"BODY");
    }

    #[test]
    fn magic_check_on_readers() {
        assert!(read_magic(Cursor::new(b"ENC737 and more")).unwrap());
        assert!(!read_magic(Cursor::new(b"ENC73")).unwrap());
        assert!(!read_magic(Cursor::new(b"AES\x03\x00\x00")).unwrap());
    }

    #[test]
    fn display_hides_salt_and_iv() {
        let (salt, iv) = material();
        let header = decode_header(&encode_header("txt", &salt, &iv));
        let shown = header.to_string();
        assert_eq!(
            shown,
            "Magic Number: ENC737\nFile extension: txt \nTotal length of header in bytes: 42"
        );
        assert!(!format!("{header:?}").contains("17"));
    }
}

//! tests/stream_tests.rs
//! CBC body streaming with fixed keys, independent of key derivation

use ciphershell::aliases::{Aes256Key32, Iv16};
use ciphershell::decryptor::decrypt_stream;
use ciphershell::encryptor::encrypt_stream;
use proptest::prelude::*;
use std::io::Cursor;

fn material() -> (Aes256Key32, Iv16) {
    (Aes256Key32::new(Box::new([0x42; 32])), Iv16::new(Box::new([0x24; 16])))
}

#[test]
fn short_message_matches_reference() {
    let (key, iv) = material();
    let mut sealed = Vec::new();
    let written = encrypt_stream(Cursor::new(b"abc"), &mut sealed, &key, &iv).unwrap();

    assert_eq!(written, 16);
    assert_eq!(hex::encode(&sealed), "2c3c1f03d94873ab3a8e197f35306e8d");
}

#[test]
fn ciphertext_depends_on_iv() {
    let key = Aes256Key32::new(Box::new([0x42; 32]));
    let mut first = Vec::new();
    let mut second = Vec::new();
    encrypt_stream(Cursor::new(b"abc"), &mut first, &key, &Iv16::new(Box::new([0x24; 16]))).unwrap();
    encrypt_stream(Cursor::new(b"abc"), &mut second, &key, &Iv16::new(Box::new([0x25; 16]))).unwrap();
    assert_ne!(first, second);
}

#[test]
fn wrong_key_is_a_stream_error_or_garbage() {
    let (key, iv) = material();
    let mut sealed = Vec::new();
    encrypt_stream(Cursor::new(b"attack at dawn"), &mut sealed, &key, &iv).unwrap();

    let other = Aes256Key32::new(Box::new([0x43; 32]));
    let mut opened = Vec::new();
    match decrypt_stream(Cursor::new(&sealed), &mut opened, &other, &iv) {
        Err(err) => assert!(matches!(err, ciphershell::CipherShellError::Stream(_))),
        Ok(_) => assert_ne!(opened, b"attack at dawn"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn round_trip(data in proptest::collection::vec(any::<u8>(), 0..=20_000)) {
        let (key, iv) = material();
        let mut sealed = Vec::new();
        let sealed_len = encrypt_stream(Cursor::new(&data), &mut sealed, &key, &iv).unwrap();

        prop_assert_eq!(sealed_len as usize, sealed.len());
        prop_assert_eq!(sealed.len(), (data.len() / 16 + 1) * 16);

        let mut opened = Vec::new();
        let opened_len = decrypt_stream(Cursor::new(&sealed), &mut opened, &key, &iv).unwrap();
        prop_assert_eq!(opened_len as usize, data.len());
        prop_assert_eq!(opened, data);
    }

    #[test]
    fn ragged_ciphertext_is_rejected(len in 1usize..200) {
        prop_assume!(len % 16 != 0);
        let (key, iv) = material();
        let garbage = vec![0x5a; len];
        prop_assert!(decrypt_stream(Cursor::new(garbage), &mut Vec::new(), &key, &iv).is_err());
    }
}

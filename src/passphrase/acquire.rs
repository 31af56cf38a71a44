//! src/passphrase/acquire.rs
//! Prompt → validate → (confirm → compare) → accept, with a bounded retry count
//!
//! Each rejected entry is wiped explicitly before the next prompt. Entries
//! still alive on an error path are wiped when dropped.

use crate::aliases::{ExposeSecret, ExposeSecretMut, PasswordString};
use crate::consts::{MAX_PASSPHRASE_ATTEMPTS, MIN_PASSPHRASE_LENGTH};
use crate::error::CipherShellError;
use crate::mode::Mode;
use crate::passphrase::source::PassphraseSource;
use zeroize::Zeroize;

const ENTER_PROMPT: &str = "Enter passphrase (at least 16 characters): ";
const CONFIRM_PROMPT: &str = "Confirm passphrase: ";
const TOO_SHORT: &str = "Passphrase too short. Please try again.";
const MISMATCH: &str = "Passphrases do not match! Please try again.";
const TOO_MANY_ATTEMPTS: &str = "Too many attempts. Exiting...";

enum State {
    Prompt,
    Validate(PasswordString),
    ConfirmPrompt(PasswordString),
    Compare(PasswordString, PasswordString),
}

/// Overwrite a passphrase buffer with zeros.
#[inline]
pub fn wipe(passphrase: &mut PasswordString) {
    passphrase.expose_secret_mut().zeroize();
}

/// At least [`MIN_PASSPHRASE_LENGTH`] characters (not bytes).
pub fn is_valid_passphrase(passphrase: &PasswordString) -> bool {
    passphrase.expose_secret().chars().count() >= MIN_PASSPHRASE_LENGTH
}

/// Obtain a passphrase for `mode`.
///
/// Entries shorter than [`MIN_PASSPHRASE_LENGTH`] are rejected. For
/// [`Mode::Encrypt`] the entry must be typed twice and both must match.
/// Every rejection uses up one of [`MAX_PASSPHRASE_ATTEMPTS`]; running out
/// is a fatal [`CipherShellError::Passphrase`].
pub fn acquire_passphrase<S>(source: &mut S, mode: Mode) -> Result<PasswordString, CipherShellError>
where
    S: PassphraseSource + ?Sized,
{
    let mut attempts = 0u32;
    let mut state = State::Prompt;

    loop {
        state = match state {
            State::Prompt => {
                if attempts >= MAX_PASSPHRASE_ATTEMPTS {
                    tracing::info!(attempts, "passphrase attempts exhausted");
                    return Err(CipherShellError::Passphrase(TOO_MANY_ATTEMPTS.into()));
                }
                State::Validate(source.read_passphrase(ENTER_PROMPT)?)
            }

            State::Validate(mut entry) => {
                if !is_valid_passphrase(&entry) {
                    wipe(&mut entry);
                    attempts += 1;
                    tracing::info!(attempt = attempts, "passphrase rejected: too short");
                    source.notify(TOO_SHORT);
                    State::Prompt
                } else if mode.needs_confirmation() {
                    State::ConfirmPrompt(entry)
                } else {
                    return Ok(entry);
                }
            }

            State::ConfirmPrompt(entry) => {
                let confirmation = source.read_passphrase(CONFIRM_PROMPT)?;
                State::Compare(entry, confirmation)
            }

            State::Compare(mut entry, mut confirmation) => {
                if entry.expose_secret() == confirmation.expose_secret() {
                    wipe(&mut confirmation);
                    return Ok(entry);
                }
                wipe(&mut entry);
                wipe(&mut confirmation);
                attempts += 1;
                tracing::info!(attempt = attempts, "passphrase rejected: confirmation mismatch");
                source.notify(MISMATCH);
                State::Prompt
            }
        };
    }
}

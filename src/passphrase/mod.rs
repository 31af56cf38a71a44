// src/passphrase/mod.rs

//! Passphrase acquisition.
//!
//! [`acquire_passphrase`] runs the prompt/validate/confirm protocol against
//! any [`PassphraseSource`]: the no-echo [`TerminalSource`] for interactive
//! use, or [`ReaderSource`] for piped input and tests.

pub(crate) mod acquire;
pub(crate) mod source;

pub use acquire::{acquire_passphrase, is_valid_passphrase, wipe};
pub use source::{PassphraseSource, ReaderSource, TerminalSource};

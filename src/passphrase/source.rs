//! src/passphrase/source.rs
//! Where passphrases come from

use crate::aliases::PasswordString;
use crate::error::CipherShellError;
use std::io::{self, BufRead, IsTerminal, Write};
use zeroize::{Zeroize, Zeroizing};

/// Initial line buffer, large enough that typical entries never reallocate.
const LINE_CAPACITY: usize = 256;

/// Something that can be asked for a passphrase.
pub trait PassphraseSource {
    /// Show `prompt` and read one passphrase entry.
    ///
    /// Errors are fatal: the protocol does not retry a broken source.
    fn read_passphrase(&mut self, prompt: &str) -> Result<PasswordString, CipherShellError>;

    /// Tell the user why an entry was rejected.
    fn notify(&mut self, message: &str);
}

/// Interactive terminal input without echo.
///
/// Without a terminal on stdin the first read fails, which ends the run.
#[derive(Debug, Default)]
pub struct TerminalSource;

impl TerminalSource {
    pub fn new() -> Self {
        Self
    }
}

impl PassphraseSource for TerminalSource {
    fn read_passphrase(&mut self, prompt: &str) -> Result<PasswordString, CipherShellError> {
        if !std::io::stdin().is_terminal() {
            return Err(CipherShellError::Passphrase(
                "No console available. This application must be run from a console.".into(),
            ));
        }
        let entry = rpassword::prompt_password(prompt).map_err(|e| {
            CipherShellError::Passphrase(format!("Unable to read passphrase: {e}"))
        })?;
        Ok(PasswordString::new(Box::new(entry)))
    }

    fn notify(&mut self, message: &str) {
        println!("{message}\n");
    }
}

/// Line-oriented input from any reader, one passphrase per line.
///
/// Prompts and notices go to `output`. Used for `--passphrase-source stdin`
/// and for driving the protocol deterministically in tests.
#[derive(Debug)]
pub struct ReaderSource<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ReaderSource<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> ReaderSource<R, W> {
    /// Read one line, newline included, into a buffer that is wiped whenever
    /// it is outgrown or dropped. Empty means end of input.
    fn read_secret_line(&mut self) -> io::Result<Zeroizing<Vec<u8>>> {
        let mut line = Zeroizing::new(Vec::with_capacity(LINE_CAPACITY));
        loop {
            let available = match self.input.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(line);
            }

            let (take, done) = match available.iter().position(|&b| b == b'\n') {
                Some(i) => (i + 1, true),
                None => (available.len(), false),
            };
            if line.len() + take > line.capacity() {
                // grow by hand so the old allocation is wiped, not just freed
                let mut bigger = Zeroizing::new(Vec::with_capacity((line.len() + take).max(line.capacity() * 2)));
                bigger.extend_from_slice(&line);
                line = bigger;
            }
            line.extend_from_slice(&available[..take]);
            self.input.consume(take);

            if done {
                return Ok(line);
            }
        }
    }

    fn show(&mut self, text: &str) {
        if let Err(e) = write!(self.output, "{text}").and_then(|()| self.output.flush()) {
            tracing::debug!(error = %e, "could not write to passphrase output");
        }
    }
}

impl<R: BufRead, W: Write> PassphraseSource for ReaderSource<R, W> {
    fn read_passphrase(&mut self, prompt: &str) -> Result<PasswordString, CipherShellError> {
        // a closed output must not block input
        self.show(prompt);

        let mut line = self.read_secret_line().map_err(|e| {
            CipherShellError::Passphrase(format!("Unable to read passphrase: {e}"))
        })?;
        if line.is_empty() {
            return Err(CipherShellError::Passphrase("Passphrase input closed.".into()));
        }
        while matches!(line.last(), Some(b'\n' | b'\r')) {
            line.pop();
        }

        match String::from_utf8(std::mem::take(&mut *line)) {
            Ok(entry) => Ok(PasswordString::new(Box::new(entry))),
            Err(e) => {
                e.into_bytes().zeroize();
                Err(CipherShellError::Passphrase(
                    "Unable to read passphrase: input is not valid UTF-8".into(),
                ))
            }
        }
    }

    fn notify(&mut self, message: &str) {
        self.show(&format!("{message}\n\n"));
    }
}

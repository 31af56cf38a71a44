//! ciphershell: encrypt or decrypt one file with a passphrase
//!
//!   ciphershell encrypt report.txt   → report.enc
//!   ciphershell -d report.enc        → report.txt
//!
//! Exit status is 0 on success and 1 on any failure.

use ciphershell::{process_file, Mode, PassphraseSource, ReaderSource, TerminalSource};
use ciphershell::CipherShellError;
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "ciphershell",
    version,
    about = "Encrypt or decrypt a single file with a passphrase",
    override_usage = "ciphershell <encrypt|decrypt> <filename>"
)]
struct Cli {
    /// Operation: `encrypt` (`-e`) or `decrypt` (`-d`)
    #[arg(value_name = "OPERATION", allow_hyphen_values = true)]
    operation: String,

    /// File to encrypt or decrypt
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Where passphrases are read from
    #[arg(
        long,
        value_enum,
        env = "CIPHERSHELL_PASSPHRASE_SOURCE",
        default_value_t = PassphraseInput::Terminal
    )]
    passphrase_source: PassphraseInput,

    /// Print nothing on success
    #[arg(long, short = 'q')]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PassphraseInput {
    /// Interactive prompt without echo
    Terminal,
    /// One passphrase per line on standard input
    Stdin,
}

fn init_tracing() {
    // stdout carries status lines only
    let filter = EnvFilter::try_from_env("CIPHERSHELL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(Mode, PathBuf), CipherShellError> {
    let mode: Mode = cli.operation.parse()?;

    let mut source: Box<dyn PassphraseSource> = match cli.passphrase_source {
        PassphraseInput::Terminal => Box::new(TerminalSource::new()),
        PassphraseInput::Stdin => Box::new(ReaderSource::new(io::stdin().lock(), io::stderr())),
    };

    let output = process_file(&cli.file, mode, source.as_mut())?;
    Ok((mode, output))
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing();

    match run(&cli) {
        Ok((mode, output)) => {
            if !cli.quiet {
                println!("File successfully {mode}ed!");
                println!("Output written to {}", output.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

//! uefappend CLI
//!
//! Appends Acorn Atom ATM and TAP files to a UEF tape image, creating the
//! image if it does not exist.
//!
//! ```text
//! uefappend games.uef invaders.atm galaxian.atm
//! ```
//!
//! # Exit codes
//!
//! - `0` - every readable input was appended
//! - `1` - I/O failure while reading an input or writing the container
//! - `2` - invalid arguments
//! - `3` - the target exists but is not a UEF file
//! - `4` - the target could not be opened for writing

mod append;
mod report;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;
use uefappend_core::{Config, CoreError};

/// Append Acorn Atom ATM/TAP files to a UEF tape image.
#[derive(Parser, Debug)]
#[command(name = "uefappend")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// UEF file to append to; created if missing
    target: PathBuf,

    /// ATM or TAP files to append, in order
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Baud rate recorded in a newly created UEF
    #[arg(short, long, default_value_t = 300)]
    baud: u16,

    /// Summary format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// How the run summary is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One line per input
    Text,
    /// A JSON document
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG takes precedence over --verbose
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::new().baud_rate(cli.baud);
    let report = match append::run(&cli.target, &cli.inputs, config) {
        Ok(report) => report,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(exit_code(&err));
        }
    };

    if let Err(err) = report::print(&report, cli.format) {
        error!("could not print summary: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Maps a fatal error to the process exit code.
fn exit_code(err: &CoreError) -> u8 {
    match err {
        CoreError::WrongFileType => 3,
        CoreError::CannotWrite { .. } => 4,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_target_and_inputs() {
        let cli = Cli::try_parse_from(["uefappend", "out.uef", "a.atm", "b.tap"]).unwrap();
        assert_eq!(cli.target, PathBuf::from("out.uef"));
        assert_eq!(cli.inputs, [PathBuf::from("a.atm"), PathBuf::from("b.tap")]);
        assert_eq!(cli.baud, 300);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.verbose);
    }

    #[test]
    fn requires_at_least_one_input() {
        let err = Cli::try_parse_from(["uefappend", "out.uef"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn parses_options() {
        let cli = Cli::try_parse_from([
            "uefappend", "-v", "--baud", "1200", "--format", "json", "out.uef", "a.atm",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.baud, 1200);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn fatal_errors_have_distinct_codes() {
        assert_eq!(exit_code(&CoreError::WrongFileType), 3);
        let io = CoreError::Io(std::io::Error::other("disk full"));
        assert_eq!(exit_code(&io), 1);
    }
}

//! Command handlers for the `leanscan` CLI.
//!
//! Each submodule implements one command. Shared utilities (file reading,
//! scanner option parsing) live here in the module root.

mod check;
mod host;
mod lex;

pub use check::check_file;
pub use lex::lex_file;

use lean_scanner::{Scanner, ScannerConfig};

/// Build a scanner from command-line flags. Unknown flags are returned.
pub fn parse_scanner_flags<'a>(args: &'a [String]) -> Result<Scanner, &'a str> {
    let mut config = ScannerConfig::default();
    for arg in args {
        match arg.as_str() {
            "--recovery-bailout" => config.recovery_bailout = true,
            "--keep-blocks-at-eof" => config.close_blocks_at_eof = false,
            other => return Err(other),
        }
    }
    Ok(Scanner::new(config))
}

/// Read a source file, exiting with a message on failure.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

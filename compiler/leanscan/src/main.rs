//! `leanscan`: debug driver for the Lean 4 external scanner.

mod commands;

use commands::{check_file, lex_file, parse_scanner_flags};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "lex" | "check" => {
            if args.len() < 3 {
                eprintln!("Usage: leanscan {command} <file> [options]");
                std::process::exit(1);
            }
            let scanner = match parse_scanner_flags(&args[3..]) {
                Ok(scanner) => scanner,
                Err(flag) => {
                    eprintln!("error: unknown option '{flag}'");
                    eprintln!();
                    print_usage();
                    std::process::exit(1);
                }
            };
            if command == "lex" {
                lex_file(&args[2], scanner);
            } else {
                check_file(&args[2], scanner);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("leanscan {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

/// Install a `tracing` subscriber on stderr, only when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        let filter = EnvFilter::from_default_env();
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
        tracing::debug!("tracing initialized");
    }
}

fn print_usage() {
    println!("leanscan: inspect the external scanner's token stream");
    println!();
    println!("Usage: leanscan <command> <file> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file>      Print external and ordinary tokens");
    println!("  check <file>    Report unterminated literals and unbalanced brackets");
    println!("  help            Show this help message");
    println!("  version         Show version information");
    println!();
    println!("Options:");
    println!("  --recovery-bailout    Match nothing while the parser is recovering");
    println!("  --keep-blocks-at-eof  Do not close open layout blocks at end of input");
    println!();
    println!("Set RUST_LOG=lean_scanner=trace to log every scanner decision.");
}

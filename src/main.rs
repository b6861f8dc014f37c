//! Teller Engine CLI
//!
//! Command-line front end for the transaction processor.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- accounts.txt transactions.txt < requests.txt
//! ```
//!
//! The program loads the current-accounts file into the in-memory ledger,
//! reads transaction requests line by line from standard input, prints each
//! response to standard output, and writes the daily transaction log to the
//! given sink path at logout. Diagnostics go to standard error and are
//! controlled with `RUST_LOG`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Fatal error (accounts file missing or unreadable, I/O failure)

use std::io;
use std::process;
use teller_engine::cli;
use teller_engine::io::{accounts_file, LineReader};
use teller_engine::TellerEngine;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // Diagnostics to stderr only; stdout carries protocol responses.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();

    // Load the ledger; a missing accounts file is fatal.
    let ledger = match accounts_file::load_ledger(&args.accounts_file) {
        Ok(ledger) => ledger,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let mut engine = TellerEngine::new(ledger, &args.transaction_log);

    // Drive the request stream from stdin, responses to stdout.
    let stdin = io::stdin();
    let mut reader = LineReader::new(stdin.lock());
    let mut stdout = io::stdout();
    if let Err(e) = engine.run(&mut reader, &mut stdout) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

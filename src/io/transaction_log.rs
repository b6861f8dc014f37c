//! Daily transaction log
//!
//! Accumulates the fixed-shape records a session produces and rewrites the
//! sink file at logout. Record layout, fields space-separated:
//!
//! ```text
//! CC NNNNNNNNNNNNNNNNNNNN AAAAA MMMMM.MM XX
//! ```
//!
//! - `CC`: two-character operation code
//! - name: 20 characters, left-justified, padded or truncated
//! - account number: 5 characters, right-justified
//! - amount: 8 characters, zero-left-padded, exactly 2 fractional digits
//! - `XX`: two-character miscellaneous field, blank by default
//!
//! The end-of-session record uses code `00`, an empty name, number `00000`
//! and amount `0.00`.

use rust_decimal::Decimal;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Operation code for a withdrawal record.
pub const WITHDRAWAL_CODE: &str = "01";

/// End-of-session operation code.
pub const END_OF_SESSION_CODE: &str = "00";

/// Pending transaction log
///
/// Append-only while sessions run; records accumulate across sessions and
/// each flush rewrites the whole sink, so a multi-session run emits every
/// session's records, each slice terminated by its own `00` record.
#[derive(Debug, Default)]
pub struct TransactionLog {
    records: Vec<String>,
}

impl TransactionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        TransactionLog::default()
    }

    /// Format one record line.
    pub fn format_record(code: &str, name: &str, number: &str, amount: Decimal) -> String {
        // Zero-padding a preformatted amount string keeps the sign and the
        // two fractional digits in the fixed eight columns.
        let amount = format!("{:0>8}", format!("{:.2}", amount));
        format!("{code} {name:<20.20} {number:>5} {amount}   ")
    }

    /// Append a record for a completed transaction.
    pub fn append(&mut self, code: &str, name: &str, number: &str, amount: Decimal) {
        self.records
            .push(Self::format_record(code, name, number, amount));
    }

    /// Append the end-of-session record.
    pub fn append_end_of_session(&mut self) {
        self.append(END_OF_SESSION_CODE, "", "00000", Decimal::ZERO);
    }

    /// Accumulated records, in order.
    pub fn records(&self) -> &[String] {
        &self.records
    }

    /// Write every record to `sink`, one per line.
    pub fn write_to(&self, sink: &mut dyn Write) -> std::io::Result<()> {
        for record in &self.records {
            writeln!(sink, "{record}")?;
        }
        sink.flush()
    }

    /// Truncate and rewrite the sink file at `path`.
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        let mut sink = BufWriter::new(File::create(path)?);
        self.write_to(&mut sink)
    }
}

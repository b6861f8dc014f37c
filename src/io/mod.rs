//! I/O module
//!
//! Handles the request stream and both file formats.
//!
//! # Components
//!
//! - `line_reader` - buffered request reader with one-line pushback
//! - `accounts_file` - dual-format accounts-file parser and ledger loader
//! - `transaction_log` - fixed-shape daily transaction log and sink writer

pub mod accounts_file;
pub mod line_reader;
pub mod transaction_log;

pub use accounts_file::{load_ledger, parse_account_line};
pub use line_reader::LineReader;
pub use transaction_log::TransactionLog;

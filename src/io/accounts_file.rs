//! Accounts-file loading
//!
//! The current-accounts file arrives in one of two layouts, sometimes mixed
//! within one file:
//!
//! 1. Fixed-width: columns 0-4 number, 6-25 name, 27 status (`A`/`D`),
//!    29-36 balance, with single spaces at columns 5, 26 and 28.
//! 2. Space-delimited fallback: `NNNNN NAME... S BALANCE [PP]` where the
//!    optional trailing two-letter token is a plan suffix this model ignores.
//!
//! A record numbered `00000` is the end-of-file sentinel and terminates the
//! load early. Blank and unparseable lines are skipped. All parsing is pure
//! (no I/O) so the format rules are testable without touching disk.

use crate::core::AccountLedger;
use crate::types::{Account, AccountStatus, TellerError};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// Load the ledger from the accounts file at `path`.
///
/// A missing or unreadable file is fatal; individual junk lines are not.
///
/// # Errors
///
/// Returns [`TellerError::AccountsFileNotFound`] when the path does not
/// exist, or [`TellerError::Io`] for any other read failure.
pub fn load_ledger(path: &Path) -> Result<AccountLedger, TellerError> {
    if !path.exists() {
        return Err(TellerError::AccountsFileNotFound {
            path: path.display().to_string(),
        });
    }
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut ledger = AccountLedger::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if is_sentinel(&line) {
            break;
        }
        match parse_account_line(&line) {
            Some(account) => ledger.insert(account),
            None => warn!(line = %line, "skipping unparseable accounts-file line"),
        }
    }

    debug!(accounts = ledger.len(), path = %path.display(), "ledger loaded");
    Ok(ledger)
}

/// End-of-file sentinel: a record numbered `00000`.
fn is_sentinel(line: &str) -> bool {
    line.starts_with("00000") || line.split_whitespace().next() == Some("00000")
}

/// Parse one accounts-file line into an account record.
///
/// Tries the fixed-width layout first, then the space-delimited fallback;
/// returns `None` when neither matches.
pub fn parse_account_line(line: &str) -> Option<Account> {
    parse_fixed_width(line).or_else(|| parse_delimited(line))
}

/// Fixed-width layout, accepted only when the separator columns and the
/// status byte match exactly.
fn parse_fixed_width(line: &str) -> Option<Account> {
    // `get` rather than indexing: a separator column landing inside a
    // multi-byte character must fall through to the delimited parser, not
    // panic.
    let number = line.get(0..5)?;
    let status = line.get(27..28)?;
    let looks_fixed_width = number.bytes().all(|b| b.is_ascii_digit())
        && line.get(5..6)? == " "
        && line.get(26..27)? == " "
        && line.get(28..29)? == " "
        && matches!(status, "A" | "D");
    if !looks_fixed_width {
        return None;
    }

    let balance = Decimal::from_str(line.get(29..37)?.trim()).ok()?;
    Some(Account {
        number: number.to_string(),
        holder: line.get(6..26)?.trim().to_string(),
        status: AccountStatus::from_code(status),
        balance,
    })
}

/// Space-delimited fallback layout, with an optional two-letter plan suffix.
fn parse_delimited(line: &str) -> Option<Account> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return None;
    }

    let has_plan_suffix = {
        let last = parts[parts.len() - 1];
        last.len() == 2 && last.chars().all(|c| c.is_alphabetic())
    };

    let (status, balance_str, name_parts) = if has_plan_suffix {
        if parts.len() < 5 {
            return None;
        }
        (
            parts[parts.len() - 3],
            parts[parts.len() - 2],
            &parts[1..parts.len() - 3],
        )
    } else {
        (
            parts[parts.len() - 2],
            parts[parts.len() - 1],
            &parts[1..parts.len() - 2],
        )
    };

    let balance = Decimal::from_str(balance_str).ok()?;
    Some(Account {
        number: parts[0].to_string(),
        holder: name_parts.join(" "),
        status: AccountStatus::from_code(status),
        balance,
    })
}

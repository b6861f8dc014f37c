//! Account-related types for the teller engine
//!
//! This module defines the account record held in the ledger and the
//! status flag that gates transactions against it.

use rust_decimal::Decimal;

/// Account number as it appears on the wire and in the accounts file.
///
/// Well-formed numbers are five ASCII digits, zero-padded (`"10001"`).
/// The ledger is keyed by the raw string so that handlers which skip the
/// shape check can still run their existence lookups on unvalidated input.
pub type AccountNumber = String;

/// Activity status of an account
///
/// Disabled accounts stay in the ledger but reject every money-movement
/// transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    /// Account accepts transactions
    Active,
    /// Account is frozen; money movement against it is rejected
    Disabled,
}

impl AccountStatus {
    /// Map the one-byte status field of the accounts file.
    ///
    /// `D` means disabled; any other status byte is treated as active.
    pub fn from_code(code: &str) -> Self {
        if code == "D" {
            AccountStatus::Disabled
        } else {
            AccountStatus::Active
        }
    }
}

/// A single account record in the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Five-digit account number, unique within the ledger
    pub number: AccountNumber,

    /// Holder name, at most 20 characters for accounts created in-process
    pub holder: String,

    /// Active or disabled
    pub status: AccountStatus,

    /// Current balance, two-decimal-place currency
    pub balance: Decimal,
}

impl Account {
    /// Create a new active account record.
    pub fn new(number: impl Into<AccountNumber>, holder: impl Into<String>, balance: Decimal) -> Self {
        Account {
            number: number.into(),
            holder: holder.into(),
            status: AccountStatus::Active,
            balance,
        }
    }
}

/// Check the syntactic account-number shape: exactly five ASCII digits.
pub fn is_well_formed_number(number: &str) -> bool {
    number.len() == 5 && number.bytes().all(|b| b.is_ascii_digit())
}

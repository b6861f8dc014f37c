//! Account ledger
//!
//! This module provides the `AccountLedger` struct which owns the in-memory
//! map of account records and every operation that touches it. All access is
//! sequential; the engine is the only caller.
//!
//! The ledger is responsible for:
//! - Existence, status, ownership and balance lookups
//! - Inserting, removing and disabling records
//! - Allocating the next available account number

use crate::types::{Account, AccountNumber, AccountStatus};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Lowest account number handed out by [`AccountLedger::next_available_number`].
const FIRST_ACCOUNT_NUMBER: u32 = 10_001;

/// Allocation stops before this bound; `99999` itself is never assigned.
const ACCOUNT_NUMBER_BOUND: u32 = 99_999;

/// In-memory table of account records keyed by account number
#[derive(Debug, Default)]
pub struct AccountLedger {
    accounts: HashMap<AccountNumber, Account>,
}

impl AccountLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        AccountLedger::default()
    }

    /// Whether the ledger holds an account with this number.
    pub fn contains(&self, number: &str) -> bool {
        self.accounts.contains_key(number)
    }

    /// Whether the account exists and is disabled.
    pub fn is_disabled(&self, number: &str) -> bool {
        self.accounts
            .get(number)
            .is_some_and(|account| account.status == AccountStatus::Disabled)
    }

    /// Whether the account exists and is held by `holder`.
    pub fn is_owned_by(&self, number: &str, holder: &str) -> bool {
        self.accounts
            .get(number)
            .is_some_and(|account| account.holder == holder)
    }

    /// Current balance, `None` for an unknown number.
    pub fn balance(&self, number: &str) -> Option<Decimal> {
        self.accounts.get(number).map(|account| account.balance)
    }

    /// Overwrite the balance of an existing account; no-op for an unknown
    /// number.
    pub fn set_balance(&mut self, number: &str, balance: Decimal) {
        if let Some(account) = self.accounts.get_mut(number) {
            account.balance = balance;
        }
    }

    /// Whether any record carries this holder name (linear scan).
    pub fn holder_exists(&self, holder: &str) -> bool {
        self.accounts
            .values()
            .any(|account| account.holder == holder)
    }

    /// Insert a record, replacing any record under the same number.
    pub fn insert(&mut self, account: Account) {
        self.accounts.insert(account.number.clone(), account);
    }

    /// Remove a record if present.
    pub fn remove(&mut self, number: &str) {
        self.accounts.remove(number);
    }

    /// Set an existing account's status to disabled; no-op for an unknown
    /// number.
    pub fn disable(&mut self, number: &str) {
        if let Some(account) = self.accounts.get_mut(number) {
            account.status = AccountStatus::Disabled;
        }
    }

    /// First unused account number, scanning ascending from 10001.
    ///
    /// Returns `None` once the range below 99999 is exhausted.
    pub fn next_available_number(&self) -> Option<AccountNumber> {
        (FIRST_ACCOUNT_NUMBER..ACCOUNT_NUMBER_BOUND)
            .map(|n| format!("{n:05}"))
            .find(|number| !self.accounts.contains_key(number))
    }

    /// Number of records in the ledger.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Iterate over all records in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }
}

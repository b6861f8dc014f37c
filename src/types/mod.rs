//! Types module
//!
//! Contains core data structures used throughout the application:
//! - `account`: ledger account records and the account-number shape
//! - `transaction`: request codes, the arity table, and typed request shapes
//! - `error`: fatal errors and per-transaction rejections

pub mod account;
pub mod error;
pub mod transaction;

pub use account::{is_well_formed_number, Account, AccountNumber, AccountStatus};
pub use error::{Rejection, TellerError};
pub use transaction::{
    AccountAmount, CreateParams, HolderAccount, PaybillParams, RequestCode, TransactionKind,
    TransactionRequest, TransferParams,
};

//! Error types for the teller engine
//!
//! Two layers with very different lifecycles:
//!
//! - [`TellerError`] is for fatal, process-level failures (accounts file
//!   missing, I/O failure flushing the transaction log). These propagate
//!   with `?` and terminate the run.
//! - [`Rejection`] is for per-transaction validation failures. Each variant's
//!   `Display` is the exact response line the protocol emits; rejections are
//!   recoverable, leave the ledger untouched, and never terminate the
//!   process.

use thiserror::Error;

/// Fatal error for the teller engine
///
/// Everything here ends the run: there is no retry policy, and the caller
/// reports the message on stderr with a non-zero exit status.
#[derive(Debug, Error)]
pub enum TellerError {
    /// Accounts file not found at the specified path
    ///
    /// Raised at startup before any transaction is read.
    #[error("Accounts file not found: {path}")]
    AccountsFileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error while reading input or writing the transaction log
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },
}

impl From<std::io::Error> for TellerError {
    fn from(error: std::io::Error) -> Self {
        TellerError::Io {
            message: error.to_string(),
        }
    }
}

/// A rejected transaction
///
/// The `Display` of each variant is the response line returned to the
/// client, so the engine can answer with `rejection.to_string()` and tests
/// can assert on variants instead of strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Non-session transaction before the first successful login
    #[error("Transaction rejected. Login required.")]
    LoginRequiredNeverLoggedIn,

    /// Non-session transaction while logged out, after some login succeeded
    #[error("Login required.")]
    LoginRequired,

    /// Login while a session is already active
    #[error("Already logged in.")]
    AlreadyLoggedIn,

    /// Logout with no active session
    #[error("No active session.")]
    NoActiveSession,

    /// A required parameter line is empty, or the login mode is unknown
    #[error("Malformed input.")]
    MalformedInput,

    /// Account number fails the five-digit shape check, or a paybill names
    /// an account the ledger does not hold
    #[error("Invalid account number.")]
    InvalidAccountNumber,

    /// Account was deleted earlier in this session
    #[error("Account no longer exists.")]
    AccountNoLongerExists,

    /// Account was created earlier in this session and is not yet available
    #[error("Account unavailable this session.")]
    AccountUnavailableThisSession,

    /// Account is not in the ledger
    #[error("Account does not exist.")]
    AccountDoesNotExist,

    /// Transfer source account is not in the ledger
    #[error("Source account does not exist.")]
    SourceAccountDoesNotExist,

    /// Transfer destination account is not in the ledger
    #[error("Destination account does not exist.")]
    DestinationAccountDoesNotExist,

    /// Account (or transfer counterparty) is disabled
    #[error("Account is disabled.")]
    AccountDisabled,

    /// Standard session names an account held by someone else
    #[error("Account not owned by user.")]
    NotOwnedByUser,

    /// Standard session transfers out of an account held by someone else
    #[error("Source account not owned.")]
    SourceAccountNotOwned,

    /// Paybill company code outside the known biller set
    #[error("Invalid bill company.")]
    InvalidBillCompany,

    /// Amount field does not parse as a decimal number
    #[error("Invalid amount format.")]
    InvalidAmountFormat,

    /// Amount is negative
    #[error("Negative amounts not allowed.")]
    NegativeAmount,

    /// Source balance is below the requested amount
    #[error("Insufficient funds.")]
    InsufficientFunds,

    /// Standard-session withdrawal above the per-session ceiling
    #[error("Withdrawal exceeds session limit.")]
    WithdrawalLimitExceeded,

    /// Standard-session transfer above the per-session ceiling
    #[error("Transfer exceeds session limit.")]
    TransferLimitExceeded,

    /// Standard-session paybill above the per-session ceiling
    #[error("Paybill exceeds session limit.")]
    PaybillLimitExceeded,

    /// Privileged transaction attempted from a standard session
    #[error("Privileged transaction not permitted.")]
    PrivilegedNotPermitted,

    /// Create with a holder name above 20 characters
    #[error("Account holder name too long.")]
    HolderNameTooLong,

    /// Create with an initial balance above the maximum
    #[error("Initial balance exceeds maximum.")]
    BalanceExceedsMaximum,

    /// Create with a holder name already present in the ledger
    #[error("Duplicate account number.")]
    DuplicateHolderName,

    /// Account-number range exhausted during create
    #[error("Cannot create account.")]
    NoNumberAvailable,

    /// Delete names a holder the ledger does not know
    #[error("Account holder name mismatch.")]
    HolderNameMismatch,

    /// Delete names an account the given holder does not own
    #[error("Account number mismatch.")]
    AccountNumberMismatch,

    /// Disable or changeplan existence/ownership failure
    #[error("Invalid account or holder.")]
    InvalidAccountOrHolder,

    /// Token outside the dispatch table
    #[error("Unknown transaction code.")]
    UnknownTransactionCode,
}

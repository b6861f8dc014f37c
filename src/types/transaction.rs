//! Transaction codes and typed request shapes
//!
//! A request stream is a sequence of lines: one transaction code followed by
//! the fixed number of parameter lines that code consumes (its arity). This
//! module owns the code dispatch table, the arity table, and the typed
//! parameter structures the engine validates against.

/// A transaction code read from the request stream
///
/// Codes are matched case-insensitively. `Login` and `Logout` manage the
/// session itself and have bespoke line handling; everything else is a
/// ledger transaction with a fixed parameter arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestCode {
    /// Start a session (variable arity: mode line, then a holder-name line
    /// for standard mode, plus a one-line lookahead)
    Login,
    /// End the session and flush the transaction log (no parameter lines)
    Logout,
    /// A ledger transaction with a fixed parameter arity
    Transaction(TransactionKind),
}

impl RequestCode {
    /// Parse a stream token into a request code.
    ///
    /// Returns `None` for anything outside the dispatch table; the engine
    /// decides how an unknown token is reported.
    pub fn parse(token: &str) -> Option<Self> {
        let kind = match token.to_lowercase().as_str() {
            "login" => return Some(RequestCode::Login),
            "logout" => return Some(RequestCode::Logout),
            "withdrawal" => TransactionKind::Withdrawal,
            "deposit" => TransactionKind::Deposit,
            "transfer" => TransactionKind::Transfer,
            "paybill" => TransactionKind::Paybill,
            "create" => TransactionKind::Create,
            "delete" => TransactionKind::Delete,
            "disable" => TransactionKind::Disable,
            "changeplan" => TransactionKind::ChangePlan,
            _ => return None,
        };
        Some(RequestCode::Transaction(kind))
    }
}

/// The eight ledger transaction kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Withdrawal,
    Deposit,
    Transfer,
    Paybill,
    Create,
    Delete,
    Disable,
    ChangePlan,
}

impl TransactionKind {
    /// Number of parameter lines this kind consumes from the stream.
    ///
    /// Money-movement kinds take one extra leading holder-name line when
    /// `with_holder_line` is set (admin sessions act on behalf of a named
    /// holder; the not-logged-in drain also uses this wider shape).
    /// Privileged kinds always take exactly two lines.
    ///
    /// Every handler path must consume exactly this many lines, rejections
    /// included, or the stream desynchronizes for all later transactions.
    pub fn param_arity(self, with_holder_line: bool) -> usize {
        let extra = usize::from(with_holder_line && self.moves_money());
        match self {
            TransactionKind::Withdrawal | TransactionKind::Deposit => 2 + extra,
            TransactionKind::Transfer | TransactionKind::Paybill => 3 + extra,
            TransactionKind::Create
            | TransactionKind::Delete
            | TransactionKind::Disable
            | TransactionKind::ChangePlan => 2,
        }
    }

    /// Whether this kind moves money between balances.
    pub fn moves_money(self) -> bool {
        matches!(
            self,
            TransactionKind::Withdrawal
                | TransactionKind::Deposit
                | TransactionKind::Transfer
                | TransactionKind::Paybill
        )
    }

    /// Whether this kind administers the ledger (admin sessions only).
    pub fn is_privileged(self) -> bool {
        !self.moves_money()
    }
}

/// Single-account money movement parameters (withdrawal, deposit)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountAmount {
    pub account: String,
    pub amount: String,
}

/// Transfer parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferParams {
    pub from: String,
    pub to: String,
    pub amount: String,
}

/// Bill payment parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaybillParams {
    pub account: String,
    pub company: String,
    pub amount: String,
}

/// Account creation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateParams {
    pub holder: String,
    pub balance: String,
}

/// Holder-name plus account-number parameters (delete, disable, changeplan)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolderAccount {
    pub holder: String,
    pub account: String,
}

/// A fully consumed transaction request, one variant per kind
///
/// Fields hold the raw trimmed parameter lines; validation order (and
/// therefore which rejection wins) is the engine's concern, so nothing is
/// parsed or checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionRequest {
    Withdrawal(AccountAmount),
    Deposit(AccountAmount),
    Transfer(TransferParams),
    Paybill(PaybillParams),
    Create(CreateParams),
    Delete(HolderAccount),
    Disable(HolderAccount),
    ChangePlan(HolderAccount),
}

impl TransactionRequest {
    /// Assemble a typed request from the consumed parameter lines.
    ///
    /// `lines` must hold exactly `kind.param_arity(with_holder_line)`
    /// entries; when `with_holder_line` is set for a money-movement kind the
    /// leading holder-name line is discarded (the session acts directly on
    /// the named account). Missing lines read as empty strings, which the
    /// engine rejects as malformed.
    pub fn assemble(kind: TransactionKind, with_holder_line: bool, lines: Vec<String>) -> Self {
        let mut lines = lines.into_iter();
        if with_holder_line && kind.moves_money() {
            lines.next();
        }
        let mut next = || lines.next().unwrap_or_default();

        match kind {
            TransactionKind::Withdrawal => TransactionRequest::Withdrawal(AccountAmount {
                account: next(),
                amount: next(),
            }),
            TransactionKind::Deposit => TransactionRequest::Deposit(AccountAmount {
                account: next(),
                amount: next(),
            }),
            TransactionKind::Transfer => TransactionRequest::Transfer(TransferParams {
                from: next(),
                to: next(),
                amount: next(),
            }),
            TransactionKind::Paybill => TransactionRequest::Paybill(PaybillParams {
                account: next(),
                company: next(),
                amount: next(),
            }),
            TransactionKind::Create => TransactionRequest::Create(CreateParams {
                holder: next(),
                balance: next(),
            }),
            TransactionKind::Delete => TransactionRequest::Delete(HolderAccount {
                holder: next(),
                account: next(),
            }),
            TransactionKind::Disable => TransactionRequest::Disable(HolderAccount {
                holder: next(),
                account: next(),
            }),
            TransactionKind::ChangePlan => TransactionRequest::ChangePlan(HolderAccount {
                holder: next(),
                account: next(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("login", RequestCode::Login)]
    #[case("LOGIN", RequestCode::Login)]
    #[case("logout", RequestCode::Logout)]
    #[case("withdrawal", RequestCode::Transaction(TransactionKind::Withdrawal))]
    #[case("Deposit", RequestCode::Transaction(TransactionKind::Deposit))]
    #[case("transfer", RequestCode::Transaction(TransactionKind::Transfer))]
    #[case("paybill", RequestCode::Transaction(TransactionKind::Paybill))]
    #[case("create", RequestCode::Transaction(TransactionKind::Create))]
    #[case("delete", RequestCode::Transaction(TransactionKind::Delete))]
    #[case("disable", RequestCode::Transaction(TransactionKind::Disable))]
    #[case("ChangePlan", RequestCode::Transaction(TransactionKind::ChangePlan))]
    fn test_code_parsing(#[case] token: &str, #[case] expected: RequestCode) {
        assert_eq!(RequestCode::parse(token), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("log in")]
    #[case("withdraw")]
    #[case("balance")]
    fn test_unknown_codes(#[case] token: &str) {
        assert_eq!(RequestCode::parse(token), None);
    }

    #[rstest]
    #[case::withdrawal_standard(TransactionKind::Withdrawal, false, 2)]
    #[case::withdrawal_admin(TransactionKind::Withdrawal, true, 3)]
    #[case::deposit_standard(TransactionKind::Deposit, false, 2)]
    #[case::deposit_admin(TransactionKind::Deposit, true, 3)]
    #[case::transfer_standard(TransactionKind::Transfer, false, 3)]
    #[case::transfer_admin(TransactionKind::Transfer, true, 4)]
    #[case::paybill_standard(TransactionKind::Paybill, false, 3)]
    #[case::paybill_admin(TransactionKind::Paybill, true, 4)]
    #[case::create(TransactionKind::Create, true, 2)]
    #[case::delete(TransactionKind::Delete, true, 2)]
    #[case::disable(TransactionKind::Disable, false, 2)]
    #[case::changeplan(TransactionKind::ChangePlan, true, 2)]
    fn test_param_arity(
        #[case] kind: TransactionKind,
        #[case] with_holder_line: bool,
        #[case] arity: usize,
    ) {
        assert_eq!(kind.param_arity(with_holder_line), arity);
    }

    #[test]
    fn test_assemble_skips_admin_holder_line() {
        let lines = vec!["Alice".to_string(), "10001".to_string(), "50.00".to_string()];
        let request = TransactionRequest::assemble(TransactionKind::Withdrawal, true, lines);
        assert_eq!(
            request,
            TransactionRequest::Withdrawal(AccountAmount {
                account: "10001".to_string(),
                amount: "50.00".to_string(),
            })
        );
    }

    #[test]
    fn test_assemble_privileged_keeps_both_lines() {
        let lines = vec!["Alice".to_string(), "10001".to_string()];
        let request = TransactionRequest::assemble(TransactionKind::Delete, true, lines);
        assert_eq!(
            request,
            TransactionRequest::Delete(HolderAccount {
                holder: "Alice".to_string(),
                account: "10001".to_string(),
            })
        );
    }

    #[test]
    fn test_assemble_missing_lines_become_empty() {
        let request = TransactionRequest::assemble(TransactionKind::Transfer, false, vec![]);
        assert_eq!(
            request,
            TransactionRequest::Transfer(TransferParams {
                from: String::new(),
                to: String::new(),
                amount: String::new(),
            })
        );
    }
}

//! Transaction processing engine
//!
//! This module provides the TellerEngine that drives one session protocol:
//! dispatch by transaction code, consumption of each code's parameter lines,
//! the per-code validation chains, and the resulting ledger and log
//! mutations.
//!
//! The engine enforces two properties everything else leans on:
//!
//! - **Stream alignment**: every non-login code consumes its full declared
//!   arity of parameter lines before any validation runs, so a rejection
//!   (including the not-logged-in rejection) never desynchronizes the
//!   stream for later transactions.
//! - **Check everything, then commit**: a rejected transaction has no side
//!   effect on the ledger or the pending log.

use crate::core::ledger::AccountLedger;
use crate::core::session::{Privilege, SessionState};
use crate::io::line_reader::LineReader;
use crate::io::transaction_log::{TransactionLog, WITHDRAWAL_CODE};
use crate::types::{
    is_well_formed_number, Account, AccountAmount, CreateParams, HolderAccount, PaybillParams,
    Rejection, RequestCode, TellerError, TransactionKind, TransactionRequest, TransferParams,
};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Longest holder name accepted by create.
const MAX_HOLDER_NAME_LEN: usize = 20;

/// Bill companies paybill accepts.
const BILL_COMPANIES: [&str; 3] = ["EC", "CQ", "FI"];

/// Per-session ceiling on a standard-mode withdrawal.
fn withdrawal_limit() -> Decimal {
    Decimal::new(50_000, 2) // 500.00
}

/// Per-session ceiling on a standard-mode transfer.
fn transfer_limit() -> Decimal {
    Decimal::new(100_000, 2) // 1000.00
}

/// Per-session ceiling on a standard-mode bill payment.
fn paybill_limit() -> Decimal {
    Decimal::new(200_000, 2) // 2000.00
}

/// Largest initial balance create accepts.
fn max_balance() -> Decimal {
    Decimal::new(9_999_900, 2) // 99999.00
}

/// Transaction validation-and-execution engine
///
/// Owns the session, the ledger, the pending transaction log, and the two
/// transient per-session account sets. All access is sequential: one
/// transaction is fully consumed, validated and applied before the next is
/// read.
pub struct TellerEngine {
    session: SessionState,
    ledger: AccountLedger,
    log: TransactionLog,
    log_path: PathBuf,
    created_this_session: HashSet<String>,
    deleted_this_session: HashSet<String>,
}

impl TellerEngine {
    /// Create an engine over a loaded ledger, flushing the transaction log
    /// to `log_path` at each logout.
    pub fn new(ledger: AccountLedger, log_path: impl Into<PathBuf>) -> Self {
        TellerEngine {
            session: SessionState::new(),
            ledger,
            log: TransactionLog::new(),
            log_path: log_path.into(),
            created_this_session: HashSet::new(),
            deleted_this_session: HashSet::new(),
        }
    }

    /// The ledger, for output and inspection.
    pub fn ledger(&self) -> &AccountLedger {
        &self.ledger
    }

    /// The pending transaction log.
    pub fn log(&self) -> &TransactionLog {
        &self.log
    }

    /// The session state.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Path of the transaction-log sink.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Drive the full request stream: read a code line, skip blanks,
    /// dispatch, and print each non-empty response, until end of stream.
    ///
    /// # Errors
    ///
    /// Returns [`TellerError`] only for I/O failures writing responses or
    /// flushing the transaction log; rejections are responses, not errors.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        reader: &mut LineReader<R>,
        responses: &mut W,
    ) -> Result<(), TellerError> {
        while let Some(line) = reader.next_line() {
            let token = line.trim();
            if token.is_empty() {
                continue;
            }
            if let Some(response) = self.handle(token, reader)? {
                writeln!(responses, "{response}").map_err(TellerError::from)?;
            }
        }
        Ok(())
    }

    /// Process one transaction: `token` is the code line already read from
    /// `reader`; the handler consumes the code's parameter lines from the
    /// same reader.
    ///
    /// Returns `Ok(None)` exactly when the protocol calls for no response
    /// (the suppressed login banner).
    ///
    /// # Errors
    ///
    /// Returns [`TellerError`] when the logout flush fails.
    pub fn handle<R: BufRead>(
        &mut self,
        token: &str,
        reader: &mut LineReader<R>,
    ) -> Result<Option<String>, TellerError> {
        match RequestCode::parse(token.trim()) {
            Some(RequestCode::Login) => Ok(self.login(reader)),
            Some(RequestCode::Logout) => self.logout().map(Some),
            Some(RequestCode::Transaction(kind)) => Ok(Some(self.transaction(kind, reader))),
            None => Ok(Some(self.unknown_code().to_string())),
        }
    }

    /// Handle `login`: mode line, holder-name line for standard mode, then
    /// a one-line lookahead deciding whether to print the banner.
    fn login<R: BufRead>(&mut self, reader: &mut LineReader<R>) -> Option<String> {
        if self.session.is_logged_in() {
            // Drain what this login would have consumed so the stream stays
            // aligned: the mode line always, the name line for standard.
            let mode_peek = next_trimmed(reader).to_lowercase();
            if mode_peek == "standard" {
                reader.consume(1);
            }
            return Some(Rejection::AlreadyLoggedIn.to_string());
        }

        let mode = next_trimmed(reader).to_lowercase();
        let privilege = match mode.as_str() {
            "admin" => Privilege::Admin,
            "standard" => Privilege::Standard,
            _ => return Some(Rejection::MalformedInput.to_string()),
        };

        let mut holder = String::new();
        if privilege == Privilege::Standard {
            holder = next_trimmed(reader);
            if holder.is_empty() {
                // A blank holder name is malformed, but the session opens
                // anyway so a later logout can still write the transaction
                // file.
                self.session.start(Privilege::Standard, "");
                return Some(Rejection::MalformedInput.to_string());
            }
        }
        self.session.start(privilege, &holder);

        // Peek one line and put it back unconsumed: a follow-on money
        // movement suppresses the banner entirely.
        let peeked = reader.next_line();
        let money_movement_follows = peeked
            .as_deref()
            .and_then(|line| RequestCode::parse(line.trim()))
            .is_some_and(|code| {
                matches!(code, RequestCode::Transaction(kind) if kind.moves_money())
            });
        reader.push_back(peeked);

        if money_movement_follows {
            return None;
        }
        Some(format!("Login successful ({mode})."))
    }

    /// Handle `logout`: terminate the pending log, rewrite the sink file,
    /// and reset all per-session state.
    fn logout(&mut self) -> Result<String, TellerError> {
        if !self.session.is_logged_in() {
            return Ok(Rejection::NoActiveSession.to_string());
        }

        self.log.append_end_of_session();
        self.log.write_to_file(&self.log_path)?;
        info!(path = %self.log_path.display(), records = self.log.records().len(),
            "transaction log written");

        self.session.end();
        self.created_this_session.clear();
        self.deleted_this_session.clear();
        Ok("Transaction file written.".to_string())
    }

    /// Single consumption wrapper for every ledger transaction: read the
    /// code's full declared arity before any validation, then run the
    /// per-kind rule chain.
    fn transaction<R: BufRead>(
        &mut self,
        kind: TransactionKind,
        reader: &mut LineReader<R>,
    ) -> String {
        if !self.session.is_logged_in() {
            // Logged-out streams still carry the parameter lines; drain the
            // widest shape this code can take so the next code lines up.
            reader.consume(kind.param_arity(true));
            return self.login_required().to_string();
        }

        let with_holder_line = self.session.is_admin();
        let lines = reader.take_params(kind.param_arity(with_holder_line));
        let request = TransactionRequest::assemble(kind, with_holder_line, lines);

        match self.execute(request) {
            Ok(accepted) => accepted.to_string(),
            Err(rejection) => {
                debug!(?kind, %rejection, "transaction rejected");
                rejection.to_string()
            }
        }
    }

    /// Run the rule chain for a fully consumed request. First failure wins;
    /// mutation happens only after every check has passed.
    fn execute(&mut self, request: TransactionRequest) -> Result<&'static str, Rejection> {
        match request {
            TransactionRequest::Withdrawal(params) => self.withdrawal(params),
            TransactionRequest::Deposit(params) => self.deposit(params),
            TransactionRequest::Transfer(params) => self.transfer(params),
            TransactionRequest::Paybill(params) => self.paybill(params),
            TransactionRequest::Create(params) => self.create(params),
            TransactionRequest::Delete(params) => self.delete(params),
            TransactionRequest::Disable(params) => self.disable(params),
            TransactionRequest::ChangePlan(params) => self.change_plan(params),
        }
    }

    fn withdrawal(&mut self, params: AccountAmount) -> Result<&'static str, Rejection> {
        if params.account.is_empty() || params.amount.is_empty() {
            return Err(Rejection::MalformedInput);
        }
        // Withdrawal alone pre-validates the number shape; the other
        // handlers let the existence check catch malformed numbers.
        if !is_well_formed_number(&params.account) {
            return Err(Rejection::InvalidAccountNumber);
        }
        self.reject_if_unavailable(&[&params.account])?;
        if !self.ledger.contains(&params.account) {
            return Err(Rejection::AccountDoesNotExist);
        }
        if self.ledger.is_disabled(&params.account) {
            return Err(Rejection::AccountDisabled);
        }
        self.require_owned(&params.account, Rejection::NotOwnedByUser)?;

        let amount = parse_amount(&params.amount)?;
        if amount < Decimal::ZERO {
            return Err(Rejection::NegativeAmount);
        }
        let balance = self
            .ledger
            .balance(&params.account)
            .ok_or(Rejection::AccountDoesNotExist)?;
        // Funds before ceiling for withdrawal.
        if balance < amount {
            return Err(Rejection::InsufficientFunds);
        }
        if !self.session.is_admin() && amount > withdrawal_limit() {
            return Err(Rejection::WithdrawalLimitExceeded);
        }

        self.ledger.set_balance(&params.account, balance - amount);
        self.log.append(
            WITHDRAWAL_CODE,
            self.session.holder_name(),
            &params.account,
            amount,
        );
        Ok("Withdrawal accepted.")
    }

    fn deposit(&mut self, params: AccountAmount) -> Result<&'static str, Rejection> {
        if params.account.is_empty() || params.amount.is_empty() {
            return Err(Rejection::MalformedInput);
        }
        self.reject_if_unavailable(&[&params.account])?;
        if !self.ledger.contains(&params.account) {
            return Err(Rejection::AccountDoesNotExist);
        }
        if self.ledger.is_disabled(&params.account) {
            return Err(Rejection::AccountDisabled);
        }
        self.require_owned(&params.account, Rejection::NotOwnedByUser)?;

        let amount = parse_amount(&params.amount)?;
        if amount < Decimal::ZERO {
            return Err(Rejection::NegativeAmount);
        }
        let balance = self
            .ledger
            .balance(&params.account)
            .ok_or(Rejection::AccountDoesNotExist)?;

        // No ceiling and no funds check on deposits.
        self.ledger.set_balance(&params.account, balance + amount);
        Ok("Deposit accepted.")
    }

    fn transfer(&mut self, params: TransferParams) -> Result<&'static str, Rejection> {
        if params.from.is_empty() || params.to.is_empty() || params.amount.is_empty() {
            return Err(Rejection::MalformedInput);
        }
        self.reject_if_unavailable(&[&params.from, &params.to])?;
        if !self.ledger.contains(&params.from) {
            return Err(Rejection::SourceAccountDoesNotExist);
        }
        if !self.ledger.contains(&params.to) {
            return Err(Rejection::DestinationAccountDoesNotExist);
        }
        if self.ledger.is_disabled(&params.from) || self.ledger.is_disabled(&params.to) {
            return Err(Rejection::AccountDisabled);
        }
        // Only the source account's ownership is checked.
        self.require_owned(&params.from, Rejection::SourceAccountNotOwned)?;

        let amount = parse_amount(&params.amount)?;
        if amount < Decimal::ZERO {
            return Err(Rejection::NegativeAmount);
        }
        let from_balance = self
            .ledger
            .balance(&params.from)
            .ok_or(Rejection::SourceAccountDoesNotExist)?;
        // Funds before ceiling for transfer.
        if from_balance < amount {
            return Err(Rejection::InsufficientFunds);
        }
        if !self.session.is_admin() && amount > transfer_limit() {
            return Err(Rejection::TransferLimitExceeded);
        }

        self.ledger.set_balance(&params.from, from_balance - amount);
        // Re-read after the debit: a self-transfer must net to zero.
        let to_balance = self
            .ledger
            .balance(&params.to)
            .ok_or(Rejection::DestinationAccountDoesNotExist)?;
        self.ledger.set_balance(&params.to, to_balance + amount);
        Ok("Transfer accepted.")
    }

    fn paybill(&mut self, params: PaybillParams) -> Result<&'static str, Rejection> {
        if params.account.is_empty() || params.company.is_empty() || params.amount.is_empty() {
            return Err(Rejection::MalformedInput);
        }
        self.reject_if_unavailable(&[&params.account])?;
        // Paybill reports a missing account as an invalid number.
        if !self.ledger.contains(&params.account) {
            return Err(Rejection::InvalidAccountNumber);
        }
        if self.ledger.is_disabled(&params.account) {
            return Err(Rejection::AccountDisabled);
        }
        self.require_owned(&params.account, Rejection::NotOwnedByUser)?;

        if !BILL_COMPANIES.contains(&params.company.as_str()) {
            return Err(Rejection::InvalidBillCompany);
        }
        let amount = parse_amount(&params.amount)?;
        if amount < Decimal::ZERO {
            return Err(Rejection::NegativeAmount);
        }
        // Ceiling before funds for paybill.
        if !self.session.is_admin() && amount > paybill_limit() {
            return Err(Rejection::PaybillLimitExceeded);
        }
        let balance = self
            .ledger
            .balance(&params.account)
            .ok_or(Rejection::InvalidAccountNumber)?;
        if balance < amount {
            return Err(Rejection::InsufficientFunds);
        }

        self.ledger.set_balance(&params.account, balance - amount);
        Ok("Bill payment accepted.")
    }

    fn create(&mut self, params: CreateParams) -> Result<&'static str, Rejection> {
        self.require_admin()?;
        if params.holder.is_empty() || params.balance.is_empty() {
            return Err(Rejection::MalformedInput);
        }
        if params.holder.chars().count() > MAX_HOLDER_NAME_LEN {
            return Err(Rejection::HolderNameTooLong);
        }
        let balance = parse_amount(&params.balance)?;
        if balance > max_balance() {
            return Err(Rejection::BalanceExceedsMaximum);
        }
        // Duplicate detection is by holder name, not number.
        if self.ledger.holder_exists(&params.holder) {
            return Err(Rejection::DuplicateHolderName);
        }

        let number = self
            .ledger
            .next_available_number()
            .ok_or(Rejection::NoNumberAvailable)?;
        self.ledger
            .insert(Account::new(number.clone(), &params.holder, balance));
        self.created_this_session.insert(number);
        Ok("Account creation recorded.")
    }

    fn delete(&mut self, params: HolderAccount) -> Result<&'static str, Rejection> {
        self.require_admin()?;
        if params.holder.is_empty() || params.account.is_empty() {
            return Err(Rejection::MalformedInput);
        }
        if !self.ledger.holder_exists(&params.holder) {
            return Err(Rejection::HolderNameMismatch);
        }
        if !self.ledger.is_owned_by(&params.account, &params.holder) {
            return Err(Rejection::AccountNumberMismatch);
        }

        self.ledger.remove(&params.account);
        self.deleted_this_session.insert(params.account);
        Ok("Account deletion recorded.")
    }

    fn disable(&mut self, params: HolderAccount) -> Result<&'static str, Rejection> {
        self.require_admin()?;
        if params.holder.is_empty() || params.account.is_empty() {
            return Err(Rejection::MalformedInput);
        }
        if !self.ledger.contains(&params.account) {
            return Err(Rejection::AccountDoesNotExist);
        }
        if !self.ledger.is_owned_by(&params.account, &params.holder) {
            return Err(Rejection::InvalidAccountOrHolder);
        }

        self.ledger.disable(&params.account);
        Ok("Account disabled.")
    }

    fn change_plan(&mut self, params: HolderAccount) -> Result<&'static str, Rejection> {
        self.require_admin()?;
        if params.holder.is_empty() || params.account.is_empty() {
            return Err(Rejection::MalformedInput);
        }
        if !self.ledger.contains(&params.account)
            || !self.ledger.is_owned_by(&params.account, &params.holder)
        {
            return Err(Rejection::InvalidAccountOrHolder);
        }

        // The ledger carries no plan attribute; the operation is
        // acknowledged without mutating anything.
        Ok("Account plan changed.")
    }

    /// Accounts created or deleted earlier in this session are unavailable
    /// until the external batch re-sync; deletion wins when both apply.
    fn reject_if_unavailable(&self, numbers: &[&str]) -> Result<(), Rejection> {
        if numbers
            .iter()
            .any(|number| self.deleted_this_session.contains(*number))
        {
            return Err(Rejection::AccountNoLongerExists);
        }
        if numbers
            .iter()
            .any(|number| self.created_this_session.contains(*number))
        {
            return Err(Rejection::AccountUnavailableThisSession);
        }
        Ok(())
    }

    /// Standard sessions may only touch accounts held under their own name;
    /// admin sessions skip the check.
    fn require_owned(&self, number: &str, rejection: Rejection) -> Result<(), Rejection> {
        if self.session.is_admin() {
            return Ok(());
        }
        if !self.ledger.is_owned_by(number, self.session.holder_name()) {
            return Err(rejection);
        }
        Ok(())
    }

    fn require_admin(&self) -> Result<(), Rejection> {
        if !self.session.is_admin() {
            return Err(Rejection::PrivilegedNotPermitted);
        }
        Ok(())
    }

    /// Wording of the not-logged-in rejection flips once any login has
    /// succeeded in this process.
    fn login_required(&self) -> Rejection {
        if self.session.has_ever_logged_in() {
            Rejection::LoginRequired
        } else {
            Rejection::LoginRequiredNeverLoggedIn
        }
    }

    /// Unknown tokens consume no parameter lines. Logged-out streams answer
    /// them like every other non-session code.
    fn unknown_code(&self) -> Rejection {
        if !self.session.is_logged_in() {
            return self.login_required();
        }
        Rejection::UnknownTransactionCode
    }
}

/// Next line as a trimmed field, empty at end of stream.
fn next_trimmed<R: BufRead>(reader: &mut LineReader<R>) -> String {
    reader
        .next_line()
        .map(|line| line.trim().to_string())
        .unwrap_or_default()
}

fn parse_amount(raw: &str) -> Result<Decimal, Rejection> {
    Decimal::from_str(raw).map_err(|_| Rejection::InvalidAmountFormat)
}

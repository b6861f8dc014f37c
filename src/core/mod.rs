//! Core business logic module
//!
//! This module contains the core transaction processing components:
//! - `session` - session state machine (login, privilege, holder)
//! - `ledger` - in-memory account table and its operations
//! - `engine` - dispatch, parameter-line consumption, and rule chains

pub mod engine;
pub mod ledger;
pub mod session;

pub use engine::TellerEngine;
pub use ledger::AccountLedger;
pub use session::{Privilege, SessionState};

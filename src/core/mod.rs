//! Core business logic module
//!
//! This module contains the business-rule components:
//! - `registry` - Account roster and handle derivation
//! - `ledger` - Derived figures, transfers and loans
//! - `session` - Authentication state and display ordering
//! - `bank` - Context object tying registry and session together
//! - `roster` - Built-in demo accounts

pub mod bank;
pub mod ledger;
pub mod registry;
pub mod roster;
pub mod session;

pub use bank::{AccountView, Bank, ClosedAccount, IntentOutcome};
pub use ledger::LedgerSummary;
pub use registry::AccountRegistry;
pub use session::{Session, SessionState};

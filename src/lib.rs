//! Rust Bank App Library
//! # Overview
//!
//! This library provides the business-rule core of a demo banking interface:
//! a fixed in-memory roster of accounts, each with a signed transaction
//! history, driven by a handful of user intents.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Intent, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::registry`] - Account roster and handle derivation
//!   - [`core::ledger`] - Balances, totals, interest, transfers and loans
//!   - [`core::session`] - Authentication state and display ordering
//!   - [`core::bank`] - Context object exposing the intents
//! - [`io`] - Script and roster parsing, account output, presentation
//! - [`strategy`] - Pluggable script replay strategies
//!
//! # Intents
//!
//! - **Login**: authenticate with a handle (owner initials) and a PIN
//! - **Transfer**: move money to another account (positive amount, covered
//!   by the balance, existing and distinct recipient)
//! - **Loan**: credit a loan when some past movement is at least a tenth of it
//! - **Close**: remove the logged-in account after re-entering handle and PIN
//! - **Sort**: toggle ascending display of movements
//!
//! Rejected intents change nothing and are reported as typed [`BankError`]s.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{AccountRegistry, AccountView, Bank, ClosedAccount, IntentOutcome, Session};
pub use crate::io::write_accounts_csv;
pub use crate::types::{Account, AccountProfile, BankError, ErrorKind, Handle, Intent, IntentType, Pin};

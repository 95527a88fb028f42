//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account-related types
//! - `intent`: User intents and their raw inputs
//! - `error`: Error types for the bank

pub mod account;
pub mod error;
pub mod intent;

pub use account::{Account, AccountProfile, Handle, Pin};
pub use error::{BankError, ErrorKind};
pub use intent::{Intent, IntentType};

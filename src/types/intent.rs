//! User intents raised by the presentation layer
//!
//! Intents carry the raw, unvalidated form values exactly as typed. Coercion
//! of amounts and PINs happens in the core, not here.

/// Kinds of user intent the bank understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentType {
    /// Authenticate with a handle and PIN
    Login,

    /// Move money from the logged-in account to another account
    Transfer,

    /// Ask for a loan credited to the logged-in account
    Loan,

    /// Remove the logged-in account from the registry
    Close,

    /// Flip the display ordering of movements
    Sort,
}

/// A single user intent with its raw form inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Login { handle: String, pin: String },
    Transfer { from: String, to: String, amount: String },
    Loan { handle: String, amount: String },
    Close { handle: String, pin: String },
    Sort { handle: String },
}

//! Error types for the demo bank
//!
//! This module defines all error types that can occur while provisioning the
//! registry or applying a user intent. Every rejected intent leaves account
//! and session state exactly as it was.
//!
//! # Error Categories
//!
//! - **Authentication**: bad handle or PIN, no session, acting for another account
//! - **Validation**: malformed or non-positive amounts
//! - **Business rules**: insufficient funds or history, self transfer, unknown recipient
//! - **Registration**: roster problems detected when building the registry
//! - **Arithmetic**: totals that would exceed the decimal range
//! - **I/O**: unreadable scripts or rosters, CSV parse failures

use rust_decimal::Decimal;
use thiserror::Error;

/// Broad category of a [`BankError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authentication,
    Validation,
    BusinessRule,
    Registration,
    Arithmetic,
    Io,
}

/// Main error type for the bank
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// No account has the given handle
    #[error("Unknown user '{handle}'")]
    UnknownHandle {
        /// The handle that was typed
        handle: String,
    },

    /// The PIN does not match the account
    #[error("Wrong PIN for user '{handle}'")]
    WrongPin {
        /// The handle that was typed
        handle: String,
    },

    /// The PIN is not a number
    #[error("Invalid PIN '{pin}'")]
    InvalidPin {
        /// The raw PIN input
        pin: String,
    },

    /// The intent needs an authenticated session
    #[error("No user is logged in")]
    NotLoggedIn,

    /// The intent names a different account than the logged-in one
    #[error("User '{handle}' is not the logged-in user '{current}'")]
    SessionMismatch {
        /// The handle named by the intent
        handle: String,
        /// The handle of the logged-in account
        current: String,
    },

    /// The amount is not a number
    #[error("Invalid amount '{amount}'")]
    InvalidAmount {
        /// The raw amount input
        amount: String,
    },

    /// The amount is zero or negative
    #[error("Amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The parsed amount
        amount: Decimal,
    },

    /// The sender cannot cover the transfer
    #[error("Insufficient funds for '{handle}': balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Sender handle
        handle: String,
        /// Sender balance
        balance: Decimal,
        /// Requested transfer amount
        requested: Decimal,
    },

    /// No past movement reaches a tenth of the requested loan
    #[error("Loan of {requested} for '{handle}' needs a movement of at least {required}")]
    InsufficientHistory {
        /// Borrower handle
        handle: String,
        /// Requested loan amount
        requested: Decimal,
        /// Smallest movement that would qualify
        required: Decimal,
    },

    /// Sender and recipient are the same account
    #[error("Cannot transfer from '{handle}' to itself")]
    SelfTransfer {
        /// The handle on both sides
        handle: String,
    },

    /// The transfer recipient does not exist
    #[error("Recipient '{handle}' not found")]
    RecipientNotFound {
        /// The recipient handle that was typed
        handle: String,
    },

    /// Two owners share the same initials
    #[error("Handle '{handle}' of '{owner}' is already taken")]
    DuplicateHandle {
        /// The colliding handle
        handle: String,
        /// Owner of the rejected account
        owner: String,
    },

    /// The owner name yields an empty handle
    #[error("Owner name '{owner}' cannot produce a handle")]
    InvalidOwner {
        /// The rejected owner name
        owner: String,
    },

    /// A provisioned history contains a zero amount
    #[error("Zero amount in history of '{owner}'")]
    ZeroAmount {
        /// Owner of the rejected account
        owner: String,
    },

    /// The account to remove is not in the registry
    #[error("Account '{handle}' not found")]
    AccountNotFound {
        /// The handle that was looked up
        handle: String,
    },

    /// Appending the amount would overflow the account totals
    #[error("Arithmetic overflow in {operation} for '{handle}'")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account handle
        handle: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for BankError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        BankError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

impl BankError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BankError::UnknownHandle { .. }
            | BankError::WrongPin { .. }
            | BankError::InvalidPin { .. }
            | BankError::NotLoggedIn
            | BankError::SessionMismatch { .. } => ErrorKind::Authentication,
            BankError::InvalidAmount { .. } | BankError::NonPositiveAmount { .. } => {
                ErrorKind::Validation
            }
            BankError::InsufficientFunds { .. }
            | BankError::InsufficientHistory { .. }
            | BankError::SelfTransfer { .. }
            | BankError::RecipientNotFound { .. } => ErrorKind::BusinessRule,
            BankError::DuplicateHandle { .. }
            | BankError::InvalidOwner { .. }
            | BankError::ZeroAmount { .. }
            | BankError::AccountNotFound { .. } => ErrorKind::Registration,
            BankError::ArithmeticOverflow { .. } => ErrorKind::Arithmetic,
            BankError::Io { .. } | BankError::Parse { .. } => ErrorKind::Io,
        }
    }

    /// Create an UnknownHandle error
    pub fn unknown_handle(handle: &str) -> Self {
        BankError::UnknownHandle {
            handle: handle.to_string(),
        }
    }

    /// Create a WrongPin error
    pub fn wrong_pin(handle: &str) -> Self {
        BankError::WrongPin {
            handle: handle.to_string(),
        }
    }

    /// Create an InvalidPin error
    pub fn invalid_pin(pin: &str) -> Self {
        BankError::InvalidPin {
            pin: pin.to_string(),
        }
    }

    /// Create a SessionMismatch error
    pub fn session_mismatch(handle: &str, current: &str) -> Self {
        BankError::SessionMismatch {
            handle: handle.to_string(),
            current: current.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str) -> Self {
        BankError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(handle: &str, balance: Decimal, requested: Decimal) -> Self {
        BankError::InsufficientFunds {
            handle: handle.to_string(),
            balance,
            requested,
        }
    }

    /// Create an InsufficientHistory error
    pub fn insufficient_history(handle: &str, requested: Decimal, required: Decimal) -> Self {
        BankError::InsufficientHistory {
            handle: handle.to_string(),
            requested,
            required,
        }
    }

    /// Create a SelfTransfer error
    pub fn self_transfer(handle: &str) -> Self {
        BankError::SelfTransfer {
            handle: handle.to_string(),
        }
    }

    /// Create a RecipientNotFound error
    pub fn recipient_not_found(handle: &str) -> Self {
        BankError::RecipientNotFound {
            handle: handle.to_string(),
        }
    }

    /// Create a DuplicateHandle error
    pub fn duplicate_handle(handle: &str, owner: &str) -> Self {
        BankError::DuplicateHandle {
            handle: handle.to_string(),
            owner: owner.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(handle: &str) -> Self {
        BankError::AccountNotFound {
            handle: handle.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, handle: &str) -> Self {
        BankError::ArithmeticOverflow {
            operation: operation.to_string(),
            handle: handle.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::unknown_handle(
        BankError::unknown_handle("zz"),
        "Unknown user 'zz'"
    )]
    #[case::not_logged_in(BankError::NotLoggedIn, "No user is logged in")]
    #[case::session_mismatch(
        BankError::session_mismatch("rl", "mt"),
        "User 'rl' is not the logged-in user 'mt'"
    )]
    #[case::non_positive(
        BankError::NonPositiveAmount { amount: Decimal::new(-5, 0) },
        "Amount must be positive, got -5"
    )]
    #[case::insufficient_funds(
        BankError::insufficient_funds("mt", Decimal::new(3840, 0), Decimal::new(5000, 0)),
        "Insufficient funds for 'mt': balance 3840, requested 5000"
    )]
    #[case::insufficient_history(
        BankError::insufficient_history("tn", Decimal::new(5000, 0), Decimal::new(500, 0)),
        "Loan of 5000 for 'tn' needs a movement of at least 500"
    )]
    #[case::duplicate_handle(
        BankError::duplicate_handle("mt", "Mary Tate"),
        "Handle 'mt' of 'Mary Tate' is already taken"
    )]
    #[case::parse_error_with_line(
        BankError::Parse { line: Some(3), message: "bad row".to_string() },
        "CSV parse error at line 3: bad row"
    )]
    #[case::parse_error_without_line(
        BankError::Parse { line: None, message: "bad row".to_string() },
        "CSV parse error: bad row"
    )]
    fn test_error_display(#[case] error: BankError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::wrong_pin(BankError::wrong_pin("mt"), ErrorKind::Authentication)]
    #[case::invalid_pin(BankError::invalid_pin("abc"), ErrorKind::Authentication)]
    #[case::invalid_amount(BankError::invalid_amount("abc"), ErrorKind::Validation)]
    #[case::self_transfer(BankError::self_transfer("mt"), ErrorKind::BusinessRule)]
    #[case::recipient(BankError::recipient_not_found("zz"), ErrorKind::BusinessRule)]
    #[case::not_found(BankError::account_not_found("zz"), ErrorKind::Registration)]
    #[case::overflow(BankError::arithmetic_overflow("loan", "mt"), ErrorKind::Arithmetic)]
    fn test_error_kind(#[case] error: BankError, #[case] expected: ErrorKind) {
        assert_eq!(error.kind(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: BankError = io_error.into();
        assert!(matches!(error, BankError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: missing");
    }
}

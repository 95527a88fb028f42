//! Session state
//!
//! Tracks which account, if any, is authenticated, and whether movements are
//! displayed sorted. The session holds a handle, never the account itself;
//! the registry stays the single owner of account data.

use crate::core::registry::AccountRegistry;
use crate::types::{Account, BankError, Handle, Pin};
use rust_decimal::Decimal;

/// Authentication state of a session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn(Handle),
}

/// Process-local session
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
    sorted: bool,
}

/// Parse a typed PIN the way a numeric form field would
///
/// Surrounding whitespace is ignored.
pub fn parse_pin(raw: &str) -> Result<Pin, BankError> {
    raw.trim()
        .parse::<Pin>()
        .map_err(|_| BankError::invalid_pin(raw))
}

impl Session {
    /// Create a logged-out, unsorted session
    pub fn new() -> Self {
        Self::default()
    }

    /// Current authentication state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Handle of the logged-in account, if any
    pub fn current_handle(&self) -> Option<&str> {
        match &self.state {
            SessionState::LoggedIn(handle) => Some(handle),
            SessionState::LoggedOut => None,
        }
    }

    /// Whether movements are displayed in ascending order
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Attempt to authenticate
    ///
    /// On success the session moves to `LoggedIn`. On failure the session is
    /// left exactly as it was.
    ///
    /// # Errors
    ///
    /// - `UnknownHandle` if no account has the handle
    /// - `InvalidPin` if the PIN is not a number
    /// - `WrongPin` if the PIN does not match
    pub fn login<'a>(
        &mut self,
        registry: &'a AccountRegistry,
        handle: &str,
        pin: &str,
    ) -> Result<&'a Account, BankError> {
        let account = registry
            .find_by_handle(handle)
            .ok_or_else(|| BankError::unknown_handle(handle))?;
        let pin = parse_pin(pin)?;
        if account.pin != pin {
            return Err(BankError::wrong_pin(handle));
        }

        self.state = SessionState::LoggedIn(account.handle.clone());
        Ok(account)
    }

    /// Drop the reference to the current account
    pub(crate) fn logout(&mut self) {
        self.state = SessionState::LoggedOut;
    }

    /// Handle of the logged-in account, required to equal `handle`
    ///
    /// # Errors
    ///
    /// - `NotLoggedIn` if the session is logged out
    /// - `SessionMismatch` if another account is logged in
    pub fn authorize(&self, handle: &str) -> Result<&str, BankError> {
        let current = self.current_handle().ok_or(BankError::NotLoggedIn)?;
        if current != handle {
            return Err(BankError::session_mismatch(handle, current));
        }
        Ok(current)
    }

    /// Flip the sort flag and return its new value
    pub fn toggle_sort(&mut self) -> bool {
        self.sorted = !self.sorted;
        self.sorted
    }

    /// Copy of `transactions` in display order
    ///
    /// Ascending when the sort flag is set, insertion order otherwise. The
    /// input slice is never reordered.
    pub fn display_order(&self, transactions: &[Decimal]) -> Vec<Decimal> {
        let mut movements = transactions.to_vec();
        if self.sorted {
            movements.sort();
        }
        movements
    }
}

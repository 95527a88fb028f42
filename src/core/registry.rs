//! Account registry
//!
//! This module provides the `AccountRegistry` which holds the fixed roster of
//! accounts provisioned at startup.
//!
//! The registry is responsible for:
//! - Deriving each account's login handle from its owner's name
//! - Rejecting rosters whose handles collide or come out empty
//! - Resolving a typed handle to an account
//! - Removing an account when it is closed
//!
//! Lookups are linear scans; rosters hold a handful of accounts.

use crate::core::ledger;
use crate::types::{Account, AccountProfile, BankError, Handle};

/// Derive a login handle from an owner name
///
/// Lowercases the name, splits it on spaces and concatenates the first
/// character of every word. Runs of spaces produce no extra characters.
///
/// # Examples
///
/// ```
/// use rust_bank_app::core::registry::derive_handle;
///
/// assert_eq!(derive_handle("Michael Tran"), "mt");
/// ```
pub fn derive_handle(owner: &str) -> Handle {
    owner
        .to_lowercase()
        .split(' ')
        .filter_map(|word| word.chars().next())
        .collect()
}

/// Ordered roster of accounts, unique by handle
#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
}

impl AccountRegistry {
    /// Build the registry from provisioning profiles
    ///
    /// Every handle is derived here, once. Provisioning order is preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An owner name yields an empty handle (`InvalidOwner`)
    /// - Two owners yield the same handle (`DuplicateHandle`); the later one is rejected
    /// - A provisioned history contains a zero amount (`ZeroAmount`)
    /// - A provisioned history's deposit or withdrawal total overflows (`ArithmeticOverflow`)
    pub fn build_handles(profiles: Vec<AccountProfile>) -> Result<Self, BankError> {
        let mut accounts: Vec<Account> = Vec::with_capacity(profiles.len());

        for profile in profiles {
            let handle = derive_handle(&profile.owner);
            if handle.is_empty() {
                return Err(BankError::InvalidOwner {
                    owner: profile.owner,
                });
            }
            if accounts.iter().any(|account| account.handle == handle) {
                return Err(BankError::duplicate_handle(&handle, &profile.owner));
            }
            if profile.movements.iter().any(|amount| amount.is_zero()) {
                return Err(BankError::ZeroAmount {
                    owner: profile.owner,
                });
            }
            if ledger::checked_totals(&profile.movements).is_none() {
                return Err(BankError::arithmetic_overflow("provision", &handle));
            }

            tracing::debug!(owner = %profile.owner, %handle, "registered account");
            accounts.push(Account::new(profile, handle));
        }

        Ok(AccountRegistry { accounts })
    }

    /// Find the account with the given handle
    pub fn find_by_handle(&self, handle: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.handle == handle)
    }

    /// Find the account with the given handle for mutation
    pub fn find_by_handle_mut(&mut self, handle: &str) -> Option<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|account| account.handle == handle)
    }

    /// Remove the account with the given handle
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no account has the handle; the registry
    /// is left untouched.
    pub fn remove_by_handle(&mut self, handle: &str) -> Result<Account, BankError> {
        let index = self
            .position(handle)
            .ok_or_else(|| BankError::account_not_found(handle))?;
        Ok(self.accounts.remove(index))
    }

    /// All accounts in provisioning order
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Number of accounts in the registry
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the registry holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub(crate) fn position(&self, handle: &str) -> Option<usize> {
        self.accounts
            .iter()
            .position(|account| account.handle == handle)
    }

    /// Mutable access to two distinct accounts at once
    ///
    /// Callers guarantee `first != second`.
    pub(crate) fn pair_mut(&mut self, first: usize, second: usize) -> (&mut Account, &mut Account) {
        debug_assert_ne!(first, second);
        if first < second {
            let (head, tail) = self.accounts.split_at_mut(second);
            (&mut head[first], &mut tail[0])
        } else {
            let (head, tail) = self.accounts.split_at_mut(first);
            (&mut tail[0], &mut head[second])
        }
    }
}

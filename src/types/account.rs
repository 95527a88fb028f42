//! Account-related types for the demo bank
//!
//! This module defines the Account structure, the provisioning profile it is
//! built from, and the identifier types used to address accounts.

use rust_decimal::Decimal;

/// Login handle derived from the owner's initials ("Michael Tran" -> "mt")
pub type Handle = String;

/// Numeric account PIN, compared in plaintext
pub type Pin = u32;

/// Provisioning data for one account
///
/// Profiles are turned into accounts once, at registry-build time, which is
/// when the handle is derived.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountProfile {
    /// Full display name of the owner
    pub owner: String,

    /// Initial transaction history (positive = deposit, negative = withdrawal)
    pub movements: Vec<Decimal>,

    /// Interest rate as a percentage (1.2 means 1.2%)
    pub interest_rate: Decimal,

    /// Account PIN
    pub pin: Pin,
}

/// Customer account state
///
/// The balance is never stored; it is recomputed from `transactions`
/// whenever it is observed.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Full display name of the owner
    pub owner: String,

    /// Unique lowercase login handle
    pub handle: Handle,

    /// Ordered signed amounts, append-only
    pub transactions: Vec<Decimal>,

    /// Interest rate as a percentage applied to each qualifying deposit
    pub interest_rate: Decimal,

    /// Account PIN
    pub pin: Pin,
}

impl Account {
    /// Create an account from a profile and an already derived handle
    pub fn new(profile: AccountProfile, handle: Handle) -> Self {
        Account {
            owner: profile.owner,
            handle,
            transactions: profile.movements,
            interest_rate: profile.interest_rate,
            pin: profile.pin,
        }
    }

    /// First word of the owner's name, used for greetings
    pub fn first_name(&self) -> &str {
        self.owner.split(' ').find(|w| !w.is_empty()).unwrap_or("")
    }
}

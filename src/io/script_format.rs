//! CSV format handling for intent scripts, roster files and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - ScriptRecord structure and conversion to intents
//! - RosterRecord structure and conversion to account profiles
//! - Account summary serialization
//!
//! Record conversions are pure (no I/O) for easy testing; the roster
//! loaders and `write_accounts_csv` are the only functions touching readers
//! and writers.

use crate::core::ledger;
use crate::types::{Account, AccountProfile, BankError, Intent, IntentType, Pin};
use csv::{ReaderBuilder, Trim};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

/// One row of an intent script
///
/// Columns: action, user, target, amount, pin. Only `action` and `user` are
/// needed by every intent; the rest may be empty or missing.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScriptRecord {
    pub action: String,
    pub user: String,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub pin: Option<String>,
}

/// Convert a ScriptRecord to an Intent
///
/// The action is matched case-insensitively. Field values are passed on raw;
/// coercion and validation belong to the bank.
///
/// # Errors
///
/// Returns an error message if the action is unknown or the user is empty.
pub fn convert_script_record(record: ScriptRecord) -> Result<Intent, String> {
    let intent_type = match record.action.to_lowercase().as_str() {
        "login" => IntentType::Login,
        "transfer" => IntentType::Transfer,
        "loan" => IntentType::Loan,
        "close" => IntentType::Close,
        "sort" => IntentType::Sort,
        _ => return Err(format!("Invalid action: '{}'", record.action)),
    };

    if record.user.trim().is_empty() {
        return Err(format!("{:?} intent requires a user", intent_type));
    }

    let handle = record.user;
    let pin = record.pin.unwrap_or_default();
    let amount = record.amount.unwrap_or_default();

    Ok(match intent_type {
        IntentType::Login => Intent::Login { handle, pin },
        IntentType::Transfer => Intent::Transfer {
            from: handle,
            to: record.target.unwrap_or_default(),
            amount,
        },
        IntentType::Loan => Intent::Loan { handle, amount },
        IntentType::Close => Intent::Close { handle, pin },
        IntentType::Sort => Intent::Sort { handle },
    })
}

/// One row of a roster file
///
/// Columns: owner, interest_rate, pin, movements. `movements` is a
/// space-separated list of signed amounts.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RosterRecord {
    pub owner: String,
    pub interest_rate: String,
    pub pin: Pin,
    #[serde(default)]
    pub movements: String,
}

fn parse_decimal(raw: &str, field: &str, owner: &str) -> Result<Decimal, BankError> {
    Decimal::from_str(raw).map_err(|e| BankError::Parse {
        line: None,
        message: format!("invalid {} '{}' for '{}': {}", field, raw, owner, e),
    })
}

/// Convert a RosterRecord to an AccountProfile
pub fn convert_roster_record(record: RosterRecord) -> Result<AccountProfile, BankError> {
    let interest_rate = parse_decimal(record.interest_rate.trim(), "interest rate", &record.owner)?;
    let movements = record
        .movements
        .split_whitespace()
        .map(|raw| parse_decimal(raw, "movement", &record.owner))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AccountProfile {
        owner: record.owner,
        movements,
        interest_rate,
        pin: record.pin,
    })
}

/// Read every profile from a roster CSV source
///
/// Unlike scripts, rosters are configuration: the first bad row aborts.
pub fn load_roster<R: Read>(source: R) -> Result<Vec<AccountProfile>, BankError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(source);

    reader
        .deserialize::<RosterRecord>()
        .map(|row| convert_roster_record(row?))
        .collect()
}

/// Read every profile from a roster CSV file
pub fn open_roster(path: &Path) -> Result<Vec<AccountProfile>, BankError> {
    let file = File::open(path).map_err(|e| BankError::Io {
        message: format!("Failed to open file '{}': {}", path.display(), e),
    })?;
    load_roster(file)
}

/// Two-decimal rendering of an amount
///
/// Midpoints round away from zero (12.345 -> 12.35); zero never carries a
/// sign.
pub(crate) fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        format!("{:.2}", Decimal::ZERO)
    } else {
        format!("{:.2}", rounded)
    }
}

/// Write account summaries in CSV format
///
/// Columns: handle, owner, balance, deposits, withdrawals, interest.
/// Accounts keep registry order; amounts are written with two decimals.
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), BankError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["handle", "owner", "balance", "deposits", "withdrawals", "interest"])?;

    for account in accounts {
        let summary = ledger::summarize(account);
        writer.write_record(&[
            account.handle.clone(),
            account.owner.clone(),
            format_amount(summary.balance),
            format_amount(summary.deposits),
            format_amount(summary.withdrawals),
            format_amount(summary.interest),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

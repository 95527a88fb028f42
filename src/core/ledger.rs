//! Ledger operations
//!
//! Derived figures over an account's transaction list (balance, deposit and
//! withdrawal totals, qualifying interest) and the two mutations that append
//! to transaction lists: transfers and loans.
//!
//! Every mutation checks all of its rules before touching any account, so a
//! rejected operation never partially applies.
//!
//! # Overflow
//!
//! An append is refused when it would make total deposits or total
//! withdrawals unrepresentable. Every partial sum of a history lies between
//! `-withdrawals` and `deposits`, so balances can always be computed.

use crate::core::registry::AccountRegistry;
use crate::types::{Account, BankError};
use rust_decimal::Decimal;

/// Interest amounts below this floor are left out of the interest total
pub const INTEREST_FLOOR: Decimal = Decimal::ONE;

/// Share of a requested loan that some past movement must reach (0.1)
pub const LOAN_HISTORY_RATIO: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Derived financial view of one account
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerSummary {
    /// Sum of all transactions
    pub balance: Decimal,
    /// Sum of positive transactions
    pub deposits: Decimal,
    /// Absolute sum of negative transactions
    pub withdrawals: Decimal,
    /// Qualifying interest on deposits
    pub interest: Decimal,
}

/// Sum of all transactions
pub fn balance(transactions: &[Decimal]) -> Decimal {
    transactions.iter().sum()
}

/// Sum of positive transactions
pub fn total_deposits(transactions: &[Decimal]) -> Decimal {
    transactions.iter().filter(|amount| amount.is_sign_positive()).sum()
}

/// Absolute value of the sum of negative transactions
pub fn total_withdrawals(transactions: &[Decimal]) -> Decimal {
    transactions
        .iter()
        .filter(|amount| amount.is_sign_negative())
        .sum::<Decimal>()
        .abs()
}

/// Interest earned on deposits at `rate` percent
///
/// Each deposit earns `amount * rate / 100`. Individual interest amounts
/// below [`INTEREST_FLOOR`] are dropped before summing.
pub fn total_interest(transactions: &[Decimal], rate: Decimal) -> Decimal {
    transactions
        .iter()
        .filter(|amount| amount.is_sign_positive())
        .map(|&deposit| deposit.saturating_mul(rate) / Decimal::ONE_HUNDRED)
        .filter(|interest| *interest >= INTEREST_FLOOR)
        .fold(Decimal::ZERO, |total, interest| total.saturating_add(interest))
}

/// Deposit and withdrawal totals, or `None` when either is unrepresentable
///
/// A history whose totals fit can always be summed without overflow.
pub fn checked_totals(transactions: &[Decimal]) -> Option<(Decimal, Decimal)> {
    transactions
        .iter()
        .try_fold((Decimal::ZERO, Decimal::ZERO), |(deposits, withdrawals), &amount| {
            if amount.is_sign_negative() {
                Some((deposits, withdrawals.checked_add(amount.abs())?))
            } else {
                Some((deposits.checked_add(amount)?, withdrawals))
            }
        })
}

/// Compute every derived figure for an account
pub fn summarize(account: &Account) -> LedgerSummary {
    let transactions = &account.transactions;
    LedgerSummary {
        balance: balance(transactions),
        deposits: total_deposits(transactions),
        withdrawals: total_withdrawals(transactions),
        interest: total_interest(transactions, account.interest_rate),
    }
}

/// Refuse an append that would overflow the account's totals
fn ensure_appendable(account: &Account, amount: Decimal, operation: &str) -> Result<(), BankError> {
    let fits = if amount.is_sign_negative() {
        total_withdrawals(&account.transactions)
            .checked_add(amount.abs())
            .is_some()
    } else {
        total_deposits(&account.transactions)
            .checked_add(amount)
            .is_some()
    };

    if fits {
        Ok(())
    } else {
        Err(BankError::arithmetic_overflow(operation, &account.handle))
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), BankError> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(BankError::NonPositiveAmount { amount })
    }
}

/// Move `amount` from `sender` to `recipient`
///
/// Appends `-amount` to the sender and `+amount` to the recipient.
///
/// # Errors
///
/// Nothing is appended if:
/// - `amount` is not positive (`NonPositiveAmount`)
/// - The recipient does not exist (`RecipientNotFound`)
/// - The sender's balance is below `amount` (`InsufficientFunds`)
/// - Recipient and sender are the same account (`SelfTransfer`)
/// - The sender does not exist (`AccountNotFound`)
/// - Either append would overflow (`ArithmeticOverflow`)
pub fn apply_transfer(
    registry: &mut AccountRegistry,
    sender: &str,
    recipient: &str,
    amount: Decimal,
) -> Result<(), BankError> {
    ensure_positive(amount)?;

    let recipient_index = registry
        .position(recipient)
        .ok_or_else(|| BankError::recipient_not_found(recipient))?;
    let sender_index = registry
        .position(sender)
        .ok_or_else(|| BankError::account_not_found(sender))?;

    let sender_account = &registry.accounts()[sender_index];
    let sender_balance = balance(&sender_account.transactions);
    if sender_balance < amount {
        return Err(BankError::insufficient_funds(sender, sender_balance, amount));
    }
    if recipient_index == sender_index {
        return Err(BankError::self_transfer(sender));
    }

    ensure_appendable(sender_account, -amount, "transfer")?;
    ensure_appendable(&registry.accounts()[recipient_index], amount, "transfer")?;

    let (from, to) = registry.pair_mut(sender_index, recipient_index);
    from.transactions.push(-amount);
    to.transactions.push(amount);

    tracing::debug!(%sender, %recipient, %amount, "transfer applied");
    Ok(())
}

/// Credit a loan of `amount` to `account`
///
/// Approved only when some existing transaction is at least a tenth of the
/// requested amount.
///
/// # Errors
///
/// Nothing is appended if:
/// - `amount` is not positive (`NonPositiveAmount`)
/// - No transaction reaches `amount * 0.1` (`InsufficientHistory`)
/// - The append would overflow (`ArithmeticOverflow`)
pub fn apply_loan(account: &mut Account, amount: Decimal) -> Result<(), BankError> {
    ensure_positive(amount)?;

    let required = amount * LOAN_HISTORY_RATIO;
    if !account.transactions.iter().any(|&movement| movement >= required) {
        return Err(BankError::insufficient_history(
            &account.handle,
            amount,
            required,
        ));
    }

    ensure_appendable(account, amount, "loan")?;
    account.transactions.push(amount);

    tracing::debug!(handle = %account.handle, %amount, "loan applied");
    Ok(())
}

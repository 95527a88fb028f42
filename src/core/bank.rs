//! Bank context object
//!
//! This module provides the `Bank` which owns one account registry and one
//! session and exposes the intents the presentation layer can raise.
//!
//! The bank enforces:
//! - Coercion of raw amount and PIN inputs
//! - Session checks (transfer, loan, close and sort act only for the logged-in account)
//! - Atomic application (a rejected intent changes neither registry nor session)
//!
//! Every intent returns a typed result. Whether a rejection is shown to the
//! user or silently redrawn is left to the presentation layer.

use crate::core::ledger::{self, LedgerSummary};
use crate::core::registry::AccountRegistry;
use crate::core::roster;
use crate::core::session::{parse_pin, Session};
use crate::types::{Account, AccountProfile, BankError, Handle, Intent};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Everything the presentation layer needs to draw an account
#[derive(Debug, Clone, PartialEq)]
pub struct AccountView {
    /// Full owner name
    pub owner: String,
    /// First word of the owner name
    pub first_name: String,
    /// Login handle
    pub handle: Handle,
    /// Movements in display order
    pub movements: Vec<Decimal>,
    /// Whether `movements` is sorted ascending
    pub sorted: bool,
    /// Balance and summary figures
    pub summary: LedgerSummary,
}

/// Result of a successful account closure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedAccount {
    /// Owner name, for the goodbye message
    pub owner: String,
    /// Handle the account was closed under
    pub handle: Handle,
}

/// Result of applying one intent
#[derive(Debug, Clone, PartialEq)]
pub enum IntentOutcome {
    LoggedIn(AccountView),
    Transferred(AccountView),
    LoanGranted(AccountView),
    Closed(ClosedAccount),
    Sorted(AccountView),
}

/// Coerce a typed amount into a decimal
///
/// Surrounding whitespace is ignored and an empty field counts as zero.
/// Plain decimals and scientific notation (`1e3`) are accepted; digit
/// separators such as `_` or `,` are not.
pub fn parse_amount(raw: &str) -> Result<Decimal, BankError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return Err(BankError::invalid_amount(raw));
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| BankError::invalid_amount(raw))
}

/// Registry plus session, passed explicitly instead of living in globals
#[derive(Debug, Clone, Default)]
pub struct Bank {
    registry: AccountRegistry,
    session: Session,
}

impl Bank {
    /// Create a bank over an existing registry with a logged-out session
    pub fn new(registry: AccountRegistry) -> Self {
        Bank {
            registry,
            session: Session::new(),
        }
    }

    /// Build the registry from profiles and wrap it in a bank
    pub fn from_profiles(profiles: Vec<AccountProfile>) -> Result<Self, BankError> {
        Ok(Self::new(AccountRegistry::build_handles(profiles)?))
    }

    /// Bank provisioned with the built-in demo roster
    pub fn demo() -> Result<Self, BankError> {
        Self::from_profiles(roster::demo_profiles())
    }

    /// The account registry
    pub fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    /// The session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// All accounts in provisioning order
    pub fn accounts(&self) -> &[Account] {
        self.registry.accounts()
    }

    /// Every account paired with its ledger summary
    pub fn summaries(&self) -> Vec<(&Account, LedgerSummary)> {
        self.registry
            .accounts()
            .iter()
            .map(|account| (account, ledger::summarize(account)))
            .collect()
    }

    /// View of the account with the given handle
    pub fn view(&self, handle: &str) -> Option<AccountView> {
        self.registry
            .find_by_handle(handle)
            .map(|account| self.view_of(account))
    }

    /// View of the logged-in account, if any
    pub fn current_view(&self) -> Option<AccountView> {
        self.session
            .current_handle()
            .and_then(|handle| self.view(handle))
    }

    fn view_of(&self, account: &Account) -> AccountView {
        AccountView {
            owner: account.owner.clone(),
            first_name: account.first_name().to_string(),
            handle: account.handle.clone(),
            movements: self.session.display_order(&account.transactions),
            sorted: self.session.is_sorted(),
            summary: ledger::summarize(account),
        }
    }

    fn authorized_view(&self, handle: &str) -> Result<AccountView, BankError> {
        self.view(handle)
            .ok_or_else(|| BankError::account_not_found(handle))
    }

    /// Log in with a handle and PIN
    ///
    /// # Errors
    ///
    /// `UnknownHandle`, `InvalidPin` or `WrongPin`; the session is unchanged.
    pub fn login(&mut self, handle: &str, pin: &str) -> Result<AccountView, BankError> {
        let account = self.session.login(&self.registry, handle, pin)?;
        tracing::info!(%handle, "logged in");
        Ok(self.view_of(account))
    }

    /// Transfer a typed amount from the logged-in account to `to`
    ///
    /// Returns the sender's post-state. On error the sender is unchanged and
    /// [`Bank::current_view`] redraws it.
    ///
    /// # Errors
    ///
    /// Session errors, amount validation errors, or any rejection from
    /// [`ledger::apply_transfer`].
    pub fn transfer(&mut self, from: &str, to: &str, amount: &str) -> Result<AccountView, BankError> {
        self.session.authorize(from)?;
        let amount = parse_amount(amount)?;
        ledger::apply_transfer(&mut self.registry, from, to, amount)?;

        tracing::info!(%from, %to, %amount, "transfer completed");
        self.authorized_view(from)
    }

    /// Request a loan of a typed amount for the logged-in account
    ///
    /// # Errors
    ///
    /// Session errors, amount validation errors, or any rejection from
    /// [`ledger::apply_loan`].
    pub fn request_loan(&mut self, handle: &str, amount: &str) -> Result<AccountView, BankError> {
        self.session.authorize(handle)?;
        let amount = parse_amount(amount)?;
        let account = self
            .registry
            .find_by_handle_mut(handle)
            .ok_or_else(|| BankError::account_not_found(handle))?;
        ledger::apply_loan(account, amount)?;

        tracing::info!(%handle, %amount, "loan granted");
        self.authorized_view(handle)
    }

    /// Close the logged-in account
    ///
    /// Succeeds only when both `handle` and `pin` match the logged-in
    /// account. The account leaves the registry and the session logs out.
    ///
    /// # Errors
    ///
    /// `NotLoggedIn`, `SessionMismatch`, `InvalidPin` or `WrongPin`; nothing
    /// is removed.
    pub fn close_account(&mut self, handle: &str, pin: &str) -> Result<ClosedAccount, BankError> {
        self.session.authorize(handle)?;
        let pin = parse_pin(pin)?;
        let account = self
            .registry
            .find_by_handle(handle)
            .ok_or_else(|| BankError::account_not_found(handle))?;
        if account.pin != pin {
            return Err(BankError::wrong_pin(handle));
        }

        let removed = self.registry.remove_by_handle(handle)?;
        self.session.logout();

        tracing::info!(%handle, "account closed");
        Ok(ClosedAccount {
            owner: removed.owner,
            handle: removed.handle,
        })
    }

    /// Flip the sort flag and return the logged-in account's movements in
    /// the new display order
    ///
    /// # Errors
    ///
    /// `NotLoggedIn` or `SessionMismatch`; the flag is unchanged.
    pub fn toggle_sort(&mut self, handle: &str) -> Result<Vec<Decimal>, BankError> {
        self.session.authorize(handle)?;
        let account = self
            .registry
            .find_by_handle(handle)
            .ok_or_else(|| BankError::account_not_found(handle))?;

        let sorted = self.session.toggle_sort();
        tracing::debug!(%handle, sorted, "sort toggled");
        Ok(self.session.display_order(&account.transactions))
    }

    /// Apply one intent
    pub fn apply(&mut self, intent: &Intent) -> Result<IntentOutcome, BankError> {
        match intent {
            Intent::Login { handle, pin } => self.login(handle, pin).map(IntentOutcome::LoggedIn),
            Intent::Transfer { from, to, amount } => self
                .transfer(from, to, amount)
                .map(IntentOutcome::Transferred),
            Intent::Loan { handle, amount } => self
                .request_loan(handle, amount)
                .map(IntentOutcome::LoanGranted),
            Intent::Close { handle, pin } => {
                self.close_account(handle, pin).map(IntentOutcome::Closed)
            }
            Intent::Sort { handle } => {
                self.toggle_sort(handle)?;
                self.authorized_view(handle).map(IntentOutcome::Sorted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::SessionState;
    use rstest::rstest;

    fn amounts(values: &[i64]) -> Vec<Decimal> {
        values.iter().map(|&v| Decimal::new(v, 0)).collect()
    }

    fn logged_in(handle: &str, pin: &str) -> Bank {
        let mut bank = Bank::demo().unwrap();
        bank.login(handle, pin).unwrap();
        bank
    }

    fn snapshot(bank: &Bank) -> Vec<Account> {
        bank.accounts().to_vec()
    }

    #[rstest]
    #[case::plain("50", Decimal::new(50, 0))]
    #[case::padded("  50  ", Decimal::new(50, 0))]
    #[case::fraction("12.5", Decimal::new(125, 1))]
    #[case::scientific("1e3", Decimal::new(1000, 0))]
    #[case::empty("", Decimal::ZERO)]
    #[case::negative("-20", Decimal::new(-20, 0))]
    fn test_parse_amount(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_amount(raw).unwrap(), expected);
    }

    #[rstest]
    #[case::letters("abc")]
    #[case::currency("$50")]
    #[case::underscore_separator("1_000")]
    #[case::comma_separator("1,000")]
    #[case::inner_space("1 000")]
    #[case::lone_exponent("e")]
    fn test_parse_amount_rejects(#[case] raw: &str) {
        assert_eq!(parse_amount(raw), Err(BankError::invalid_amount(raw)));
    }

    #[test]
    fn test_login_returns_view() {
        let mut bank = Bank::demo().unwrap();

        let view = bank.login("mt", "1111").unwrap();
        assert_eq!(view.first_name, "Michael");
        assert_eq!(view.summary.balance, Decimal::new(3840, 0));
        assert_eq!(view.summary.deposits, Decimal::new(5020, 0));
        assert_eq!(view.summary.withdrawals, Decimal::new(1180, 0));
        assert_eq!(view.summary.interest, Decimal::new(594, 1));
        assert_eq!(
            bank.session().state(),
            &SessionState::LoggedIn("mt".to_string())
        );
    }

    #[test]
    fn test_wrong_pin_stays_logged_out() {
        let mut bank = Bank::demo().unwrap();

        assert_eq!(bank.login("mt", "1234"), Err(BankError::wrong_pin("mt")));
        assert_eq!(bank.session().state(), &SessionState::LoggedOut);
        assert!(bank.current_view().is_none());
    }

    #[test]
    fn test_transfer_updates_both_parties() {
        let mut bank = logged_in("mt", "1111");

        let view = bank.transfer("mt", "tn", "50").unwrap();
        assert_eq!(view.summary.balance, Decimal::new(3790, 0));
        assert_eq!(view.movements.last(), Some(&Decimal::new(-50, 0)));

        let recipient = bank.view("tn").unwrap();
        assert_eq!(recipient.movements.last(), Some(&Decimal::new(50, 0)));
        assert_eq!(recipient.summary.balance, Decimal::new(60, 0));
    }

    #[rstest]
    #[case::zero("tn", "0")]
    #[case::negative("tn", "-50")]
    #[case::malformed("tn", "lots")]
    #[case::empty("tn", "")]
    #[case::unknown_recipient("zz", "50")]
    #[case::insufficient("tn", "3841")]
    #[case::self_transfer("mt", "50")]
    fn test_rejected_transfer_changes_nothing(#[case] to: &str, #[case] amount: &str) {
        let mut bank = logged_in("mt", "1111");
        let before = snapshot(&bank);

        assert!(bank.transfer("mt", to, amount).is_err());
        assert_eq!(snapshot(&bank), before);
        assert_eq!(bank.current_view().unwrap().summary.balance, Decimal::new(3840, 0));
    }

    #[test]
    fn test_transfer_requires_session() {
        let mut bank = Bank::demo().unwrap();
        assert_eq!(bank.transfer("mt", "tn", "50"), Err(BankError::NotLoggedIn));

        bank.login("rl", "2222").unwrap();
        assert_eq!(
            bank.transfer("mt", "tn", "50"),
            Err(BankError::session_mismatch("mt", "rl"))
        );
    }

    #[test]
    fn test_loan() {
        let mut bank = logged_in("tn", "3333");

        // largest movement is 400, so 5000 needs 500
        assert!(matches!(
            bank.request_loan("tn", "5000"),
            Err(BankError::InsufficientHistory { .. })
        ));
        assert_eq!(bank.current_view().unwrap().movements.len(), 8);

        let view = bank.request_loan("tn", "4000").unwrap();
        assert_eq!(view.movements.last(), Some(&Decimal::new(4000, 0)));
        assert_eq!(view.summary.balance, Decimal::new(4010, 0));
    }

    #[test]
    fn test_close_account() {
        let mut bank = logged_in("tn", "3333");

        let closed = bank.close_account("tn", "3333").unwrap();
        assert_eq!(closed.owner, "Tommy Ngo");
        assert!(bank.registry().find_by_handle("tn").is_none());
        assert_eq!(bank.session().current_handle(), None);
        assert_eq!(bank.login("tn", "3333"), Err(BankError::unknown_handle("tn")));
    }

    #[rstest]
    #[case::wrong_pin("tn", "1111")]
    #[case::other_handle("mt", "1111")]
    #[case::bad_pin("tn", "x")]
    fn test_close_rejected(#[case] handle: &str, #[case] pin: &str) {
        let mut bank = logged_in("tn", "3333");

        assert!(bank.close_account(handle, pin).is_err());
        assert_eq!(bank.accounts().len(), 4);
        assert_eq!(bank.session().current_handle(), Some("tn"));
    }

    #[test]
    fn test_close_requires_session() {
        let mut bank = Bank::demo().unwrap();
        assert_eq!(bank.close_account("tn", "3333"), Err(BankError::NotLoggedIn));
        assert_eq!(bank.accounts().len(), 4);
    }

    #[test]
    fn test_toggle_sort_never_reorders_storage() {
        let mut bank = Bank::from_profiles(vec![AccountProfile {
            owner: "Alex Huynh".to_string(),
            movements: amounts(&[200, -400, 70]),
            interest_rate: Decimal::ONE,
            pin: 4444,
        }])
        .unwrap();
        bank.login("ah", "4444").unwrap();

        assert_eq!(bank.toggle_sort("ah").unwrap(), amounts(&[-400, 70, 200]));
        assert_eq!(bank.toggle_sort("ah").unwrap(), amounts(&[200, -400, 70]));
        assert_eq!(
            bank.registry().find_by_handle("ah").unwrap().transactions,
            amounts(&[200, -400, 70])
        );
    }

    #[test]
    fn test_toggle_sort_requires_session() {
        let mut bank = Bank::demo().unwrap();
        assert_eq!(bank.toggle_sort("ah"), Err(BankError::NotLoggedIn));
        assert!(!bank.session().is_sorted());
    }

    #[test]
    fn test_apply_dispatches_intents() {
        let mut bank = Bank::demo().unwrap();

        let outcome = bank
            .apply(&Intent::Login {
                handle: "ah".to_string(),
                pin: "4444".to_string(),
            })
            .unwrap();
        assert!(matches!(outcome, IntentOutcome::LoggedIn(_)));

        let outcome = bank
            .apply(&Intent::Sort {
                handle: "ah".to_string(),
            })
            .unwrap();
        match outcome {
            IntentOutcome::Sorted(view) => {
                assert!(view.sorted);
                assert_eq!(view.movements, amounts(&[50, 90, 430, 700, 1000]));
            }
            other => panic!("Expected Sorted, got {:?}", other),
        }

        let outcome = bank
            .apply(&Intent::Close {
                handle: "ah".to_string(),
                pin: "4444".to_string(),
            })
            .unwrap();
        assert_eq!(
            outcome,
            IntentOutcome::Closed(ClosedAccount {
                owner: "Alex Huynh".to_string(),
                handle: "ah".to_string(),
            })
        );
    }

    #[test]
    fn test_balance_matches_sum_after_every_intent() {
        let mut bank = Bank::demo().unwrap();
        let intents = [
            Intent::Login { handle: "rl".to_string(), pin: "2222".to_string() },
            Intent::Transfer { from: "rl".to_string(), to: "mt".to_string(), amount: "700".to_string() },
            Intent::Loan { handle: "rl".to_string(), amount: "20000".to_string() },
            Intent::Transfer { from: "rl".to_string(), to: "ah".to_string(), amount: "999999".to_string() },
        ];

        for intent in &intents {
            let _ = bank.apply(intent);
            for (account, summary) in bank.summaries() {
                let sum: Decimal = account.transactions.iter().sum();
                assert_eq!(summary.balance, sum);
                assert_eq!(summary.deposits - summary.withdrawals, sum);
            }
        }
    }
}

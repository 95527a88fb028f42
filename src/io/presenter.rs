//! Presentation layer
//!
//! The `Presenter` trait is the seam between the bank and whatever draws it.
//! The bank hands a presenter either the outcome of an intent or the
//! rejection plus the unchanged logged-in account to redraw.
//!
//! `TranscriptPresenter` renders to any writer as plain text, mirroring the
//! demo page: a welcome line, movement rows newest first, the balance and
//! the in/out/interest summary, and a goodbye line on closure.

use crate::core::{AccountView, IntentOutcome};
use crate::io::script_format::format_amount;
use crate::types::{BankError, Intent};
use rust_decimal::Decimal;
use std::io::Write;

/// Receives the result of every replayed intent
pub trait Presenter {
    /// Draw the result of an intent that was applied
    fn outcome(&mut self, intent: &Intent, outcome: &IntentOutcome) -> Result<(), BankError>;

    /// Draw a rejected intent; `current` is the logged-in account, unchanged
    fn rejected(
        &mut self,
        intent: &Intent,
        error: &BankError,
        current: Option<&AccountView>,
    ) -> Result<(), BankError>;
}

/// Presenter that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn outcome(&mut self, _intent: &Intent, _outcome: &IntentOutcome) -> Result<(), BankError> {
        Ok(())
    }

    fn rejected(
        &mut self,
        _intent: &Intent,
        _error: &BankError,
        _current: Option<&AccountView>,
    ) -> Result<(), BankError> {
        Ok(())
    }
}

/// Short description of an intent, never including PINs
pub fn describe(intent: &Intent) -> String {
    match intent {
        Intent::Login { handle, .. } => format!("login {}", handle),
        Intent::Transfer { from, to, amount } => format!("transfer {} -> {} {}", from, to, amount),
        Intent::Loan { handle, amount } => format!("loan {} {}", handle, amount),
        Intent::Close { handle, .. } => format!("close {}", handle),
        Intent::Sort { handle } => format!("sort {}", handle),
    }
}

fn money(amount: Decimal) -> String {
    format!("${}", format_amount(amount))
}

/// Plain-text presenter
///
/// With `silent` set, rejections are not announced; the unchanged account
/// is simply redrawn, as the demo page does.
pub struct TranscriptPresenter<W: Write> {
    out: W,
    silent: bool,
}

impl<W: Write> TranscriptPresenter<W> {
    pub fn new(out: W, silent: bool) -> Self {
        Self { out, silent }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, view: &AccountView) -> Result<(), BankError> {
        let rows: Vec<String> = view
            .movements
            .iter()
            .enumerate()
            .map(|(i, &movement)| {
                let kind = if movement > Decimal::ZERO { "deposit" } else { "withdrawal" };
                format!("  {:>3} {:<10} {:>12}", i + 1, kind, money(movement))
            })
            .collect();

        // newest on top
        for row in rows.iter().rev() {
            writeln!(self.out, "{}", row)?;
        }

        let summary = &view.summary;
        writeln!(self.out, "  Balance: {}", money(summary.balance))?;
        writeln!(
            self.out,
            "  In: {}  Out: {}  Interest: {}",
            money(summary.deposits),
            money(summary.withdrawals),
            money(summary.interest)
        )?;
        Ok(())
    }
}

impl<W: Write> Presenter for TranscriptPresenter<W> {
    fn outcome(&mut self, intent: &Intent, outcome: &IntentOutcome) -> Result<(), BankError> {
        writeln!(self.out, "> {}", describe(intent))?;
        match outcome {
            IntentOutcome::LoggedIn(view) => {
                writeln!(self.out, "Welcome back, {}", view.first_name)?;
                self.draw(view)
            }
            IntentOutcome::Transferred(view)
            | IntentOutcome::LoanGranted(view)
            | IntentOutcome::Sorted(view) => self.draw(view),
            IntentOutcome::Closed(closed) => {
                writeln!(self.out, "Goodbye {}", closed.owner)?;
                Ok(())
            }
        }
    }

    fn rejected(
        &mut self,
        intent: &Intent,
        error: &BankError,
        current: Option<&AccountView>,
    ) -> Result<(), BankError> {
        writeln!(self.out, "> {}", describe(intent))?;
        if !self.silent {
            writeln!(self.out, "rejected: {}", error)?;
        }
        match current {
            Some(view) => self.draw(view),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Bank, ClosedAccount};
    use rstest::rstest;

    fn render(silent: bool, f: impl FnOnce(&mut TranscriptPresenter<Vec<u8>>)) -> String {
        let mut presenter = TranscriptPresenter::new(Vec::new(), silent);
        f(&mut presenter);
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    fn login(handle: &str, pin: &str) -> Intent {
        Intent::Login {
            handle: handle.to_string(),
            pin: pin.to_string(),
        }
    }

    #[rstest]
    #[case::login(login("mt", "1111"), "login mt")]
    #[case::transfer(
        Intent::Transfer { from: "mt".to_string(), to: "tn".to_string(), amount: "50".to_string() },
        "transfer mt -> tn 50"
    )]
    #[case::close(Intent::Close { handle: "tn".to_string(), pin: "3333".to_string() }, "close tn")]
    fn test_describe_hides_pins(#[case] intent: Intent, #[case] expected: &str) {
        assert_eq!(describe(&intent), expected);
    }

    #[test]
    fn test_login_transcript() {
        let mut bank = Bank::demo().unwrap();
        let intent = login("ah", "4444");
        let outcome = bank.apply(&intent).unwrap();

        let text = render(false, |p| p.outcome(&intent, &outcome).unwrap());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "> login ah");
        assert_eq!(lines[1], "Welcome back, Alex");
        // five movements, newest first
        assert!(lines[2].contains("5 deposit"));
        assert!(lines[2].contains("$90.00"));
        assert!(lines[6].contains("1 deposit"));
        assert_eq!(lines[7], "  Balance: $2270.00");
        assert_eq!(lines[8], "  In: $2270.00  Out: $0.00  Interest: $21.30");
    }

    #[test]
    fn test_withdrawal_rows_are_labelled() {
        let mut bank = Bank::demo().unwrap();
        let intent = login("tn", "3333");
        let outcome = bank.apply(&intent).unwrap();

        let text = render(false, |p| p.outcome(&intent, &outcome).unwrap());
        assert!(text.contains("8 withdrawal"));
        assert!(text.contains("$-460.00"));
    }

    #[test]
    fn test_goodbye_transcript() {
        let closed = ClosedAccount {
            owner: "Tommy Ngo".to_string(),
            handle: "tn".to_string(),
        };
        let intent = Intent::Close {
            handle: "tn".to_string(),
            pin: "3333".to_string(),
        };

        let text = render(false, |p| {
            p.outcome(&intent, &IntentOutcome::Closed(closed))
                .unwrap()
        });
        assert_eq!(text, "> close tn\nGoodbye Tommy Ngo\n");
    }

    #[rstest]
    #[case::announced(false, true)]
    #[case::silent(true, false)]
    fn test_rejection_transcript(#[case] silent: bool, #[case] announced: bool) {
        let mut bank = Bank::demo().unwrap();
        bank.login("mt", "1111").unwrap();
        let intent = Intent::Transfer {
            from: "mt".to_string(),
            to: "mt".to_string(),
            amount: "10".to_string(),
        };
        let error = bank.apply(&intent).unwrap_err();
        let current = bank.current_view();

        let text = render(silent, |p| p.rejected(&intent, &error, current.as_ref()).unwrap());

        assert_eq!(text.contains("rejected: Cannot transfer from 'mt' to itself"), announced);
        assert!(text.contains("Balance: $3840.00"));
    }

    #[test]
    fn test_rejection_without_session_draws_nothing_else() {
        let text = render(true, |p| {
            p.rejected(&login("mt", "0"), &BankError::wrong_pin("mt"), None)
                .unwrap()
        });
        assert_eq!(text, "> login mt\n");
    }
}

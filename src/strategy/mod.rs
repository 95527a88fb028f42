//! Replay strategy module for intent scripts
//!
//! This module defines the Strategy pattern for replaying a script of user
//! intents against a bank, covering both script parsing and intent dispatch.
//! Different readers (synchronous streaming, asynchronous batched) can be
//! selected at runtime; both apply intents strictly in order, one at a time.

use crate::cli::{OutputFormat, StrategyType};
use crate::core::Bank;
use crate::io::presenter::{describe, NullPresenter, Presenter, TranscriptPresenter};
use crate::io::script_format::write_accounts_csv;
use crate::types::{BankError, Intent};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncReplayStrategy, BatchConfig};
pub use sync::SyncReplayStrategy;

/// Replay strategy trait for complete script pipelines
pub trait ReplayStrategy: Send + Sync {
    /// Replay every intent of the script at `script_path` against `bank`
    ///
    /// Each intent's outcome, or its rejection, goes to `presenter`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The script cannot be opened or read
    /// - The presenter fails to write
    ///
    /// Malformed rows and rejected intents are logged and do not stop the
    /// replay.
    fn replay(
        &self,
        bank: &mut Bank,
        script_path: &Path,
        presenter: &mut dyn Presenter,
    ) -> Result<(), BankError>;
}

/// Create a replay strategy based on the specified strategy type
///
/// `config` is only used by the async strategy; missing config means defaults.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ReplayStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncReplayStrategy),
        StrategyType::Async => Box::new(AsyncReplayStrategy::new(config.unwrap_or_default())),
    }
}

/// Apply one intent and hand the result to the presenter
pub(crate) fn dispatch(
    bank: &mut Bank,
    intent: &Intent,
    presenter: &mut dyn Presenter,
) -> Result<(), BankError> {
    match bank.apply(intent) {
        Ok(outcome) => presenter.outcome(intent, &outcome),
        Err(error) => {
            tracing::warn!(
                intent = %describe(intent),
                kind = ?error.kind(),
                "intent rejected: {}",
                error
            );
            presenter.rejected(intent, &error, bank.current_view().as_ref())
        }
    }
}

/// Replay a script and write the requested output
///
/// - `Transcript`: every intent is rendered as it is applied
/// - `Csv`: nothing is rendered during replay; final account summaries are
///   written afterwards
pub fn run(
    strategy: &dyn ReplayStrategy,
    bank: &mut Bank,
    script_path: &Path,
    format: OutputFormat,
    silent: bool,
    output: &mut dyn Write,
) -> Result<(), BankError> {
    match format {
        OutputFormat::Transcript => {
            let mut presenter = TranscriptPresenter::new(&mut *output, silent);
            strategy.replay(bank, script_path, &mut presenter)?;
        }
        OutputFormat::Csv => {
            strategy.replay(bank, script_path, &mut NullPresenter)?;
            write_accounts_csv(bank.accounts(), output)?;
        }
    }

    output.flush()?;
    Ok(())
}

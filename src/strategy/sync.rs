//! Synchronous replay strategy
//!
//! Streams the script with `SyncReader` and applies each intent through the
//! bank as soon as its row is read. Only one row is held in memory at a time.

use crate::core::Bank;
use crate::io::presenter::Presenter;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{dispatch, ReplayStrategy};
use crate::types::BankError;
use std::path::Path;

/// Synchronous replay strategy
///
/// # Examples
///
/// ```no_run
/// use rust_bank_app::core::Bank;
/// use rust_bank_app::io::TranscriptPresenter;
/// use rust_bank_app::strategy::{ReplayStrategy, SyncReplayStrategy};
/// use std::path::Path;
///
/// let mut bank = Bank::demo().expect("demo roster is valid");
/// let mut presenter = TranscriptPresenter::new(std::io::stdout(), false);
///
/// SyncReplayStrategy
///     .replay(&mut bank, Path::new("script.csv"), &mut presenter)
///     .expect("Replay failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncReplayStrategy;

impl ReplayStrategy for SyncReplayStrategy {
    fn replay(
        &self,
        bank: &mut Bank,
        script_path: &Path,
        presenter: &mut dyn Presenter,
    ) -> Result<(), BankError> {
        let reader = SyncReader::new(script_path)?;

        for result in reader {
            match result {
                Ok(intent) => dispatch(bank, &intent, presenter)?,
                Err(e) => tracing::warn!("skipping script row: {}", e),
            }
        }

        Ok(())
    }
}

//! Asynchronous batched replay strategy
//!
//! Reads the script in batches with csv-async on a current-thread tokio
//! runtime. Intents are still applied one at a time, in script order: a
//! batch is fully dispatched before the next one is read.
//!
//! # Architecture
//!
//! ```text
//! AsyncReplayStrategy
//!     ├── BatchConfig (batch_size)
//!     ├── AsyncReader (batch script reading)
//!     └── Bank (intent dispatch, one at a time)
//! ```

use crate::core::Bank;
use crate::io::async_reader::AsyncReader;
use crate::io::presenter::Presenter;
use crate::strategy::{dispatch, ReplayStrategy};
use crate::types::BankError;
use std::path::Path;

/// Configuration for batched script reading
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of script rows read per batch
    pub batch_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { batch_size: 64 }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, falling back to the default for zero
    pub fn new(batch_size: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size,
                default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        Self { batch_size }
    }
}

/// Asynchronous batched replay strategy
#[derive(Debug, Clone)]
pub struct AsyncReplayStrategy {
    config: BatchConfig,
}

impl AsyncReplayStrategy {
    /// Create a new AsyncReplayStrategy with the specified configuration
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ReplayStrategy for AsyncReplayStrategy {
    fn replay(
        &self,
        bank: &mut Bank,
        script_path: &Path,
        presenter: &mut dyn Presenter,
    ) -> Result<(), BankError> {
        // intents never run concurrently, so one thread is enough
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .map_err(|e| BankError::Io {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        runtime.block_on(async {
            let file = tokio::fs::File::open(script_path)
                .await
                .map_err(|e| BankError::Io {
                    message: format!("Failed to open file '{}': {}", script_path.display(), e),
                })?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                tracing::debug!(size = batch.len(), "replaying batch");
                for intent in &batch {
                    dispatch(bank, intent, presenter)?;
                }
            }

            Ok(())
        })
    }
}

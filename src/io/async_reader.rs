//! Asynchronous script reader with batch interface
//!
//! Reads intent scripts with csv-async, a batch of rows at a time.
//!
//! # Architecture
//!
//! ```text
//! Script file → AsyncReader → Batches of Intents
//!                   ↓
//!           script_format module
//!           (ScriptRecord, convert_script_record)
//! ```
//!
//! Rows that fail to parse or convert are logged and skipped.

use crate::io::script_format::{convert_script_record, ScriptRecord};
use crate::types::Intent;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous script reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: usize,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 0,
        }
    }

    /// Read up to `batch_size` intents
    ///
    /// Returns an empty vector once the end of the script is reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<Intent> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<ScriptRecord>();

        while batch.len() < batch_size {
            let row = match records.next().await {
                Some(row) => row,
                None => break,
            };
            self.line_num += 1;
            let line = self.line_num + 1;

            match row {
                Ok(record) => match convert_script_record(record) {
                    Ok(intent) => batch.push(intent),
                    Err(e) => tracing::warn!(line, "skipping script row: {}", e),
                },
                Err(e) => tracing::warn!(line, "CSV parse error: {}", e),
            }
        }

        batch
    }
}

//! Synchronous script reader with iterator interface
//!
//! Provides a streaming iterator over intents from a script CSV file.
//! Delegates format concerns to the script_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding `Result<Intent, String>`
//! for each CSV row:
//!
//! ```no_run
//! use rust_bank_app::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("script.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(intent) => println!("Replaying: {:?}", intent),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as Err variants, with line numbers

use crate::io::script_format::{convert_script_record, ScriptRecord};
use crate::types::{BankError, Intent};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Synchronous script reader
#[derive(Debug)]
pub struct SyncReader<R: Read = File> {
    reader: csv::Reader<R>,
    line_num: usize,
}

impl SyncReader<File> {
    /// Open a script file for streaming iteration
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file cannot be opened.
    pub fn new(path: &Path) -> Result<Self, BankError> {
        let file = File::open(path).map_err(|e| BankError::Io {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        })?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> SyncReader<R> {
    /// Wrap any reader holding script CSV
    ///
    /// Fields are trimmed and rows may omit trailing columns.
    pub fn from_reader(source: R) -> Self {
        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            reader,
            line_num: 0,
        }
    }
}

impl<R: Read> Iterator for SyncReader<R> {
    type Item = Result<Intent, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<ScriptRecord>();

        let row = deserializer.next()?;
        self.line_num += 1;
        // +1 for the header row
        let line = self.line_num + 1;

        Some(match row {
            Ok(record) => convert_script_record(record).map_err(|e| format!("Line {}: {}", line, e)),
            Err(e) => Err(format!("Line {}: CSV parse error: {}", line, e)),
        })
    }
}

//! I/O module
//!
//! Handles script and roster parsing, account output, and presentation.
//!
//! # Components
//!
//! - `script_format` - CSV format handling (script rows, roster rows, account summaries)
//! - `sync_reader` - Synchronous script reader with iterator interface
//! - `async_reader` - Asynchronous script reader with batch reading interface
//! - `presenter` - Presentation layer seam and its plain-text implementation

pub mod async_reader;
pub mod presenter;
pub mod script_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use presenter::{NullPresenter, Presenter, TranscriptPresenter};
pub use script_format::{
    convert_script_record, load_roster, open_roster, write_accounts_csv, RosterRecord, ScriptRecord,
};
pub use sync_reader::SyncReader;

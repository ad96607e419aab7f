//! Merge engine for combining a Septuagint (LXX) module with an SBLGNT
//! New Testament module into a single MyBible-format SQLite database.
//!
//! The library side of the tool: canonical book numbering, SBLGNT module
//! discovery, bridging-file inspection, and the database merge itself.
//! The `greekbible-merge` binary wires these together behind a CLI.
//!
//! # Merge Model
//! The LXX module is the base. It is copied to the output path, the SBLGNT
//! module is attached, and New Testament books are appended with book
//! numbers remapped into the reserved 470..=730 range so the combined
//! module reads Genesis through Revelation in order.

pub mod bridging;
pub mod canon;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod merge;
pub mod models;

pub use canon::{NT_BASE_BOOK_NUMBER, NT_BOOK_NUMBER_STEP, NT_BOOKS, match_book};
pub use error::{MergeError, Result};
pub use logging::init_logging;
pub use merge::{MergeConfig, merge_modules};
pub use models::{MergeReport, SourceBook};

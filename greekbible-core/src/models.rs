//! Data structures shared across the merge pipeline.

use serde::{Deserialize, Serialize};

/// A book row read from the attached SBLGNT module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBook {
    /// Book number as the source module assigns it.
    pub book_number: i64,
    /// Full book name (e.g. "Matthew").
    pub long_name: String,
    /// Abbreviated name (e.g. "Mat"), when the module carries one.
    pub short_name: Option<String>,
}

/// A source book that could not be matched to the canonical NT list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedBook {
    /// Full book name from the source module.
    pub long_name: String,
    /// Why the book was skipped.
    pub reason: String,
}

/// Summary of a completed merge run.
///
/// Serializable so the CLI can emit it as a JSON report alongside the
/// merged module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeReport {
    /// Path of the SBLGNT module that was merged in.
    pub sbl_database: String,
    /// Path of the merged output module.
    pub output: String,
    /// Number of NT books matched and inserted.
    pub books_merged: usize,
    /// Source books skipped (no canonical match, or duplicate match).
    pub books_skipped: Vec<SkippedBook>,
    /// Number of NT verses inserted.
    pub verses_inserted: usize,
    /// Entries found in the bridging CSV (informational).
    pub bridging_entries: usize,
    /// Wall-clock duration of the merge in milliseconds.
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_report_round_trips_through_json() {
        let report = MergeReport {
            sbl_database: "SBLGNT.SQLite3".to_string(),
            output: "CompleteGreekBible.SQLite3".to_string(),
            books_merged: 27,
            books_skipped: vec![SkippedBook {
                long_name: "Didache".to_string(),
                reason: "no canonical NT match".to_string(),
            }],
            verses_inserted: 7941,
            bridging_entries: 120,
            duration_ms: 42,
        };

        let json = serde_json::to_string(&report).unwrap();
        let parsed: MergeReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.books_merged, 27);
        assert_eq!(parsed.books_skipped.len(), 1);
        assert_eq!(parsed.verses_inserted, 7941);
    }
}

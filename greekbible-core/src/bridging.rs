//! Bridging file inspection.
//!
//! The bridging CSV cross-references LXX lexicon numbers with NT lexicon
//! numbers (`LXXno2NTno.csv`). The merge itself never consumes it; the load
//! exists to confirm the file is present and report how many entries it
//! carries. A missing file is a warning, not an error.

use crate::error::MergeError;
use crate::Result;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Loads the lexicon bridging map from a CSV file.
///
/// Each line is comma-separated; lines with at least two fields contribute
/// one `lxx_id -> nt_id` entry. Later duplicates of an LXX id overwrite
/// earlier ones, matching last-write-wins map insertion.
///
/// Returns an empty map (with a warning) when the file does not exist.
///
/// # Errors
/// Returns an error only when the file exists but cannot be read.
pub fn load_bridging_data(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        warn!(
            "Bridging file {} not found. Lexicon mapping verification skipped.",
            path.display()
        );
        return Ok(HashMap::new());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| {
        MergeError::io(format!("Failed to read bridging file {}", path.display()), e)
    })?;

    let mut mapping = HashMap::new();
    for line in contents.lines() {
        let mut fields = line.split(',');
        if let (Some(lxx_id), Some(nt_id)) = (fields.next(), fields.next()) {
            mapping.insert(lxx_id.trim().to_string(), nt_id.trim().to_string());
        }
    }

    info!("Loaded {} bridging entries.", mapping.len());
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file_yields_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let mapping = load_bridging_data(&dir.path().join("absent.csv")).unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_counts_two_field_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("LXXno2NTno.csv");
        fs::write(&path, "1,10\n2,20\nmalformed\n3,30,extra\n").unwrap();

        let mapping = load_bridging_data(&path).unwrap();
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.get("1"), Some(&"10".to_string()));
        assert_eq!(mapping.get("3"), Some(&"30".to_string()));
        assert!(!mapping.contains_key("malformed"));
    }

    #[test]
    fn test_duplicate_lxx_id_is_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.csv");
        fs::write(&path, "1,10\n1,11\n").unwrap();

        let mapping = load_bridging_data(&path).unwrap();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("1"), Some(&"11".to_string()));
    }
}

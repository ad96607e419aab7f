//! SBLGNT module discovery.
//!
//! The SBLGNT add-on repository ships several `.SQLite3` files: the Bible
//! module itself plus dictionaries and lexicon cross-references. The Bible
//! module normally lives under `end-user-modules/`, so that subtree is
//! searched first; a whole-repo sweep is the fallback for nonstandard
//! checkouts.

use crate::error::MergeError;
use crate::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Finds the SBLGNT Bible database inside the add-on repository.
///
/// Search order:
/// 1. `<repo>/end-user-modules/` recursively, excluding any path containing
///    `dictionary` or `lexicon` (case-insensitive).
/// 2. The whole repository, excluding only `dictionary` paths.
///
/// Candidates are sorted by path so the pick is deterministic across
/// filesystems; the first candidate wins.
///
/// # Errors
/// Returns [`MergeError::NoDatabaseFound`] when neither pass yields a
/// candidate.
pub fn find_sbl_database(repo_dir: &Path) -> Result<PathBuf> {
    let end_user_dir = repo_dir.join("end-user-modules");

    let mut candidates = collect_sqlite_files(&end_user_dir, &["dictionary", "lexicon"]);

    if candidates.is_empty() {
        debug!(
            "No candidates under {}, falling back to whole-repo search",
            end_user_dir.display()
        );
        candidates = collect_sqlite_files(repo_dir, &["dictionary"]);
    }

    candidates.sort();

    match candidates.into_iter().next() {
        Some(path) => {
            info!("Found SBLGNT database: {}", path.display());
            Ok(path)
        }
        None => Err(MergeError::NoDatabaseFound {
            search_dir: repo_dir.display().to_string(),
        }),
    }
}

/// Collects `.SQLite3` files under a directory, skipping excluded names.
///
/// The extension check is case-insensitive (`.SQLite3`, `.sqlite3`, ...),
/// as is the exclusion match against the full path.
fn collect_sqlite_files(dir: &Path, excluded: &[&str]) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("sqlite3"))
        })
        .map(|e| e.into_path())
        .filter(|path| {
            let lower = path.display().to_string().to_lowercase();
            !excluded.iter().any(|needle| lower.contains(needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_finds_module_in_end_user_dir() {
        let repo = tempfile::tempdir().unwrap();
        let module = repo
            .path()
            .join("end-user-modules/bibles/SBLGNT.SQLite3");
        touch(&module);
        touch(&repo.path().join("end-user-modules/SBLGNT-dictionary.SQLite3"));

        let found = find_sbl_database(repo.path()).unwrap();
        assert_eq!(found, module);
    }

    #[test]
    fn test_excludes_lexicon_in_primary_pass() {
        let repo = tempfile::tempdir().unwrap();
        let module = repo.path().join("end-user-modules/SBLGNT.SQLite3");
        touch(&module);
        touch(&repo.path().join("end-user-modules/greek-lexicon.SQLite3"));

        let found = find_sbl_database(repo.path()).unwrap();
        assert_eq!(found, module);
    }

    #[test]
    fn test_falls_back_to_whole_repo() {
        let repo = tempfile::tempdir().unwrap();
        let module = repo.path().join("modules/SBLGNT.SQLite3");
        touch(&module);

        let found = find_sbl_database(repo.path()).unwrap();
        assert_eq!(found, module);
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let repo = tempfile::tempdir().unwrap();
        let module = repo.path().join("end-user-modules/sblgnt.sqlite3");
        touch(&module);

        let found = find_sbl_database(repo.path()).unwrap();
        assert_eq!(found, module);
    }

    #[test]
    fn test_empty_repo_is_an_error() {
        let repo = tempfile::tempdir().unwrap();
        let result = find_sbl_database(repo.path());
        assert!(matches!(result, Err(MergeError::NoDatabaseFound { .. })));
    }

    #[test]
    fn test_deterministic_pick_is_first_sorted() {
        let repo = tempfile::tempdir().unwrap();
        touch(&repo.path().join("end-user-modules/b-module.SQLite3"));
        touch(&repo.path().join("end-user-modules/a-module.SQLite3"));

        let found = find_sbl_database(repo.path()).unwrap();
        assert!(found.ends_with("a-module.SQLite3"));
    }
}

//! Database merge engine.
//!
//! Works on a copy of the LXX base module: the copy is opened read-write,
//! the SBLGNT module is attached read-only under the `sbl` schema name, and
//! book/verse rows are appended with remapped book numbers. The original
//! inputs are never written to.
//!
//! # MyBible Schema
//! - `books(book_number, book_color, short_name, long_name)`
//! - `verses(book_number, chapter, verse, text)`
//! - `info(name, value)` key/value metadata

use crate::canon;
use crate::error::MergeError;
use crate::models::{MergeReport, SkippedBook, SourceBook};
use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Gold book color assigned to merged NT books in the `books` table.
const NT_BOOK_COLOR: &str = "#FFD700";

/// Description written to `info.description` after the merge.
const MERGED_DESCRIPTION: &str = "LXX-Rahlfs-1935 + SBLGNT";

/// Title written to `info.title` after the merge.
const MERGED_TITLE: &str = "Complete Greek Bible (LXX + SBLGNT)";

/// Inputs and output location for a merge run.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// LXX base module; copied, never mutated.
    pub lxx_source: PathBuf,
    /// SBLGNT module to attach and merge in.
    pub sbl_database: PathBuf,
    /// Output path for the combined module. Overwritten if present.
    pub output: PathBuf,
    /// Entry count from the bridging CSV, carried into the report.
    pub bridging_entries: usize,
}

/// Merges the SBLGNT module into a copy of the LXX module.
///
/// Steps:
/// 1. Copy `lxx_source` to `output`.
/// 2. Attach `sbl_database` and read its `books` table.
/// 3. Remap book numbers via the canonical NT table; insert matched books.
/// 4. Copy every verse of a matched book, remapped, in one transaction.
/// 5. Overwrite the `description` and `title` metadata rows.
///
/// # Errors
/// Fails when the source is missing, the copy cannot be written, or any
/// database operation fails. A failed run may leave a partial output file;
/// rerunning overwrites it.
pub async fn merge_modules(config: &MergeConfig) -> Result<MergeReport> {
    let start = std::time::Instant::now();

    if !config.lxx_source.exists() {
        return Err(MergeError::missing_input(
            &config.lxx_source,
            "base LXX module",
        ));
    }

    info!(
        "Creating {} from {}...",
        config.output.display(),
        config.lxx_source.display()
    );
    tokio::fs::copy(&config.lxx_source, &config.output)
        .await
        .map_err(|e| {
            MergeError::io(
                format!(
                    "Failed to copy {} to {}",
                    config.lxx_source.display(),
                    config.output.display()
                ),
                e,
            )
        })?;

    let pool = open_output_database(&config.output).await?;

    info!("Attaching SBLGNT database...");
    attach_sbl_database(&pool, &config.sbl_database).await?;

    let result = merge_into(&pool, config, start).await;

    pool.close().await;
    result
}

/// Runs the post-attach merge steps against the output pool.
async fn merge_into(
    pool: &SqlitePool,
    config: &MergeConfig,
    start: std::time::Instant,
) -> Result<MergeReport> {
    debug!("Analyzing SBL book structure");
    let sbl_books = read_sbl_books(pool).await?;
    info!("Found {} books in SBLGNT module", sbl_books.len());

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| MergeError::database("Failed to begin merge transaction", e))?;

    info!("Merging books...");
    let (book_id_map, books_skipped) = {
        let mut map: HashMap<i64, i64> = HashMap::new();
        let mut claimed: HashSet<usize> = HashSet::new();
        let mut skipped = Vec::new();

        for book in &sbl_books {
            let Some(index) = canon::match_book(&book.long_name, book.short_name.as_deref())
            else {
                warn!(
                    "Could not match SBL book '{}' to standard NT list. Skipping.",
                    book.long_name
                );
                skipped.push(SkippedBook {
                    long_name: book.long_name.clone(),
                    reason: "no canonical NT match".to_string(),
                });
                continue;
            };

            if !claimed.insert(index) {
                warn!(
                    "SBL book '{}' matches an already-assigned NT slot. Skipping.",
                    book.long_name
                );
                skipped.push(SkippedBook {
                    long_name: book.long_name.clone(),
                    reason: "canonical slot already assigned".to_string(),
                });
                continue;
            }

            let target_id = canon::book_number_for_index(index);
            map.insert(book.book_number, target_id);

            sqlx::query(
                "INSERT INTO books (book_number, book_color, short_name, long_name)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(target_id)
            .bind(NT_BOOK_COLOR)
            .bind(&book.short_name)
            .bind(&book.long_name)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                MergeError::database(format!("Failed to insert book '{}'", book.long_name), e)
            })?;
        }

        (map, skipped)
    };

    info!("Merging verses (this may take a moment)...");
    let verses_inserted = copy_verses(&mut tx, &book_id_map).await?;
    info!("Inserted {} NT verses.", verses_inserted);

    update_metadata(&mut tx).await?;

    tx.commit()
        .await
        .map_err(|e| MergeError::database("Failed to commit merge transaction", e))?;

    let duration = start.elapsed();
    info!(
        "Merge completed in {:.2}s - {} books, {} verses",
        duration.as_secs_f64(),
        book_id_map.len(),
        verses_inserted
    );

    Ok(MergeReport {
        sbl_database: config.sbl_database.display().to_string(),
        output: config.output.display().to_string(),
        books_merged: book_id_map.len(),
        books_skipped,
        verses_inserted,
        bridging_entries: config.bridging_entries,
        duration_ms: duration.as_millis() as u64,
    })
}

/// Opens the output module read-write with a single-connection pool.
///
/// SQLite needs no pooling here; one connection holds the attach for the
/// whole run.
async fn open_output_database(path: &Path) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(false);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(|e| {
            MergeError::database(
                format!("Failed to open output database {}", path.display()),
                e,
            )
        })
}

/// Attaches the SBLGNT module under the `sbl` schema name.
async fn attach_sbl_database(pool: &SqlitePool, path: &Path) -> Result<()> {
    sqlx::query("ATTACH DATABASE ? AS sbl")
        .bind(path.display().to_string())
        .execute(pool)
        .await
        .map_err(|e| {
            MergeError::database(
                format!("Failed to attach SBLGNT database {}", path.display()),
                e,
            )
        })?;
    Ok(())
}

/// Reads the book list from the attached SBLGNT module.
async fn read_sbl_books(pool: &SqlitePool) -> Result<Vec<SourceBook>> {
    let rows = sqlx::query(
        "SELECT book_number, long_name, short_name FROM sbl.books ORDER BY book_number",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| MergeError::database("Failed to read sbl.books", e))?;

    let mut books = Vec::with_capacity(rows.len());
    for row in rows {
        books.push(SourceBook {
            book_number: row
                .try_get("book_number")
                .map_err(|e| MergeError::database("Failed to read books.book_number", e))?,
            long_name: row
                .try_get("long_name")
                .map_err(|e| MergeError::database("Failed to read books.long_name", e))?,
            short_name: row
                .try_get("short_name")
                .map_err(|e| MergeError::database("Failed to read books.short_name", e))?,
        });
    }
    Ok(books)
}

/// Copies all verses of matched books into the main `verses` table.
///
/// Verses of unmatched books are dropped; their books were never inserted,
/// so carrying their rows over would orphan them.
async fn copy_verses(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    book_id_map: &HashMap<i64, i64>,
) -> Result<usize> {
    let rows = sqlx::query("SELECT book_number, chapter, verse, text FROM sbl.verses")
        .fetch_all(&mut **tx)
        .await
        .map_err(|e| MergeError::database("Failed to read sbl.verses", e))?;

    let mut inserted = 0usize;
    for row in rows {
        let old_book: i64 = row
            .try_get("book_number")
            .map_err(|e| MergeError::database("Failed to read verses.book_number", e))?;

        let Some(new_book) = book_id_map.get(&old_book) else {
            continue;
        };

        let chapter: i64 = row
            .try_get("chapter")
            .map_err(|e| MergeError::database("Failed to read verses.chapter", e))?;
        let verse: i64 = row
            .try_get("verse")
            .map_err(|e| MergeError::database("Failed to read verses.verse", e))?;
        let text: String = row
            .try_get("text")
            .map_err(|e| MergeError::database("Failed to read verses.text", e))?;

        sqlx::query("INSERT INTO verses (book_number, chapter, verse, text) VALUES (?, ?, ?, ?)")
            .bind(new_book)
            .bind(chapter)
            .bind(verse)
            .bind(&text)
            .execute(&mut **tx)
            .await
            .map_err(|e| MergeError::database("Failed to insert verse", e))?;
        inserted += 1;
    }

    Ok(inserted)
}

/// Overwrites the module metadata to describe the combined text.
async fn update_metadata(tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>) -> Result<()> {
    sqlx::query("UPDATE info SET value = ? WHERE name = 'description'")
        .bind(MERGED_DESCRIPTION)
        .execute(&mut **tx)
        .await
        .map_err(|e| MergeError::database("Failed to update info.description", e))?;

    sqlx::query("INSERT OR REPLACE INTO info (name, value) VALUES ('title', ?)")
        .bind(MERGED_TITLE)
        .execute(&mut **tx)
        .await
        .map_err(|e| MergeError::database("Failed to update info.title", e))?;

    Ok(())
}

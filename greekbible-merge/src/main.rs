//! One-shot merge of an LXX module and an SBLGNT module into a single
//! MyBible-format Greek Bible database.
//!
//! The defaults reproduce the fixed project layout this migration was
//! written for; every path can be overridden for nonstandard checkouts.
//! The LXX source is never modified: all work happens on a copy.

use anyhow::Context;
use clap::{Args, Parser};
use greekbible_core::bridging::load_bridging_data;
use greekbible_core::discovery::find_sbl_database;
use greekbible_core::merge::{MergeConfig, merge_modules};
use greekbible_core::{MergeReport, init_logging};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "greekbible-merge")]
#[command(about = "Merge LXX and SBLGNT MyBible modules into a combined Greek Bible")]
#[command(version)]
#[command(long_about = "
Greek Bible Merge - combine Septuagint and SBLGNT modules

Copies the LXX base module, attaches the SBLGNT New Testament module found
in the add-on repository, and appends its books and verses with book
numbers remapped into the reserved 470..=730 range. Two metadata rows are
rewritten to describe the combined text.

The source modules are never modified; the merge works on a copy.

EXAMPLES:
  greekbible-merge
  greekbible-merge --output CompleteGreekBible.SQLite3
  greekbible-merge --sbl-repo ../SBLGNT-add-ons --report merge-report.json
")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// LXX base module (copied, never mutated)
    #[arg(
        long,
        default_value = "11_end-users_files/MyBible/Bibles/LXX1.SQLite3",
        help = "Path to the LXX base module"
    )]
    lxx_source: PathBuf,

    /// SBLGNT add-on repository to search for the NT module
    #[arg(
        long,
        default_value = "SBLGNT-add-ons",
        help = "Directory searched recursively for the SBLGNT .SQLite3 module"
    )]
    sbl_repo: PathBuf,

    /// Lexicon bridging CSV (existence-checked and counted only)
    #[arg(
        long,
        default_value = "09b_bridging_NT/LXXno2NTno.csv",
        help = "Bridging CSV cross-referencing LXX and NT lexicon numbers"
    )]
    bridging_file: PathBuf,

    /// Output path for the combined module
    #[arg(
        short,
        long,
        default_value = "CompleteGreekBible.SQLite3",
        help = "Output path for the merged module (overwritten if present)"
    )]
    output: PathBuf,

    /// Write the merge summary as JSON
    #[arg(long, help = "Write a JSON merge report to this path")]
    report: Option<PathBuf>,
}

#[derive(Args)]
struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all output except errors")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    // Availability check only; the merge itself never consumes the mapping.
    let bridging = load_bridging_data(&cli.bridging_file)
        .context("Failed to load bridging file")?;

    let sbl_database =
        find_sbl_database(&cli.sbl_repo).context("SBLGNT module discovery failed")?;

    let config = MergeConfig {
        lxx_source: cli.lxx_source.clone(),
        sbl_database,
        output: cli.output.clone(),
        bridging_entries: bridging.len(),
    };

    let report = merge_modules(&config)
        .await
        .context("Database merge failed")?;

    if let Some(ref report_path) = cli.report {
        write_report(&report, report_path)?;
        info!("Merge report written to {}", report_path.display());
    }

    println!("Success! Database merge complete.");
    println!("Output: {}", report.output);
    println!("Books merged: {}", report.books_merged);
    println!("Verses inserted: {}", report.verses_inserted);
    if !report.books_skipped.is_empty() {
        println!("Books skipped: {}", report.books_skipped.len());
    }

    Ok(())
}

/// Serializes the merge report to a JSON file.
fn write_report(report: &MergeReport, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("Report serialization failed")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}

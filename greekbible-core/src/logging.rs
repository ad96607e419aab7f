//! Logging setup for the merge binary.

use crate::Result;

/// Maps the CLI verbosity flags to a tracing level.
///
/// `quiet` always wins; otherwise each `-v` steps INFO -> DEBUG -> TRACE.
fn level_for(verbose: u8, quiet: bool) -> tracing::Level {
    match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::INFO,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    }
}

/// Installs the global tracing subscriber for a run.
///
/// # Arguments
/// * `verbose` - Verbosity level (0=INFO, 1=DEBUG, 2+=TRACE)
/// * `quiet` - If true, only show ERROR level logs
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level_for(verbose, quiet))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| {
            crate::error::MergeError::configuration(format!(
                "Failed to initialize logging: {}",
                e
            ))
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    // A subscriber can only be installed once per test process, so the
    // tests cover the level mapping rather than init_logging itself.

    use super::level_for;

    #[test]
    fn test_quiet_overrides_verbosity() {
        assert_eq!(level_for(0, true), tracing::Level::ERROR);
        assert_eq!(level_for(5, true), tracing::Level::ERROR);
    }

    #[test]
    fn test_verbosity_ladder() {
        assert_eq!(level_for(0, false), tracing::Level::INFO);
        assert_eq!(level_for(1, false), tracing::Level::DEBUG);
        assert_eq!(level_for(2, false), tracing::Level::TRACE);
        assert_eq!(level_for(10, false), tracing::Level::TRACE);
    }
}

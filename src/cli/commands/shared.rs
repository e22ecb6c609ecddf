//! Shared components for CLI commands
//!
//! Logging setup, configuration loading and the progress reporting used by
//! both the watch and lookup commands.

use crate::app::services::refresh::RefreshOutcome;
use crate::cli::args::Args;
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("aqi_lookup={}", log_level)));

    if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Locate and load the configuration file
pub fn load_config(args: &Args) -> Result<Config> {
    let path = args.config_path()?;
    info!("Using config file: {}", path.display());
    Config::load(&path)
}

/// Run a refresh future behind a spinner, giving up if the user interrupts
///
/// On interruption the refresh future is dropped mid-flight: the refresh is
/// abandoned, not finished, and its controller is left in whatever state it
/// had reached. Callers exit instead of reusing that controller.
///
/// # Errors
/// * `Error::Interrupted` if `cancellation_token` fires first
/// * Whatever the refresh itself returns
pub async fn with_spinner<T, F>(
    message: &str,
    show_progress: bool,
    cancellation_token: &CancellationToken,
    refresh: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let spinner = show_progress.then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let result = tokio::select! {
        _ = cancellation_token.cancelled() => {
            Err(Error::interrupted("Refresh interrupted by user"))
        }
        result = refresh => result,
    };

    if let Some(pb) = spinner {
        match &result {
            Ok(_) => pb.finish_with_message(format!("{} done", message)),
            Err(_) => pb.abandon_with_message(format!("{} failed", message)),
        }
    }

    result
}

/// Print one line per refreshed dataset
pub fn print_outcome(dataset: &str, outcome: &RefreshOutcome) {
    match outcome {
        RefreshOutcome::UpToDate => {
            println!("{} {}: {}", "✓".green(), dataset.bold(), "up to date".dimmed());
        }
        RefreshOutcome::Complete(stats) => {
            let marker = if stats.parse_errors > 0 {
                "!".yellow()
            } else {
                "✓".green()
            };
            println!("{} {}", marker, stats.summary());

            for error in &stats.errors {
                println!("    {}", error.yellow());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_spinner_returns_result() {
        let token = CancellationToken::new();

        let value = with_spinner("Refreshing", false, &token, async { Ok(42) })
            .await
            .unwrap();

        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_with_spinner_is_interrupted_by_cancellation() {
        let token = CancellationToken::new();
        token.cancel();

        let result: Result<()> = with_spinner("Refreshing", false, &token, async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(Error::Interrupted { .. })));
    }

    #[tokio::test]
    async fn test_interrupted_refresh_is_abandoned() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let token = CancellationToken::new();
        let finished = Arc::new(AtomicBool::new(false));
        let refresh_finished = Arc::clone(&finished);

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let result: Result<()> = with_spinner("Refreshing", false, &token, async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            refresh_finished.store(true, Ordering::SeqCst);
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(Error::Interrupted { .. })));
        assert!(!finished.load(Ordering::SeqCst));
    }
}

//! Watch command: initial load followed by periodic refreshes

use crate::Result;
use crate::app::services::datasets::Datasets;
use crate::app::services::http_source::ReqwestSource;
use crate::cli::args::{Args, WatchArgs};
use crate::cli::commands::shared::{load_config, print_outcome, with_spinner};
use colored::*;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Load every dataset, then keep them fresh until cancelled
pub async fn run_watch(
    args: &Args,
    watch_args: &WatchArgs,
    cancellation_token: CancellationToken,
) -> Result<()> {
    let config = load_config(args)?;
    let client = ReqwestSource::new(&config.http)?;
    let mut datasets = Datasets::from_config(&config, client)?;

    let outcomes = with_spinner(
        "Loading datasets...",
        args.show_progress(),
        &cancellation_token,
        datasets.refresh_all(),
    )
    .await?;

    if args.show_progress() {
        for (dataset, outcome) in &outcomes {
            print_outcome(dataset, outcome);
        }
    }

    if watch_args.once {
        return Ok(());
    }

    let (services, tasks) = datasets.spawn_periodic(&cancellation_token);

    if args.show_progress() {
        println!(
            "{} {} area mappings, {} ZIP codes, {} forecasts, {} observations loaded",
            "Watching:".bold(),
            services.area.len(),
            services.geo.len(),
            services.report.forecast_count(),
            services.report.observation_count()
        );
        println!("{}", "Press CTRL+C to stop".dimmed());
    }

    cancellation_token.cancelled().await;
    info!("Waiting for refresh tasks to stop");
    tasks.join().await
}

//! Command implementations for the AQI lookup CLI
//!
//! Each command is implemented in its own module; `shared` holds logging
//! setup, configuration loading and progress output.

pub mod lookup;
pub mod shared;
pub mod watch;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};
use tokio_util::sync::CancellationToken;

/// Main command runner
///
/// Dispatches to the subcommand handler:
/// - `watch`: load every dataset and keep it fresh until interrupted
/// - `lookup`: load the dataset a query needs and answer it
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<()> {
    shared::setup_logging(&args)?;

    match &args.command {
        Some(Commands::Watch(watch_args)) => {
            watch::run_watch(&args, watch_args, cancellation_token).await
        }
        Some(Commands::Lookup(lookup_args)) => {
            lookup::run_lookup(&args, lookup_args, cancellation_token).await
        }
        None => Err(Error::configuration("No command given")),
    }
}

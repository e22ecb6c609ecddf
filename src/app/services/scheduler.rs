//! Periodic background refreshes
//!
//! Each dataset gets its own task that owns its controller, so refreshes of
//! one dataset never overlap while different datasets refresh independently.

use crate::app::services::field_mapper::RecordMapper;
use crate::app::services::http_source::HttpSource;
use crate::app::services::refresh::{RecordRefreshController, RefreshOutcome};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Refresh a dataset every `interval` until `cancellation_token` fires
///
/// The first refresh happens one interval after the call; the caller is
/// expected to have run the initial refresh itself. A failed refresh is
/// logged and retried at the next tick, never earlier. Ticks missed while a
/// slow refresh was running are skipped. Cancellation is only observed
/// between refreshes.
///
/// The task hands the controller back when it stops.
pub fn spawn_periodic_refresh<M, C>(
    mut controller: RecordRefreshController<M, C>,
    interval: Duration,
    cancellation_token: CancellationToken,
) -> JoinHandle<RecordRefreshController<M, C>>
where
    M: RecordMapper + 'static,
    C: HttpSource + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancellation_token.cancelled() => {
                    info!("Stopping periodic refresh of '{}'", controller.dataset());
                    break;
                }
                _ = ticker.tick() => {
                    match controller.refresh().await {
                        Ok(RefreshOutcome::UpToDate) => {
                            debug!("Dataset '{}' unchanged", controller.dataset());
                        }
                        Ok(RefreshOutcome::Complete(_)) => {}
                        Err(e) => {
                            warn!("Scheduled refresh of '{}' failed: {}", controller.dataset(), e);
                        }
                    }
                }
            }
        }

        controller
    })
}

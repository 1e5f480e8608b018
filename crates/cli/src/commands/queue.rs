//! Live queue commands.
//!
//! # Usage
//!
//! ```bash
//! queuemate queue show
//! queuemate queue watch          # refresh every QUEUEMATE_POLL_INTERVAL_SECS until Ctrl-C
//! ```

use std::time::Duration;

use queuemate_client::{ClientError, QueueMate, Screen};

use super::require;
use crate::error::CliError;
use crate::render;

/// Print today's queue once.
pub async fn show(app: &QueueMate) -> Result<(), CliError> {
    require(app, Screen::Dashboard).await?;
    let mut dashboard = app.dashboard()?;

    let entries = dashboard.load_queue().await?;
    render::queue(entries);
    render::stats(dashboard.queue_stats());
    Ok(())
}

/// Keep printing the queue until interrupted or the session ends.
pub async fn watch(app: &QueueMate, interval: Option<u64>) -> Result<(), CliError> {
    require(app, Screen::Dashboard).await?;
    let dashboard = app.dashboard()?;

    let period = interval.map_or(app.config().poll_interval, Duration::from_secs);
    let poller = dashboard.poller(period);
    let mut snapshots = poller.snapshots();

    tracing::info!(period_secs = period.as_secs(), "Watching queue, press Ctrl-C to stop");

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                if snapshot.stopped {
                    return Err(ClientError::Unauthorized.into());
                }
                render::snapshot(&snapshot);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}

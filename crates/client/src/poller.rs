//! Periodic queue refresh for a visible dashboard.
//!
//! The poller runs on its own task and publishes each successful fetch
//! through a `watch` channel. It skips ticks while hidden, fetches at once
//! when shown again, stops once the session ends or no longer links the
//! polled shop, and is aborted when the [`QueuePoller`] handle is dropped.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use queuemate_core::{QueueEntry, QueueStats, ShopId};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::session::Session;

/// Shortest period accepted by [`QueuePoller::spawn`].
pub const MIN_PERIOD: Duration = Duration::from_millis(10);

/// One published queue fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueSnapshot {
    pub entries: Vec<QueueEntry>,
    pub stats: QueueStats,
    /// `None` until the first fetch succeeds.
    pub fetched_at: Option<DateTime<Utc>>,
    /// Set once polling has ended because the session did, or moved off
    /// the polled shop.
    pub stopped: bool,
}

impl QueueSnapshot {
    fn fetched(entries: Vec<QueueEntry>) -> Self {
        Self {
            stats: QueueStats::from_entries(&entries),
            entries,
            fetched_at: Some(Utc::now()),
            stopped: false,
        }
    }
}

/// Handle to a running queue poll. Dropping it cancels the poll.
#[derive(Debug)]
pub struct QueuePoller {
    task: JoinHandle<()>,
    visible: watch::Sender<bool>,
    snapshots: watch::Receiver<QueueSnapshot>,
}

impl QueuePoller {
    /// Start polling `shop_id` every `period`, beginning immediately.
    /// Periods below [`MIN_PERIOD`] are raised to it.
    ///
    /// Must be called within a Tokio runtime.
    #[must_use]
    pub fn spawn(api: ApiClient, shop_id: ShopId, period: Duration) -> Self {
        let (visible, visible_rx) = watch::channel(true);
        let (snapshot_tx, snapshots) = watch::channel(QueueSnapshot::default());
        let sessions = api.session().subscribe();
        let period = period.max(MIN_PERIOD);

        let task = tokio::spawn(poll(
            api,
            shop_id,
            period,
            sessions,
            visible_rx,
            snapshot_tx,
        ));

        Self {
            task,
            visible,
            snapshots,
        }
    }

    /// Pause (hidden) or resume (visible) polling.
    pub fn set_visible(&self, visible: bool) {
        self.visible.send_if_modified(|current| {
            let changed = *current != visible;
            *current = visible;
            changed
        });
    }

    /// Receiver notified after every published snapshot.
    #[must_use]
    pub fn snapshots(&self) -> watch::Receiver<QueueSnapshot> {
        self.snapshots.clone()
    }

    /// The most recent snapshot.
    #[must_use]
    pub fn latest(&self) -> QueueSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Whether the poll task has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for QueuePoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn poll(
    api: ApiClient,
    shop_id: ShopId,
    period: Duration,
    mut sessions: watch::Receiver<Session>,
    mut visible: watch::Receiver<bool>,
    snapshots: watch::Sender<QueueSnapshot>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    debug!(shop_id = %shop_id, period_secs = period.as_secs_f64(), "Queue polling started");

    loop {
        let linked = sessions.borrow_and_update().shop_id() == Some(&shop_id);
        if !linked {
            info!(shop_id = %shop_id, "Shop no longer linked, queue polling stopped");
            snapshots.send_modify(|snapshot| snapshot.stopped = true);
            return;
        }

        tokio::select! {
            _ = ticker.tick() => {}
            changed = sessions.changed() => {
                if changed.is_err() {
                    snapshots.send_modify(|snapshot| snapshot.stopped = true);
                    return;
                }
                continue;
            }
            changed = visible.changed() => {
                if changed.is_err() {
                    return;
                }
                if !*visible.borrow_and_update() {
                    continue;
                }
                // Shown again: fetch now and restart the period.
                ticker.reset();
            }
        }

        if !*visible.borrow() {
            continue;
        }

        match api.shop_queue(&shop_id).await {
            Ok(entries) => {
                debug!(count = entries.len(), "Queue refreshed");
                snapshots.send_replace(QueueSnapshot::fetched(entries));
            }
            Err(e @ (ClientError::Unauthorized | ClientError::NotAuthenticated)) => {
                info!(error = %e, "Session ended, queue polling stopped");
                snapshots.send_modify(|snapshot| snapshot.stopped = true);
                return;
            }
            Err(e) => warn!(error = %e, "Queue refresh failed"),
        }
    }
}

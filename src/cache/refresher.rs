use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::source::ReferenceSource;
use super::store::ReferenceCache;

/// Control handle for a running background refresher.
///
/// Dropping the handle stops the refresher at its next wake-up.
#[derive(Debug)]
pub struct RefresherHandle {
    trigger_tx: mpsc::Sender<Trigger>,
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

#[derive(Debug, Clone, Copy)]
enum Trigger {
    FocusRegained,
    Manual,
}

impl RefresherHandle {
    /// The application window regained focus; refresh now.
    pub fn focus_regained(&self) {
        // A pending trigger already covers this one.
        let _ = self.trigger_tx.try_send(Trigger::FocusRegained);
    }

    /// Ask for an immediate refresh outside the regular interval.
    pub fn refresh_now(&self) {
        let _ = self.trigger_tx.try_send(Trigger::Manual);
    }

    /// Stop the refresher and wait for its loop to exit. Refreshes already in
    /// flight run to completion.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        let _ = self.task.await;
    }
}

/// Spawn a task that refreshes `org` on a fixed interval (first tick
/// immediately) and whenever the handle signals regained focus.
///
/// Each trigger starts its own fire-and-forget refresh, so refreshes may
/// overlap; the cache's version stamps keep an older fetch from overwriting
/// a newer one.
pub fn spawn_refresher<S>(
    cache: Arc<ReferenceCache>,
    source: Arc<S>,
    org: impl Into<String>,
    interval: Duration,
) -> RefresherHandle
where
    S: ReferenceSource + ?Sized + 'static,
{
    let org = org.into();
    let (trigger_tx, mut trigger_rx) = mpsc::channel(1);
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);

    let task = tokio::spawn(async move {
        info!(org = %org, interval_secs = interval.as_secs(), "reference data refresher starting");

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    debug!(org = %org, "interval refresh");
                    spawn_refresh(&cache, &source, &org);
                }

                Some(trigger) = trigger_rx.recv() => {
                    debug!(org = %org, ?trigger, "triggered refresh");
                    spawn_refresh(&cache, &source, &org);
                }

                _ = shutdown_rx.recv() => {
                    break;
                }
            }
        }

        info!(org = %org, "reference data refresher stopped");
    });

    RefresherHandle {
        trigger_tx,
        shutdown_tx,
        task,
    }
}

fn spawn_refresh<S>(cache: &Arc<ReferenceCache>, source: &Arc<S>, org: &str)
where
    S: ReferenceSource + ?Sized + 'static,
{
    let cache = Arc::clone(cache);
    let source = Arc::clone(source);
    let org = org.to_string();
    tokio::spawn(async move {
        cache.refresh(&org, source.as_ref()).await;
    });
}

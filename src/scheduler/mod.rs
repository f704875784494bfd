//! Poller tasks that fetch registered targets on their interval.
//!
//! Each target gets exactly one poller. A poller runs
//! fetch → record → sleep until its history is marked dead; deletion
//! interrupts the sleep, but a fetch already in flight is allowed to finish
//! (bounded by the probe timeout) and its result is discarded.

use crate::probe::HttpProbe;
use crate::storage::{FetchEvent, History, TargetDescription};

use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Start the poller for a newly registered target.
pub fn spawn_poller(
    target: TargetDescription,
    history: Arc<History>,
    probe: HttpProbe,
) -> JoinHandle<()> {
    // Subscribe before spawning so a deletion racing the spawn is still observed.
    let cancelled = history.cancelled();
    tokio::spawn(run_poll_loop(target, history, probe, cancelled))
}

/// Run the poll loop for a single target.
async fn run_poll_loop(
    target: TargetDescription,
    history: Arc<History>,
    probe: HttpProbe,
    mut cancelled: watch::Receiver<bool>,
) {
    tracing::debug!(id = target.id, url = %target.url, "poller started");

    loop {
        if !history.is_alive() {
            break;
        }

        let created_at = Utc::now();
        let start = Instant::now();

        let response = match probe.fetch(&target.url).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(id = target.id, url = %target.url, "fetch failed: {}", e);
                None
            }
        };

        let event = FetchEvent::new(response, start.elapsed(), created_at);

        // The interval is re-read on every append so re-registration takes
        // effect on the very next sleep.
        let Some(interval) = history.record(event) else {
            break;
        };

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(u64::from(interval))) => {}
            _ = cancelled.changed() => {
                break;
            }
        }
    }

    tracing::debug!(id = target.id, url = %target.url, "poller stopped");
}

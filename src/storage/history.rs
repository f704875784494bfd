//! Per-target fetch history.
//!
//! A `History` is shared by exactly one poller (the only appender) and any
//! number of API readers. Every field behind the mutex is read and written
//! under that single lock; no two histories ever share a lock.

use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

use super::models::FetchEvent;

struct HistoryState {
    events: Vec<FetchEvent>,
    alive: bool,
    interval: u32,
}

/// Append-only log of fetch events for one target.
pub struct History {
    state: Mutex<HistoryState>,
    cancel_tx: watch::Sender<bool>,
}

impl History {
    pub fn new(interval: u32) -> Self {
        let (cancel_tx, _) = watch::channel(false);
        Self {
            state: Mutex::new(HistoryState {
                events: Vec::new(),
                alive: true,
                interval,
            }),
            cancel_tx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_alive(&self) -> bool {
        self.lock().alive
    }

    /// Replace the poll interval, returning the previous one.
    pub fn set_interval(&self, interval: u32) -> u32 {
        std::mem::replace(&mut self.lock().interval, interval)
    }

    /// Append `event` and return the interval to sleep before the next fetch.
    ///
    /// Returns `None` without appending once the history has been marked dead.
    pub fn record(&self, event: FetchEvent) -> Option<u32> {
        let mut state = self.lock();
        if !state.alive {
            return None;
        }
        state.events.push(event);
        Some(state.interval)
    }

    /// Copy of the events recorded so far, oldest first.
    pub fn snapshot(&self) -> Vec<FetchEvent> {
        self.lock().events.clone()
    }

    /// Mark the history dead and wake its poller if it is sleeping.
    ///
    /// Returns `false` if it was already dead.
    pub fn mark_dead(&self) -> bool {
        {
            let mut state = self.lock();
            if !state.alive {
                return false;
            }
            state.alive = false;
        }
        self.cancel_tx.send_replace(true);
        true
    }

    /// Receiver that observes `true` once the history is marked dead.
    pub fn cancelled(&self) -> watch::Receiver<bool> {
        self.cancel_tx.subscribe()
    }
}

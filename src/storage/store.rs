//! Registry of monitored targets.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

use super::history::History;
use super::models::*;
use crate::probe::HttpProbe;
use crate::scheduler;

/// Storage error types.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("target {0} not found")]
    NotFound(u32),
    #[error("no free target identifiers left")]
    IdsExhausted,
    #[error("store is shut down")]
    Closed,
}

#[derive(Default)]
struct Registry {
    descriptions: BTreeMap<u32, TargetDescription>,
    histories: HashMap<u32, Arc<History>>,
    /// Never decremented, so deleted ids are not handed out again.
    next_free_key: u32,
    /// Set by `shutdown`; no new pollers are started afterwards.
    closed: bool,
}

/// Thread-safe target registry.
///
/// The lock only guards the id mappings; each target's events live behind
/// that target's own `History` lock.
pub struct Store {
    registry: RwLock<Registry>,
    probe: HttpProbe,
}

impl Store {
    /// Create an empty store whose pollers fetch through `probe`.
    pub fn new(probe: HttpProbe) -> Self {
        Self {
            registry: RwLock::new(Registry::default()),
            probe,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `url`, or update its interval if it is already registered.
    ///
    /// A new target gets the next free id and its own poller; an existing one
    /// keeps its id and poller, which picks the new interval up on its next
    /// sleep.
    pub fn register(&self, url: &str, interval: u32) -> Result<u32, StoreError> {
        if interval == 0 {
            return Err(StoreError::InvalidArgument(
                "interval must be a positive number of seconds".to_string(),
            ));
        }

        let mut guard = self.write();
        let registry = &mut *guard;

        if registry.closed {
            return Err(StoreError::Closed);
        }

        if let Some(existing) = registry.descriptions.values_mut().find(|d| d.url == url) {
            existing.interval = interval;
            let id = existing.id;
            if let Some(history) = registry.histories.get(&id) {
                let previous = history.set_interval(interval);
                tracing::info!(id, url, previous, interval, "updated target interval");
            }
            return Ok(id);
        }

        let id = registry.next_free_key;
        let next_free_key = id.checked_add(1).ok_or(StoreError::IdsExhausted)?;

        let description = TargetDescription {
            id,
            url: url.to_string(),
            interval,
        };
        let history = Arc::new(History::new(interval));

        registry.descriptions.insert(id, description.clone());
        registry.histories.insert(id, history.clone());
        registry.next_free_key = next_free_key;

        scheduler::spawn_poller(description, history, self.probe.clone());
        tracing::info!(id, url, interval, "registered target");

        Ok(id)
    }

    /// Remove a target and stop its poller.
    pub fn delete(&self, id: u32) -> Result<TargetDescription, StoreError> {
        let mut registry = self.write();

        let description = registry
            .descriptions
            .remove(&id)
            .ok_or(StoreError::NotFound(id))?;

        // Mark before removing so the poller never sees a live but unreachable history.
        if let Some(history) = registry.histories.get(&id) {
            history.mark_dead();
        }
        registry.histories.remove(&id);

        tracing::info!(id, url = %description.url, "deleted target");
        Ok(description)
    }

    /// All registered targets, ordered by id.
    pub fn list(&self) -> Vec<TargetDescription> {
        self.read().descriptions.values().cloned().collect()
    }

    /// Snapshot of a target's fetch events, oldest first.
    pub fn get_history(&self, id: u32) -> Result<Vec<FetchEvent>, StoreError> {
        let history = self
            .read()
            .histories
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))?;

        Ok(history.snapshot())
    }

    /// Stop every poller and forget all targets. Returns how many were stopped.
    ///
    /// Later registrations fail with `StoreError::Closed`.
    pub fn shutdown(&self) -> usize {
        let mut registry = self.write();
        registry.closed = true;

        for history in registry.histories.values() {
            history.mark_dead();
        }
        let stopped = registry.histories.len();
        registry.histories.clear();
        registry.descriptions.clear();

        stopped
    }
}

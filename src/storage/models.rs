//! Storage model types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A registered page to poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDescription {
    pub id: u32,
    pub url: String,
    /// Seconds between fetch attempts
    pub interval: u32,
}

/// The outcome of a single fetch attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchEvent {
    /// Response body, or `None` when the fetch failed
    pub response: Option<String>,
    /// Elapsed seconds of the attempt
    pub duration: f64,
    /// Unix seconds at which the attempt began
    pub created_at: f64,
}

impl FetchEvent {
    pub fn new(response: Option<Vec<u8>>, elapsed: Duration, started_at: DateTime<Utc>) -> Self {
        Self {
            response: response.map(|body| String::from_utf8_lossy(&body).into_owned()),
            duration: elapsed.as_secs_f64(),
            created_at: started_at.timestamp_micros() as f64 / 1_000_000.0,
        }
    }
}

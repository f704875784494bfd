//! Configuration module for the fetcher service.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port for the API server (default: 8080)
    pub http_port: u16,
    /// Timeout applied to every fetch of a target URL (default: 5s)
    pub fetch_timeout: Duration,
    /// Largest accepted request body for registrations (default: 10 MB)
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            fetch_timeout: Duration::from_secs(5),
            max_body_bytes: 10_000_000,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `FETCHER_HTTP_PORT`: HTTP port (default: 8080)
    /// - `FETCHER_FETCH_TIMEOUT_SECS`: per-fetch timeout in seconds (default: 5)
    /// - `FETCHER_MAX_BODY_BYTES`: request body ceiling (default: 10000000)
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(port) = parse_var(&lookup, "FETCHER_HTTP_PORT") {
            cfg.http_port = port;
        }

        if let Some(secs) = parse_var::<u64, _>(&lookup, "FETCHER_FETCH_TIMEOUT_SECS") {
            if secs > 0 {
                cfg.fetch_timeout = Duration::from_secs(secs);
            } else {
                tracing::warn!("FETCHER_FETCH_TIMEOUT_SECS must be positive, keeping default");
            }
        }

        if let Some(limit) = parse_var(&lookup, "FETCHER_MAX_BODY_BYTES") {
            cfg.max_body_bytes = limit;
        }

        cfg
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("ignoring unparseable {}={:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.http_port, 8080);
        assert_eq!(cfg.fetch_timeout, Duration::from_secs(5));
        assert_eq!(cfg.max_body_bytes, 10_000_000);
    }

    #[test]
    fn test_overrides_from_environment() {
        let cfg = ServerConfig::from_lookup(lookup_from(&[
            ("FETCHER_HTTP_PORT", "9090"),
            ("FETCHER_FETCH_TIMEOUT_SECS", "2"),
            ("FETCHER_MAX_BODY_BYTES", "1024"),
        ]));
        assert_eq!(cfg.http_port, 9090);
        assert_eq!(cfg.fetch_timeout, Duration::from_secs(2));
        assert_eq!(cfg.max_body_bytes, 1024);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let cfg = ServerConfig::from_lookup(lookup_from(&[
            ("FETCHER_HTTP_PORT", "not-a-port"),
            ("FETCHER_FETCH_TIMEOUT_SECS", "0"),
        ]));
        assert_eq!(cfg.http_port, 8080);
        assert_eq!(cfg.fetch_timeout, Duration::from_secs(5));
    }
}

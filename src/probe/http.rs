//! HTTP probe implementation.

use std::time::Duration;

use super::ProbeError;

/// HTTP fetcher shared by every poller.
///
/// Cloning is cheap: the underlying connection pool is reference counted.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProbe {
    /// Build a probe whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProbeError::Client(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET `url` and return the full response body.
    ///
    /// Any status code counts as a response; only transport failures,
    /// timeouts and unreadable bodies are errors.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, ProbeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        Ok(body.to_vec())
    }

    fn classify(&self, err: reqwest::Error) -> ProbeError {
        if err.is_timeout() {
            ProbeError::Timeout(self.timeout)
        } else {
            ProbeError::Network(err.to_string())
        }
    }
}

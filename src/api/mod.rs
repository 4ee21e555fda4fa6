pub mod fourchan;
pub mod imgflip;
pub mod newsapi;
pub mod reddit;
pub mod twitter;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failure of an upstream fetch. The cache layer never produces these; they
/// originate in a source and propagate unchanged to the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("unexpected payload: {0}")]
    Payload(String),
    #[error("authentication failed: {0}")]
    Auth(String),
}

/// One upstream data source. Each implementation names the cache resource it
/// populates and fetches a fresh payload on demand. The refresh protocol
/// treats sources as black boxes: no retries, no inspection of their errors.
#[async_trait]
pub trait Source: Send + Sync {
    /// Cache resource key, e.g. "twitter-trends".
    fn name(&self) -> &str;

    /// Fetch and map a fresh payload from the upstream.
    async fn fetch(&self) -> Result<Value, FetchError>;
}

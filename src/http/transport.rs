use async_trait::async_trait;
use thiserror::Error;

/// Why a GET produced no status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    TimedOut,
    #[error("{0}")]
    Failed(String),
}

/// Issues one GET against the target and returns its status code.
///
/// Implementations must consume the whole response body before returning so
/// that measured latency covers the transfer, not just the headers.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self) -> Result<u16, TransportError>;
}

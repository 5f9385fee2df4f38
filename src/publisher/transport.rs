use bytes::Bytes;
use reqwest::Method;
use std::error::Error;
use std::sync::Arc;

/// LeaderTransport performs a single HTTP exchange with a leader sentinel.
///
/// Implementations own the timeout policy. Nothing above this trait adds one, and nothing above
/// it retries.
#[async_trait::async_trait]
pub trait LeaderTransport: Send + Sync {
    /// Send `request` and return whatever the leader answered, whatever the status. `Err` is only
    /// for failing to complete the exchange (connect, DNS, timeout, connection dropped mid-way).
    async fn send(&self, request: LeaderRequest) -> Result<LeaderResponse, TransportError>;
}

#[async_trait::async_trait]
impl<'a, T: LeaderTransport + ?Sized> LeaderTransport for &'a T {
    async fn send(&self, request: LeaderRequest) -> Result<LeaderResponse, TransportError> {
        (**self).send(request).await
    }
}

#[async_trait::async_trait]
impl<T: LeaderTransport + ?Sized> LeaderTransport for Arc<T> {
    async fn send(&self, request: LeaderRequest) -> Result<LeaderResponse, TransportError> {
        (**self).send(request).await
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LeaderRequest {
    pub method: Method,
    pub url: String,
    pub content_type: &'static str,
    pub body: Bytes,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LeaderResponse {
    pub status: u16,
    // e.g. "Service Unavailable". Not every status code has one.
    pub reason: Option<String>,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to complete exchange with '{url}'")]
pub struct TransportError {
    pub url: String,
    #[source]
    pub source: Box<dyn Error + Send + Sync>,
}

impl TransportError {
    pub fn new(url: impl Into<String>, source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        TransportError {
            url: url.into(),
            source: source.into(),
        }
    }
}

use bytes::Bytes;
use std::error::Error;
use std::sync::Arc;

/// CoordinationStore is the consistent key-value service the leader publishes itself into.
///
/// This crate only ever reads from it. There is intentionally no way to create, renew or delete
/// an entry through this trait.
#[async_trait::async_trait]
pub trait CoordinationStore: Send + Sync {
    /// read_key() performs one consistent read of `key`.
    ///
    /// Returns `Ok(None)` if the store answered and the key does not exist. Any failure to get an
    /// answer out of the store is an `Err`, so callers can tell "no such key" apart from "store is
    /// down".
    async fn read_key(&self, key: &str) -> Result<Option<Bytes>, StoreReadError>;
}

// Lets a caller keep ownership of its store and lend it to a `LeaderLocator`.
#[async_trait::async_trait]
impl<'a, S: CoordinationStore + ?Sized> CoordinationStore for &'a S {
    async fn read_key(&self, key: &str) -> Result<Option<Bytes>, StoreReadError> {
        (**self).read_key(key).await
    }
}

#[async_trait::async_trait]
impl<S: CoordinationStore + ?Sized> CoordinationStore for Arc<S> {
    async fn read_key(&self, key: &str) -> Result<Option<Bytes>, StoreReadError> {
        (**self).read_key(key).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreReadError {
    #[error("No coordination store endpoints configured")]
    NoEndpoints,

    #[error("Coordination store endpoint '{endpoint}' is not a usable base URL")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    #[error("Failed to reach coordination store at '{endpoint}'")]
    Unreachable {
        endpoint: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    #[error("Coordination store at '{endpoint}' replied with unexpected status {status}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    #[error("Coordination store at '{endpoint}' replied with an undecodable body")]
    InvalidResponse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

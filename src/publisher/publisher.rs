use crate::locator::LeaderInfo;
use crate::publisher::{LeaderRequest, LeaderTransport, TransportError};
use bytes::Bytes;
use reqwest::Method;
use serde::Serialize;

const CONFIG_PATH: &str = "/config/current";
const JSON_CONTENT_TYPE: &str = "application/json";

/// ConfigPublisher replaces the active configuration of a leader sentinel.
///
/// `publish()` sends exactly one request per call. It is up to the caller whether and when to try
/// again, and it must re-resolve the leader before doing so.
pub struct ConfigPublisher<T: LeaderTransport> {
    transport: T,
}

impl<T: LeaderTransport> ConfigPublisher<T> {
    pub fn new(transport: T) -> Self {
        ConfigPublisher { transport }
    }

    /// Full replace of the leader's configuration with `config`, as JSON. Only HTTP 200 counts as
    /// accepted.
    pub async fn publish<C>(&self, leader: &LeaderInfo, config: &C) -> Result<(), PublishError>
    where
        C: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(config)?;

        let request = LeaderRequest {
            method: Method::PUT,
            url: config_endpoint_url(leader),
            content_type: JSON_CONTENT_TYPE,
            body: Bytes::from(body),
        };

        let response = self.transport.send(request).await?;

        if response.status != 200 {
            return Err(PublishError::Rejected {
                status: response.status,
                reason: response.reason,
                body: response.body,
            });
        }

        Ok(())
    }
}

/// The leader's config endpoint: `http://{listen_address}:{port}/config/current`.
///
/// IPv6 literals get bracketed, otherwise the port would be unparseable.
pub fn config_endpoint_url(leader: &LeaderInfo) -> String {
    let address = &leader.listen_address;
    if address.contains(':') && !address.starts_with('[') {
        format!("http://[{}]:{}{}", address, leader.port, CONFIG_PATH)
    } else {
        format!("http://{}:{}{}", address, leader.port, CONFIG_PATH)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Failed to marshal config")]
    Serialization(#[source] serde_json::Error),

    #[error("Error setting config")]
    Transport(#[source] TransportError),

    #[error(
        "Error setting config: leader sentinel returned non ok code: {status}{}",
        .reason.as_ref().map(|r| format!(" {}", r)).unwrap_or_default()
    )]
    Rejected {
        status: u16,
        reason: Option<String>,
        body: String,
    },
}

// ------- Conversions --------

impl From<serde_json::Error> for PublishError {
    fn from(e: serde_json::Error) -> Self {
        PublishError::Serialization(e)
    }
}

impl From<TransportError> for PublishError {
    fn from(e: TransportError) -> Self {
        PublishError::Transport(e)
    }
}

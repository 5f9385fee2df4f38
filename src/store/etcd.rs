use crate::store::{CoordinationStore, StoreReadError};
use bytes::Bytes;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

/// EtcdStore reads keys through the etcd v2 keys API.
///
/// Every read is a quorum read (`?quorum=true`), so the answer reflects what the cluster has
/// committed rather than what one member happens to have applied.
///
/// Endpoints are tried in order until one of them answers. An answer is anything with an HTTP
/// status, including errors; only connection-level failures and endpoints that don't parse as a
/// base URL move on to the next endpoint. Redirects are not followed.
pub struct EtcdStore {
    logger: slog::Logger,
    endpoints: Vec<String>,
    http: reqwest::Client,
}

// Shape of a v2 GET reply. We only care about the node's value.
#[derive(Deserialize)]
struct GetReply {
    node: GetReplyNode,
}

#[derive(Deserialize)]
struct GetReplyNode {
    #[serde(default)]
    value: Option<String>,
}

impl EtcdStore {
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(logger: slog::Logger, endpoints: Vec<String>, request_timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self::with_client(logger, endpoints, http))
    }

    /// Use a caller-built HTTP client. Its timeout policy is the only one applied to store reads.
    pub fn with_client(logger: slog::Logger, endpoints: Vec<String>, http: reqwest::Client) -> Self {
        EtcdStore {
            logger,
            endpoints,
            http,
        }
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    async fn read_from_endpoint(&self, endpoint: &str, key: &str) -> Result<Option<Bytes>, StoreReadError> {
        let url = keys_url(endpoint, key).map_err(|e| StoreReadError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source: e,
        })?;
        slog::debug!(self.logger, "Reading '{}'", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| StoreReadError::Unreachable {
                endpoint: endpoint.to_string(),
                source: e.into(),
            })?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Ok(None),
            other => {
                return Err(StoreReadError::UnexpectedStatus {
                    endpoint: endpoint.to_string(),
                    status: other.as_u16(),
                })
            }
        }

        let body = response.bytes().await.map_err(|e| StoreReadError::Unreachable {
            endpoint: endpoint.to_string(),
            source: e.into(),
        })?;
        let reply: GetReply = serde_json::from_slice(&body).map_err(|e| StoreReadError::InvalidResponse {
            endpoint: endpoint.to_string(),
            source: e,
        })?;

        // A directory node has no value. Nobody can publish a leader record as a directory.
        Ok(reply.node.value.map(Bytes::from))
    }
}

#[async_trait::async_trait]
impl CoordinationStore for EtcdStore {
    async fn read_key(&self, key: &str) -> Result<Option<Bytes>, StoreReadError> {
        let mut last_error = StoreReadError::NoEndpoints;

        for endpoint in &self.endpoints {
            match self.read_from_endpoint(endpoint, key).await {
                Err(e @ StoreReadError::Unreachable { .. }) | Err(e @ StoreReadError::InvalidEndpoint { .. }) => {
                    slog::warn!(self.logger, "Coordination store endpoint unusable: {:?}", e);
                    last_error = e;
                }
                result => return result,
            }
        }

        Err(last_error)
    }
}

// Each key segment is percent-encoded on its own, so a `?` or `#` in a cluster name stays part of
// the key instead of starting a query or fragment.
fn keys_url(endpoint: &str, key: &str) -> Result<Url, Box<dyn std::error::Error + Send + Sync>> {
    let mut url = Url::parse(endpoint)?;
    url.path_segments_mut()
        .map_err(|_| "URL cannot have a path")?
        .pop_if_empty()
        .push("v2")
        .push("keys")
        .extend(key.split('/').filter(|segment| !segment.is_empty()));
    url.query_pairs_mut().append_pair("quorum", "true");
    Ok(url)
}

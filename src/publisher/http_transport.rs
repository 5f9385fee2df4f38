use crate::publisher::{LeaderRequest, LeaderResponse, LeaderTransport, TransportError};
use reqwest::header::CONTENT_TYPE;

/// HttpTransport talks to leader sentinels over plain HTTP using reqwest.
///
/// `new()` applies no request timeout at all, so a hung leader hangs the call. Callers that need
/// bounded latency add a timeout to `client_builder()` and pass the client to `with_client()`.
///
/// Redirects are never followed. A 3xx from the leader is its answer, and following it would
/// either turn the PUT into a GET or send a second write somewhere else.
pub struct HttpTransport {
    logger: slog::Logger,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(logger: slog::Logger) -> Result<Self, reqwest::Error> {
        let http = Self::client_builder().build()?;
        Ok(Self::with_client(logger, http))
    }

    /// A reqwest builder with redirects turned off. Start from this when building a client for
    /// `with_client()`.
    pub fn client_builder() -> reqwest::ClientBuilder {
        reqwest::Client::builder().redirect(reqwest::redirect::Policy::none())
    }

    /// Uses a caller-built client as is. It must not follow redirects (see `client_builder()`),
    /// otherwise a 3xx never reaches the caller as a status.
    pub fn with_client(logger: slog::Logger, http: reqwest::Client) -> Self {
        HttpTransport { logger, http }
    }
}

#[async_trait::async_trait]
impl LeaderTransport for HttpTransport {
    async fn send(&self, request: LeaderRequest) -> Result<LeaderResponse, TransportError> {
        let LeaderRequest {
            method,
            url,
            content_type,
            body,
        } = request;
        slog::debug!(self.logger, "{} '{}' ({} bytes)", method, url, body.len());

        let response = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError::new(url.as_str(), e))?;

        let status = response.status();
        // The leader may drop us while streaming the body back. That's still a broken exchange.
        let body = response.text().await.map_err(|e| TransportError::new(url.as_str(), e))?;

        slog::debug!(self.logger, "'{}' replied {}", url, status);

        Ok(LeaderResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            body,
        })
    }
}

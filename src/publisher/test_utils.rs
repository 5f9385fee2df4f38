use crate::publisher::{LeaderRequest, LeaderResponse, LeaderTransport, TransportError};
use std::io;
use std::sync::Mutex;

enum Reply {
    Status(u16, &'static str),
    ConnectionRefused,
}

/// Records every request and answers all of them the same way.
pub(crate) struct TestUtilTransport {
    reply: Reply,
    sent: Mutex<Vec<LeaderRequest>>,
}

impl TestUtilTransport {
    pub(crate) fn replying(status: u16, body: &'static str) -> Self {
        Self::new(Reply::Status(status, body))
    }

    pub(crate) fn refusing_connections() -> Self {
        Self::new(Reply::ConnectionRefused)
    }

    fn new(reply: Reply) -> Self {
        TestUtilTransport {
            reply,
            sent: Mutex::new(vec![]),
        }
    }

    pub(crate) fn sent(&self) -> Vec<LeaderRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn assert_single_request(&self) -> LeaderRequest {
        let mut sent = self.sent();
        assert_eq!(sent.len(), 1, "Expected exactly one request, got {:?}", sent);
        sent.remove(0)
    }

    pub(crate) fn assert_no_request(&self) {
        assert!(self.sent().is_empty(), "Expected no request, got {:?}", self.sent());
    }
}

#[async_trait::async_trait]
impl LeaderTransport for TestUtilTransport {
    async fn send(&self, request: LeaderRequest) -> Result<LeaderResponse, TransportError> {
        let url = request.url.clone();
        self.sent.lock().unwrap().push(request);

        match self.reply {
            Reply::Status(status, body) => Ok(LeaderResponse {
                status,
                reason: reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .map(str::to_string),
                body: body.to_string(),
            }),
            Reply::ConnectionRefused => Err(TransportError::new(
                url,
                io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
            )),
        }
    }
}

//! In-memory transport for unit tests.

use std::sync::{Arc, Mutex};

use http::header::CONTENT_TYPE;

use crate::error::TransportError;
use crate::transport::{HttpClient, HttpRequest, HttpResponse};

#[derive(Debug, Clone)]
enum Reply {
    Json { status: u16, body: String },
    Unreachable,
}

/// Answers every request with the same canned reply and records what it was sent.
#[derive(Debug, Clone)]
pub(crate) struct StubClient {
    reply: Reply,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl StubClient {
    pub(crate) fn json(status: u16, body: impl Into<String>) -> Self {
        Self::with_reply(Reply::Json {
            status,
            body: body.into(),
        })
    }

    pub(crate) fn unreachable() -> Self {
        Self::with_reply(Reply::Unreachable)
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            requests: Arc::default(),
        }
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl HttpClient for StubClient {
    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        match &self.reply {
            Reply::Json { status, body } => {
                let response = http::Response::builder()
                    .status(*status)
                    .header(CONTENT_TYPE, "application/json")
                    .body(body.clone().into_bytes())?;
                Ok(response)
            }
            Reply::Unreachable => Err(TransportError::Other {
                message: "connection refused".to_string(),
            }),
        }
    }
}

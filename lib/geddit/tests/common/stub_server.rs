#![allow(clippy::missing_errors_doc, dead_code, clippy::expect_used)]
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use tracing::info;

use geddit::{OAuthSession, SessionError};

pub const AGGROLITE: &str = r#"{"has_mail": false, "name": "aggrolite", "is_friend": false, "created": 1278447313.0, "suspension_expiration_utc": null, "hide_from_robots": true, "is_suspended": false, "modhash": "XXX", "created_utc": 1278418513.0, "link_karma": 2327, "comment_karma": 1233, "over_18": true, "is_gold": false, "is_mod": true, "id": "45xiz", "gold_expiration": null, "inbox_count": 0, "has_verified_email": true, "gold_creddits": 0, "has_mod_mail": false}"#;

pub const STUB_TOKEN: &str = "stub-access-token";

#[derive(Debug, Clone)]
struct StubState {
    status: StatusCode,
    body: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    token_seen: Arc<Mutex<Vec<SeenRequest>>>,
}

/// Headers the stub received on one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRequest {
    pub user_agent: Option<String>,
    pub authorization: Option<String>,
}

/// Local stand-in for `oauth.reddit.com` and the token endpoint.
///
/// `/api/v1/me` answers the configured status and body, followed by a newline.
#[derive(Debug)]
pub struct StubServer {
    addr: SocketAddr,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    token_seen: Arc<Mutex<Vec<SeenRequest>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn start(status: u16, body: impl Into<String>) -> anyhow::Result<Self> {
        let seen = Arc::<Mutex<Vec<SeenRequest>>>::default();
        let token_seen = Arc::<Mutex<Vec<SeenRequest>>>::default();
        let state = StubState {
            status: StatusCode::from_u16(status)?,
            body: body.into(),
            seen: Arc::clone(&seen),
            token_seen: Arc::clone(&token_seen),
        };

        let app = Router::new()
            .route("/api/v1/me", get(me))
            .route("/api/v1/access_token", post(access_token))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = listener.local_addr()?;
        info!(%addr, status, "launching stub server");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server");
        });

        Ok(Self {
            addr,
            seen,
            token_seen,
            handle,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Session using the default reqwest transport, pointed at this server.
    pub fn session(&self, user_agent: &str) -> Result<OAuthSession, SessionError> {
        let session = OAuthSession::with_default_client(
            "client-id",
            "client-secret",
            user_agent,
            "http://localhost/callback",
        )?
        .with_api_base_url(self.url())
        .with_token_url(format!("{}/api/v1/access_token", self.url()));
        Ok(session)
    }

    /// Requests received on `/api/v1/me`.
    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }

    /// Requests received on `/api/v1/access_token`.
    pub fn token_seen(&self) -> Vec<SeenRequest> {
        self.token_seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn record(requests: &Mutex<Vec<SeenRequest>>, headers: &HeaderMap) {
    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string)
    };
    let seen = SeenRequest {
        user_agent: header(USER_AGENT),
        authorization: header(AUTHORIZATION),
    };
    if let Ok(mut requests) = requests.lock() {
        requests.push(seen);
    }
}

async fn me(State(state): State<StubState>, headers: HeaderMap) -> impl IntoResponse {
    record(&state.seen, &headers);

    (
        state.status,
        [(CONTENT_TYPE, "application/json")],
        format!("{}\n", state.body),
    )
}

async fn access_token(State(state): State<StubState>, headers: HeaderMap) -> Json<Value> {
    record(&state.token_seen, &headers);
    Json(json!({
        "access_token": STUB_TOKEN,
        "token_type": "bearer",
        "expires_in": 3600,
        "scope": "identity",
    }))
}

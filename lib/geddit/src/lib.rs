//! # Geddit
//!
//! A minimal client for the Reddit OAuth2 API: set up a session, run the
//! authorization-code exchange, and fetch the profile of the authenticated account.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use geddit::OAuthSession;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = OAuthSession::with_default_client(
//!     "client-id",
//!     "client-secret",
//!     "linux:geddit-example:v0.1.0 (by /u/someone)",
//!     "http://localhost:8080/callback",
//! )?;
//!
//! let token = session.exchange_code("code-from-redirect").await?;
//! let me = session.with_access_token(token).me().await?;
//!
//! assert_eq!(me.describe(), me.to_string());
//! # Ok(())
//! # }
//! ```
//!
//! ## Transport
//!
//! All traffic goes through the [`HttpClient`] passed at construction, [`reqwest::Client`]
//! by default. Implement the trait to record, stub or proxy requests:
//!
//! ```rust
//! use geddit::{HttpClient, HttpRequest, HttpResponse, OAuthSession, TransportError};
//!
//! #[derive(Debug, Clone)]
//! struct Canned(&'static str);
//!
//! impl HttpClient for Canned {
//!     async fn round_trip(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
//!         let response = http::Response::builder()
//!             .status(200)
//!             .body(self.0.as_bytes().to_vec())?;
//!         Ok(response)
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), geddit::SessionError> {
//! let body = r#"{"name": "aggrolite", "id": "45xiz", "link_karma": 2327, "comment_karma": 1233}"#;
//! let session = OAuthSession::new("id", "secret", "geddit doc", "http://", Canned(body));
//!
//! let me = session.me().await?;
//! assert_eq!(me.describe(), "aggrolite (2327-1233)");
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! [`SessionError::Transport`] covers network failures and non-2xx answers
//! (see [`SessionError::status_code`]); [`SessionError::Decode`] covers bodies that are
//! not a JSON profile. Nothing is retried.

mod error;
pub use self::error::{SessionError, TransportError};

mod profile;
pub use self::profile::Profile;

mod session;
pub use self::session::{
    AccessToken, DEFAULT_API_BASE_URL, DEFAULT_AUTH_URL, DEFAULT_TOKEN_URL, ME_PATH, OAuthSession,
    SecureString, SessionConfig,
};

mod transport;
pub use self::transport::{HttpClient, HttpRequest, HttpResponse};

#[cfg(test)]
mod testing;

//! Pluggable HTTP transport.
//!
//! Every request issued by an [`OAuthSession`](crate::OAuthSession), including the OAuth2
//! code exchange, goes through the [`HttpClient`] given at construction. The default
//! implementation is [`reqwest::Client`]; tests substitute a stub without touching the
//! request URLs.

use std::future::Future;

use tracing::debug;

use crate::error::TransportError;

/// An outgoing HTTP request, body fully buffered.
///
/// Same shape as [`oauth2::HttpRequest`] so the token exchange can share the transport.
pub type HttpRequest = http::Request<Vec<u8>>;

/// An HTTP response, body fully buffered.
pub type HttpResponse = http::Response<Vec<u8>>;

/// Capability to perform one HTTP round trip.
///
/// Implementations must not interpret the status code: a 404 is a successful round trip.
/// Authorization headers are set by the session before the request reaches the transport.
/// The returned future must be `Send + Sync`, as required by the oauth2 token exchange.
///
/// # Example
///
/// ```rust
/// use geddit::{HttpClient, HttpRequest, HttpResponse, TransportError};
///
/// #[derive(Debug, Clone)]
/// struct Offline;
///
/// impl HttpClient for Offline {
///     async fn round_trip(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
///         Err(TransportError::Other {
///             message: "offline".to_string(),
///         })
///     }
/// }
/// ```
pub trait HttpClient {
    /// Sends the request and returns the complete response.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no response could be obtained.
    fn round_trip(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send + Sync;
}

impl HttpClient for reqwest::Client {
    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let request = reqwest::Request::try_from(request)?;
        let response = reqwest::Client::execute(self, request).await?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        debug!(%status, length = body.len(), "received response");

        let mut builder = http::Response::builder().status(status).version(version);
        if let Some(builder_headers) = builder.headers_mut() {
            *builder_headers = headers;
        }
        let result = builder.body(body.to_vec())?;
        Ok(result)
    }
}

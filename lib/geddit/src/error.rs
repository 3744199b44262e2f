/// Errors raised by an [`HttpClient`](crate::HttpClient) while performing a round trip.
///
/// Network failures and non-2xx responses both land here: callers see one
/// "the request did not produce a usable response" kind.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum TransportError {
    /// HTTP client error from the underlying reqwest library.
    ///
    /// Occurs when the connection is refused, times out, or the host cannot be resolved.
    ReqwestError(reqwest::Error),

    /// HTTP protocol error while converting between `http` and transport types.
    HttpError(http::Error),

    /// Server answered with a status outside of the 2xx range.
    #[display("Unexpected status code {status_code}: {body}")]
    #[from(skip)]
    UnexpectedStatusCode {
        /// The HTTP status code received.
        status_code: u16,
        /// The response body for debugging.
        body: String,
    },

    /// Failure reported by a custom transport.
    #[display("Transport failure: {message}")]
    #[from(skip)]
    Other {
        /// Description of the failure.
        message: String,
    },
}

/// Errors that can occur when using an [`OAuthSession`](crate::OAuthSession).
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum SessionError {
    /// The HTTP round trip failed or returned a non-2xx status.
    #[display("Transport error: {_0}")]
    Transport(TransportError),

    /// URL parsing error when joining the API base URL and a resource path.
    UrlError(url::ParseError),

    /// HTTP protocol error while building the outgoing request.
    HttpError(http::Error),

    /// A configured value (user agent, access token) is not a valid header value.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// The response body is not JSON or does not fit the expected shape.
    #[display("Failed to decode JSON at '{path}' (field '{field}'): {error}\n{body}")]
    #[from(skip)]
    Decode {
        /// The request path that produced the body.
        path: String,
        /// Path of the offending JSON field, `.` for the document root.
        field: String,
        /// The underlying JSON error.
        error: serde_json::Error,
        /// The response body that failed to decode.
        body: String,
    },

    /// Session configuration cannot be used.
    #[display("Invalid configuration: {reason}")]
    #[from(skip)]
    Config {
        /// Description of the configuration issue.
        reason: String,
    },

    /// The authorization server refused or garbled the code exchange.
    #[display("Token exchange failed: {reason}")]
    #[from(skip)]
    TokenExchange {
        /// Description of the failure.
        reason: String,
    },
}

impl SessionError {
    /// HTTP status code of a non-2xx response, if that is what failed.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport(TransportError::UnexpectedStatusCode { status_code, .. }) => {
                Some(*status_code)
            }
            _ => None,
        }
    }

    /// Returns `true` for [`SessionError::Transport`].
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` for [`SessionError::Decode`].
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

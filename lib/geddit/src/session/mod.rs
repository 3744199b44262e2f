use std::fmt;

use http::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use http::{HeaderValue, Method};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{SessionError, TransportError};
use crate::profile::Profile;
use crate::transport::{HttpClient, HttpRequest};

mod config;
pub use self::config::{
    DEFAULT_API_BASE_URL, DEFAULT_AUTH_URL, DEFAULT_TOKEN_URL, ME_PATH, SessionConfig,
};

mod secret;
pub use self::secret::{AccessToken, SecureString};

mod oauth2;

/// An OAuth2 session against the Reddit API.
///
/// Bundles the client credentials, the user agent and the [`HttpClient`] used for every
/// request. A session is immutable once built: consuming `with_*` methods return an
/// updated copy.
///
/// # Example
///
/// ```rust,no_run
/// use geddit::OAuthSession;
///
/// # async fn example() -> Result<(), geddit::SessionError> {
/// let session = OAuthSession::with_default_client(
///     "client-id",
///     "client-secret",
///     "linux:geddit-example:v0.1.0 (by /u/someone)",
///     "http://localhost:8080/callback",
/// )?;
///
/// let url = session.authorization_url("random-state", ["identity"])?;
/// println!("visit {url}");
///
/// // ... once Reddit redirects back with `?code=...`
/// let token = session.exchange_code("code-from-redirect").await?;
/// let session = session.with_access_token(token);
///
/// let me = session.me().await?;
/// println!("{me}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct OAuthSession<C = reqwest::Client> {
    config: SessionConfig,
    http: C,
    access_token: Option<AccessToken>,
}

impl<C> OAuthSession<C> {
    /// Creates a session using the given transport.
    ///
    /// The inputs are stored verbatim and no request is sent.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<SecureString>,
        user_agent: impl Into<String>,
        redirect_url: impl Into<String>,
        http: C,
    ) -> Self {
        let config = SessionConfig::new(client_id, client_secret, user_agent, redirect_url);
        Self::from_config(config, http)
    }

    /// Creates a session from an existing config.
    #[must_use]
    pub fn from_config(config: SessionConfig, http: C) -> Self {
        Self {
            config,
            http,
            access_token: None,
        }
    }

    /// Replaces the transport, keeping credentials and token.
    #[must_use]
    pub fn with_http_client<D>(self, http: D) -> OAuthSession<D> {
        let Self {
            config,
            access_token,
            ..
        } = self;
        OAuthSession {
            config,
            http,
            access_token,
        }
    }

    /// Attaches the access token sent as `Authorization: bearer ...`.
    #[must_use]
    pub fn with_access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Override the API host.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.with_api_base_url(url);
        self
    }

    /// Override the authorization endpoint.
    #[must_use]
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.with_auth_url(url);
        self
    }

    /// Override the token endpoint.
    #[must_use]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.with_token_url(url);
        self
    }

    /// Credentials and endpoints of this session.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The transport used for requests.
    #[must_use]
    pub fn http_client(&self) -> &C {
        &self.http
    }

    /// The attached access token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }
}

impl OAuthSession<reqwest::Client> {
    /// Creates a session with a fresh [`reqwest::Client`] as transport.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if the HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialize).
    pub fn with_default_client(
        client_id: impl Into<String>,
        client_secret: impl Into<SecureString>,
        user_agent: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Result<Self, SessionError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|error| SessionError::Config {
                reason: format!("cannot build HTTP client: {error}"),
            })?;
        Ok(Self::new(
            client_id,
            client_secret,
            user_agent,
            redirect_url,
            http,
        ))
    }
}

impl<C: HttpClient> OAuthSession<C> {
    /// Fetches the profile of the authenticated account (`GET /api/v1/me`).
    ///
    /// # Errors
    ///
    /// - [`SessionError::Transport`] if the request fails or Reddit answers with a non-2xx status
    /// - [`SessionError::Decode`] if the body is not a JSON profile
    /// - [`SessionError::InvalidHeaderValue`] if the user agent or token cannot be sent as a header
    pub async fn me(&self) -> Result<Profile, SessionError> {
        let request = self.api_request(Method::GET, ME_PATH)?;
        let body = self.send(request).await?;
        let profile: Profile = decode_json(ME_PATH, &body)?;
        debug!(name = %profile.name, id = %profile.id, "fetched profile");
        Ok(profile)
    }

    fn api_request(&self, method: Method, path: &str) -> Result<HttpRequest, SessionError> {
        let url = self.config.api_url(path)?;

        let mut builder = http::Request::builder()
            .method(method)
            .uri(url.as_str())
            .header(USER_AGENT, HeaderValue::from_str(&self.config.user_agent)?)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.access_token {
            builder = builder.header(AUTHORIZATION, token.authorization_header()?);
        }

        let request = builder.body(Vec::new())?;
        Ok(request)
    }

    /// Sends the request and returns the body of a 2xx response.
    async fn send(&self, request: HttpRequest) -> Result<Vec<u8>, SessionError> {
        let method = request.method().clone();
        let uri = request.uri().clone();
        debug!(%method, %uri, "sending request");

        let response = self.http.round_trip(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = String::from_utf8_lossy(response.body()).into_owned();
            warn!(%method, %uri, %status, "unexpected status code");
            return Err(TransportError::UnexpectedStatusCode {
                status_code: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(response.into_body())
    }
}

impl<C> fmt::Debug for OAuthSession<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthSession")
            .field("config", &self.config)
            .field("access_token", &self.access_token)
            .finish_non_exhaustive()
    }
}

/// Decodes a JSON body, reporting the path of the first offending field.
fn decode_json<T: DeserializeOwned>(path: &str, body: &[u8]) -> Result<T, SessionError> {
    let decode_error = |field: String, error: serde_json::Error| SessionError::Decode {
        path: path.to_string(),
        field,
        error,
        body: String::from_utf8_lossy(body).into_owned(),
    };

    let mut deserializer = serde_json::Deserializer::from_slice(body);
    let value = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|error| decode_error(error.path().to_string(), error.into_inner()))?;
    deserializer
        .end()
        .map_err(|error| decode_error(".".to_string(), error))?;
    Ok(value)
}

use std::fmt;

use url::Url;

use super::secret::SecureString;
use crate::error::SessionError;

/// Reddit authorization (user consent) endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://www.reddit.com/api/v1/authorize";

/// Reddit token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Host serving OAuth-authenticated API calls.
pub const DEFAULT_API_BASE_URL: &str = "https://oauth.reddit.com";

/// Path of the "current account" resource.
pub const ME_PATH: &str = "/api/v1/me";

/// Credentials and endpoints of an OAuth2 session.
///
/// Values are stored verbatim: nothing is trimmed, parsed or checked against Reddit
/// when the config is built. URLs are parsed when a request needs them.
#[derive(Clone)]
pub struct SessionConfig {
    pub(crate) client_id: String,
    pub(crate) client_secret: SecureString,
    pub(crate) user_agent: String,
    pub(crate) redirect_url: String,
    pub(crate) auth_url: String,
    pub(crate) token_url: String,
    pub(crate) api_base_url: String,
}

impl SessionConfig {
    /// Creates a config pointing at the public Reddit endpoints.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<SecureString>,
        user_agent: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            user_agent: user_agent.into(),
            redirect_url: redirect_url.into(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Override the authorization endpoint.
    #[must_use]
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Override the token endpoint.
    #[must_use]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Override the API host, e.g. to target a local stub server.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// `OAuth2` client id.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// `OAuth2` client secret.
    #[must_use]
    pub fn client_secret(&self) -> &SecureString {
        &self.client_secret
    }

    /// Value of the `User-Agent` header sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// `OAuth2` redirect URL, as given.
    #[must_use]
    pub fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    /// Authorization endpoint.
    #[must_use]
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Token endpoint.
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// API host.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// A session needs both a client id and a client secret to authenticate.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    /// Absolute URL of an API resource.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, SessionError> {
        let base = self.api_base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let url = Url::parse(&format!("{base}/{path}"))?;
        Ok(url)
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("user_agent", &self.user_agent)
            .field("redirect_url", &self.redirect_url)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

//! Authorization-code flow against the Reddit OAuth2 endpoints.

use http::HeaderValue;
use http::header::USER_AGENT;
use oauth2::basic::{BasicClient, BasicErrorResponse};
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    RedirectUrl, RequestTokenError, Scope, TokenResponse, TokenUrl,
};
use tracing::debug;
use url::Url;

use super::OAuthSession;
use super::config::SessionConfig;
use super::secret::AccessToken;
use crate::error::{SessionError, TransportError};
use crate::transport::{HttpClient, HttpRequest};

/// Tokens are never refreshed, so only request a one-hour grant.
const GRANT_DURATION: &str = "temporary";

type RedditOAuth2Client =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

impl SessionConfig {
    /// Creates an oauth2 `BasicClient` from the configured endpoints.
    ///
    /// URLs are validated here rather than at construction.
    fn oauth2_client(&self) -> Result<RedditOAuth2Client, SessionError> {
        let auth_url = AuthUrl::new(self.auth_url.clone()).map_err(|error| {
            SessionError::Config {
                reason: format!("Invalid authorization URL '{}': {error}", self.auth_url),
            }
        })?;
        let token_url = TokenUrl::new(self.token_url.clone()).map_err(|error| {
            SessionError::Config {
                reason: format!("Invalid token URL '{}': {error}", self.token_url),
            }
        })?;
        let redirect_url = RedirectUrl::new(self.redirect_url.clone()).map_err(|error| {
            SessionError::Config {
                reason: format!("Invalid redirect URL '{}': {error}", self.redirect_url),
            }
        })?;

        let client = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.client_secret.as_str().to_string()))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url)
            .set_redirect_uri(redirect_url);
        Ok(client)
    }
}

impl<C> OAuthSession<C> {
    /// Builds the URL the user visits to grant this application access.
    ///
    /// `state` is echoed back to the redirect URL; callers must check it matches.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if the authorization or redirect URL is invalid.
    pub fn authorization_url(
        &self,
        state: impl Into<String>,
        scopes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Url, SessionError> {
        let client = self.config.oauth2_client()?;
        let state = CsrfToken::new(state.into());

        let (url, _state) = client
            .authorize_url(move || state)
            .add_scopes(scopes.into_iter().map(|scope| Scope::new(scope.into())))
            .add_extra_param("duration", GRANT_DURATION)
            .url();
        Ok(url)
    }
}

impl<C: HttpClient> OAuthSession<C> {
    /// Exchanges an authorization code for an access token.
    ///
    /// The token request goes through the session transport with the session user agent,
    /// authenticated with the client id and secret (HTTP Basic). Attach the result with
    /// [`with_access_token`](OAuthSession::with_access_token).
    ///
    /// # Errors
    ///
    /// - [`SessionError::Config`] if an endpoint URL is invalid
    /// - [`SessionError::InvalidHeaderValue`] if the user agent cannot be sent as a header
    /// - [`SessionError::Transport`] if the token endpoint cannot be reached
    /// - [`SessionError::TokenExchange`] if Reddit rejects the code or answers garbage
    pub async fn exchange_code(&self, code: impl Into<String>) -> Result<AccessToken, SessionError> {
        let client = self.config.oauth2_client()?;
        let user_agent = HeaderValue::from_str(&self.config.user_agent)?;
        let http = |mut request: HttpRequest| {
            request.headers_mut().insert(USER_AGENT, user_agent.clone());
            self.http.round_trip(request)
        };

        debug!(token_url = %self.config.token_url, "exchanging authorization code");
        let response = client
            .exchange_code(AuthorizationCode::new(code.into()))
            .request_async(&http)
            .await
            .map_err(token_error)?;

        let scopes = response
            .scopes()
            .map(|scopes| scopes.iter().map(|scope| scope.to_string()).collect::<Vec<_>>())
            .unwrap_or_default();
        debug!(?scopes, "access token acquired");

        Ok(AccessToken::new(response.access_token().secret().clone()).with_scopes(scopes))
    }
}

fn token_error(error: RequestTokenError<TransportError, BasicErrorResponse>) -> SessionError {
    match error {
        RequestTokenError::Request(error) => SessionError::Transport(error),
        RequestTokenError::ServerResponse(response) => SessionError::TokenExchange {
            reason: response.to_string(),
        },
        RequestTokenError::Parse(error, body) => SessionError::TokenExchange {
            reason: format!(
                "invalid token response at '{}': {}: {}",
                error.path(),
                error.inner(),
                String::from_utf8_lossy(&body)
            ),
        },
        RequestTokenError::Other(reason) => SessionError::TokenExchange { reason },
    }
}

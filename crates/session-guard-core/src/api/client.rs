//! Authenticated request wrapper.
//!
//! `ApiClient::authenticated_fetch` re-reads the token before every call,
//! attaches it as a bearer header, and intercepts 401 responses. Callers get
//! a `FetchOutcome` so a redirect can never be mistaken for a response.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::auth::SessionGuard;
use crate::error::GuardError;

use super::RequestOptions;

/// Why a request ended in a login redirect instead of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// No token was stored; nothing was sent.
    MissingToken,
    /// The server answered 401; the token has been cleared.
    Unauthorized,
}

#[derive(Debug)]
pub enum FetchOutcome {
    Response(Response),
    Redirected(RedirectReason),
}

impl FetchOutcome {
    pub fn is_redirected(&self) -> bool {
        matches!(self, FetchOutcome::Redirected(_))
    }

    pub fn into_response(self) -> Option<Response> {
        match self {
            FetchOutcome::Response(response) => Some(response),
            FetchOutcome::Redirected(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
}

/// HTTP client bound to a session.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    session: SessionGuard,
}

impl ApiClient {
    pub fn new(session: SessionGuard) -> Result<Self, GuardError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(session.config().request_timeout_secs))
            .build()?;
        Ok(Self { client, session })
    }

    pub fn session(&self) -> &SessionGuard {
        &self.session
    }

    /// Send an authenticated request.
    ///
    /// Without a stored (non-empty) token this redirects to login and sends nothing. A 401
    /// response clears the token and redirects; every other status is handed
    /// back untouched. Transport failures are logged and returned as errors.
    pub async fn authenticated_fetch(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<FetchOutcome, GuardError> {
        // An empty value is stored but carries no credential
        let token = self.session.token()?.filter(|token| !token.is_empty());
        let Some(token) = token else {
            debug!(url = url, "No session token, skipping request");
            self.session.redirect_to_login();
            return Ok(FetchOutcome::Redirected(RedirectReason::MissingToken));
        };

        let headers = options.merged_headers(&token)?;
        let url = self.session.config().resolve_url(url);

        let mut request = self
            .client
            .request(options.method_or_default(), &url)
            .headers(headers);
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!(url = %url, error = %e, "API request failed");
                return Err(e.into());
            }
        };

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(url = %url, "Received 401, session is no longer valid");
            self.session.invalidate();
            return Ok(FetchOutcome::Redirected(RedirectReason::Unauthorized));
        }

        debug!(url = %url, status = %response.status(), "API request completed");
        Ok(FetchOutcome::Response(response))
    }

    /// Exchange credentials for an access token and store it.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), GuardError> {
        let url = self.session.config().login_endpoint();

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "Login request failed");
                GuardError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Login rejected");
            return Err(GuardError::from_status(status, &body));
        }

        let body = response.text().await?;
        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| GuardError::InvalidResponse(format!("Failed to parse token response: {}", e)))?;
        if !token.token_type.eq_ignore_ascii_case("bearer") {
            warn!(token_type = %token.token_type, "Unexpected token type");
        }

        self.session.store_token(&token.access_token)?;
        debug!(username = username, "Logged in");
        Ok(())
    }
}

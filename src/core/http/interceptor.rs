//! Authenticating request pipeline
//!
//! Every API call of the application goes through [`AuthClient::send`]:
//!
//! 1. the current access token is attached as a bearer credential, except on
//!    the sign-in and sign-up endpoints; the refresh endpoint carries the
//!    refresh token instead;
//! 2. a 401 triggers one coordinated refresh and a single replay of the
//!    original request with the new token;
//! 3. a failed refresh ends the session, and the caller observes the refresh
//!    error rather than the original 401.
//!
//! Nothing else is retried.

use serde::de::DeserializeOwned;

use super::{ApiRequest, ApiResponse, HttpTransport};
use crate::core::auth::{
    REFRESH_PATH, SIGN_IN_PATH, SIGN_UP_PATH, SessionService, TokenStorage,
};
use crate::core::error::SessionError;

/// Whether a path is one of the unauthenticated auth endpoints
pub fn is_auth_endpoint(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    [SIGN_IN_PATH, SIGN_UP_PATH, REFRESH_PATH]
        .iter()
        .any(|endpoint| path.trim_end_matches('/') == *endpoint)
}

fn is_refresh_endpoint(path: &str) -> bool {
    path.split('?').next().unwrap_or(path).trim_end_matches('/') == REFRESH_PATH
}

/// HTTP client that authorizes requests and recovers from expired access tokens
pub struct AuthClient<S, T> {
    session: SessionService<S, T>,
}

impl<S, T> Clone for AuthClient<S, T> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
        }
    }
}

impl<S: TokenStorage, T: HttpTransport> AuthClient<S, T> {
    pub fn new(session: SessionService<S, T>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &SessionService<S, T> {
        &self.session
    }

    /// Attach the bearer credential the endpoint expects
    ///
    /// Sign-in and sign-up go out bare, refresh carries the refresh token and
    /// everything else the access token.
    pub fn authorize(&self, request: ApiRequest) -> ApiRequest {
        let token = if is_refresh_endpoint(&request.path) {
            self.session.store().refresh_token()
        } else if is_auth_endpoint(&request.path) {
            None
        } else {
            self.session.access_token()
        };
        match token {
            Some(token) => request.bearer(&token),
            None => request,
        }
    }

    /// Send a request, refreshing and replaying once on 401
    ///
    /// Non-401 responses are returned as-is, including error statuses.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, SessionError> {
        let outgoing = self.authorize(request.clone());
        let response = self.session.transport().send(&outgoing).await?;

        if !response.is_unauthorized() {
            return Ok(response);
        }

        if is_refresh_endpoint(&request.path) {
            tracing::warn!("Refresh token rejected, ending session");
            self.session.force_logout();
            return Err(SessionError::RefreshTokenInvalid);
        }

        if is_auth_endpoint(&request.path) {
            // Wrong credentials, not an expired session
            return Ok(response);
        }

        tracing::debug!(
            "{} {} returned 401, refreshing session",
            request.method,
            request.path
        );
        let pair = self.session.refresh_coordinated().await?;

        let retry = request.bearer(&pair.access_token);
        let response = self.session.transport().send(&retry).await?;
        if response.is_unauthorized() {
            tracing::warn!(
                "{} {} still unauthorized after refresh",
                retry.method,
                retry.path
            );
        }
        Ok(response)
    }

    /// Send and decode a successful JSON response
    pub async fn send_json<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<R, SessionError> {
        let response = self.send(request).await?;
        if !response.is_success() {
            return Err(SessionError::from_response(&response));
        }
        response.json()
    }

    /// Send and only check for success
    pub async fn send_empty(&self, request: ApiRequest) -> Result<(), SessionError> {
        let response = self.send(request).await?;
        if !response.is_success() {
            return Err(SessionError::from_response(&response));
        }
        Ok(())
    }
}

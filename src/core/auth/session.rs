//! Auth session service
//!
//! Single source of truth for "is the user logged in" and the only writer
//! of the token store. It is a cheap cloneable handle: build one in the
//! composition root and pass clones to the interceptor and the UI.
//!
//! Session state machine:
//! - `Anonymous` -> `Authenticated` on sign-in, sign-up or social login
//! - `Authenticated` -> `Anonymous` on logout or an unrecoverable refresh failure

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::core::auth::claims::{ClaimField, Claims, ClaimsError, Role, decode_claims};
use crate::core::auth::guards::{GuardDecision, GuardKind, evaluate_guard};
use crate::core::auth::navigation::Navigator;
use crate::core::auth::refresh::{RefreshCoordinator, RefreshTicket};
use crate::core::auth::token_store::{TokenPair, TokenStorage, TokenStore};
use crate::core::config::ClientConfig;
use crate::core::error::SessionError;
use crate::core::http::{ApiRequest, HttpTransport};

pub const SIGN_IN_PATH: &str = "/auth/local/signin";
pub const SIGN_UP_PATH: &str = "/auth/local/signup";
pub const REFRESH_PATH: &str = "/auth/refresh";
pub const LOGOUT_PATH: &str = "/auth/logout";

/// Client-side belief about authentication, derived from token presence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}

/// Session change notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    Refreshed,
    SignedOut,
}

impl SessionEvent {
    /// Session state after the event
    pub fn state(&self) -> SessionState {
        match self {
            SessionEvent::SignedIn | SessionEvent::Refreshed => SessionState::Authenticated,
            SessionEvent::SignedOut => SessionState::Anonymous,
        }
    }
}

/// Handle returned by [`SessionService::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

/// OAuth providers offered by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialProvider {
    Google,
    Github,
}

impl SocialProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialProvider::Google => "google",
            SocialProvider::Github => "github",
        }
    }

    /// Backend path of the OAuth entry point
    ///
    /// Google always shows its account picker so a shared browser can switch
    /// accounts.
    pub fn entry_path(&self) -> String {
        match self {
            SocialProvider::Google => format!("/auth/{}?prompt=select_account", self.as_str()),
            SocialProvider::Github => format!("/auth/{}", self.as_str()),
        }
    }
}

impl FromStr for SocialProvider {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(SocialProvider::Google),
            "github" => Ok(SocialProvider::Github),
            other => Err(SessionError::Validation(format!(
                "Unsupported login provider: {}",
                other
            ))),
        }
    }
}

/// Sign-in form data
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Sign-up form data
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Query parameters of the OAuth callback route
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SocialCallback {
    /// Access token
    pub at: Option<String>,
    /// Refresh token
    pub rt: Option<String>,
    pub error: Option<String>,
}

impl SocialCallback {
    pub fn from_query<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut callback = Self::default();
        for (key, value) in params {
            match key.as_ref() {
                "at" => callback.at = Some(value.into()),
                "rt" => callback.rt = Some(value.into()),
                "error" => callback.error = Some(value.into()),
                _ => {}
            }
        }
        callback
    }
}

struct SessionInner<S, T> {
    config: ClientConfig,
    store: TokenStore<S>,
    transport: T,
    navigator: Arc<dyn Navigator>,
    refresh: Arc<RefreshCoordinator>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_subscription: AtomicU64,
}

/// Auth session service
pub struct SessionService<S, T> {
    inner: Arc<SessionInner<S, T>>,
}

impl<S, T> Clone for SessionService<S, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: TokenStorage, T: HttpTransport> SessionService<S, T> {
    pub fn new(
        config: ClientConfig,
        store: TokenStore<S>,
        transport: T,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let refresh = Arc::new(RefreshCoordinator::new(config.refresh_policy));
        Self {
            inner: Arc::new(SessionInner {
                config,
                store,
                transport,
                navigator,
                refresh,
                listeners: Mutex::new(Vec::new()),
                next_subscription: AtomicU64::new(0),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &TokenStore<S> {
        &self.inner.store
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    pub fn refresh_coordinator(&self) -> &Arc<RefreshCoordinator> {
        &self.inner.refresh
    }

    pub fn state(&self) -> SessionState {
        if self.inner.store.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.store.access_token()
    }

    // ========================================================================
    // Sign-in / sign-up
    // ========================================================================

    /// Sign in with email and password
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<TokenPair, SessionError> {
        self.authenticate(SIGN_IN_PATH, credentials).await
    }

    /// Create an account; the backend signs the user in right away
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<TokenPair, SessionError> {
        self.authenticate(SIGN_UP_PATH, request).await
    }

    async fn authenticate<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<TokenPair, SessionError> {
        let request = ApiRequest::post(path).json(body)?;
        let response = self.inner.transport.send(&request).await?;

        if !response.is_success() {
            let err = SessionError::from_credentials_response(&response);
            tracing::warn!("{} rejected with status {}: {}", path, response.status, err);
            return Err(err);
        }

        let pair: TokenPair = response.json()?;
        self.establish(&pair, SessionEvent::SignedIn)?;
        tracing::info!("Signed in through {}", path);
        Ok(pair)
    }

    // ========================================================================
    // Social login
    // ========================================================================

    /// Absolute URL of the backend OAuth entry point
    pub fn social_login_url(&self, provider: SocialProvider) -> String {
        self.inner.config.endpoint(&provider.entry_path())
    }

    /// Leave the application for the provider's consent screen
    pub fn social_login_redirect(&self, provider: SocialProvider) {
        let url = self.social_login_url(provider);
        tracing::info!("Redirecting to {} login", provider.as_str());
        self.inner.navigator.redirect_external(&url);
    }

    /// Persist a token pair obtained outside the regular sign-in flow
    pub fn complete_social_login(&self, pair: &TokenPair) -> Result<(), SessionError> {
        self.establish(pair, SessionEvent::SignedIn)
    }

    /// Handle the query parameters of the OAuth callback route
    pub fn complete_social_callback(
        &self,
        callback: &SocialCallback,
    ) -> Result<TokenPair, SessionError> {
        if let Some(error) = callback.error.as_deref().filter(|e| !e.is_empty()) {
            tracing::warn!("OAuth callback returned an error: {}", error);
            return Err(SessionError::SocialLogin(error.to_string()));
        }

        match (callback.at.as_deref(), callback.rt.as_deref()) {
            (Some(at), Some(rt)) if !at.is_empty() && !rt.is_empty() => {
                let pair = TokenPair::new(at, rt);
                self.complete_social_login(&pair)?;
                Ok(pair)
            }
            _ => Err(SessionError::SocialLogin(
                "La connexion a échoué : jetons manquants.".to_string(),
            )),
        }
    }

    // ========================================================================
    // Refresh
    // ========================================================================

    /// Exchange the stored refresh token for a new pair
    ///
    /// The refresh call is authorized with the refresh token itself. Callers
    /// are expected to force a logout when this fails.
    pub async fn refresh(&self) -> Result<TokenPair, SessionError> {
        let refresh_token = self
            .inner
            .store
            .refresh_token()
            .ok_or(SessionError::NoRefreshToken)?;

        let request = ApiRequest::post(REFRESH_PATH).bearer(&refresh_token);
        let response = self.inner.transport.send(&request).await?;

        if matches!(response.status, 401 | 403) {
            return Err(SessionError::RefreshTokenInvalid);
        }
        if !response.is_success() {
            return Err(SessionError::from_response(&response));
        }

        let pair: TokenPair = response.json()?;
        self.establish(&pair, SessionEvent::Refreshed)?;
        tracing::debug!("Session tokens refreshed");
        Ok(pair)
    }

    /// Refresh through the coordinator, logging out when the refresh fails
    ///
    /// Only the caller that actually performed the refresh logs out; waiters
    /// and rejected callers just observe the error.
    pub async fn refresh_coordinated(&self) -> Result<TokenPair, SessionError> {
        match self.inner.refresh.begin() {
            RefreshTicket::Leader(guard) => {
                let result = self.refresh().await;
                guard.finish(&result);
                if let Err(err) = &result {
                    tracing::warn!("Token refresh failed, ending session: {}", err);
                    self.force_logout();
                }
                result
            }
            RefreshTicket::Waiter(receiver) => receiver
                .await
                .unwrap_or(Err(SessionError::RefreshInProgress)),
            RefreshTicket::Busy => {
                tracing::debug!("Refresh already in flight, rejecting request");
                Err(SessionError::RefreshInProgress)
            }
        }
    }

    // ========================================================================
    // Logout
    // ========================================================================

    /// Log out: local state is cleared first, the backend is notified on a
    /// best-effort basis, then the user is sent to the public entry route
    pub async fn logout(&self) {
        let access_token = self.inner.store.access_token();
        self.clear_session();

        if let Some(token) = access_token {
            let request = ApiRequest::post(LOGOUT_PATH).bearer(&token);
            match self.inner.transport.send(&request).await {
                Ok(response) if response.is_success() => {
                    tracing::debug!("Backend session closed");
                }
                Ok(response) => {
                    tracing::warn!("Logout notification rejected: {}", response.status);
                }
                Err(e) => {
                    tracing::warn!("Logout notification failed: {}", e);
                }
            }
        }

        self.inner
            .navigator
            .navigate(&self.inner.config.routes.public_entry);
    }

    /// Local logout without backend notification
    pub fn force_logout(&self) {
        self.clear_session();
        self.inner
            .navigator
            .navigate(&self.inner.config.routes.public_entry);
    }

    fn clear_session(&self) {
        self.inner.store.clear();
        tracing::info!("Session cleared");
        self.publish(SessionEvent::SignedOut);
    }

    fn establish(&self, pair: &TokenPair, event: SessionEvent) -> Result<(), SessionError> {
        self.inner.store.save(pair)?;
        self.publish(event);
        Ok(())
    }

    // ========================================================================
    // Claims
    // ========================================================================

    /// Decode the stored access token
    pub fn claims(&self) -> Result<Claims, ClaimsError> {
        let token = self
            .inner
            .store
            .access_token()
            .ok_or(ClaimsError::MissingToken)?;
        decode_claims(&token)
    }

    /// Read one claim; `None` when the token is absent, malformed, or lacks it
    pub fn claim(&self, field: ClaimField) -> Option<String> {
        self.claims().ok().and_then(|claims| claims.field(field))
    }

    pub fn role(&self) -> Option<Role> {
        self.claims().ok().and_then(|claims| claims.role)
    }

    pub fn user_id(&self) -> Option<String> {
        self.claim(ClaimField::UserId)
    }

    /// Evaluate a route guard against the current session
    pub fn guard(&self, kind: GuardKind) -> GuardDecision {
        evaluate_guard(kind, self.state(), self.role(), &self.inner.config.routes)
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Register a listener for session changes
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|(listener_id, _)| *listener_id != id);
    }

    fn publish(&self, event: SessionEvent) {
        // Listeners may call back into the service
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(&event);
        }
    }
}

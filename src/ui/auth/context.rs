//! Session context for the component tree
//!
//! This is the composition root of the client: it builds the one
//! [`SessionService`] of the page and the [`AuthClient`] every view uses,
//! then mirrors session events into a signal so guards and menus re-render.

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

use crate::core::auth::{Navigator, SessionService, SessionState, TokenStore};
use crate::core::config::{ClientConfig, RouteConfig};
use crate::core::http::AuthClient;
use crate::ui::{AppClient, AppSession, AppStorage, AppTransport};

/// Session state and handles shared through the component tree
#[derive(Clone)]
pub struct SessionContext {
    /// Current session state, updated on every session event
    pub state: RwSignal<SessionState>,
    /// False until the stored tokens have been read in the browser
    pub ready: RwSignal<bool>,
    session: AppSession,
    client: AppClient,
}

impl SessionContext {
    pub fn session(&self) -> &AppSession {
        &self.session
    }

    /// HTTP client with bearer injection and refresh-and-retry
    pub fn client(&self) -> &AppClient {
        &self.client
    }

    pub fn routes(&self) -> &RouteConfig {
        &self.session.config().routes
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.get().is_authenticated()
    }

    /// Log out in the background; local state is cleared right away
    pub fn logout(&self) {
        let session = self.session.clone();
        spawn_local(async move {
            session.logout().await;
        });
    }
}

#[cfg(feature = "hydrate")]
fn app_navigator() -> Arc<dyn Navigator> {
    Arc::new(crate::core::auth::BrowserNavigator)
}

#[cfg(not(feature = "hydrate"))]
fn app_navigator() -> Arc<dyn Navigator> {
    Arc::new(crate::core::auth::NoopNavigator)
}

/// Build the session and provide it to the component tree
pub fn provide_session_context() -> SessionContext {
    let config = ClientConfig::from_build_env();
    let transport = AppTransport::new(config.api_url.clone());
    let session = SessionService::new(
        config,
        TokenStore::new(AppStorage::default()),
        transport,
        app_navigator(),
    );
    let client = AuthClient::new(session.clone());

    // Start anonymous on both server and client to avoid a hydration mismatch
    let state = RwSignal::new(SessionState::Anonymous);
    let ready = RwSignal::new(false);

    session.subscribe(move |event| state.set(event.state()));

    // Effects only run in the browser, where the tokens live
    Effect::new({
        let session = session.clone();
        move |_| {
            state.set(session.state());
            ready.set(true);
        }
    });

    let ctx = SessionContext {
        state,
        ready,
        session,
        client,
    };
    provide_context(ctx.clone());
    ctx
}

/// Get the session context from the component tree
pub fn use_session_context() -> SessionContext {
    expect_context::<SessionContext>()
}

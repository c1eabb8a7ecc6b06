//! Route guards
//!
//! Synchronous navigation predicates over the session state. They never
//! touch the network; applying the decision is up to the router.

use crate::core::auth::claims::Role;
use crate::core::auth::session::SessionState;
use crate::core::config::RouteConfig;

/// Notice shown when a non-admin reaches an admin route
pub const INSUFFICIENT_PERMISSIONS: &str = "Accès restreint : permissions administrateur requises.";

/// Guard flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    /// Only anonymous visitors (landing, sign-in)
    Public,
    /// Only authenticated users
    Private,
    /// Only super admins
    Admin,
}

/// Outcome of a guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect {
        to: String,
        /// User-visible notice to show alongside the redirect
        notice: Option<String>,
    },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }

    fn redirect(to: &str) -> Self {
        GuardDecision::Redirect {
            to: to.to_string(),
            notice: None,
        }
    }
}

/// Allow iff the session is authenticated, else go to sign-in
pub fn private_guard(state: SessionState, routes: &RouteConfig) -> GuardDecision {
    if state.is_authenticated() {
        GuardDecision::Allow
    } else {
        GuardDecision::redirect(&routes.sign_in)
    }
}

/// Allow iff the session is anonymous, else go to the authenticated landing page
pub fn public_guard(state: SessionState, routes: &RouteConfig) -> GuardDecision {
    if state.is_authenticated() {
        GuardDecision::redirect(&routes.authenticated_landing)
    } else {
        GuardDecision::Allow
    }
}

/// Allow iff the role claim is `SUPER_ADMIN`
pub fn admin_guard(role: Option<Role>, routes: &RouteConfig) -> GuardDecision {
    match role {
        Some(Role::SuperAdmin) => GuardDecision::Allow,
        _ => GuardDecision::Redirect {
            to: routes.authenticated_landing.clone(),
            notice: Some(INSUFFICIENT_PERMISSIONS.to_string()),
        },
    }
}

pub fn evaluate_guard(
    kind: GuardKind,
    state: SessionState,
    role: Option<Role>,
    routes: &RouteConfig,
) -> GuardDecision {
    match kind {
        GuardKind::Public => public_guard(state, routes),
        GuardKind::Private => private_guard(state, routes),
        GuardKind::Admin => admin_guard(role, routes),
    }
}

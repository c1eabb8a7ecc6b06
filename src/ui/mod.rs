//! Leptos view layer
//!
//! Wires the session core to the browser: localStorage token storage and
//! the fetch transport under `hydrate`, in-memory stand-ins when rendering
//! on the server.

pub mod auth;
pub mod notifications;
pub mod pages;

pub use auth::{
    AdminRoute, PrivateRoute, PublicRoute, SessionContext, SignInForm, UserMenu,
    provide_session_context, use_session_context,
};
pub use notifications::{
    ErrorBanner, NotificationContext, NotificationKind, NotificationsContainer,
    provide_notifications, use_notifications,
};

use crate::core::auth::SessionService;
use crate::core::http::AuthClient;

#[cfg(feature = "hydrate")]
pub type AppStorage = crate::core::auth::BrowserStorage;
#[cfg(not(feature = "hydrate"))]
pub type AppStorage = crate::core::auth::MemoryStorage;

#[cfg(feature = "hydrate")]
pub type AppTransport = crate::core::http::FetchTransport;
#[cfg(not(feature = "hydrate"))]
pub type AppTransport = crate::core::http::ReqwestTransport;

pub type AppSession = SessionService<AppStorage, AppTransport>;
pub type AppClient = AuthClient<AppStorage, AppTransport>;

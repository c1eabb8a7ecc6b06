//! Session and authentication lifecycle
//!
//! This module provides:
//! - Persistent token storage (access + refresh pair)
//! - Unverified claim decoding for role-based navigation
//! - The session service (sign-in, sign-up, social login, refresh, logout)
//! - Single-flight refresh coordination
//! - Route guards

pub mod claims;
pub mod guards;
pub mod navigation;
pub mod refresh;
pub mod session;
pub mod token_store;

pub use claims::{ClaimField, Claims, ClaimsError, Role, decode_claims};
pub use guards::{
    GuardDecision, GuardKind, INSUFFICIENT_PERMISSIONS, admin_guard, evaluate_guard,
    private_guard, public_guard,
};
#[cfg(feature = "hydrate")]
pub use navigation::BrowserNavigator;
pub use navigation::{Navigator, NoopNavigator};
pub use refresh::{RefreshCoordinator, RefreshGuard, RefreshPolicy, RefreshTicket};
pub use session::{
    Credentials, LOGOUT_PATH, REFRESH_PATH, SIGN_IN_PATH, SIGN_UP_PATH, SessionEvent,
    SessionService, SessionState, SignUpRequest, SocialCallback, SocialProvider, SubscriptionId,
};
#[cfg(feature = "hydrate")]
pub use token_store::BrowserStorage;
pub use token_store::{
    MemoryStorage, StorageError, TokenKind, TokenPair, TokenStorage, TokenStore,
};

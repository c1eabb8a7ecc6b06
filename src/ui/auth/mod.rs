//! Authentication UI module
//!
//! Session context, route guards and the auth widgets of the frontend.

mod context;
mod guards;
mod sign_in_form;
mod user_menu;

pub use context::{SessionContext, provide_session_context, use_session_context};
pub use guards::{AdminRoute, PrivateRoute, PublicRoute};
pub use sign_in_form::SignInForm;
pub use user_menu::UserMenu;

//! Application pages module
//!
//! - Landing page (public entry)
//! - Sign-in / sign-up page
//! - OAuth callback
//! - User dashboard (authenticated landing)
//! - Catalogue (target after sign-in)
//! - Admin dashboard

mod admin_dashboard;
mod catalogue;
mod dashboard;
mod landing;
mod not_found;
mod oauth_callback;
mod sign_in;

pub use admin_dashboard::AdminDashboardPage;
pub use catalogue::CataloguePage;
pub use dashboard::DashboardPage;
pub use landing::LandingPage;
pub use not_found::NotFoundPage;
pub use oauth_callback::OAuthCallbackPage;
pub use sign_in::SignInPage;

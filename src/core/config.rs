//! Client configuration.
//!
//! The server build loads it with `ClientConfig::from_env()` after calling
//! `dotenvy::dotenv()`. The browser build has no environment and bakes the
//! API URL in at compile time through `ClientConfig::from_build_env()`.

use crate::core::auth::RefreshPolicy;

/// Backend base URL used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Application routes the session layer redirects to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    /// Public entry point, target of logout
    pub public_entry: String,
    /// Sign-in page, target of the private guard
    pub sign_in: String,
    /// Sign-up page
    pub sign_up: String,
    /// Default page for authenticated users, target of the public and admin guards
    pub authenticated_landing: String,
    /// Where a successful sign-in or social login lands
    pub after_sign_in: String,
    /// Route the backend redirects to after OAuth
    pub oauth_callback: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            public_entry: "/".to_string(),
            sign_in: "/auth/login".to_string(),
            sign_up: "/auth/signup".to_string(),
            authenticated_landing: "/dashboard".to_string(),
            after_sign_in: "/catalogue".to_string(),
            oauth_callback: "/auth/callback".to_string(),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST API base URL
    /// Example: https://api.resa-chap.fr
    pub api_url: String,

    pub routes: RouteConfig,

    /// What to do with 401s arriving during an in-flight refresh
    pub refresh_policy: RefreshPolicy,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            routes: RouteConfig::default(),
            refresh_policy: RefreshPolicy::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `RESA_API_URL`: backend base URL
    /// - `RESA_REFRESH_POLICY`: `fail-fast` (default) or `coalesce`
    pub fn from_env() -> Self {
        let api_url = std::env::var("RESA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let refresh_policy = std::env::var("RESA_REFRESH_POLICY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self::new(api_url).with_refresh_policy(refresh_policy)
    }

    /// Configuration fixed at compile time, for the browser bundle
    pub fn from_build_env() -> Self {
        let refresh_policy = option_env!("RESA_REFRESH_POLICY")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self::new(option_env!("RESA_API_URL").unwrap_or(DEFAULT_API_URL))
            .with_refresh_policy(refresh_policy)
    }

    pub fn with_refresh_policy(mut self, policy: RefreshPolicy) -> Self {
        self.refresh_policy = policy;
        self
    }

    pub fn with_routes(mut self, routes: RouteConfig) -> Self {
        self.routes = routes;
        self
    }

    /// Absolute URL of a backend path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = ClientConfig::new("https://api.resa-chap.fr/");
        assert_eq!(config.api_url, "https://api.resa-chap.fr");
    }

    #[test]
    fn test_endpoint() {
        let config = ClientConfig::new("http://localhost:3000");
        assert_eq!(
            config.endpoint("/auth/google"),
            "http://localhost:3000/auth/google"
        );
        assert_eq!(
            config.endpoint("auth/github"),
            "http://localhost:3000/auth/github"
        );
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.refresh_policy, RefreshPolicy::FailFast);
        assert_eq!(config.routes.public_entry, "/");
        assert_eq!(config.routes.sign_in, "/auth/login");
        assert_eq!(config.routes.sign_up, "/auth/signup");
        assert_eq!(config.routes.authenticated_landing, "/dashboard");
        assert_eq!(config.routes.after_sign_in, "/catalogue");
        assert_eq!(config.routes.oauth_callback, "/auth/callback");
    }

    #[test]
    fn test_builder() {
        let routes = RouteConfig {
            authenticated_landing: "/home".to_string(),
            ..RouteConfig::default()
        };
        let config = ClientConfig::new("http://api")
            .with_refresh_policy(RefreshPolicy::Coalesce)
            .with_routes(routes);

        assert_eq!(config.refresh_policy, RefreshPolicy::Coalesce);
        assert_eq!(config.routes.authenticated_landing, "/home");
    }
}

//! Framework-independent client core: session lifecycle, HTTP pipeline and API clients

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;

pub use config::{ClientConfig, RouteConfig};
pub use error::SessionError;

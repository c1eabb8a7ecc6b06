//! Resa Chap - resource booking frontend
//!
//! Session and token lifecycle of the client: token storage, the auth
//! session service, route guards and the HTTP interceptor that refreshes
//! expired access tokens. The Leptos app on top is built with the `ssr`
//! and `hydrate` features.

#![recursion_limit = "4096"]

pub mod core;

#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod app;
#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}

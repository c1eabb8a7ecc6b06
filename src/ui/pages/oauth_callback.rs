//! OAuth callback page
//!
//! The backend redirects here with the token pair in the `at` and `rt`
//! query parameters, or with `error` when the provider refused.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::core::auth::SocialCallback;
use crate::ui::auth::use_session_context;
use crate::ui::notifications::use_notifications;

const CALLBACK_PARAMS: [&str; 3] = ["at", "rt", "error"];

#[component]
pub fn OAuthCallbackPage() -> impl IntoView {
    let ctx = use_session_context();
    let notifications = use_notifications();
    let query = use_query_map();
    let navigate = use_navigate();

    // Runs once in the browser, after the stored tokens are readable
    Effect::new(move |_| {
        let params = query.get();
        let callback = SocialCallback::from_query(
            CALLBACK_PARAMS
                .into_iter()
                .filter_map(|key| params.get(key).map(|value| (key, value))),
        );

        let routes = ctx.routes();
        match ctx.session().complete_social_callback(&callback) {
            Ok(_) => {
                notifications.success("Connexion sociale réussie.");
                navigate(&routes.after_sign_in, Default::default());
            }
            Err(err) => {
                notifications.session_error(&err);
                navigate(&routes.sign_in, Default::default());
            }
        }
    });

    view! {
        <div class="min-h-screen flex items-center justify-center">
            <p class="text-gray-600">"Connexion en cours..."</p>
        </div>
    }
}

//! Landing page component
//!
//! Public entry point, only shown to anonymous visitors.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::auth::use_session_context;

#[component]
pub fn LandingPage() -> impl IntoView {
    let ctx = use_session_context();
    let sign_in_path = ctx.routes().sign_in.clone();
    let sign_up_path = ctx.routes().sign_up.clone();

    view! {
        <div class="min-h-screen flex flex-col items-center justify-center p-4">
            <h1 class="text-4xl font-bold mb-4">"Resa Chap"</h1>
            <p class="text-lg text-gray-600 mb-8 max-w-xl text-center">
                "Réservez des salles, du matériel et des espaces auprès de locateurs près de chez vous."
            </p>
            <div class="flex gap-3">
                <A
                    href=sign_up_path
                    attr:class="px-6 py-3 bg-blue-600 hover:bg-blue-700 text-white font-medium rounded-lg transition-colors"
                >
                    "Commencer"
                </A>
                <A
                    href=sign_in_path
                    attr:class="px-6 py-3 border border-gray-300 hover:bg-gray-50 font-medium rounded-lg transition-colors"
                >
                    "Se connecter"
                </A>
            </div>
        </div>
    }
}

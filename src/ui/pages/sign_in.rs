//! Sign-in page component

use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::auth::SignInForm;

/// Sign-in page; `sign_up` opens the form in account-creation mode
#[component]
pub fn SignInPage(#[prop(optional)] sign_up: bool) -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col">
            <header class="border-b border-gray-200">
                <div class="max-w-7xl mx-auto px-4 flex items-center h-16">
                    <A href="/" attr:class="text-xl font-bold hover:opacity-80 transition-opacity">
                        "Resa Chap"
                    </A>
                </div>
            </header>

            <main class="flex-1 flex items-center justify-center p-4">
                <SignInForm sign_up=sign_up />
            </main>
        </div>
    }
}

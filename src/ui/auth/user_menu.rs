//! Header user menu
//!
//! Shows the current role and the logout button when signed in, or a
//! sign-in link otherwise.

use leptos::prelude::*;
use leptos_router::components::A;

use super::context::use_session_context;
use crate::core::auth::Role;

fn role_label(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::SuperAdmin) => "Administrateur",
        Some(Role::Locateur) => "Locateur",
        Some(Role::Locataire) => "Locataire",
        None => "Utilisateur",
    }
}

#[component]
pub fn UserMenu() -> impl IntoView {
    let ctx = use_session_context();
    let sign_in_path = ctx.routes().sign_in.clone();

    move || {
        if !ctx.ready.get() {
            // Loading skeleton
            return view! {
                <div class="w-24 h-8 rounded-lg bg-gray-200 animate-pulse"></div>
            }
            .into_any();
        }

        if !ctx.is_authenticated() {
            return view! {
                <A href=sign_in_path.clone() attr:class="px-3 py-1.5 text-sm font-medium text-blue-600">
                    "Se connecter"
                </A>
            }
            .into_any();
        }

        let role = ctx.session().role();
        let is_admin = role == Some(Role::SuperAdmin);
        let logout_ctx = ctx.clone();

        view! {
            <div class="flex items-center gap-3">
                <span class="text-sm text-gray-600">{role_label(role)}</span>
                {is_admin.then(|| view! {
                    <A href="/admin" attr:class="text-sm font-medium text-blue-600">"Tableau de bord"</A>
                })}
                <button
                    class="px-3 py-1.5 text-sm font-medium rounded-lg border border-gray-300 hover:bg-gray-50"
                    on:click=move |_| logout_ctx.logout()
                >
                    "Se déconnecter"
                </button>
            </div>
        }
        .into_any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_label() {
        assert_eq!(role_label(Some(Role::SuperAdmin)), "Administrateur");
        assert_eq!(role_label(Some(Role::Locataire)), "Locataire");
        assert_eq!(role_label(None), "Utilisateur");
    }
}

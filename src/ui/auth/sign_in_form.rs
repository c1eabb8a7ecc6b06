//! Sign-in / sign-up form
//!
//! Email and password form with the two OAuth buttons. Credential errors
//! stay inline; anything else goes to a toast. On success the user lands
//! on the catalogue.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use super::context::use_session_context;
use crate::core::auth::{Credentials, SignUpRequest, SocialProvider};
use crate::ui::notifications::use_notifications;

const MIN_PASSWORD_LENGTH: usize = 8;

fn validate_email(email: &str) -> Option<String> {
    let email = email.trim();
    if email.is_empty() {
        Some("L'email est obligatoire.".to_string())
    } else if !email.contains('@') || !email.contains('.') {
        Some("Adresse email invalide.".to_string())
    } else {
        None
    }
}

fn validate_password(password: &str, signing_up: bool) -> Option<String> {
    if password.is_empty() {
        Some("Le mot de passe est obligatoire.".to_string())
    } else if signing_up && password.len() < MIN_PASSWORD_LENGTH {
        Some(format!(
            "Le mot de passe doit contenir au moins {} caractères.",
            MIN_PASSWORD_LENGTH
        ))
    } else {
        None
    }
}

#[component]
pub fn SignInForm(#[prop(optional)] sign_up: bool) -> impl IntoView {
    let ctx = use_session_context();
    let notifications = use_notifications();
    let navigate = use_navigate();
    let after_sign_in = ctx.routes().after_sign_in.clone();

    let signing_up = RwSignal::new(sign_up);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let email_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);
    let form_error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = {
        let session = ctx.session().clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            form_error.set(None);

            let sign_up = signing_up.get_untracked();
            let email_val = email.get_untracked().trim().to_string();
            let password_val = password.get_untracked();

            email_error.set(validate_email(&email_val));
            password_error.set(validate_password(&password_val, sign_up));
            if email_error.get_untracked().is_some() || password_error.get_untracked().is_some() {
                return;
            }

            let session = session.clone();
            let navigate = navigate.clone();
            let after_sign_in = after_sign_in.clone();
            pending.set(true);
            spawn_local(async move {
                let result = if sign_up {
                    let request = SignUpRequest {
                        email: email_val,
                        password: password_val,
                        first_name: None,
                        last_name: None,
                    };
                    session.sign_up(&request).await
                } else {
                    session
                        .sign_in(&Credentials::new(email_val, password_val))
                        .await
                };

                match result {
                    Ok(_) => {
                        password.set(String::new());
                        notifications.success(if sign_up {
                            "Compte créé, bienvenue !"
                        } else {
                            "Connexion réussie."
                        });
                        navigate(&after_sign_in, Default::default());
                    }
                    Err(err) if err.is_form_error() => form_error.set(Some(err.user_message())),
                    Err(err) => notifications.session_error(&err),
                }
                pending.set(false);
            });
        }
    };

    let social_button = {
        let session = ctx.session().clone();
        move |provider: SocialProvider, label: &'static str| {
            let session = session.clone();
            view! {
                <button
                    type="button"
                    class="w-full py-2.5 px-4 border border-gray-300 rounded-lg font-medium
                           hover:bg-gray-50 transition-colors"
                    on:click=move |_| session.social_login_redirect(provider)
                >
                    {label}
                </button>
            }
        }
    };

    view! {
        <div class="w-full max-w-md mx-auto bg-white rounded-xl shadow-lg p-6 border border-gray-200">
            <form on:submit=on_submit class="space-y-6">
                <div class="text-center">
                    <h2 class="text-2xl font-bold">
                        {move || if signing_up.get() { "Créer un compte" } else { "Connexion" }}
                    </h2>
                </div>

                // Credential errors from the backend
                {move || {
                    form_error.get().map(|error| {
                        view! {
                            <div class="p-3 bg-red-100 border border-red-300 rounded-lg">
                                <p class="text-sm text-red-700">{error}</p>
                            </div>
                        }
                    })
                }}

                <div>
                    <label for="email" class="block text-sm font-medium mb-1">"Email"</label>
                    <input
                        type="email"
                        id="email"
                        name="email"
                        autocomplete="email"
                        class="w-full px-3 py-2 border border-gray-300 rounded-lg
                               focus:outline-none focus:ring-2 focus:ring-blue-500"
                        class:border-red-500=move || email_error.get().is_some()
                        prop:value=move || email.get()
                        on:input=move |ev| {
                            email.set(event_target_value(&ev));
                            email_error.set(None);
                        }
                    />
                    {move || {
                        email_error.get().map(|error| {
                            view! { <p class="mt-1 text-sm text-red-500">{error}</p> }
                        })
                    }}
                </div>

                <div>
                    <label for="password" class="block text-sm font-medium mb-1">"Mot de passe"</label>
                    <input
                        type="password"
                        id="password"
                        name="password"
                        autocomplete=move || if signing_up.get() { "new-password" } else { "current-password" }
                        class="w-full px-3 py-2 border border-gray-300 rounded-lg
                               focus:outline-none focus:ring-2 focus:ring-blue-500"
                        class:border-red-500=move || password_error.get().is_some()
                        prop:value=move || password.get()
                        on:input=move |ev| {
                            password.set(event_target_value(&ev));
                            password_error.set(None);
                        }
                    />
                    {move || {
                        password_error.get().map(|error| {
                            view! { <p class="mt-1 text-sm text-red-500">{error}</p> }
                        })
                    }}
                </div>

                <button
                    type="submit"
                    class="w-full py-2.5 px-4 bg-blue-600 hover:bg-blue-700 text-white font-medium rounded-lg
                           disabled:opacity-50 disabled:cursor-not-allowed transition-colors"
                    disabled=move || pending.get()
                >
                    {move || match (pending.get(), signing_up.get()) {
                        (true, _) => "Patientez...",
                        (false, true) => "S'inscrire",
                        (false, false) => "Se connecter",
                    }}
                </button>

                <div class="text-center text-sm">
                    <button
                        type="button"
                        class="text-blue-600 hover:text-blue-700 font-medium"
                        on:click=move |_| {
                            signing_up.update(|v| *v = !*v);
                            form_error.set(None);
                            password_error.set(None);
                        }
                    >
                        {move || {
                            if signing_up.get() {
                                "Déjà inscrit ? Se connecter"
                            } else {
                                "Pas encore de compte ? S'inscrire"
                            }
                        }}
                    </button>
                </div>
            </form>

            <div class="mt-6 space-y-3">
                {social_button(SocialProvider::Google, "Continuer avec Google")}
                {social_button(SocialProvider::Github, "Continuer avec GitHub")}
            </div>
        </div>
    }
}

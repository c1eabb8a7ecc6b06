//! Route guard components
//!
//! Thin wrappers applying [`evaluate_guard`] to the current session: render
//! the children or a `<Redirect>`. Nothing is rendered until the browser
//! has read the stored tokens, so server rendering never redirects.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::context::use_session_context;
use crate::core::auth::{GuardDecision, GuardKind, evaluate_guard};
use crate::ui::notifications::use_notifications;

fn guarded_view(kind: GuardKind, children: ChildrenFn) -> impl IntoView {
    let ctx = use_session_context();
    let notifications = use_notifications();

    move || {
        if !ctx.ready.get() {
            return ().into_any();
        }

        let state = ctx.state.get();
        let role = if state.is_authenticated() {
            ctx.session().role()
        } else {
            None
        };

        match evaluate_guard(kind, state, role, ctx.routes()) {
            GuardDecision::Allow => children().into_any(),
            GuardDecision::Redirect { to, notice } => {
                if let Some(notice) = notice {
                    notifications.error(notice);
                }
                view! { <Redirect path=to /> }.into_any()
            }
        }
    }
}

/// Only authenticated users; others go to sign-in
#[component]
pub fn PrivateRoute(children: ChildrenFn) -> impl IntoView {
    guarded_view(GuardKind::Private, children)
}

/// Only anonymous visitors; signed-in users go to the dashboard
#[component]
pub fn PublicRoute(children: ChildrenFn) -> impl IntoView {
    guarded_view(GuardKind::Public, children)
}

/// Only super admins; others go to the dashboard with an error toast
#[component]
pub fn AdminRoute(children: ChildrenFn) -> impl IntoView {
    guarded_view(GuardKind::Admin, children)
}

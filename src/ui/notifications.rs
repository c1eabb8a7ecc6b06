//! Toast notifications
//!
//! Transient messages for errors, warnings, success and info, stacked in
//! the top-right corner.

use leptos::prelude::*;
use std::collections::VecDeque;

use crate::core::error::SessionError;

/// Maximum number of notifications to show at once
const MAX_NOTIFICATIONS: usize = 5;

/// Auto-dismiss delay
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
const AUTO_DISMISS_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

/// Notification item with unique ID for tracking
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Notification queue shared through the component tree
#[derive(Clone, Copy)]
pub struct NotificationContext {
    items: RwSignal<VecDeque<Notification>>,
    next_id: RwSignal<u64>,
}

impl NotificationContext {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(VecDeque::new()),
            next_id: RwSignal::new(0),
        }
    }

    pub fn items(&self) -> RwSignal<VecDeque<Notification>> {
        self.items
    }

    /// Add a notification, dropping the oldest beyond the limit
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        self.items.update(|items| {
            items.push_back(Notification {
                id,
                kind,
                message: message.into(),
            });
            while items.len() > MAX_NOTIFICATIONS {
                items.pop_front();
            }
        });

        #[cfg(feature = "hydrate")]
        {
            use gloo_timers::future::TimeoutFuture;

            let items = self.items;
            leptos::task::spawn_local(async move {
                TimeoutFuture::new(AUTO_DISMISS_MS).await;
                items.update(|items| items.retain(|n| n.id != id));
            });
        }

        id
    }

    pub fn dismiss(&self, id: u64) {
        self.items.update(|items| items.retain(|n| n.id != id));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Error, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Warning, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Info, message);
    }

    /// Show the user-facing message of a failed call
    pub fn session_error(&self, err: &SessionError) {
        tracing::warn!("Request failed: {}", err);
        self.error(err.user_message());
    }
}

impl Default for NotificationContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_notifications() -> NotificationContext {
    let ctx = NotificationContext::new();
    provide_context(ctx);
    ctx
}

pub fn use_notifications() -> NotificationContext {
    expect_context::<NotificationContext>()
}

/// Notifications container; place once at the root of the app
#[component]
pub fn NotificationsContainer() -> impl IntoView {
    let ctx = use_notifications();

    view! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2 max-w-sm">
            {move || {
                ctx.items().get().into_iter().map(|item| {
                    let id = item.id;
                    let class = match item.kind {
                        NotificationKind::Success => "border-green-500/30 bg-green-500/10 text-green-700",
                        NotificationKind::Error => "border-red-500/30 bg-red-500/10 text-red-700",
                        NotificationKind::Warning => "border-yellow-500/30 bg-yellow-500/10 text-yellow-700",
                        NotificationKind::Info => "border-blue-500/30 bg-blue-500/10 text-blue-700",
                    };

                    view! {
                        <div class=format!("flex items-start gap-3 p-4 rounded-lg border shadow-lg {}", class)>
                            <p class="flex-1 text-sm">{item.message}</p>
                            <button
                                class="text-sm opacity-60 hover:opacity-100"
                                on:click=move |_| ctx.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }).collect_view()
            }}
        </div>
    }
}

/// Inline message for a failed call outside of a form
#[component]
pub fn ErrorBanner(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="p-3 bg-red-100 border border-red-300 rounded-lg">
            <p class="text-sm text-red-700">{message}</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_assigns_increasing_ids() {
        let owner = Owner::new();
        owner.with(|| {
            let ctx = NotificationContext::new();
            let first = ctx.notify(NotificationKind::Info, "a");
            let second = ctx.notify(NotificationKind::Error, "b");

            assert_eq!(second, first + 1);
            assert_eq!(ctx.items().get_untracked().len(), 2);
        });
    }

    #[test]
    fn test_queue_is_bounded() {
        let owner = Owner::new();
        owner.with(|| {
            let ctx = NotificationContext::new();
            for i in 0..8 {
                ctx.info(format!("message {}", i));
            }

            let items = ctx.items().get_untracked();
            assert_eq!(items.len(), MAX_NOTIFICATIONS);
            assert_eq!(items.front().unwrap().message, "message 3");
        });
    }

    #[test]
    fn test_dismiss() {
        let owner = Owner::new();
        owner.with(|| {
            let ctx = NotificationContext::new();
            let id = ctx.notify(NotificationKind::Warning, "x");
            ctx.success("y");

            ctx.dismiss(id);

            let items = ctx.items().get_untracked();
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].kind, NotificationKind::Success);
        });
    }

    #[test]
    fn test_session_error_uses_user_message() {
        let owner = Owner::new();
        owner.with(|| {
            let ctx = NotificationContext::new();
            ctx.session_error(&SessionError::InvalidCredentials);

            let items = ctx.items().get_untracked();
            assert_eq!(items[0].message, SessionError::InvalidCredentials.user_message());
            assert_eq!(items[0].kind, NotificationKind::Error);
        });
    }
}

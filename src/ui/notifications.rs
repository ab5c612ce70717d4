//! Toast notifications
//!
//! Short-lived success and error messages for mutations that do not live
//! on a list page, e.g. the course editor.

use leptos::prelude::*;
use std::collections::VecDeque;

/// Maximum number of toasts to show at once
const MAX_NOTIFICATIONS: usize = 5;

/// Toasts disappear on their own after this long
pub const AUTO_DISMISS_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Toast with a unique ID for tracking
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Toast queue shared through context
#[derive(Clone, Copy)]
pub struct NotificationManager {
    notifications: RwSignal<VecDeque<Toast>>,
    next_id: StoredValue<u64>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifications: RwSignal::new(VecDeque::new()),
            next_id: StoredValue::new(0),
        }
    }

    /// Add a toast; the oldest ones go first when the queue is full
    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        self.notifications.update(|n| {
            n.push_back(Toast {
                id,
                kind,
                message: message.into(),
            });
            while n.len() > MAX_NOTIFICATIONS {
                n.pop_front();
            }
        });

        #[cfg(not(feature = "ssr"))]
        {
            let manager = *self;
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(AUTO_DISMISS_MS).await;
                manager.dismiss(id);
            });
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(ToastKind::Error, message);
    }

    pub fn dismiss(&self, id: u64) {
        self.notifications.try_update(|n| n.retain(|t| t.id != id));
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_notifications() -> NotificationManager {
    let manager = NotificationManager::new();
    provide_context(manager);
    manager
}

pub fn use_notifications() -> NotificationManager {
    expect_context::<NotificationManager>()
}

/// Toast stack, placed once at the app root
#[component]
pub fn NotificationsContainer() -> impl IntoView {
    let manager = use_notifications();

    view! {
        <div class="fixed top-4 right-4 z-[60] flex flex-col gap-2 max-w-sm" aria-live="polite">
            <For
                each=move || manager.notifications.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.kind {
                        ToastKind::Success => "toast bg-green-50 border-green-300 text-green-800",
                        ToastKind::Error => "toast bg-red-50 border-red-300 text-red-800",
                    };
                    view! {
                        <div class=format!("flex items-start gap-3 p-4 rounded-lg border shadow-lg {class}")>
                            <p class="flex-1 text-sm">{toast.message}</p>
                            <button
                                class="opacity-60 hover:opacity-100"
                                aria-label="Dismiss"
                                on:click=move |_| manager.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

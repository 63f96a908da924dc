//! Notice Tray Component
//!
//! Stack of transient messages raised by the hubs.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiError;
use crate::context::use_app_context;
use crate::store::{
    store_dismiss_notice, store_notices, store_push_notice, use_dashboard_store, DashboardStore,
    NoticeLevel,
};

/// Raises notices that dismiss themselves after the configured timeout
#[derive(Clone, Copy)]
pub struct Notifier {
    store: DashboardStore,
    timeout_ms: u32,
}

impl Notifier {
    pub fn from_context() -> Self {
        Self {
            store: use_dashboard_store(),
            timeout_ms: use_app_context().config().notice_timeout_ms,
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.raise(NoticeLevel::Success, message.into());
    }

    /// Report a failed backend call; `action` says what was attempted
    pub fn error(&self, action: &str, err: &ApiError) {
        let (message, dismiss) = error_notice(action, err);
        if dismiss {
            self.raise(NoticeLevel::Error, message);
        } else {
            store_push_notice(&self.store, NoticeLevel::Error, message);
        }
    }

    fn raise(&self, level: NoticeLevel, message: String) {
        let store = self.store;
        let timeout_ms = self.timeout_ms;
        let id = store_push_notice(&store, level, message);
        spawn_local(async move {
            TimeoutFuture::new(timeout_ms).await;
            store_dismiss_notice(&store, id);
        });
    }
}

/// Message for a failed call and whether it may dismiss itself.
/// An expired session stays on screen until the user signs in again.
fn error_notice(action: &str, err: &ApiError) -> (String, bool) {
    if err.is_unauthorized() {
        (err.to_string(), false)
    } else {
        (format!("{action}: {err}"), true)
    }
}

#[component]
pub fn NoticeTray() -> impl IntoView {
    let store = use_dashboard_store();

    view! {
        <div class="notice-tray">
            <For
                each=move || store_notices(&store)
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.level.class()>
                            <span class="notice-message">{notice.message.clone()}</span>
                            <button
                                class="notice-close"
                                on:click=move |_| store_dismiss_notice(&store, id)
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

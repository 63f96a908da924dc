//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Holds the
//! notices that pages raise when a backend call fails or succeeds.

use leptos::prelude::*;
use reactive_stores::Store;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl NoticeLevel {
    pub fn class(self) -> &'static str {
        match self {
            NoticeLevel::Success => "notice notice-success",
            NoticeLevel::Error => "notice notice-error",
        }
    }
}

/// A transient message shown in the notice tray
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub level: NoticeLevel,
    pub message: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct DashboardState {
    /// Notices currently on screen, oldest first
    pub notices: Vec<Notice>,
    /// Id for the next notice
    pub next_notice_id: u32,
}

/// Type alias for the store
pub type DashboardStore = Store<DashboardState>;

/// Get the dashboard store from context
pub fn use_dashboard_store() -> DashboardStore {
    expect_context::<DashboardStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Push a notice and return its id
pub fn store_push_notice(store: &DashboardStore, level: NoticeLevel, message: impl Into<String>) -> u32 {
    let id = store.next_notice_id().get_untracked();
    store.next_notice_id().set(id.wrapping_add(1));
    let message = message.into();
    match level {
        NoticeLevel::Error => log::warn!("[NOTICE] {}", message),
        NoticeLevel::Success => log::info!("[NOTICE] {}", message),
    }
    store.notices().write().push(Notice { id, level, message });
    id
}

/// Remove a notice by ID
pub fn store_dismiss_notice(store: &DashboardStore, id: u32) {
    store.notices().write().retain(|notice| notice.id != id);
}

/// Notices currently on screen (tracked)
pub fn store_notices(store: &DashboardStore) -> Vec<Notice> {
    store.notices().get()
}

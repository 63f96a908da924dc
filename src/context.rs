//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::config::DashboardConfig;
use crate::models::Role;

/// Local storage keys written by the sign-in flow
const TOKEN_KEY: &str = "access_token";
const ROLE_KEY: &str = "user_role";

/// Credentials handed over by the external auth flow
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub role: Role,
}

impl Session {
    /// Read the session from browser local storage
    pub fn from_storage() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        let read = |key: &str| storage.as_ref().and_then(|s| s.get_item(key).ok().flatten());
        Self::from_values(read(TOKEN_KEY), read(ROLE_KEY))
    }

    pub fn from_values(token: Option<String>, role: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            role: role.as_deref().map(Role::parse).unwrap_or(Role::Unknown),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    api: StoredValue<ApiClient>,
    config: StoredValue<DashboardConfig>,
    /// Bumped to make every hub reload from the backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Bumped to make every hub reload from the backend - write
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(
        config: DashboardConfig,
        session: Session,
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
    ) -> Self {
        let api = ApiClient::new(config.api_base_url.clone(), session.token.clone());
        Self {
            api: StoredValue::new(api),
            config: StoredValue::new(config),
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    pub fn config(&self) -> DashboardConfig {
        self.config.get_value()
    }

    /// Trigger a reload of all hubs
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

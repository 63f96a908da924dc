//! ChefSync Dashboard App
//!
//! Header with the role's hub tabs, the active hub and the notice tray.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{DeliveriesHub, KitchenHub, NoticeTray, OrdersHub, UsersHub};
use crate::config::DashboardConfig;
use crate::context::{AppContext, Session};
use crate::models::Role;
use crate::store::DashboardState;

/// A role-specific page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hub {
    Users,
    Orders,
    Kitchen,
    Deliveries,
}

impl Hub {
    pub fn label(self) -> &'static str {
        match self {
            Hub::Users => "Users",
            Hub::Orders => "Orders",
            Hub::Kitchen => "Kitchen",
            Hub::Deliveries => "Deliveries",
        }
    }
}

/// Hubs visible to `role`, first one is the landing hub
pub fn hub_tabs(role: Role) -> &'static [Hub] {
    match role {
        Role::Admin => &[Hub::Users, Hub::Orders],
        Role::Cook => &[Hub::Kitchen],
        Role::DeliveryAgent => &[Hub::Deliveries],
        _ => &[],
    }
}

#[component]
pub fn App(config: DashboardConfig) -> impl IntoView {
    let session = Session::from_storage();
    let role = session.role;
    let signed_in = session.is_signed_in();
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    log::info!("[APP] Starting as {} against {}", role.label(), config.api_base_url);

    let ctx = AppContext::new(config, session, (reload_trigger, set_reload_trigger));
    provide_context(ctx);
    provide_context(Store::new(DashboardState::default()));

    let tabs = hub_tabs(role);
    let (current, set_current) = signal(tabs.first().copied());

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"ChefSync"</h1>
                <nav class="hub-tabs">
                    {tabs
                        .iter()
                        .map(|&hub| view! {
                            <button
                                class="hub-tab"
                                class:active=move || current.get() == Some(hub)
                                on:click=move |_| set_current.set(Some(hub))
                            >
                                {hub.label()}
                            </button>
                        })
                        .collect_view()}
                </nav>
                <span class="role-label">{role.label()}</span>
                <button class="reload-btn" title="Reload" on:click=move |_| ctx.reload()>"⟳"</button>
            </header>

            <main class="main-content">
                {move || match current.get() {
                    Some(Hub::Users) => view! { <UsersHub /> }.into_any(),
                    Some(Hub::Orders) => view! { <OrdersHub /> }.into_any(),
                    Some(Hub::Kitchen) => view! { <KitchenHub /> }.into_any(),
                    Some(Hub::Deliveries) => view! { <DeliveriesHub /> }.into_any(),
                    None if !signed_in => view! {
                        <p class="empty-state">"Sign in to use the dashboard."</p>
                    }
                    .into_any(),
                    None => view! {
                        <p class="empty-state">"There is no dashboard for this account."</p>
                    }
                    .into_any(),
                }}
            </main>

            <NoticeTray />
        </div>
    }
}

//! Status Badges
//!
//! Small coloured labels used in the hub tables.

use leptos::prelude::*;

use crate::models::{FoodApproval, OrderStatus};

#[component]
pub fn OrderStatusBadge(status: OrderStatus) -> impl IntoView {
    view! {
        <span class=format!("badge badge-{}", status.as_str())>{status.label()}</span>
    }
}

#[component]
pub fn ActiveBadge(active: bool) -> impl IntoView {
    let (class, label) = if active {
        ("badge badge-active", "Active")
    } else {
        ("badge badge-inactive", "Inactive")
    };
    view! { <span class=class>{label}</span> }
}

#[component]
pub fn FoodApprovalBadge(status: FoodApproval) -> impl IntoView {
    view! {
        <span class=format!("badge badge-{}", status.label().to_lowercase())>{status.label()}</span>
    }
}

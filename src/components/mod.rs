//! UI Components
//!
//! Reusable Leptos components and the role hubs built from them.

mod delete_confirm_button;
mod notice_tray;
mod stat_card;
mod status_badge;
mod search_bar;
mod pager;
mod order_queue;
mod users_hub;
mod orders_hub;
mod kitchen_hub;
mod deliveries_hub;

pub use delete_confirm_button::DeleteConfirmButton;
pub use notice_tray::{NoticeTray, Notifier};
pub use stat_card::StatCard;
pub use status_badge::{ActiveBadge, FoodApprovalBadge, OrderStatusBadge};
pub use search_bar::SearchBar;
pub use pager::Pager;
pub use order_queue::OrderQueue;
pub use users_hub::UsersHub;
pub use orders_hub::OrdersHub;
pub use kitchen_hub::KitchenHub;
pub use deliveries_hub::DeliveriesHub;

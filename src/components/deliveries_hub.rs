//! Deliveries Hub
//!
//! Delivery agent view: orders ready for pickup and orders on the road.

use leptos::prelude::*;

use crate::components::OrderQueue;
use crate::models::{OrderStatus, Role};

#[component]
pub fn DeliveriesHub() -> impl IntoView {
    view! {
        <section class="hub deliveries-hub">
            <OrderQueue
                title="Ready for Pickup"
                role=Role::DeliveryAgent
                statuses=vec![OrderStatus::Ready]
            />
            <OrderQueue
                title="On the Road"
                role=Role::DeliveryAgent
                statuses=vec![OrderStatus::OutForDelivery]
            />
        </section>
    }
}

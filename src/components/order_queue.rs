//! Order Queue Component
//!
//! Orders waiting on the signed-in cook or delivery agent, each with a
//! single "advance" action that moves it one workflow step forward.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_optimistic::OptimisticList;

use crate::api;
use crate::components::{Notifier, OrderStatusBadge};
use crate::context::use_app_context;
use crate::models::{Order, OrderStatus, Role};
use crate::stats::format_amount;

#[component]
pub fn OrderQueue(
    #[prop(into)] title: String,
    /// Whose workflow the advance button follows
    role: Role,
    /// Statuses fetched into the queue
    statuses: Vec<OrderStatus>,
) -> impl IntoView {
    let ctx = use_app_context();
    let notifier = Notifier::from_context();
    let queue = StoredValue::new(OptimisticList::<Order>::new());
    let items: ReadSignal<Vec<Order>> = queue.with_value(|list| list.items()).into();
    let busy = Signal::derive(move || queue.with_value(|list| list.is_pending()));
    let statuses = StoredValue::new(statuses);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        let list = queue.get_value();
        let statuses = statuses.get_value();
        spawn_local(async move {
            let mut loaded = Vec::new();
            for &status in &statuses {
                match api::list_role_orders(&api, status).await {
                    Ok(orders) => loaded.extend(orders),
                    Err(err) => {
                        notifier.error("Could not load orders", &err);
                        return;
                    }
                }
            }
            let loaded = queued_orders(loaded, &statuses);
            log::debug!("[QUEUE] Loaded {} orders", loaded.len());
            list.replace_all(loaded);
        });
    });

    let advance = move |order: Order| {
        let Some(status) = order.status.next_for(role) else {
            return;
        };
        let api = ctx.api();
        let list = queue.get_value();
        let statuses = statuses.get_value();
        let next = order.with_status(status);
        let current = order.clone();
        let pending = list.optimistic_update(next, order, async move {
            api::advance_order(&api, current, status).await
        });
        spawn_local(async move {
            match pending.await {
                Ok(order) => {
                    notifier.success(format!("{} is {}", order.order_number, order.status.label()));
                    // The order now belongs to the next queue
                    list.replace_all(queued_orders(list.snapshot(), &statuses));
                    ctx.reload();
                }
                Err(err) => notifier.error("Could not update order", &err),
            }
        });
    };

    view! {
        <div class="order-queue">
            <h2>{title}</h2>
            <Show
                when=move || items.with(|orders| !orders.is_empty())
                fallback=|| view! { <p class="empty-state">"Nothing waiting right now."</p> }
            >
                <ul class="queue-list">
                    <For
                        each=move || items.get()
                        key=|order| (order.id, order.status)
                        children=move |order: Order| {
                            let next = order.status.next_for(role);
                            let target = order.clone();
                            view! {
                                <li class="queue-item">
                                    <div class="queue-main">
                                        <span class="queue-number">{order.order_number.clone()}</span>
                                        <OrderStatusBadge status=order.status />
                                    </div>
                                    <div class="queue-detail">
                                        <span>{order.customer_name.clone()}</span>
                                        <span>{format!("{} items", order.items_count)}</span>
                                        <span>{format_amount(order.total_amount)}</span>
                                        <span class="queue-address">
                                            {order.delivery_address.clone().unwrap_or_default()}
                                        </span>
                                    </div>
                                    {next.map(|status| view! {
                                        <button
                                            class="advance-btn"
                                            disabled=move || busy.get()
                                            on:click=move |_| advance(target.clone())
                                        >
                                            {format!("Mark {}", status.label())}
                                        </button>
                                    })}
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}

/// Orders that belong in a queue showing `statuses`, one entry per id
fn queued_orders(mut orders: Vec<Order>, statuses: &[OrderStatus]) -> Vec<Order> {
    orders.retain(|order| statuses.contains(&order.status));
    orders.sort_by_key(|order| order.id);
    orders.dedup_by_key(|order| order.id);
    orders
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: u32, status: OrderStatus) -> Order {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "order_number": format!("ORD-{id:04}"),
            "customer_name": "Nila",
            "status": status,
            "payment_status": "paid",
            "total_amount": 900.0
        }))
        .unwrap()
    }

    #[test]
    fn test_advanced_order_leaves_queue() {
        let ready_queue = [OrderStatus::Ready];
        let orders = vec![order(4, OrderStatus::OutForDelivery), order(2, OrderStatus::Ready)];
        let kept = queued_orders(orders, &ready_queue);
        assert_eq!(kept.iter().map(|o| o.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_kitchen_queue_keeps_both_statuses_once() {
        let kitchen = [OrderStatus::Confirmed, OrderStatus::Preparing];
        let orders = vec![
            order(9, OrderStatus::Preparing),
            order(3, OrderStatus::Confirmed),
            order(9, OrderStatus::Preparing),
            order(5, OrderStatus::Ready),
        ];
        let kept = queued_orders(orders, &kitchen);
        assert_eq!(kept.iter().map(|o| o.id).collect::<Vec<_>>(), vec![3, 9]);
    }
}

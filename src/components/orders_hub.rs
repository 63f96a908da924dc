//! Orders Hub
//!
//! Admin view over every order with an inline status select.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_optimistic::OptimisticList;

use crate::api::{self, OrderQuery};
use crate::components::{Notifier, OrderStatusBadge, Pager, SearchBar, StatCard};
use crate::context::use_app_context;
use crate::filters::{page_count, paginate, OrderFilter};
use crate::models::{Order, OrderStatus};
use crate::stats::{format_amount, OrderStats};

#[component]
pub fn OrdersHub() -> impl IntoView {
    let ctx = use_app_context();
    let notifier = Notifier::from_context();
    let orders = StoredValue::new(OptimisticList::<Order>::new());
    let items: ReadSignal<Vec<Order>> = orders.with_value(|list| list.items()).into();
    let busy = Signal::derive(move || orders.with_value(|list| list.is_pending()));

    let (search, set_search) = signal(String::new());
    let (status_filter, set_status_filter) = signal(None::<OrderStatus>);
    let (page, set_page) = signal(1usize);
    let per_page = ctx.config().page_size as usize;

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        let list = orders.get_value();
        let query = OrderQuery {
            page: 1,
            limit: ctx.config().fetch_limit,
            ..Default::default()
        };
        spawn_local(async move {
            match api::list_orders(&api, &query).await {
                Ok(loaded) => {
                    log::debug!("[ORDERS] Loaded {} of {} orders", loaded.orders.len(), loaded.pagination.total);
                    list.replace_all(loaded.orders);
                }
                Err(err) => notifier.error("Could not load orders", &err),
            }
        });
    });

    let filtered = Memo::new(move |_| {
        let filter = OrderFilter {
            search: search.get(),
            status: status_filter.get(),
        };
        items.with(|all| all.iter().filter(|o| filter.matches(o)).cloned().collect::<Vec<_>>())
    });
    let pages = Signal::derive(move || filtered.with(|rows| page_count(rows.len(), per_page)));
    let stats = Memo::new(move |_| items.with(|all| OrderStats::from_orders(all)));

    let set_status = move |order: Order, status: OrderStatus| {
        if order.status == status {
            return;
        }
        let api = ctx.api();
        let next = order.with_status(status);
        let current = order.clone();
        let pending = orders.with_value(|list| {
            list.optimistic_update(next, order, async move {
                api::update_order_status(&api, current, status).await
            })
        });
        spawn_local(async move {
            match pending.await {
                Ok(order) => notifier.success(format!("{} set to {}", order.order_number, order.status.label())),
                Err(err) => notifier.error("Could not update order status", &err),
            }
        });
    };

    view! {
        <section class="hub orders-hub">
            <div class="stat-strip">
                <StatCard label="Orders" value=Signal::derive(move || stats.get().total.to_string()) />
                <StatCard label="In Progress" value=Signal::derive(move || stats.get().in_progress.to_string()) />
                <StatCard label="Delivered" value=Signal::derive(move || stats.get().delivered.to_string()) />
                <StatCard
                    label="Cancelled"
                    value=Signal::derive(move || stats.get().cancelled.to_string())
                    tone="stat-warning"
                />
                <StatCard label="Revenue" value=Signal::derive(move || format_amount(stats.get().revenue)) />
            </div>

            <div class="hub-toolbar">
                <SearchBar placeholder="Search order, customer..." value=search set_value=set_search />
                <select on:change=move |ev| set_status_filter.set(OrderStatus::parse(&event_target_value(&ev)))>
                    <option value="">"All statuses"</option>
                    {OrderStatus::ALL
                        .into_iter()
                        .map(|status| view! { <option value=status.as_str()>{status.label()}</option> })
                        .collect_view()}
                </select>
            </div>

            <table class="hub-table">
                <thead>
                    <tr>
                        <th>"Order"</th>
                        <th>"Customer"</th>
                        <th>"Total"</th>
                        <th>"Payment"</th>
                        <th>"Status"</th>
                        <th>"Change"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || filtered.with(|rows| paginate(rows, page.get(), per_page))
                        key=|order| (order.id, order.status)
                        children=move |order: Order| {
                            let current = order.status;
                            let target = order.clone();
                            view! {
                                <tr>
                                    <td>{order.order_number.clone()}</td>
                                    <td>{order.customer_name.clone()}</td>
                                    <td>{format_amount(order.total_amount)}</td>
                                    <td>{order.payment_status.label()}</td>
                                    <td><OrderStatusBadge status=current /></td>
                                    <td>
                                        <select
                                            disabled=move || busy.get() || current.is_terminal()
                                            prop:value=current.as_str()
                                            on:change=move |ev| {
                                                if let Some(status) = OrderStatus::parse(&event_target_value(&ev)) {
                                                    set_status(target.clone(), status);
                                                }
                                            }
                                        >
                                            {current
                                                .admin_choices()
                                                .into_iter()
                                                .map(|status| view! {
                                                    <option value=status.as_str() selected=status == current>
                                                        {status.label()}
                                                    </option>
                                                })
                                                .collect_view()}
                                        </select>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Pager page=page set_page=set_page pages=pages />
        </section>
    }
}

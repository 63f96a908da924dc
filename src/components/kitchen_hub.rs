//! Kitchen Hub
//!
//! Cook view: the cook's menu (availability, new dishes, removal) next to
//! the queue of orders the kitchen has to prepare.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_optimistic::OptimisticList;

use crate::api;
use crate::components::{
    DeleteConfirmButton, FoodApprovalBadge, Notifier, OrderQueue, SearchBar, StatCard,
};
use crate::context::use_app_context;
use crate::filters::FoodFilter;
use crate::models::{Food, FoodDraft, OrderStatus, Role};
use crate::stats::FoodStats;

/// Provisional ids count down from here so they never meet a server id
const PROVISIONAL_ID_BASE: u32 = u32::MAX;

#[component]
pub fn KitchenHub() -> impl IntoView {
    view! {
        <section class="hub kitchen-hub">
            <OrderQueue
                title="Kitchen Queue"
                role=Role::Cook
                statuses=vec![OrderStatus::Confirmed, OrderStatus::Preparing]
            />
            <MenuPanel />
        </section>
    }
}

#[component]
fn MenuPanel() -> impl IntoView {
    let ctx = use_app_context();
    let notifier = Notifier::from_context();
    let foods = StoredValue::new(OptimisticList::<Food>::new());
    let items: ReadSignal<Vec<Food>> = foods.with_value(|list| list.items()).into();
    let busy = Signal::derive(move || foods.with_value(|list| list.is_pending()));
    let next_provisional = StoredValue::new(PROVISIONAL_ID_BASE);

    let (search, set_search) = signal(String::new());
    let (availability, set_availability) = signal(None::<bool>);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        let list = foods.get_value();
        spawn_local(async move {
            match api::list_chef_foods(&api).await {
                Ok(loaded) => {
                    log::debug!("[MENU] Loaded {} foods", loaded.len());
                    list.replace_all(loaded);
                }
                Err(err) => notifier.error("Could not load menu", &err),
            }
        });
    });

    let filtered = Memo::new(move |_| {
        let filter = FoodFilter {
            search: search.get(),
            availability: availability.get(),
        };
        items.with(|all| all.iter().filter(|f| filter.matches(f)).cloned().collect::<Vec<_>>())
    });
    let stats = Memo::new(move |_| items.with(|all| FoodStats::from_foods(all)));

    let toggle_available = move |food: Food| {
        let api = ctx.api();
        let available = !food.is_available;
        let next = Food { is_available: available, ..food.clone() };
        let target = food.clone();
        let pending = foods.with_value(|list| {
            list.optimistic_update(next, food, async move {
                api::set_food_available(&api, target, available).await
            })
        });
        spawn_local(async move {
            match pending.await {
                Ok(food) => notifier.success(format!(
                    "{} is {}",
                    food.name,
                    if food.is_available { "on the menu" } else { "hidden" }
                )),
                Err(err) => notifier.error("Could not change availability", &err),
            }
        });
    };

    let remove_food = move |food: Food| {
        let api = ctx.api();
        let id = food.id;
        let name = food.name.clone();
        let pending = foods.with_value(|list| {
            list.optimistic_delete(food, async move { api::delete_food(&api, id).await })
        });
        spawn_local(async move {
            match pending.await {
                Ok(()) => notifier.success(format!("{name} removed")),
                Err(err) => notifier.error("Could not delete food", &err),
            }
        });
    };

    let add_food = Callback::new(move |draft: FoodDraft| {
        let api = ctx.api();
        let id = next_provisional.get_value();
        next_provisional.set_value(id.wrapping_sub(1));
        let provisional = draft.provisional(id);
        let pending = foods.with_value(|list| {
            list.optimistic_insert(provisional, async move { api::create_food(&api, draft).await })
        });
        spawn_local(async move {
            match pending.await {
                Ok(food) => notifier.success(format!("{} added", food.name)),
                Err(err) => notifier.error("Could not add food", &err),
            }
        });
    });

    view! {
        <div class="menu-panel">
            <h2>"My Menu"</h2>
            <div class="stat-strip">
                <StatCard label="Dishes" value=Signal::derive(move || stats.get().total.to_string()) />
                <StatCard label="Available" value=Signal::derive(move || stats.get().available.to_string()) />
                <StatCard
                    label="Awaiting Approval"
                    value=Signal::derive(move || stats.get().awaiting_approval.to_string())
                    tone="stat-warning"
                />
            </div>

            <div class="hub-toolbar">
                <SearchBar placeholder="Search dish or category..." value=search set_value=set_search />
                <select on:change=move |ev| {
                    set_availability.set(match event_target_value(&ev).as_str() {
                        "available" => Some(true),
                        "hidden" => Some(false),
                        _ => None,
                    });
                }>
                    <option value="">"All dishes"</option>
                    <option value="available">"Available"</option>
                    <option value="hidden">"Hidden"</option>
                </select>
            </div>

            <FoodForm on_submit=add_food busy=busy />

            <table class="hub-table">
                <thead>
                    <tr>
                        <th>"Dish"</th>
                        <th>"Category"</th>
                        <th>"Prep"</th>
                        <th>"Approval"</th>
                        <th>"Orders"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || filtered.get()
                        key=|food| (food.id, food.is_available, food.status)
                        children=move |food: Food| {
                            let toggle_target = food.clone();
                            let delete_target = food.clone();
                            view! {
                                <tr class:row-muted=!food.is_available>
                                    <td>{food.name.clone()}</td>
                                    <td>{food.category.clone().unwrap_or_default()}</td>
                                    <td>
                                        {food.preparation_time.map(|mins| format!("{mins} min")).unwrap_or_default()}
                                    </td>
                                    <td><FoodApprovalBadge status=food.status /></td>
                                    <td>{food.total_orders}</td>
                                    <td class="row-actions">
                                        <button
                                            class="toggle-btn"
                                            disabled=move || busy.get()
                                            on:click=move |_| toggle_available(toggle_target.clone())
                                        >
                                            {if food.is_available { "Hide" } else { "Show" }}
                                        </button>
                                        <DeleteConfirmButton
                                            subject=food.name.clone()
                                            disabled=busy
                                            on_confirm=Callback::new(move |_| remove_food(delete_target.clone()))
                                        />
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}

/// Inline form for a new dish
#[component]
fn FoodForm(on_submit: Callback<FoodDraft>, #[prop(into)] busy: Signal<bool>) -> impl IntoView {
    let (name, set_name) = signal(String::new());
    let (category, set_category) = signal(String::new());
    let (prep, set_prep) = signal(String::new());

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let title = name.get_untracked().trim().to_string();
        if title.is_empty() {
            return;
        }
        let category = category.get_untracked().trim().to_string();
        on_submit.run(FoodDraft {
            name: title,
            category: (!category.is_empty()).then_some(category),
            description: None,
            preparation_time: prep.get_untracked().trim().parse().ok(),
        });
        set_name.set(String::new());
        set_category.set(String::new());
        set_prep.set(String::new());
    };

    view! {
        <form class="food-form" on:submit=submit>
            <input
                type="text"
                placeholder="Dish name"
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="Category"
                prop:value=move || category.get()
                on:input=move |ev| set_category.set(event_target_value(&ev))
            />
            <input
                type="number"
                min="0"
                placeholder="Prep (min)"
                prop:value=move || prep.get()
                on:input=move |ev| set_prep.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || busy.get()>"Add Dish"</button>
        </form>
    }
}

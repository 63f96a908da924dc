//! Users Hub
//!
//! Admin user management: filterable table, activation toggle, role
//! changes and soft delete, all applied optimistically.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_optimistic::OptimisticList;

use crate::api::{self, UserPatch, UserQuery};
use crate::components::{ActiveBadge, DeleteConfirmButton, Notifier, Pager, SearchBar, StatCard};
use crate::context::use_app_context;
use crate::filters::{page_count, paginate, ActiveFilter, UserFilter};
use crate::models::{Role, User};
use crate::stats::UserStats;

#[component]
pub fn UsersHub() -> impl IntoView {
    let ctx = use_app_context();
    let notifier = Notifier::from_context();
    let users = StoredValue::new(OptimisticList::<User>::new());
    let items: ReadSignal<Vec<User>> = users.with_value(|list| list.items()).into();
    let busy = Signal::derive(move || users.with_value(|list| list.is_pending()));

    let (search, set_search) = signal(String::new());
    let (role_filter, set_role_filter) = signal(None::<Role>);
    let (status_filter, set_status_filter) = signal(None::<ActiveFilter>);
    let (page, set_page) = signal(1usize);
    let (editing, set_editing) = signal(None::<User>);
    let per_page = ctx.config().page_size as usize;

    // Load users when reload trigger changes
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        let list = users.get_value();
        let query = UserQuery {
            page: 1,
            limit: ctx.config().fetch_limit,
            ..Default::default()
        };
        spawn_local(async move {
            match api::list_users(&api, &query).await {
                Ok(loaded) => {
                    log::debug!("[USERS] Loaded {} of {} users", loaded.users.len(), loaded.pagination.total);
                    list.replace_all(loaded.users);
                }
                Err(err) => notifier.error("Could not load users", &err),
            }
        });
    });

    let filtered = Memo::new(move |_| {
        let filter = UserFilter {
            search: search.get(),
            role: role_filter.get(),
            status: status_filter.get(),
        };
        items.with(|all| all.iter().filter(|u| filter.matches(u)).cloned().collect::<Vec<_>>())
    });
    let pages = Signal::derive(move || filtered.with(|rows| page_count(rows.len(), per_page)));
    let stats = Memo::new(move |_| items.with(|all| UserStats::from_users(all)));

    // ========================
    // Mutations
    // ========================

    let toggle_active = move |user: User| {
        let api = ctx.api();
        let active = !user.is_active;
        let next = User { is_active: active, ..user.clone() };
        let target = next.clone();
        let pending = users.with_value(|list| {
            list.optimistic_update(next, user, async move {
                api::set_user_active(&api, target, active).await
            })
        });
        spawn_local(async move {
            match pending.await {
                Ok(user) => notifier.success(format!(
                    "{} {}",
                    user.email,
                    if user.is_active { "activated" } else { "deactivated" }
                )),
                Err(err) => notifier.error("Could not change account status", &err),
            }
        });
    };

    let remove_user = move |user: User| {
        let api = ctx.api();
        let id = user.id;
        let email = user.email.clone();
        let pending = users.with_value(|list| {
            list.optimistic_delete(user, async move { api::delete_user(&api, id).await })
        });
        spawn_local(async move {
            match pending.await {
                Ok(()) => notifier.success(format!("{email} removed")),
                Err(err) => notifier.error("Could not delete user", &err),
            }
        });
    };

    let change_role = Callback::new(move |(user, role): (User, Role)| {
        set_editing.set(None);
        if user.role == role {
            return;
        }
        let api = ctx.api();
        let patch = UserPatch {
            role: Some(role),
            ..Default::default()
        };
        let next = patch.apply(&user);
        let current = user.clone();
        let pending = users.with_value(|list| {
            list.optimistic_update(next, user, async move {
                api::update_user(&api, current, patch).await
            })
        });
        spawn_local(async move {
            match pending.await {
                Ok(user) => notifier.success(format!("{} is now {}", user.email, user.role.label())),
                Err(err) => notifier.error("Could not change role", &err),
            }
        });
    });

    view! {
        <section class="hub users-hub">
            <div class="stat-strip">
                <StatCard label="Users" value=Signal::derive(move || stats.get().total.to_string()) />
                <StatCard label="Active" value=Signal::derive(move || stats.get().active.to_string()) />
                <StatCard
                    label="Inactive"
                    value=Signal::derive(move || stats.get().inactive.to_string())
                    tone="stat-warning"
                />
                <StatCard label="Cooks" value=Signal::derive(move || stats.get().cooks.to_string()) />
                <StatCard
                    label="Delivery Agents"
                    value=Signal::derive(move || stats.get().delivery_agents.to_string())
                />
            </div>

            <div class="hub-toolbar">
                <SearchBar placeholder="Search name or email..." value=search set_value=set_search />
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    set_role_filter.set((!value.is_empty()).then(|| Role::parse(&value)));
                }>
                    <option value="">"All roles"</option>
                    {Role::ASSIGNABLE
                        .into_iter()
                        .map(|role| view! { <option value=role.as_str()>{role.label()}</option> })
                        .collect_view()}
                </select>
                <select on:change=move |ev| {
                    set_status_filter.set(match event_target_value(&ev).as_str() {
                        "active" => Some(ActiveFilter::Active),
                        "inactive" => Some(ActiveFilter::Inactive),
                        _ => None,
                    });
                }>
                    <option value="">"Any status"</option>
                    <option value="active">"Active"</option>
                    <option value="inactive">"Inactive"</option>
                </select>
            </div>

            <table class="hub-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Email"</th>
                        <th>"Role"</th>
                        <th>"Status"</th>
                        <th>"Orders"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || filtered.with(|rows| paginate(rows, page.get(), per_page))
                        key=|user| (user.id, user.is_active, user.role, user.name.clone())
                        children=move |user: User| {
                            let toggle_target = user.clone();
                            let role_target = user.clone();
                            let delete_target = user.clone();
                            view! {
                                <tr>
                                    <td>{user.name.clone()}</td>
                                    <td>{user.email.clone()}</td>
                                    <td>
                                        <button
                                            class="link-btn"
                                            disabled=move || busy.get()
                                            on:click=move |_| set_editing.set(Some(role_target.clone()))
                                        >
                                            {user.role.label()}
                                        </button>
                                    </td>
                                    <td><ActiveBadge active=user.is_active /></td>
                                    <td>{user.total_orders}</td>
                                    <td class="row-actions">
                                        <button
                                            class="toggle-btn"
                                            disabled=move || busy.get()
                                            on:click=move |_| toggle_active(toggle_target.clone())
                                        >
                                            {if user.is_active { "Deactivate" } else { "Activate" }}
                                        </button>
                                        <DeleteConfirmButton
                                            subject=user.email.clone()
                                            disabled=busy
                                            on_confirm=Callback::new(move |_| remove_user(delete_target.clone()))
                                        />
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Pager page=page set_page=set_page pages=pages />

            <RoleDialog editing=editing set_editing=set_editing on_save=change_role />
        </section>
    }
}

/// Modal for picking a new role
#[component]
fn RoleDialog(
    editing: ReadSignal<Option<User>>,
    set_editing: WriteSignal<Option<User>>,
    on_save: Callback<(User, Role)>,
) -> impl IntoView {
    let (choice, set_choice) = signal(Role::Customer);

    // Preselect the user's current role whenever the dialog opens
    Effect::new(move |_| {
        if let Some(user) = editing.get() {
            set_choice.set(user.role);
        }
    });

    view! {
        <Show when=move || editing.get().is_some()>
            <div class="dialog-backdrop" on:click=move |_| set_editing.set(None)>
                <div class="dialog" on:click=|ev| ev.stop_propagation()>
                    <h3>
                        {move || editing.get().map(|u| format!("Change role for {}", u.email)).unwrap_or_default()}
                    </h3>
                    <select
                        prop:value=move || choice.get().as_str()
                        on:change=move |ev| set_choice.set(Role::parse(&event_target_value(&ev)))
                    >
                        {Role::ASSIGNABLE
                            .into_iter()
                            .map(|role| view! { <option value=role.as_str()>{role.label()}</option> })
                            .collect_view()}
                    </select>
                    <div class="dialog-actions">
                        <button class="cancel-btn" on:click=move |_| set_editing.set(None)>"Cancel"</button>
                        <button
                            class="confirm-btn"
                            on:click=move |_| {
                                if let Some(user) = editing.get_untracked() {
                                    on_save.run((user, choice.get_untracked()));
                                }
                            }
                        >
                            "Save"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

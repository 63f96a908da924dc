//! Delete Confirm Button Component
//!
//! Row-level delete that asks before it fires.

use leptos::prelude::*;

/// Two-step delete for a table row.
///
/// The first click asks "Remove <subject>?"; only the confirm click runs
/// `on_confirm`. Both steps are blocked while `disabled` is true, so a row
/// cannot be removed while another write on the list is in flight.
#[component]
pub fn DeleteConfirmButton(
    /// Name shown in the question, e.g. an email or a dish
    #[prop(into)]
    subject: String,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (asking, set_asking) = signal(false);
    let question = format!("Remove {subject}?");

    view! {
        <Show
            when=move || asking.get()
            fallback=move || view! {
                <button
                    class="delete-btn"
                    title="Delete"
                    disabled=move || disabled.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(true);
                    }
                >
                    "×"
                </button>
            }
        >
            <span class="delete-confirm">
                <span class="delete-confirm-text">{question.clone()}</span>
                <button
                    class="confirm-btn"
                    disabled=move || disabled.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        if disabled.get_untracked() {
                            return;
                        }
                        set_asking.set(false);
                        on_confirm.run(());
                    }
                >
                    "Yes"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(false);
                    }
                >
                    "No"
                </button>
            </span>
        </Show>
    }
}

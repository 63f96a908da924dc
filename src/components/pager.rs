//! Pager Component
//!
//! Previous/next controls under a table.

use leptos::prelude::*;

#[component]
pub fn Pager(
    page: ReadSignal<usize>,
    set_page: WriteSignal<usize>,
    pages: Signal<usize>,
) -> impl IntoView {
    // Filters can shrink the result set under the current page
    Effect::new(move |_| {
        let last = pages.get();
        if page.get_untracked() > last {
            set_page.set(last);
        }
    });

    view! {
        <div class="pager">
            <button
                disabled=move || page.get() <= 1
                on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1).max(1))
            >
                "‹"
            </button>
            <span class="pager-label">{move || format!("{} / {}", page.get(), pages.get())}</span>
            <button
                disabled=move || page.get() >= pages.get()
                on:click=move |_| set_page.update(|p| *p += 1)
            >
                "›"
            </button>
        </div>
    }
}

//! Search Bar Component

use leptos::prelude::*;

#[component]
pub fn SearchBar(
    #[prop(into)] placeholder: String,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <input
            type="search"
            class="search-bar"
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| set_value.set(event_target_value(&ev))
        />
    }
}

//! Stat Card Component

use leptos::prelude::*;

/// One figure on a hub's statistics strip
#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    value: Signal<String>,
    /// Extra CSS class, e.g. "stat-warning"
    #[prop(optional)]
    tone: &'static str,
) -> impl IntoView {
    view! {
        <div class=format!("stat-card {tone}")>
            <span class="stat-label">{label}</span>
            <span class="stat-value">{move || value.get()}</span>
        </div>
    }
}

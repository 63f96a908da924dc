//! ChefSync Dashboard Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod filters;
mod models;
mod stats;
mod store;

use app::App;
use config::DashboardConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = DashboardConfig::default();
    wasm_logger::init(wasm_logger::Config::new(config.log_level()));
    mount_to_body(move || view! { <App config=config.clone() /> });
}

pub mod components;
pub mod panel;
pub mod utils;
pub mod view_model;

use leptos::*;

use crate::components::layout::AppShell;

#[component]
pub fn ResourcesPage() -> impl IntoView {
    view! {
        <AppShell>
            <panel::ResourcesPanel/>
        </AppShell>
    }
}

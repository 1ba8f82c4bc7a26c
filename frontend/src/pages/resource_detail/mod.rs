pub mod panel;
pub mod repository;
pub mod view_model;

use leptos::*;

use crate::components::layout::AppShell;

#[component]
pub fn ResourceDetailPage() -> impl IntoView {
    view! {
        <AppShell>
            <panel::ResourceDetailPanel/>
        </AppShell>
    }
}

pub mod panel;
pub mod repository;
pub mod utils;

use leptos::*;

use crate::components::layout::AppShell;

#[component]
pub fn UserManagementPage() -> impl IntoView {
    view! {
        <AppShell>
            <panel::UserManagementPanel/>
        </AppShell>
    }
}

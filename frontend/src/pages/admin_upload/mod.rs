pub mod panel;
pub mod repository;
pub mod utils;

use leptos::*;

use crate::components::layout::AppShell;

#[component]
pub fn UploadResourcePage() -> impl IntoView {
    view! {
        <AppShell>
            <panel::UploadResourcePanel/>
        </AppShell>
    }
}

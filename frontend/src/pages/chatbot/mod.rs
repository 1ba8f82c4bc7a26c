pub mod assistant;
pub mod panel;

use leptos::*;

use crate::components::layout::AppShell;

#[component]
pub fn ChatbotPage() -> impl IntoView {
    view! {
        <AppShell>
            <panel::ChatbotPanel/>
        </AppShell>
    }
}

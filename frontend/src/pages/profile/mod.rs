pub mod panel;

use leptos::*;

use crate::components::layout::AppShell;

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <AppShell>
            <panel::ProfilePanel/>
        </AppShell>
    }
}

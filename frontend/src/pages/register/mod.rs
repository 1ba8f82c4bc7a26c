pub mod panel;
pub mod utils;

use leptos::*;

#[component]
pub fn RegisterPage() -> impl IntoView {
    view! { <panel::RegisterPanel/> }
}

pub mod panel;
pub mod utils;

use leptos::*;

#[component]
pub fn LoginPage() -> impl IntoView {
    view! { <panel::LoginPanel/> }
}

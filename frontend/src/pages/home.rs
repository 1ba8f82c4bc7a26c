use leptos::*;

use crate::state::auth::use_auth;

/// Landing route: forward signed-in visitors to the resource listing
/// and everyone else to the login form, once the initial session check
/// resolves.
#[component]
pub fn HomePage() -> impl IntoView {
    let (auth, _) = use_auth();
    create_effect(move |_| {
        let state = auth.get();
        if state.is_loading() {
            return;
        }
        let target = if state.is_authenticated() {
            "/resources"
        } else {
            "/login"
        };
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href(target);
        }
    });
    view! { <crate::components::layout::LoadingSpinner/> }
}

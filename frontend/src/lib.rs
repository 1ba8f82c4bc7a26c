use leptos::*;
use leptos_router::*;

pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod state;
pub mod utils;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;

use pages::{
    admin_upload::UploadResourcePage, admin_users::UserManagementPage, chatbot::ChatbotPage,
    home::HomePage, login::LoginPage, profile::ProfilePage, register::RegisterPage,
    resource_detail::ResourceDetailPage, resources::ResourcesPage,
};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Starting Resource Hub frontend (wasm)");

    // Kick off runtime config load from ./config.json (non-blocking).
    // If window.__RESOURCE_HUB_ENV is present (env.js), it takes precedence.
    leptos::spawn_local(async move {
        config::init().await;
        log::info!("Runtime config initialized");
    });

    mount_to_body(App);
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(state::resources::ResourceCache::new());
    view! {
        <crate::state::auth::AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/register" view=RegisterPage/>
                    <Route path="/resources" view=ProtectedResources/>
                    <Route path="/resources/:id" view=ProtectedResourceDetail/>
                    <Route path="/chatbot" view=ProtectedChatbot/>
                    <Route path="/profile" view=ProtectedProfile/>
                    <Route path="/admin/upload" view=ProtectedUpload/>
                    <Route path="/admin/users" view=ProtectedUserManagement/>
                </Routes>
            </Router>
        </crate::state::auth::AuthProvider>
    }
}

#[component]
fn ProtectedResources() -> impl IntoView {
    view! { <crate::components::guard::RequireAuth><ResourcesPage/></crate::components::guard::RequireAuth> }
}

#[component]
fn ProtectedResourceDetail() -> impl IntoView {
    view! { <crate::components::guard::RequireAuth><ResourceDetailPage/></crate::components::guard::RequireAuth> }
}

#[component]
fn ProtectedChatbot() -> impl IntoView {
    view! { <crate::components::guard::RequireAuth><ChatbotPage/></crate::components::guard::RequireAuth> }
}

#[component]
fn ProtectedProfile() -> impl IntoView {
    view! { <crate::components::guard::RequireAuth><ProfilePage/></crate::components::guard::RequireAuth> }
}

#[component]
fn ProtectedUpload() -> impl IntoView {
    view! { <crate::components::guard::RequireAdmin><UploadResourcePage/></crate::components::guard::RequireAdmin> }
}

#[component]
fn ProtectedUserManagement() -> impl IntoView {
    view! { <crate::components::guard::RequireAdmin><UserManagementPage/></crate::components::guard::RequireAdmin> }
}

use leptos::*;

use crate::state::auth::{use_auth, use_logout_action};

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[component]
pub fn SuccessMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

/// Header plus content container for every signed-in page.
#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="container mx-auto px-4 py-6">{children()}</main>
        </div>
    }
}

#[component]
fn Header() -> impl IntoView {
    let (auth, _) = use_auth();
    let logout_action = use_logout_action();
    let is_admin = create_memo(move |_| auth.get().is_admin());
    let display_name = create_memo(move |_| {
        auth.get()
            .user()
            .map(|u| u.display_name.clone())
            .unwrap_or_default()
    });
    let avatar_url = create_memo(move |_| {
        auth.get()
            .user()
            .map(|u| u.avatar_url.clone())
            .unwrap_or_default()
    });

    let handle_logout = move |_| {
        logout_action.dispatch(());
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href("/login");
        }
    };

    view! {
        <header class="border-b bg-surface-raised">
            <div class="container mx-auto px-4 h-14 flex items-center justify-between">
                <a href="/resources" class="font-semibold text-primary">
                    "Landmark University Resource Hub"
                </a>
                <nav class="flex items-center gap-4 text-sm">
                    <a href="/resources">"Resources"</a>
                    <a href="/chatbot">"Chatbot"</a>
                    <Show when=move || is_admin.get()>
                        <a href="/admin/upload">"Upload Resource"</a>
                        <a href="/admin/users">"User Management"</a>
                    </Show>
                    <a href="/profile" class="flex items-center gap-2">
                        <img
                            src=move || avatar_url.get()
                            alt="avatar"
                            class="h-8 w-8 rounded-full"
                        />
                        <span>{move || display_name.get()}</span>
                    </a>
                    <button class="btn-secondary" on:click=handle_logout>
                        "Sign out"
                    </button>
                </nav>
            </div>
        </header>
    }
}

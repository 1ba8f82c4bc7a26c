use leptos::{ev::SubmitEvent, *};

use super::utils;
use crate::components::forms::TextField;
use crate::components::layout::ErrorMessage;
use crate::state::auth::use_login_action;

#[component]
pub fn LoginPanel() -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let login_action = use_login_action();
    let pending = login_action.pending();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(_) => {
                    set_error.set(None);
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/resources");
                    }
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        if let Err(message) = utils::validate_credentials(&email_value, &password_value) {
            set_error.set(Some(message));
            return;
        }
        set_error.set(None);
        login_action.dispatch((email_value, password_value));
    };

    view! {
        <div class="max-w-md mx-auto mt-16 border rounded-lg bg-surface-raised p-6">
            <h1 class="text-2xl font-bold mb-1">"Welcome back"</h1>
            <p class="text-sm text-muted mb-6">"Sign in to browse the resource hub."</p>
            {move || error.get().map(|message| view! { <ErrorMessage message=message/> })}
            <form on:submit=handle_submit>
                <TextField
                    label="Email"
                    value=email
                    input_type="email"
                    placeholder="you@university.edu"
                    on_input=Callback::new(move |value| set_email.set(value))
                />
                <TextField
                    label="Password"
                    value=password
                    input_type="password"
                    on_input=Callback::new(move |value| set_password.set(value))
                />
                <button class="btn-primary w-full" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
            <p class="text-sm text-muted mt-4">
                "No account yet? " <a href="/register" class="text-primary">"Register"</a>
            </p>
        </div>
    }
}

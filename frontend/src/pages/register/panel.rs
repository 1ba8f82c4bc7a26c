use leptos::{ev::SubmitEvent, *};

use super::utils;
use crate::components::forms::TextField;
use crate::components::layout::{ErrorMessage, SuccessMessage};
use crate::state::auth::use_register_action;

#[component]
pub fn RegisterPanel() -> impl IntoView {
    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (confirm, set_confirm) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (notice, set_notice) = create_signal(None::<String>);

    let register_action = use_register_action();
    let pending = register_action.pending();

    create_effect(move |_| {
        if let Some(result) = register_action.value().get() {
            match result {
                // A live session was issued: the listener already signed
                // us in, go straight to the resources page.
                Ok(true) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/resources");
                    }
                }
                Ok(false) => {
                    set_error.set(None);
                    set_notice.set(Some(
                        "Account created. Check your email to confirm your address, then sign in."
                            .to_string(),
                    ));
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
        let name_value = name.get_untracked();
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        if let Err(message) = utils::validate_registration(
            &name_value,
            &email_value,
            &password_value,
            &confirm.get_untracked(),
        ) {
            set_error.set(Some(message));
            return;
        }
        set_error.set(None);
        register_action.dispatch((email_value, password_value, name_value));
    };

    view! {
        <div class="max-w-md mx-auto mt-16 border rounded-lg bg-surface-raised p-6">
            <h1 class="text-2xl font-bold mb-1">"Create your account"</h1>
            <p class="text-sm text-muted mb-6">"Join the university resource hub."</p>
            {move || error.get().map(|message| view! { <ErrorMessage message=message/> })}
            {move || notice.get().map(|message| view! { <SuccessMessage message=message/> })}
            <form on:submit=handle_submit>
                <TextField
                    label="Full name"
                    value=name
                    placeholder="Jane Doe"
                    on_input=Callback::new(move |value| set_name.set(value))
                />
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
                <TextField
                    label="Confirm password"
                    value=confirm
                    input_type="password"
                    on_input=Callback::new(move |value| set_confirm.set(value))
                />
                <button class="btn-primary w-full" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Creating account..." } else { "Register" }}
                </button>
            </form>
            <p class="text-sm text-muted mt-4">
                "Already registered? " <a href="/login" class="text-primary">"Sign in"</a>
            </p>
        </div>
    }
}

use std::rc::Rc;

use leptos::{ev::SubmitEvent, *};

use super::repository::AdminUsersRepository;
use super::utils::validate_password_reset;
use crate::components::forms::TextField;
use crate::components::layout::{ErrorMessage, SuccessMessage};
use crate::state::auth::{handle_auth_failure, use_api_client};

#[component]
pub fn UserManagementPanel() -> impl IntoView {
    let client = use_api_client();
    let repository = AdminUsersRepository::new_with_client(Rc::new(client.clone()));

    let (email, set_email) = create_signal(String::new());
    let (new_password, set_new_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (notice, set_notice) = create_signal(None::<String>);

    let reset_action = create_action(move |(email, password): &(String, String)| {
        let repo = repository.clone();
        let email = email.clone();
        let password = password.clone();
        async move { repo.reset_password(email, password).await }
    });
    let pending = reset_action.pending();

    create_effect(move |_| {
        if let Some(result) = reset_action.value().get() {
            match result {
                Ok(message) => {
                    set_error.set(None);
                    set_notice.set(Some(message));
                    set_email.set(String::new());
                    set_new_password.set(String::new());
                }
                Err(err) => {
                    handle_auth_failure(&client, &err);
                    set_notice.set(None);
                    set_error.set(Some(err.to_string()));
                }
            }
        }
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let email_value = email.get_untracked();
        let password_value = new_password.get_untracked();
        if let Err(message) = validate_password_reset(&email_value, &password_value) {
            set_error.set(Some(message));
            return;
        }
        set_error.set(None);
        reset_action.dispatch((email_value, password_value));
    };

    view! {
        <div class="max-w-md mx-auto">
            <h1 class="text-2xl font-bold mb-1">"User Management"</h1>
            <p class="text-sm text-muted mb-6">
                "Set a new password for an existing account."
            </p>
            {move || error.get().map(|message| view! { <ErrorMessage message=message/> })}
            {move || notice.get().map(|message| view! { <SuccessMessage message=message/> })}
            <form on:submit=handle_submit>
                <TextField
                    label="User email"
                    value=email
                    input_type="email"
                    placeholder="student@university.edu"
                    on_input=Callback::new(move |value| set_email.set(value))
                />
                <TextField
                    label="New password"
                    value=new_password
                    input_type="password"
                    on_input=Callback::new(move |value| set_new_password.set(value))
                />
                <button class="btn-primary" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Updating..." } else { "Update password" }}
                </button>
            </form>
        </div>
    }
}

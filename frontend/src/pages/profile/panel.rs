use leptos::{ev::SubmitEvent, *};

use crate::api::UserMetadata;
use crate::components::forms::TextField;
use crate::components::layout::{ErrorMessage, SuccessMessage};
use crate::state::auth::{handle_auth_failure, use_api_client, use_auth};
use crate::state::profile::placeholder_avatar;

#[component]
pub fn ProfilePanel() -> impl IntoView {
    let (auth, _) = use_auth();
    let client = use_api_client();

    let (name, set_name) = create_signal(String::new());
    let (avatar_url, set_avatar_url) = create_signal(String::new());
    // Bumped after every save so the <img> bypasses the browser cache.
    let (avatar_version, set_avatar_version) = create_signal(0u32);
    let (error, set_error) = create_signal(None::<String>);
    let (notice, set_notice) = create_signal(None::<String>);

    // Seed the form from the reconciled user once it resolves.
    create_effect(move |_| {
        if let Some(user) = auth.get().user() {
            set_name.set(user.display_name.clone());
            set_avatar_url.set(user.avatar_url.clone());
        }
    });

    let action_client = client.clone();
    let update_action = create_action(move |metadata: &UserMetadata| {
        let client = action_client.clone();
        let metadata = metadata.clone();
        async move { client.invoke_profile_update(&metadata).await }
    });
    let pending = update_action.pending();

    create_effect(move |_| {
        if let Some(result) = update_action.value().get() {
            match result {
                Ok(()) => {
                    set_error.set(None);
                    set_notice.set(Some("Profile updated successfully.".to_string()));
                    set_avatar_version.update(|v| *v = v.wrapping_add(1));
                }
                Err(err) => {
                    handle_auth_failure(&client, &err);
                    set_notice.set(None);
                    set_error.set(Some(err.to_string()));
                }
            }
        }
    });

    let avatar_preview = create_memo(move |_| {
        let url = avatar_url.get();
        let url = if url.trim().is_empty() {
            placeholder_avatar(&name.get())
        } else {
            url
        };
        let separator = if url.contains('?') { '&' } else { '?' };
        format!("{}{}v={}", url, separator, avatar_version.get())
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let current = auth.get_untracked();
        let Some(user) = current.user() else {
            set_error.set(Some("You must be signed in.".to_string()));
            return;
        };
        let name_value = name.get_untracked().trim().to_string();
        let avatar_value = avatar_url.get_untracked().trim().to_string();
        let metadata = UserMetadata {
            name: (!name_value.is_empty() && name_value != user.display_name)
                .then_some(name_value),
            avatar_url: (!avatar_value.is_empty() && avatar_value != user.avatar_url)
                .then_some(avatar_value),
        };
        if metadata.name.is_none() && metadata.avatar_url.is_none() {
            set_notice.set(Some("Nothing to update.".to_string()));
            return;
        }
        set_error.set(None);
        update_action.dispatch(metadata);
    };

    view! {
        <div class="max-w-md mx-auto">
            <h1 class="text-2xl font-bold mb-6">"Your Profile"</h1>
            {move || error.get().map(|message| view! { <ErrorMessage message=message/> })}
            {move || notice.get().map(|message| view! { <SuccessMessage message=message/> })}
            <div class="flex justify-center mb-6">
                <img
                    src=move || avatar_preview.get()
                    alt="user avatar"
                    class="h-24 w-24 rounded-full border"
                />
            </div>
            <form on:submit=handle_submit>
                <TextField
                    label="Display name"
                    value=name
                    on_input=Callback::new(move |value| set_name.set(value))
                />
                <TextField
                    label="Avatar Image URL"
                    value=avatar_url
                    placeholder="https://example.com/avatar.png"
                    on_input=Callback::new(move |value| set_avatar_url.set(value))
                />
                <button class="btn-primary" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Saving..." } else { "Save changes" }}
                </button>
            </form>
        </div>
    }
}

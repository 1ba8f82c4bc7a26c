use std::rc::Rc;

use leptos::{ev::SubmitEvent, *};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::repository::{NewResource, UploadRepository, UploadedFile};
use super::utils::{parse_keywords, validate_upload};
use crate::api::ResourceType;
use crate::components::forms::{select_value, TextArea, TextField};
use crate::components::layout::{ErrorMessage, SuccessMessage};
use crate::state::auth::{use_api_client, use_auth};
use crate::state::resources::use_resource_cache;

#[component]
pub fn UploadResourcePanel() -> impl IntoView {
    let (auth, _) = use_auth();
    let client = use_api_client();
    let cache = use_resource_cache();
    let repository = UploadRepository::new_with_client(Rc::new(client), cache);

    let (name, set_name) = create_signal(String::new());
    let (resource_type, set_resource_type) = create_signal(ResourceType::LectureNotes);
    let (course, set_course) = create_signal(String::new());
    let (year, set_year) = create_signal(String::new());
    let (description, set_description) = create_signal(String::new());
    let (keywords, set_keywords) = create_signal(String::new());
    let (selected_file, set_selected_file) = create_signal(None::<web_sys::File>);
    let (error, set_error) = create_signal(None::<String>);
    let (notice, set_notice) = create_signal(None::<String>);

    let upload_action = create_action(
        move |(payload, file): &(NewResource, Option<UploadedFile>)| {
            let repo = repository.clone();
            let payload = payload.clone();
            let file = file.clone();
            async move { repo.upload(payload, file).await }
        },
    );
    let pending = upload_action.pending();

    create_effect(move |_| {
        if let Some(result) = upload_action.value().get() {
            match result {
                Ok(inserted) => {
                    set_error.set(None);
                    set_notice.set(Some(format!("Resource '{}' uploaded.", inserted.name)));
                    set_name.set(String::new());
                    set_course.set(String::new());
                    set_year.set(String::new());
                    set_description.set(String::new());
                    set_keywords.set(String::new());
                    set_selected_file.set(None);
                }
                Err(err) => {
                    set_notice.set(None);
                    set_error.set(Some(err.to_string()));
                }
            }
        }
    });

    let on_file_change = move |ev: leptos::ev::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        set_selected_file.set(file);
    };

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let Some(uploader_id) = auth.get_untracked().user().map(|u| u.id.clone()) else {
            set_error.set(Some("You must be signed in to upload.".to_string()));
            return;
        };
        let parsed_year = match validate_upload(
            &name.get_untracked(),
            &course.get_untracked(),
            &year.get_untracked(),
        ) {
            Ok(year) => year,
            Err(message) => {
                set_error.set(Some(message));
                return;
            }
        };
        set_error.set(None);

        let payload = NewResource {
            name: name.get_untracked().trim().to_string(),
            resource_type: resource_type.get_untracked(),
            course: course.get_untracked().trim().to_string(),
            year: parsed_year,
            description: description.get_untracked(),
            keywords: parse_keywords(&keywords.get_untracked()),
            uploader_id,
        };

        match selected_file.get_untracked() {
            Some(file) => spawn_local(async move {
                match read_file(&file).await {
                    Ok(uploaded) => upload_action.dispatch((payload, Some(uploaded))),
                    Err(message) => set_error.set(Some(message)),
                }
            }),
            None => upload_action.dispatch((payload, None)),
        }
    };

    let type_options: Vec<String> = ResourceType::ALL
        .iter()
        .map(|t| t.as_str().to_string())
        .collect();
    let (type_value, set_type_value) = create_signal(ResourceType::LectureNotes.as_str().to_string());

    view! {
        <div class="max-w-2xl mx-auto">
            <h1 class="text-2xl font-bold mb-1">"Upload Resource"</h1>
            <p class="text-sm text-muted mb-6">"Fill in the details and upload the resource file."</p>
            {move || error.get().map(|message| view! { <ErrorMessage message=message/> })}
            {move || notice.get().map(|message| view! { <SuccessMessage message=message/> })}
            <form on:submit=handle_submit>
                <TextField
                    label="Resource name"
                    value=name
                    on_input=Callback::new(move |value| set_name.set(value))
                />
                <label class="block mb-4">
                    <span class="block text-sm font-medium mb-1">"Type"</span>
                    <select
                        class="w-full border rounded px-3 py-2"
                        on:change=move |ev| {
                            let value = select_value(&ev);
                            if let Some(parsed) = ResourceType::parse(&value) {
                                set_resource_type.set(parsed);
                                set_type_value.set(value);
                            }
                        }
                    >
                        {type_options
                            .iter()
                            .map(|option| {
                                let option = option.clone();
                                let option_value = option.clone();
                                view! {
                                    <option
                                        value=option.clone()
                                        selected=move || type_value.get() == option_value
                                    >
                                        {option}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
                <div class="grid grid-cols-2 gap-3">
                    <TextField
                        label="Course code"
                        value=course
                        placeholder="PHY301"
                        on_input=Callback::new(move |value| set_course.set(value))
                    />
                    <TextField
                        label="Year"
                        value=year
                        placeholder="2024"
                        on_input=Callback::new(move |value| set_year.set(value))
                    />
                </div>
                <TextArea
                    label="Description"
                    value=description
                    on_input=Callback::new(move |value| set_description.set(value))
                />
                <TextField
                    label="Keywords (comma separated)"
                    value=keywords
                    placeholder="quantum, physics, notes"
                    on_input=Callback::new(move |value| set_keywords.set(value))
                />
                <label class="block mb-6">
                    <span class="block text-sm font-medium mb-1">"File"</span>
                    <input type="file" on:change=on_file_change/>
                </label>
                <button class="btn-primary" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Uploading..." } else { "Upload" }}
                </button>
            </form>
        </div>
    }
}

async fn read_file(file: &web_sys::File) -> Result<UploadedFile, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| "Failed to read the selected file.".to_string())?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime_type = if file.type_().is_empty() {
        "application/octet-stream".to_string()
    } else {
        file.type_()
    };
    Ok(UploadedFile {
        name: file.name(),
        mime_type,
        bytes,
    })
}

use leptos::*;

use super::view_model::use_resource_detail_view_model;
use crate::api::ResourceRecord;
use crate::components::layout::{ErrorMessage, LoadingSpinner, SuccessMessage};
use crate::utils::format::format_bytes;

#[component]
pub fn ResourceDetailPanel() -> impl IntoView {
    let vm = use_resource_detail_view_model();
    let message = vm.message;
    let download_action = vm.download_action;
    let delete_action = vm.delete_action;
    let downloading = download_action.pending();
    let deleting = delete_action.pending();
    let is_admin = vm.is_admin;

    view! {
        <div class="max-w-4xl mx-auto">
            <a href="/resources" class="inline-block mb-6 text-sm">"← Back to All Resources"</a>
            {move || message.get().map(|result| match result {
                Ok(text) => view! { <SuccessMessage message=text/> }.into_view(),
                Err(text) => view! { <ErrorMessage message=text/> }.into_view(),
            })}
            <Suspense fallback=move || view! { <LoadingSpinner/> }>
                {move || {
                    vm.resource.get().map(|loaded| match loaded {
                        Err(error) => view! { <ErrorMessage message=error/> }.into_view(),
                        Ok(None) => view! {
                            <div class="text-center text-muted py-12">"Resource not found."</div>
                        }
                        .into_view(),
                        Ok(Some(resource)) => {
                            let for_download = resource.clone();
                            let for_delete = resource.clone();
                            view! {
                                <ResourceDetailCard resource=resource.clone()>
                                    <Show when=move || resource.file.is_some()>
                                        <button
                                            class="btn-primary"
                                            disabled=move || downloading.get()
                                            on:click={
                                                let record = for_download.clone();
                                                move |_| download_action.dispatch(record.clone())
                                            }
                                        >
                                            {move || if downloading.get() { "Preparing..." } else { "Download" }}
                                        </button>
                                    </Show>
                                    <Show when=move || is_admin.get()>
                                        <button
                                            class="btn-danger"
                                            disabled=move || deleting.get()
                                            on:click={
                                                let record = for_delete.clone();
                                                move |_| delete_action.dispatch(record.clone())
                                            }
                                        >
                                            "Delete"
                                        </button>
                                    </Show>
                                </ResourceDetailCard>
                            }
                            .into_view()
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn ResourceDetailCard(resource: ResourceRecord, children: Children) -> impl IntoView {
    let file = resource.file.clone();
    view! {
        <div class="border rounded-lg shadow-xl bg-surface-raised p-6">
            <h1 class="text-3xl font-bold text-primary mb-1">{resource.name.clone()}</h1>
            <p class="text-sm text-muted mb-6">
                "A " {resource.resource_type.as_str()} " resource for course " {resource.course.clone()} "."
            </p>
            <h3 class="font-semibold mb-2">"Description"</h3>
            <p class="whitespace-pre-wrap mb-6">{resource.description.clone()}</p>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4 text-sm mb-6">
                <p><span class="font-semibold">"Year: "</span>{resource.year}</p>
                <p><span class="font-semibold">"Course Code: "</span>{resource.course.clone()}</p>
                <p>
                    <span class="font-semibold">"Keywords: "</span>
                    {resource.keywords.join(", ")}
                </p>
                {file.map(|file| view! {
                    <div>
                        <p><span class="font-semibold">"File: "</span>{file.name.clone()}</p>
                        <p><span class="font-semibold">"Type: "</span>{file.mime_type.clone()}</p>
                        <p>
                            <span class="font-semibold">"Size: "</span>
                            {format_bytes(Some(file.size_bytes))}
                        </p>
                    </div>
                })}
            </div>
            <div class="flex gap-3">{children()}</div>
        </div>
    }
}

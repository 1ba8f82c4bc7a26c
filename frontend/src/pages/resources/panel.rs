use leptos::*;

use super::components::{card::ResourceCard, filters::FilterControls};
use super::view_model::use_resources_view_model;
use crate::api::ResourceRecord;
use crate::components::layout::{ErrorMessage, LoadingSpinner};

#[component]
pub fn ResourcesPanel() -> impl IntoView {
    let vm = use_resources_view_model();
    let filtered = vm.filtered;
    let show_loading = vm.show_loading;
    let error = vm.cached.error;

    view! {
        <div>
            <h1 class="text-2xl font-bold mb-4">"Browse Resources"</h1>
            <FilterControls
                criteria=vm.criteria
                years=vm.years
                types=vm.types
                courses=vm.courses
            />
            {move || error.get().map(|message| view! { <ErrorMessage message=message/> })}
            <Show
                when=move || !show_loading.get()
                fallback=move || view! { <LoadingSpinner/> }
            >
                <Show
                    when=move || !filtered.get().is_empty()
                    fallback=move || {
                        view! {
                            <div class="text-center text-muted py-12">
                                <p class="font-medium">"No resources found."</p>
                                <p class="text-sm">"Try adjusting your search terms or filters."</p>
                            </div>
                        }
                    }
                >
                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                        <For
                            each=move || filtered.get()
                            key=|resource| resource.id.clone()
                            children=move |resource: ResourceRecord| {
                                view! { <ResourceCard resource=resource/> }
                            }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}

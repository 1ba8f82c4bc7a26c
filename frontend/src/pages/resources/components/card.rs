use leptos::*;

use crate::api::ResourceRecord;
use crate::utils::format::format_bytes;

#[component]
pub fn ResourceCard(resource: ResourceRecord) -> impl IntoView {
    let detail_href = format!("/resources/{}", resource.id);
    let file_line = resource
        .file
        .as_ref()
        .map(|file| format!("{} ({})", file.name, format_bytes(Some(file.size_bytes))));

    view! {
        <a href=detail_href class="block border rounded-lg p-4 bg-surface-raised hover:shadow-md">
            <div class="flex items-center justify-between mb-2">
                <h3 class="font-semibold text-primary">{resource.name.clone()}</h3>
                <span class="text-xs border rounded px-2 py-0.5">
                    {resource.resource_type.as_str()}
                </span>
            </div>
            <p class="text-sm text-muted mb-2">
                {resource.course.clone()} " · " {resource.year}
            </p>
            <p class="text-sm line-clamp-2 mb-2">{resource.description.clone()}</p>
            {file_line.map(|line| view! { <p class="text-xs text-muted">{line}</p> })}
        </a>
    }
}

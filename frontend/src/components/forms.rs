use leptos::*;
use wasm_bindgen::JsCast;

pub fn input_value(ev: &leptos::ev::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|el| el.value())
        .unwrap_or_default()
}

pub fn select_value(ev: &leptos::ev::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        .map(|el| el.value())
        .unwrap_or_default()
}

pub fn textarea_value(ev: &leptos::ev::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
        .map(|el| el.value())
        .unwrap_or_default()
}

#[component]
pub fn TextField(
    label: &'static str,
    value: ReadSignal<String>,
    on_input: Callback<String>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(default = "")] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <label class="block mb-4">
            <span class="block text-sm font-medium mb-1">{label}</span>
            <input
                class="w-full border rounded px-3 py-2"
                type=input_type
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.call(input_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn TextArea(
    label: &'static str,
    value: ReadSignal<String>,
    on_input: Callback<String>,
    #[prop(default = 4)] rows: u32,
) -> impl IntoView {
    view! {
        <label class="block mb-4">
            <span class="block text-sm font-medium mb-1">{label}</span>
            <textarea
                class="w-full border rounded px-3 py-2"
                rows=rows
                prop:value=move || value.get()
                on:input=move |ev| on_input.call(textarea_value(&ev))
            ></textarea>
        </label>
    }
}

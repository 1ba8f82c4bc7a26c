use leptos::*;

use super::super::utils::FilterCriteria;
use crate::api::ResourceType;
use crate::components::forms::{input_value, select_value};

#[component]
pub fn FilterControls(
    criteria: RwSignal<FilterCriteria>,
    years: Memo<Vec<i32>>,
    types: Memo<Vec<ResourceType>>,
    courses: Memo<Vec<String>>,
) -> impl IntoView {
    let on_term = move |ev: leptos::ev::Event| {
        criteria.update(|c| c.term = input_value(&ev));
    };
    let on_year = move |ev: leptos::ev::Event| {
        let value = select_value(&ev);
        criteria.update(|c| c.year = value.parse().ok());
    };
    let on_type = move |ev: leptos::ev::Event| {
        let value = select_value(&ev);
        criteria.update(|c| c.resource_type = ResourceType::parse(&value));
    };
    let on_course = move |ev: leptos::ev::Event| {
        let value = select_value(&ev);
        criteria.update(|c| c.course = (!value.is_empty()).then_some(value));
    };
    let clear = move |_| criteria.set(FilterCriteria::default());

    view! {
        <div class="grid grid-cols-1 md:grid-cols-5 gap-3 mb-6">
            <input
                class="border rounded px-3 py-2 md:col-span-2"
                type="search"
                placeholder="Search by name..."
                prop:value=move || criteria.get().term
                on:input=on_term
            />
            <select class="border rounded px-3 py-2" on:change=on_year>
                <option value="">"All years"</option>
                <For
                    each=move || years.get()
                    key=|year| *year
                    children=move |year: i32| {
                        view! {
                            <option
                                value=year.to_string()
                                selected=move || criteria.get().year == Some(year)
                            >
                                {year}
                            </option>
                        }
                    }
                />
            </select>
            <select class="border rounded px-3 py-2" on:change=on_type>
                <option value="">"All types"</option>
                <For
                    each=move || types.get()
                    key=|ty| ty.as_str()
                    children=move |ty: ResourceType| {
                        view! {
                            <option
                                value=ty.as_str()
                                selected=move || criteria.get().resource_type == Some(ty)
                            >
                                {ty.as_str()}
                            </option>
                        }
                    }
                />
            </select>
            <div class="flex gap-2">
                <select class="border rounded px-3 py-2 flex-1" on:change=on_course>
                    <option value="">"All courses"</option>
                    <For
                        each=move || courses.get()
                        key=|course| course.clone()
                        children=move |course: String| {
                            let course_value = course.clone();
                            view! {
                                <option
                                    value=course.clone()
                                    selected=move || criteria.get().course.as_deref() == Some(course_value.as_str())
                                >
                                    {course}
                                </option>
                            }
                        }
                    />
                </select>
                <button class="btn-secondary" on:click=clear>"Clear"</button>
            </div>
        </div>
    }
}

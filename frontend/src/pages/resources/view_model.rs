use leptos::*;

use super::utils::{apply_filters, distinct_courses, distinct_types, distinct_years, FilterCriteria};
use crate::api::{ResourceRecord, ResourceType};
use crate::state::auth::use_auth;
use crate::state::resources::{use_cached_resources, CachedResources};

#[derive(Clone)]
pub struct ResourcesViewModel {
    pub cached: CachedResources,
    pub criteria: RwSignal<FilterCriteria>,
    pub filtered: Memo<Vec<ResourceRecord>>,
    pub years: Memo<Vec<i32>>,
    pub types: Memo<Vec<ResourceType>>,
    pub courses: Memo<Vec<String>>,
    /// Loading affordance covers the initial auth resolution and the
    /// first listing fetch only.
    pub show_loading: Memo<bool>,
}

pub fn use_resources_view_model() -> ResourcesViewModel {
    let (auth, _) = use_auth();
    let cached = use_cached_resources();
    let criteria = create_rw_signal(FilterCriteria::default());

    let resources = cached.resources;
    let filtered = create_memo(move |_| apply_filters(&resources.get(), &criteria.get()));
    let years = create_memo(move |_| distinct_years(&resources.get()));
    let types = create_memo(move |_| distinct_types(&resources.get()));
    let courses = create_memo(move |_| distinct_courses(&resources.get()));

    let is_fetching = cached.is_fetching;
    let show_loading = create_memo(move |_| auth.get().is_loading() || is_fetching.get());

    ResourcesViewModel {
        cached,
        criteria,
        filtered,
        years,
        types,
        courses,
        show_loading,
    }
}

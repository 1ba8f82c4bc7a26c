use std::cell::RefCell;
use std::rc::Rc;

use leptos::*;

use crate::api::{ApiClient, ApiError, ResourceRecord};
use crate::state::auth::use_api_client;

/// Process-wide memo of the resource listing. One slot, populated by at
/// most one fetch, never invalidated by this layer itself: staleness
/// after external mutation is accepted. Callers that mutate locally go
/// through `store`; `invalidate` exists for flows that know better
/// (e.g. upload).
#[derive(Clone, Default)]
pub struct ResourceCache {
    slot: Rc<RefCell<Option<Vec<ResourceRecord>>>>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<Vec<ResourceRecord>> {
        self.slot.borrow().clone()
    }

    pub fn is_populated(&self) -> bool {
        self.slot.borrow().is_some()
    }

    pub fn store(&self, resources: Vec<ResourceRecord>) {
        *self.slot.borrow_mut() = Some(resources);
    }

    pub fn invalidate(&self) {
        *self.slot.borrow_mut() = None;
    }
}

/// Injected rather than imported so tests and future server rendering
/// can scope the slot; the app provides one instance at the root.
pub fn use_resource_cache() -> ResourceCache {
    match use_context::<ResourceCache>() {
        Some(cache) => cache,
        None => {
            let cache = ResourceCache::new();
            provide_context(cache.clone());
            cache
        }
    }
}

/// Return the snapshot, fetching it first only when the slot has never
/// been populated. A failed fetch leaves the slot empty so a later
/// mount retries. Two mounts racing before first population can both
/// fetch; that window is accepted and left unguarded.
pub async fn ensure_loaded(
    client: &ApiClient,
    cache: &ResourceCache,
) -> Result<Vec<ResourceRecord>, ApiError> {
    if let Some(snapshot) = cache.snapshot() {
        return Ok(snapshot);
    }
    let resources = client.fetch_resources().await?;
    cache.store(resources.clone());
    Ok(resources)
}

#[derive(Clone)]
pub struct CachedResources {
    pub resources: ReadSignal<Vec<ResourceRecord>>,
    pub is_fetching: ReadSignal<bool>,
    pub error: ReadSignal<Option<String>>,
    set_resources_signal: WriteSignal<Vec<ResourceRecord>>,
    cache: ResourceCache,
}

impl CachedResources {
    /// Optimistic local mutation: both the live signal and the shared
    /// slot take the new array, without a refetch.
    pub fn set_resources(&self, resources: Vec<ResourceRecord>) {
        self.cache.store(resources.clone());
        self.set_resources_signal.set(resources);
    }
}

pub fn use_cached_resources() -> CachedResources {
    let cache = use_resource_cache();
    let client = use_api_client();

    let initial = cache.snapshot();
    let needs_fetch = initial.is_none();
    let (resources, set_resources) = create_signal(initial.unwrap_or_default());
    let (is_fetching, set_is_fetching) = create_signal(needs_fetch);
    let (error, set_error) = create_signal(None::<String>);

    if needs_fetch {
        let cache_for_fetch = cache.clone();
        spawn_local(async move {
            match ensure_loaded(&client, &cache_for_fetch).await {
                Ok(fetched) => {
                    set_resources.set(fetched);
                    set_error.set(None);
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
            set_is_fetching.set(false);
        });
    }

    CachedResources {
        resources,
        is_fetching,
        error,
        set_resources_signal: set_resources,
        cache,
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use httpmock::prelude::*;

    fn record(id: &str) -> ResourceRecord {
        serde_json::from_value(serde_json::json!({
            "id": id, "name": format!("Resource {}", id), "type": "Other",
            "course": "GEN101", "year": 2024, "description": "", "keywords": []
        }))
        .expect("record")
    }

    #[test]
    fn hook_serves_a_populated_slot_synchronously_and_set_resources_writes_back() {
        crate::test_support::ssr::with_runtime(|| {
            let cache = ResourceCache::new();
            cache.store(vec![record("41"), record("42")]);
            provide_context(cache.clone());

            let cached = use_cached_resources();
            assert!(!cached.is_fetching.get_untracked());
            assert_eq!(cached.resources.get_untracked().len(), 2);

            let remaining: Vec<ResourceRecord> = cached
                .resources
                .get_untracked()
                .into_iter()
                .filter(|r| r.id != "42")
                .collect();
            cached.set_resources(remaining);

            assert!(cache
                .snapshot()
                .expect("populated")
                .iter()
                .all(|r| r.id != "42"));
            assert_eq!(cached.resources.get_untracked().len(), 1);
        });
    }

    fn listing_body() -> serde_json::Value {
        serde_json::json!([
            {
                "id": "42", "name": "Quantum Notes", "type": "Lecture Notes",
                "course": "PHY301", "year": 2023, "description": "", "keywords": []
            },
            {
                "id": "7", "name": "Calculus Textbook", "type": "Textbook",
                "course": "MTH205", "year": 2022, "description": "", "keywords": []
            }
        ])
    }

    #[tokio::test]
    async fn second_load_is_served_from_the_slot_without_network() {
        let server = MockServer::start_async().await;
        let listing = server.mock(|when, then| {
            when.method(GET).path("/rest/v1/resources");
            then.status(200).json_body(listing_body());
        });

        let client = ApiClient::new_with_base_url(server.base_url());
        let cache = ResourceCache::new();

        let first = ensure_loaded(&client, &cache).await.expect("first load");
        let second = ensure_loaded(&client, &cache).await.expect("second load");
        assert_eq!(first, second);
        assert_eq!(second.len(), 2);
        listing.assert_hits(1);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_the_slot_empty_for_retry() {
        let server = MockServer::start_async().await;
        let listing = server.mock(|when, then| {
            when.method(GET).path("/rest/v1/resources");
            then.status(500)
                .json_body(serde_json::json!({ "message": "relation unavailable" }));
        });

        let client = ApiClient::new_with_base_url(server.base_url());
        let cache = ResourceCache::new();

        let err = ensure_loaded(&client, &cache).await.expect_err("fails");
        assert!(err.to_string().contains("relation unavailable"));
        assert!(!cache.is_populated());

        // A later mount retries the fetch.
        let _ = ensure_loaded(&client, &cache).await;
        listing.assert_hits(2);
    }

    #[tokio::test]
    async fn deleting_42_drops_it_from_the_slot_without_refetch() {
        let server = MockServer::start_async().await;
        let listing = server.mock(|when, then| {
            when.method(GET).path("/rest/v1/resources");
            then.status(200).json_body(listing_body());
        });

        let client = ApiClient::new_with_base_url(server.base_url());
        let cache = ResourceCache::new();
        let loaded = ensure_loaded(&client, &cache).await.expect("load");
        assert!(loaded.iter().any(|r| r.id == "42"));

        let remaining: Vec<_> = loaded.into_iter().filter(|r| r.id != "42").collect();
        cache.store(remaining);

        let snapshot = ensure_loaded(&client, &cache).await.expect("cached");
        assert!(snapshot.iter().all(|r| r.id != "42"));
        listing.assert_hits(1);
    }
}

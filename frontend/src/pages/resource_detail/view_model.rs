use std::rc::Rc;

use leptos::*;
use leptos_router::use_params_map;

use super::repository::{DeleteOutcome, ResourceDetailRepository};
use crate::api::{ApiError, ResourceRecord};
use crate::state::auth::{handle_auth_failure, use_api_client, use_auth};
use crate::state::resources::use_resource_cache;
use crate::utils::download::trigger_url_download;

#[derive(Clone)]
pub struct ResourceDetailViewModel {
    pub resource: Resource<String, Result<Option<ResourceRecord>, String>>,
    pub is_admin: Memo<bool>,
    pub message: RwSignal<Option<Result<String, String>>>,
    pub download_action: Action<ResourceRecord, Result<(), ApiError>>,
    pub delete_action: Action<ResourceRecord, Result<DeleteOutcome, ApiError>>,
}

pub fn use_resource_detail_view_model() -> ResourceDetailViewModel {
    let params = use_params_map();
    let (auth, _) = use_auth();
    let client = use_api_client();
    let cache = use_resource_cache();
    let repository = ResourceDetailRepository::new_with_client(Rc::new(client.clone()));

    let is_admin = create_memo(move |_| auth.get().is_admin());
    let message = create_rw_signal(None::<Result<String, String>>);

    // Serve from the cache snapshot when possible; fall back to a
    // single-row fetch for deep links.
    let repo_for_fetch = repository.clone();
    let cache_for_fetch = cache.clone();
    let resource = create_resource(
        move || params.get().get("id").cloned().unwrap_or_default(),
        move |id| {
            let repo = repo_for_fetch.clone();
            let cache = cache_for_fetch.clone();
            async move {
                if let Some(snapshot) = cache.snapshot() {
                    if let Some(found) = snapshot.into_iter().find(|r| r.id == id) {
                        return Ok(Some(found));
                    }
                }
                repo.fetch(&id).await.map_err(|e| e.to_string())
            }
        },
    );

    let repo_for_download = repository.clone();
    let download_action = create_action(move |resource: &ResourceRecord| {
        let repo = repo_for_download.clone();
        let resource = resource.clone();
        async move {
            let (url, filename) = repo.download_url(&resource).await?;
            trigger_url_download(&url, &filename).map_err(ApiError::Network)?;
            Ok(())
        }
    });

    let repo_for_delete = repository.clone();
    let cache_for_delete = cache.clone();
    let delete_action = create_action(move |resource: &ResourceRecord| {
        let repo = repo_for_delete.clone();
        let cache = cache_for_delete.clone();
        let resource = resource.clone();
        async move {
            let outcome = repo.delete(&resource).await?;
            // Optimistic cache update, no refetch.
            if let Some(snapshot) = cache.snapshot() {
                cache.store(snapshot.into_iter().filter(|r| r.id != resource.id).collect());
            }
            Ok(outcome)
        }
    });

    let client_for_download = client.clone();
    create_effect(move |_| {
        if let Some(result) = download_action.value().get() {
            match result {
                Ok(()) => message.set(None),
                Err(err) => {
                    handle_auth_failure(&client_for_download, &err);
                    message.set(Some(Err(format!("Download failed: {}", err))));
                }
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            match result {
                Ok(outcome) => {
                    match outcome.storage_warning {
                        Some(warning) => message.set(Some(Err(warning))),
                        None => message.set(Some(Ok("Resource deleted.".to_string()))),
                    }
                    if let Some(win) = web_sys::window() {
                        let _ = win.location().set_href("/resources");
                    }
                }
                Err(err) => {
                    handle_auth_failure(&client, &err);
                    message.set(Some(Err(format!("Delete failed: {}", err))));
                }
            }
        }
    });

    ResourceDetailViewModel {
        resource,
        is_admin,
        message,
        download_action,
        delete_action,
    }
}

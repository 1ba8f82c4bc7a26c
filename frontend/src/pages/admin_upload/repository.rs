use std::rc::Rc;

use uuid::Uuid;

use crate::api::{ApiClient, ApiError, FileMetadata, ResourceRecord, ResourceType};
use crate::state::resources::ResourceCache;

/// Form payload before the record id and file URL exist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResource {
    pub name: String,
    pub resource_type: ResourceType,
    pub course: String,
    pub year: i32,
    pub description: String,
    pub keywords: Vec<String>,
    pub uploader_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct UploadRepository {
    client: Rc<ApiClient>,
    cache: ResourceCache,
}

impl UploadRepository {
    pub fn new_with_client(client: Rc<ApiClient>, cache: ResourceCache) -> Self {
        Self { client, cache }
    }

    /// Store the file (when present) under the canonical layout, then
    /// insert the record. The cache is invalidated so the next listing
    /// mount sees the new resource.
    pub async fn upload(
        &self,
        payload: NewResource,
        file: Option<UploadedFile>,
    ) -> Result<ResourceRecord, ApiError> {
        let resource_id = Uuid::new_v4().to_string();

        let file_metadata = match file {
            Some(file) => {
                let object_path = format!("public/{}/{}", resource_id, file.name);
                let size_bytes = file.bytes.len() as u64;
                let url = self
                    .client
                    .upload_file(&object_path, file.bytes, &file.mime_type)
                    .await?;
                Some(FileMetadata {
                    url,
                    name: file.name,
                    mime_type: file.mime_type,
                    size_bytes,
                })
            }
            None => None,
        };

        let record = ResourceRecord {
            id: resource_id,
            name: payload.name,
            resource_type: payload.resource_type,
            course: payload.course,
            year: payload.year,
            description: payload.description,
            keywords: payload.keywords,
            file: file_metadata,
            uploader_id: Some(payload.uploader_id),
            created_at: None,
            updated_at: None,
        };

        let inserted = self.client.insert_resource(&record).await?;
        self.cache.invalidate();
        Ok(inserted)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::types::{Session, SessionUser};
    use httpmock::prelude::*;

    fn repo(server: &MockServer) -> (UploadRepository, ResourceCache) {
        let client = ApiClient::new_with_base_url(server.base_url());
        client.set_session(Session {
            access_token: "at".into(),
            refresh_token: "rt".into(),
            expires_at: None,
            user: SessionUser {
                id: "admin-1".into(),
                email: None,
                user_metadata: Default::default(),
            },
        });
        let cache = ResourceCache::new();
        (
            UploadRepository::new_with_client(Rc::new(client), cache.clone()),
            cache,
        )
    }

    fn payload() -> NewResource {
        NewResource {
            name: "Quantum Notes".into(),
            resource_type: ResourceType::LectureNotes,
            course: "PHY301".into(),
            year: 2023,
            description: "Fundamentals".into(),
            keywords: vec!["quantum".into()],
            uploader_id: "admin-1".into(),
        }
    }

    #[tokio::test]
    async fn upload_stores_file_then_inserts_record_and_invalidates_cache() {
        let server = MockServer::start_async().await;
        let storage = server.mock(|when, then| {
            when.method(POST)
                .path_contains("/storage/v1/object/resource-files/public/");
            then.status(200).json_body(serde_json::json!({ "Key": "ok" }));
        });
        let insert = server.mock(|when, then| {
            when.method(POST)
                .path("/rest/v1/resources")
                .json_body_partial(r#"{ "name": "Quantum Notes", "file_name": "notes.pdf" }"#);
            then.status(201).json_body(serde_json::json!({
                "id": "11111111-1111-1111-1111-111111111111",
                "name": "Quantum Notes", "type": "Lecture Notes",
                "course": "PHY301", "year": 2023, "description": "Fundamentals",
                "keywords": ["quantum"],
                "file_url": "u", "file_name": "notes.pdf",
                "file_mime_type": "application/pdf", "file_size_bytes": 3
            }));
        });

        let (repo, cache) = repo(&server);
        cache.store(vec![]);
        let inserted = repo
            .upload(
                payload(),
                Some(UploadedFile {
                    name: "notes.pdf".into(),
                    mime_type: "application/pdf".into(),
                    bytes: vec![1, 2, 3],
                }),
            )
            .await
            .expect("upload");

        assert_eq!(inserted.file.expect("file").name, "notes.pdf");
        assert!(!cache.is_populated());
        storage.assert();
        insert.assert();
    }

    #[tokio::test]
    async fn upload_without_file_inserts_record_only() {
        let server = MockServer::start_async().await;
        let storage = server.mock(|when, then| {
            when.method(POST).path_contains("/storage/v1/object/");
            then.status(200);
        });
        server.mock(|when, then| {
            when.method(POST).path("/rest/v1/resources");
            then.status(201).json_body(serde_json::json!({
                "id": "22222222-2222-2222-2222-222222222222",
                "name": "Quantum Notes", "type": "Lecture Notes",
                "course": "PHY301", "year": 2023, "description": "Fundamentals",
                "keywords": ["quantum"]
            }));
        });

        let (repo, _cache) = repo(&server);
        let inserted = repo.upload(payload(), None).await.expect("upload");
        assert!(inserted.file.is_none());
        storage.assert_hits(0);
    }
}

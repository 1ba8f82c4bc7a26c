use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::api::{
    client::ApiClient,
    error::{ApiError, DataError, StorageError},
    types::{ProfileRow, ResourceRecord},
};

/// Bucket holding uploaded resource files; layout is
/// `public/<resourceId>/<fileName>`.
pub const FILE_STORAGE_BUCKET: &str = "resource-files";

/// PostgREST single-object mode so a missing row fails with a
/// recognizable code instead of an empty array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

impl ApiClient {
    /// Full resource listing, newest first. This is the one query the
    /// cache memoizes.
    pub async fn fetch_resources(&self) -> Result<Vec<ResourceRecord>, ApiError> {
        let base_url = self.provider_url().await;
        let response = self
            .http()
            .get(format!("{}/rest/v1/resources", base_url))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .header("apikey", self.anon_key().await)
            .bearer_auth(self.request_token().await)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(data_error_from_response(response).await.into());
        }
        response
            .json::<Vec<ResourceRecord>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn fetch_resource(&self, id: &str) -> Result<Option<ResourceRecord>, ApiError> {
        let base_url = self.provider_url().await;
        let response = self
            .http()
            .get(format!("{}/rest/v1/resources", base_url))
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", id))])
            .header("apikey", self.anon_key().await)
            .header(ACCEPT, SINGLE_OBJECT)
            .bearer_auth(self.request_token().await)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error = data_error_from_response(response).await;
            if error.is_row_not_found() {
                return Ok(None);
            }
            return Err(error.into());
        }
        response
            .json::<ResourceRecord>()
            .await
            .map(Some)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Best-effort profile lookup used by the session reconciler. A
    /// missing row is an empty profile, not an error.
    pub async fn fetch_profile(&self, user_id: &str) -> Result<Option<ProfileRow>, ApiError> {
        let base_url = self.provider_url().await;
        let response = self
            .http()
            .get(format!("{}/rest/v1/profiles", base_url))
            .query(&[
                ("select", "id,name,full_name,avatar_url,is_admin".to_string()),
                ("id", format!("eq.{}", user_id)),
            ])
            .header("apikey", self.anon_key().await)
            .header(ACCEPT, SINGLE_OBJECT)
            .bearer_auth(self.request_token().await)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error = data_error_from_response(response).await;
            if error.is_row_not_found() {
                return Ok(None);
            }
            return Err(error.into());
        }
        response
            .json::<ProfileRow>()
            .await
            .map(Some)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn insert_resource(
        &self,
        record: &ResourceRecord,
    ) -> Result<ResourceRecord, ApiError> {
        let base_url = self.provider_url().await;
        let response = self
            .http()
            .post(format!("{}/rest/v1/resources", base_url))
            .header("apikey", self.anon_key().await)
            .header(ACCEPT, SINGLE_OBJECT)
            .header("Prefer", "return=representation")
            .bearer_auth(self.request_token().await)
            .json(record)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(data_error_from_response(response).await.into());
        }
        response
            .json::<ResourceRecord>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn delete_resource(&self, id: &str) -> Result<(), ApiError> {
        let base_url = self.provider_url().await;
        let response = self
            .http()
            .delete(format!("{}/rest/v1/resources", base_url))
            .query(&[("id", &format!("eq.{}", id))])
            .header("apikey", self.anon_key().await)
            .bearer_auth(self.request_token().await)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(data_error_from_response(response).await.into());
        }
        Ok(())
    }

    /// Upload into the canonical layout and hand back the public URL
    /// stored on the resource row.
    pub async fn upload_file(
        &self,
        object_path: &str,
        bytes: Vec<u8>,
        mime_type: &str,
    ) -> Result<String, ApiError> {
        let base_url = self.provider_url().await;
        let response = self
            .http()
            .post(format!(
                "{}/storage/v1/object/{}/{}",
                base_url, FILE_STORAGE_BUCKET, object_path
            ))
            .header("apikey", self.anon_key().await)
            .header("Content-Type", mime_type.to_string())
            .bearer_auth(self.request_token().await)
            .body(bytes)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(storage_error_from_response(response).await.into());
        }
        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            base_url, FILE_STORAGE_BUCKET, object_path
        ))
    }

    pub async fn remove_file(&self, object_path: &str) -> Result<(), StorageError> {
        let base_url = self.provider_url().await;
        let response = self
            .http()
            .delete(format!(
                "{}/storage/v1/object/{}/{}",
                base_url, FILE_STORAGE_BUCKET, object_path
            ))
            .header("apikey", self.anon_key().await)
            .bearer_auth(self.request_token().await)
            .send()
            .await
            .map_err(|e| StorageError {
                message: format!("Request failed: {}", e),
                status: None,
            })?;

        if !response.status().is_success() {
            return Err(storage_error_from_response(response).await);
        }
        Ok(())
    }
}

async fn data_error_from_response(response: reqwest::Response) -> DataError {
    let status = response.status();
    let fallback = format!("Data request failed ({})", status);
    match response.json::<Value>().await {
        Ok(body) => DataError {
            message: body
                .get("message")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
                .unwrap_or(fallback),
            code: body
                .get("code")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
            details: body
                .get("details")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
            hint: body
                .get("hint")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
        },
        Err(_) => DataError {
            message: fallback,
            code: None,
            details: None,
            hint: None,
        },
    }
}

async fn storage_error_from_response(response: reqwest::Response) -> StorageError {
    let status = response.status().as_u16();
    let fallback = format!("Storage request failed ({})", status);
    let message = match response.json::<Value>().await {
        Ok(body) => body
            .get("message")
            .or_else(|| body.get("error"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or(fallback),
        Err(_) => fallback,
    };
    StorageError {
        message,
        status: Some(status),
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn fetch_resources_orders_by_creation_time_descending() {
        let server = MockServer::start_async().await;
        let listing = server.mock(|when, then| {
            when.method(GET)
                .path("/rest/v1/resources")
                .query_param("order", "created_at.desc");
            then.status(200).json_body(serde_json::json!([
                {
                    "id": "2", "name": "Newest", "type": "Textbook",
                    "course": "MTH205", "year": 2024, "description": "",
                    "keywords": []
                },
                {
                    "id": "1", "name": "Oldest", "type": "Lecture Notes",
                    "course": "PHY301", "year": 2023, "description": "",
                    "keywords": []
                }
            ]));
        });

        let client = ApiClient::new_with_base_url(server.base_url());
        let resources = client.fetch_resources().await.expect("fetch");
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].id, "2");
        listing.assert();
    }

    #[tokio::test]
    async fn fetch_profile_treats_missing_row_as_empty() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/rest/v1/profiles");
            then.status(406).json_body(serde_json::json!({
                "message": "JSON object requested, multiple (or no) rows returned",
                "code": "PGRST116"
            }));
        });

        let client = ApiClient::new_with_base_url(server.base_url());
        let profile = client.fetch_profile("u-404").await.expect("lookup");
        assert!(profile.is_none());
    }

    #[tokio::test]
    async fn fetch_profile_propagates_other_data_errors() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/rest/v1/profiles");
            then.status(403).json_body(serde_json::json!({
                "message": "permission denied for table profiles",
                "code": "42501",
                "hint": "check row-level security policies"
            }));
        });

        let client = ApiClient::new_with_base_url(server.base_url());
        let err = client.fetch_profile("u-1").await.expect_err("should fail");
        let text = err.to_string();
        assert!(text.contains("permission denied"));
        assert!(text.contains("42501"));
    }

    #[tokio::test]
    async fn remove_file_distinguishes_not_found() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(DELETE)
                .path("/storage/v1/object/resource-files/public/42/gone.pdf");
            then.status(404)
                .json_body(serde_json::json!({ "message": "Object not found" }));
        });

        let client = ApiClient::new_with_base_url(server.base_url());
        let err = client
            .remove_file("public/42/gone.pdf")
            .await
            .expect_err("missing object");
        assert!(err.is_not_found());
    }
}

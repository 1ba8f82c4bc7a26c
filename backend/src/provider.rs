use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use url::form_urlencoded;

use crate::{
    config::Config,
    error::AppError,
    models::{Profile, ProviderUser, UserMetadata},
};

/// Thin HTTP client over the managed provider's auth, data and storage
/// APIs. All privileged calls carry the service-role key; caller
/// introspection uses the caller's own bearer token.
#[derive(Clone)]
pub struct ProviderClient {
    client: Client,
    base_url: String,
    service_role_key: String,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct AdminUserPage {
    #[serde(default)]
    users: Vec<ProviderUser>,
}

#[derive(Debug, Deserialize)]
struct SignedUrlResponse {
    #[serde(rename = "signedURL")]
    signed_url: String,
}

impl ProviderClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.provider_url.clone(),
            service_role_key: config.service_role_key.clone(),
            anon_key: config.anon_key.clone(),
        }
    }

    pub fn new_with_base_url(
        base_url: impl Into<String>,
        service_role_key: impl Into<String>,
        anon_key: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_role_key: service_role_key.into(),
            anon_key: anon_key.into(),
        }
    }

    /// Resolve the user behind a caller-supplied access token.
    pub async fn get_user(&self, bearer_token: &str) -> Result<ProviderUser, AppError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer_token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::Unauthorized(
                "Not authenticated or invalid token.".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(AppError::Upstream(error_body(response).await));
        }
        response.json::<ProviderUser>().await.map_err(Into::into)
    }

    /// Single-row profile lookup by user id. Missing row is `None`, not
    /// an error.
    pub async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        let response = self
            .client
            .get(format!("{}/rest/v1/profiles", self.base_url))
            .query(&[
                ("id", format!("eq.{}", user_id)),
                ("select", "id,name,avatar_url,is_admin".to_string()),
                ("limit", "1".to_string()),
            ])
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(error_body(response).await));
        }
        let rows: Vec<Profile> = response.json().await?;
        Ok(rows.into_iter().next())
    }

    /// One page of the provider's admin user listing.
    pub async fn list_users(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ProviderUser>, AppError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/admin/users", self.base_url))
            .query(&[("page", page.to_string()), ("per_page", per_page.to_string())])
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(error_body(response).await));
        }
        let page: AdminUserPage = response.json().await?;
        Ok(page.users)
    }

    pub async fn update_user_password(
        &self,
        user_id: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        self.admin_update_user(user_id, json!({ "password": new_password }))
            .await
            .map(|_| ())
    }

    pub async fn update_user_metadata(
        &self,
        user_id: &str,
        metadata: &UserMetadata,
    ) -> Result<ProviderUser, AppError> {
        self.admin_update_user(user_id, json!({ "user_metadata": metadata }))
            .await
    }

    async fn admin_update_user(
        &self,
        user_id: &str,
        payload: Value,
    ) -> Result<ProviderUser, AppError> {
        let response = self
            .client
            .put(format!("{}/auth/v1/admin/users/{}", self.base_url, user_id))
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(error_body(response).await));
        }
        response.json::<ProviderUser>().await.map_err(Into::into)
    }

    /// Merge name/avatar into the caller's profile row so the data-store
    /// copy stays in sync with the provider metadata.
    pub async fn upsert_profile(
        &self,
        user_id: &str,
        metadata: &UserMetadata,
    ) -> Result<(), AppError> {
        let mut row = json!({ "id": user_id });
        if let Some(name) = &metadata.name {
            row["name"] = json!(name);
        }
        if let Some(avatar_url) = &metadata.avatar_url {
            row["avatar_url"] = json!(avatar_url);
        }

        let response = self
            .client
            .post(format!("{}/rest/v1/profiles", self.base_url))
            .query(&[("on_conflict", "id")])
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&row)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(error_body(response).await));
        }
        Ok(())
    }

    /// Ask object storage for a time-limited download URL that forces
    /// attachment disposition under `download_name`.
    pub async fn create_signed_url(
        &self,
        bucket: &str,
        file_path: &str,
        expires_in_secs: u64,
        download_name: &str,
    ) -> Result<String, AppError> {
        let response = self
            .client
            .post(format!(
                "{}/storage/v1/object/sign/{}/{}",
                self.base_url, bucket, file_path
            ))
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .json(&json!({ "expiresIn": expires_in_secs }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(error_body(response).await));
        }
        let signed: SignedUrlResponse = response.json().await?;
        Ok(absolute_signed_url(
            &self.base_url,
            &signed.signed_url,
            download_name,
        ))
    }
}

/// The storage API returns a path relative to `/storage/v1`; expand it
/// and append the attachment-disposition parameter.
fn absolute_signed_url(base_url: &str, signed_path: &str, download_name: &str) -> String {
    let path = signed_path.trim_start_matches('/');
    let separator = if signed_path.contains('?') { '&' } else { '?' };
    let encoded: String = form_urlencoded::byte_serialize(download_name.as_bytes()).collect();
    format!(
        "{}/storage/v1/{}{}download={}",
        base_url, path, separator, encoded
    )
}

async fn error_body(response: reqwest::Response) -> String {
    let status = response.status();
    let fallback = format!("Provider returned {}", status);
    match response.json::<Value>().await {
        Ok(body) => body
            .get("msg")
            .or_else(|| body.get("message"))
            .or_else(|| body.get("error"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or(fallback),
        Err(_) => fallback,
    }
}

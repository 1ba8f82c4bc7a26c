use serde_json::{json, Value};

use crate::api::{
    client::ApiClient,
    error::{ApiError, AuthError, StorageError},
    types::UserMetadata,
};

impl ApiClient {
    /// Ask the generateUrl function for a 60-second download link that
    /// forces attachment disposition.
    pub async fn invoke_generate_url(&self, file_path: &str) -> Result<String, ApiError> {
        let body = self
            .invoke_function("generateUrl", json!({ "filePath": file_path }))
            .await
            .map_err(|err| match err {
                FunctionFailure::Rejected { message, status } => {
                    ApiError::Storage(StorageError {
                        message,
                        status: Some(status),
                    })
                }
                FunctionFailure::Transport(e) => e,
            })?;
        body.get("signedUrl")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| ApiError::Decode("Signed URL not found in response.".to_string()))
    }

    /// Admin-only password reset by email. The 6-character minimum is
    /// enforced server-side before any lookup; callers mirror it for
    /// faster feedback.
    pub async fn invoke_password_update(
        &self,
        user_email_to_update: &str,
        new_password: &str,
    ) -> Result<String, ApiError> {
        let body = self
            .invoke_function(
                "passwordUpdate",
                json!({
                    "userEmailToUpdate": user_email_to_update,
                    "newPassword": new_password
                }),
            )
            .await
            .map_err(|err| match err {
                FunctionFailure::Rejected { message, status } => {
                    ApiError::Auth(AuthError::new(message, Some(status)))
                }
                FunctionFailure::Transport(e) => e,
            })?;
        Ok(body
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("Password updated.")
            .to_string())
    }

    /// Write display name and/or avatar through the profileUpdate
    /// function, then fold the change back into the held session.
    pub async fn invoke_profile_update(
        &self,
        metadata: &UserMetadata,
    ) -> Result<(), ApiError> {
        let payload = json!({
            "name": metadata.name,
            "avatarUrl": metadata.avatar_url,
        });
        self.invoke_function("profileUpdate", payload)
            .await
            .map_err(|err| match err {
                FunctionFailure::Rejected { message, status } => {
                    ApiError::Auth(AuthError::new(message, Some(status)))
                }
                FunctionFailure::Transport(e) => e,
            })?;
        self.apply_user_metadata(metadata);
        Ok(())
    }

    async fn invoke_function(
        &self,
        name: &str,
        payload: Value,
    ) -> Result<Value, FunctionFailure> {
        let token = self.access_token().ok_or_else(|| {
            FunctionFailure::Transport(ApiError::Auth(AuthError::new(
                "Could not retrieve current session. Please re-login.",
                None,
            )))
        })?;
        let base_url = self.functions_url().await;
        let response = self
            .http()
            .post(format!("{}/functions/v1/{}", base_url, name))
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| FunctionFailure::Transport(ApiError::Network(e.to_string())))?;

        let status = response.status().as_u16();
        let body: Value = response
            .json()
            .await
            .map_err(|e| FunctionFailure::Transport(ApiError::Decode(e.to_string())))?;

        if let Some(error) = body.get("error").and_then(|v| v.as_str()) {
            return Err(FunctionFailure::Rejected {
                message: error.to_string(),
                status,
            });
        }
        if !(200..300).contains(&status) {
            return Err(FunctionFailure::Rejected {
                message: format!("Function {} failed ({})", name, status),
                status,
            });
        }
        Ok(body)
    }
}

enum FunctionFailure {
    Rejected { message: String, status: u16 },
    Transport(ApiError),
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::types::{Session, SessionUser};
    use httpmock::prelude::*;

    fn authed_client(server: &MockServer) -> ApiClient {
        let client = ApiClient::new_with_base_url(server.base_url());
        client.set_session(Session {
            access_token: "caller-token".into(),
            refresh_token: "rt".into(),
            expires_at: None,
            user: SessionUser {
                id: "u1".into(),
                email: Some("jane@x.edu".into()),
                user_metadata: Default::default(),
            },
        });
        client
    }

    #[tokio::test]
    async fn generate_url_returns_signed_url() {
        let server = MockServer::start_async().await;
        let function = server.mock(|when, then| {
            when.method(POST)
                .path("/functions/v1/generateUrl")
                .header("authorization", "Bearer caller-token")
                .json_body(serde_json::json!({ "filePath": "public/42/report.pdf" }));
            then.status(200).json_body(serde_json::json!({
                "signedUrl": "https://p.co/storage/v1/object/sign/x?token=t&download=report.pdf"
            }));
        });

        let client = authed_client(&server);
        let url = client
            .invoke_generate_url("public/42/report.pdf")
            .await
            .expect("signed url");
        assert!(url.contains("download=report.pdf"));
        function.assert();
    }

    #[tokio::test]
    async fn generate_url_without_session_asks_for_relogin() {
        let server = MockServer::start_async().await;
        let client = ApiClient::new_with_base_url(server.base_url());
        let err = client
            .invoke_generate_url("public/42/report.pdf")
            .await
            .expect_err("no session");
        assert!(err.to_string().contains("re-login"));
    }

    #[tokio::test]
    async fn function_error_body_is_surfaced() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/functions/v1/passwordUpdate");
            then.status(403)
                .json_body(serde_json::json!({ "error": "Forbidden: Caller is not an administrator." }));
        });

        let client = authed_client(&server);
        let err = client
            .invoke_password_update("jane@x.edu", "secret-pass")
            .await
            .expect_err("forbidden");
        assert_eq!(err.to_string(), "Forbidden: Caller is not an administrator.");
    }

    #[tokio::test]
    async fn profile_update_folds_metadata_into_session() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/functions/v1/profileUpdate");
            then.status(200)
                .json_body(serde_json::json!({ "message": "Profile updated successfully." }));
        });

        let client = authed_client(&server);
        let mut seen_update = false;
        client
            .invoke_profile_update(&UserMetadata {
                name: Some("Jane Doe".into()),
                avatar_url: None,
            })
            .await
            .expect("update");
        if let Some(session) = client.session_snapshot() {
            seen_update = session.user.user_metadata.name.as_deref() == Some("Jane Doe");
        }
        assert!(seen_update);
    }
}

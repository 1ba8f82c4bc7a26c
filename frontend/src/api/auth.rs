use serde_json::{json, Value};

use crate::api::{
    client::ApiClient,
    error::{ApiError, AuthError},
    types::{AuthEvent, Session, UserMetadata},
};

impl ApiClient {
    /// Password-grant sign-in. The resulting state change reaches the
    /// application through the auth listener, not the return value.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        let base_url = self.provider_url().await;
        let anon_key = self.anon_key().await;
        let response = self
            .http()
            .post(format!("{}/auth/v1/token?grant_type=password", base_url))
            .header("apikey", anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let session = parse_session_response(response).await?;
        self.set_session(session.clone());
        self.emit(AuthEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    /// Sign-up with seed metadata. Depending on provider settings the
    /// response may or may not carry a live session (email confirmation
    /// pending); only a live one is persisted and announced.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &UserMetadata,
    ) -> Result<Option<Session>, ApiError> {
        let base_url = self.provider_url().await;
        let anon_key = self.anon_key().await;
        let response = self
            .http()
            .post(format!("{}/auth/v1/signup", base_url))
            .header("apikey", anon_key)
            .json(&json!({ "email": email, "password": password, "data": metadata }))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(auth_error_from_response(response).await.into());
        }
        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        match serde_json::from_value::<Session>(body) {
            Ok(session) => {
                self.set_session(session.clone());
                self.emit(AuthEvent::SignedIn, Some(session.clone()));
                Ok(Some(session))
            }
            // User-only payload: account created, confirmation pending.
            Err(_) => Ok(None),
        }
    }

    /// Best-effort server-side revocation followed by an unconditional
    /// local sign-out.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        let token = self.access_token();
        if let Some(token) = token {
            let base_url = self.provider_url().await;
            let anon_key = self.anon_key().await;
            let _ = self
                .http()
                .post(format!("{}/auth/v1/logout", base_url))
                .header("apikey", anon_key)
                .bearer_auth(token)
                .send()
                .await;
        }
        self.sign_out_local();
        Ok(())
    }

    /// Drop the session without provider traffic. Used directly when a
    /// token is known to be unrecoverable.
    pub fn sign_out_local(&self) {
        self.clear_session();
        self.emit(AuthEvent::SignedOut, None);
    }

    /// The one blocking call of app startup: return the current session,
    /// refreshing it through the provider when expired.
    pub async fn current_session(&self) -> Result<Option<Session>, ApiError> {
        let Some(session) = self.session_snapshot() else {
            return Ok(None);
        };
        if !session.is_expired(chrono::Utc::now().timestamp()) {
            return Ok(Some(session));
        }
        self.refresh_session(&session.refresh_token).await.map(Some)
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session, ApiError> {
        let base_url = self.provider_url().await;
        let anon_key = self.anon_key().await;
        let response = self
            .http()
            .post(format!(
                "{}/auth/v1/token?grant_type=refresh_token",
                base_url
            ))
            .header("apikey", anon_key)
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let session = parse_session_response(response).await?;
        self.set_session(session.clone());
        self.emit(AuthEvent::TokenRefreshed, Some(session.clone()));
        Ok(session)
    }

    /// Mirror freshly written metadata into the held session and notify
    /// listeners. The write itself goes through the profileUpdate
    /// function (see the functions surface).
    pub(crate) fn apply_user_metadata(&self, metadata: &UserMetadata) {
        let Some(mut session) = self.session_snapshot() else {
            return;
        };
        if metadata.name.is_some() {
            session.user.user_metadata.name = metadata.name.clone();
        }
        if metadata.avatar_url.is_some() {
            session.user.user_metadata.avatar_url = metadata.avatar_url.clone();
        }
        self.set_session(session.clone());
        self.emit(AuthEvent::UserUpdated, Some(session));
    }
}

async fn parse_session_response(response: reqwest::Response) -> Result<Session, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(auth_error_from_response(response).await.into());
    }
    response
        .json::<Session>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub(crate) async fn auth_error_from_response(response: reqwest::Response) -> AuthError {
    let status = response.status().as_u16();
    let fallback = format!("Authentication request failed ({})", status);
    match response.json::<Value>().await {
        Ok(body) => {
            let message = body
                .get("error_description")
                .or_else(|| body.get("msg"))
                .or_else(|| body.get("message"))
                .or_else(|| body.get("error"))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
                .unwrap_or(fallback);
            AuthError {
                message,
                status: Some(status),
                code: body
                    .get("error_code")
                    .or_else(|| body.get("code"))
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string()),
            }
        }
        Err(_) => AuthError::new(fallback, Some(status)),
    }
}

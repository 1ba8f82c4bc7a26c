use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::AppError, models::Caller, provider::ProviderClient, AppState};

// Safety limit for the paginated lookup: 100 pages of 1000 users.
const MAX_PAGES_TO_FETCH: u32 = 100;
const USERS_PER_PAGE: u32 = 1000;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PasswordUpdateRequest {
    #[serde(rename = "userEmailToUpdate")]
    #[validate(email(message = "must be a valid email address"))]
    pub user_email_to_update: String,
    #[serde(rename = "newPassword")]
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PasswordUpdateResponse {
    pub message: String,
}

/// Admin-only password reset by email. Input is validated before any
/// provider traffic; the target account is located by walking the
/// provider's paginated user listing.
pub async fn password_update(
    State((provider, _config)): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(payload): Json<PasswordUpdateRequest>,
) -> Result<Json<PasswordUpdateResponse>, AppError> {
    payload.validate()?;

    ensure_admin(&provider, &caller).await?;

    let target = find_user_by_email(&provider, &payload.user_email_to_update)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "User with email '{}' not found.",
                payload.user_email_to_update
            ))
        })?;

    provider
        .update_user_password(&target, &payload.new_password)
        .await?;

    tracing::info!(user_id = %target, "Password updated by administrator");
    Ok(Json(PasswordUpdateResponse {
        message: format!(
            "Password for user {} (ID: {}) updated successfully.",
            payload.user_email_to_update, target
        ),
    }))
}

async fn ensure_admin(provider: &ProviderClient, caller: &Caller) -> Result<(), AppError> {
    let profile = provider.fetch_profile(&caller.user.id).await?;
    if !profile.map(|p| p.is_admin).unwrap_or(false) {
        return Err(AppError::Forbidden(
            "Forbidden: Caller is not an administrator.".to_string(),
        ));
    }
    Ok(())
}

async fn find_user_by_email(
    provider: &ProviderClient,
    email: &str,
) -> Result<Option<String>, AppError> {
    let mut page = 1;
    while page <= MAX_PAGES_TO_FETCH {
        let users = provider.list_users(page, USERS_PER_PAGE).await?;
        if let Some(user) = users
            .iter()
            .find(|u| u.email.as_deref() == Some(email))
        {
            return Ok(Some(user.id.clone()));
        }
        // Short page means the listing is exhausted.
        if (users.len() as u32) < USERS_PER_PAGE {
            return Ok(None);
        }
        page += 1;
    }
    tracing::warn!(
        email,
        max_pages = MAX_PAGES_TO_FETCH,
        "User lookup hit the pagination safety limit"
    );
    Ok(None)
}

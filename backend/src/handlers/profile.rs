use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::{Caller, ProviderUser, UserMetadata},
    AppState,
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProfileUpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "avatarUrl", default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileUpdateResponse {
    pub message: String,
    pub user: ProviderUser,
}

/// Update the caller's display name and/or avatar. Both the provider
/// metadata and the profile row are written so the two read paths stay
/// consistent.
pub async fn profile_update(
    State((provider, _config)): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(payload): Json<ProfileUpdateRequest>,
) -> Result<Json<ProfileUpdateResponse>, AppError> {
    let metadata = UserMetadata {
        name: normalize(payload.name),
        avatar_url: normalize(payload.avatar_url),
    };
    if metadata.name.is_none() && metadata.avatar_url.is_none() {
        return Err(AppError::BadRequest(
            "No update data provided. Please provide a name or avatarUrl.".to_string(),
        ));
    }

    let updated_user = provider
        .update_user_metadata(&caller.user.id, &metadata)
        .await?;
    provider.upsert_profile(&caller.user.id, &metadata).await?;

    Ok(Json(ProfileUpdateResponse {
        message: "Profile updated successfully.".to_string(),
        user: updated_user,
    }))
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn blank_fields_count_as_absent() {
        assert_eq!(normalize(Some("  ".to_string())), None);
        assert_eq!(normalize(Some(String::new())), None);
        assert_eq!(normalize(None), None);
        assert_eq!(normalize(Some("Jane".to_string())), Some("Jane".to_string()));
    }
}

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppError, AppState};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GenerateUrlRequest {
    #[serde(rename = "filePath")]
    pub file_path: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenerateUrlResponse {
    #[serde(rename = "signedUrl")]
    pub signed_url: String,
}

/// Issue a short-lived download URL for a stored resource file. The URL
/// forces attachment disposition named after the file itself.
pub async fn generate_url(
    State((provider, config)): State<AppState>,
    Json(payload): Json<GenerateUrlRequest>,
) -> Result<Json<GenerateUrlResponse>, AppError> {
    let file_path = payload.file_path.trim();
    if file_path.is_empty() {
        return Err(AppError::BadRequest(
            "Missing or invalid filePath parameter.".to_string(),
        ));
    }

    let file_name = extract_file_name(file_path).ok_or_else(|| {
        AppError::BadRequest("Could not extract filename from filePath.".to_string())
    })?;

    let signed_url = provider
        .create_signed_url(
            &config.storage_bucket,
            file_path,
            config.signed_url_expires_secs,
            file_name,
        )
        .await?;

    Ok(Json(GenerateUrlResponse { signed_url }))
}

/// `public/<resourceId>/<fileName>` -> `<fileName>`
fn extract_file_name(file_path: &str) -> Option<&str> {
    file_path.rsplit('/').next().filter(|name| !name.is_empty())
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity-provider view of a user account, as returned by the
/// provider's `/auth/v1/user` and `/auth/v1/admin/users` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProviderUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Row in the `profiles` table keyed by the provider user id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// Authenticated caller resolved by the auth middleware, attached to
/// request extensions.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user: ProviderUser,
    pub token: String,
}

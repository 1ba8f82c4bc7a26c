#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    handlers::{
        password::{PasswordUpdateRequest, PasswordUpdateResponse},
        profile::{ProfileUpdateRequest, ProfileUpdateResponse},
        signed_url::{GenerateUrlRequest, GenerateUrlResponse},
    },
    models::{Profile, ProviderUser, UserMetadata},
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(generate_url_doc, password_update_doc, profile_update_doc),
    components(schemas(
        GenerateUrlRequest,
        GenerateUrlResponse,
        PasswordUpdateRequest,
        PasswordUpdateResponse,
        ProfileUpdateRequest,
        ProfileUpdateResponse,
        ProviderUser,
        UserMetadata,
        Profile
    )),
    modifiers(&SecuritySchemes),
    tags(
        (name = "Functions", description = "Privileged admin functions proxied to the managed provider")
    ),
    security(("BearerAuth" = []))
)]
pub struct ApiDoc;

struct SecuritySchemes;

impl Modify for SecuritySchemes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();

        let mut bearer = Http::new(HttpAuthScheme::Bearer);
        bearer.bearer_format = Some("JWT".to_string());

        components.add_security_scheme("BearerAuth", SecurityScheme::Http(bearer));
    }
}

#[utoipa::path(
    post,
    path = "/functions/v1/generateUrl",
    request_body = GenerateUrlRequest,
    responses(
        (status = 200, description = "Signed download URL, 60 second expiry", body = GenerateUrlResponse),
        (status = 400, description = "Missing or invalid filePath"),
        (status = 401, description = "Not authenticated")
    ),
    tag = "Functions"
)]
fn generate_url_doc() {}

#[utoipa::path(
    post,
    path = "/functions/v1/passwordUpdate",
    request_body = PasswordUpdateRequest,
    responses(
        (status = 200, description = "Password updated", body = PasswordUpdateResponse),
        (status = 400, description = "Password shorter than 6 characters or invalid email"),
        (status = 403, description = "Caller is not an administrator"),
        (status = 404, description = "No account with the given email")
    ),
    tag = "Functions"
)]
fn password_update_doc() {}

#[utoipa::path(
    post,
    path = "/functions/v1/profileUpdate",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Provider metadata and profile row updated", body = ProfileUpdateResponse),
        (status = 400, description = "Neither name nor avatarUrl provided"),
        (status = 401, description = "Not authenticated")
    ),
    tag = "Functions"
)]
fn profile_update_doc() {}

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use httpmock::MockServer;
use serde_json::Value;
use tower::ServiceExt;

use resource_hub_backend::{build_router, config::Config, provider::ProviderClient};

pub const CALLER_TOKEN: &str = "caller-access-token";

pub fn test_config(provider_url: &str) -> Config {
    Config {
        provider_url: provider_url.trim_end_matches('/').to_string(),
        service_role_key: "service-role-key".to_string(),
        anon_key: "anon-key".to_string(),
        storage_bucket: "resource-files".to_string(),
        signed_url_expires_secs: 60,
        port: 0,
    }
}

pub fn test_app(server: &MockServer) -> Router {
    let config = test_config(&server.base_url());
    let provider = ProviderClient::new_with_base_url(
        server.base_url(),
        config.service_role_key.clone(),
        config.anon_key.clone(),
    );
    build_router((provider, config))
}

/// Stub the caller-introspection endpoint the auth middleware hits.
pub fn mock_caller<'a>(server: &'a MockServer, user_id: &str, email: &str) -> httpmock::Mock<'a> {
    server.mock(|when, then| {
        when.method(httpmock::Method::GET)
            .path("/auth/v1/user")
            .header("authorization", format!("Bearer {}", CALLER_TOKEN));
        then.status(200).json_body(serde_json::json!({
            "id": user_id,
            "email": email,
            "user_metadata": {}
        }));
    })
}

/// Stub the profile row consulted for the admin gate.
pub fn mock_profile<'a>(server: &'a MockServer, user_id: &str, is_admin: bool) -> httpmock::Mock<'a> {
    server.mock(|when, then| {
        when.method(httpmock::Method::GET)
            .path("/rest/v1/profiles")
            .query_param("id", format!("eq.{}", user_id));
        then.status(200).json_body(serde_json::json!([{
            "id": user_id,
            "is_admin": is_admin
        }]));
    })
}

pub async fn post_json(app: Router, path: &str, body: Value, bearer: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("build request");
    app.oneshot(request).await.expect("route request")
}

pub async fn response_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

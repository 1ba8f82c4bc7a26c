use axum::http::StatusCode;
use httpmock::{Method::POST, Method::PUT, MockServer};
use serde_json::json;

mod support;
use support::{mock_caller, post_json, response_json, test_app, CALLER_TOKEN};

#[tokio::test]
async fn profile_update_writes_metadata_and_profile_row() {
    let server = MockServer::start_async().await;
    mock_caller(&server, "u-9", "jane@x.edu");
    let metadata_mock = server.mock(|when, then| {
        when.method(PUT).path("/auth/v1/admin/users/u-9").json_body(json!({
            "user_metadata": { "name": "Jane Doe", "avatar_url": "https://cdn.x.edu/a.png" }
        }));
        then.status(200).json_body(json!({
            "id": "u-9",
            "email": "jane@x.edu",
            "user_metadata": { "name": "Jane Doe", "avatar_url": "https://cdn.x.edu/a.png" }
        }));
    });
    let profile_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/rest/v1/profiles")
            .query_param("on_conflict", "id")
            .json_body(json!({
                "id": "u-9",
                "name": "Jane Doe",
                "avatar_url": "https://cdn.x.edu/a.png"
            }));
        then.status(201);
    });

    let response = post_json(
        test_app(&server),
        "/functions/v1/profileUpdate",
        json!({ "name": "Jane Doe", "avatarUrl": "https://cdn.x.edu/a.png" }),
        Some(CALLER_TOKEN),
    )
    .await;

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Profile updated successfully.");
    assert_eq!(body["user"]["user_metadata"]["name"], "Jane Doe");
    metadata_mock.assert();
    profile_mock.assert();
}

#[tokio::test]
async fn profile_update_accepts_name_only() {
    let server = MockServer::start_async().await;
    mock_caller(&server, "u-9", "jane@x.edu");
    server.mock(|when, then| {
        when.method(PUT).path("/auth/v1/admin/users/u-9").json_body(json!({
            "user_metadata": { "name": "Jane" }
        }));
        then.status(200).json_body(json!({
            "id": "u-9",
            "email": "jane@x.edu",
            "user_metadata": { "name": "Jane" }
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/rest/v1/profiles");
        then.status(201);
    });

    let response = post_json(
        test_app(&server),
        "/functions/v1/profileUpdate",
        json!({ "name": "Jane" }),
        Some(CALLER_TOKEN),
    )
    .await;

    let (status, _body) = response_json(response).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn profile_update_requires_some_field() {
    let server = MockServer::start_async().await;
    mock_caller(&server, "u-9", "jane@x.edu");

    let response = post_json(
        test_app(&server),
        "/functions/v1/profileUpdate",
        json!({}),
        Some(CALLER_TOKEN),
    )
    .await;

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn profile_update_requires_authentication() {
    let server = MockServer::start_async().await;

    let response = post_json(
        test_app(&server),
        "/functions/v1/profileUpdate",
        json!({ "name": "Jane" }),
        None,
    )
    .await;

    let (status, _body) = response_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

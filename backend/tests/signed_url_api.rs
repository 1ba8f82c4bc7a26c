use axum::http::StatusCode;
use httpmock::{Method::POST, MockServer};
use serde_json::json;

mod support;
use support::{mock_caller, post_json, response_json, test_app, CALLER_TOKEN};

#[tokio::test]
async fn generate_url_returns_signed_url_with_download_disposition() {
    let server = MockServer::start_async().await;
    mock_caller(&server, "u1", "student@x.edu");
    let sign_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/storage/v1/object/sign/resource-files/public/42/report.pdf")
            .json_body(json!({ "expiresIn": 60 }));
        then.status(200).json_body(json!({
            "signedURL": "/object/sign/resource-files/public/42/report.pdf?token=abc"
        }));
    });

    let response = post_json(
        test_app(&server),
        "/functions/v1/generateUrl",
        json!({ "filePath": "public/42/report.pdf" }),
        Some(CALLER_TOKEN),
    )
    .await;

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    let signed_url = body["signedUrl"].as_str().expect("signedUrl");
    assert!(signed_url.contains("token=abc"));
    assert!(signed_url.ends_with("download=report.pdf"));
    sign_mock.assert();
}

#[tokio::test]
async fn generate_url_rejects_missing_file_path() {
    let server = MockServer::start_async().await;
    mock_caller(&server, "u1", "student@x.edu");

    let response = post_json(
        test_app(&server),
        "/functions/v1/generateUrl",
        json!({ "filePath": "  " }),
        Some(CALLER_TOKEN),
    )
    .await;

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn generate_url_rejects_path_without_filename() {
    let server = MockServer::start_async().await;
    mock_caller(&server, "u1", "student@x.edu");

    let response = post_json(
        test_app(&server),
        "/functions/v1/generateUrl",
        json!({ "filePath": "public/42/" }),
        Some(CALLER_TOKEN),
    )
    .await;

    let (status, _body) = response_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generate_url_requires_authentication() {
    let server = MockServer::start_async().await;

    let response = post_json(
        test_app(&server),
        "/functions/v1/generateUrl",
        json!({ "filePath": "public/42/report.pdf" }),
        None,
    )
    .await;

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

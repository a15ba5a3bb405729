//! Pipeline behavior over a real HTTP connection.

use aicourse_client::api::resources::{ResourcesApi, ResourceUpload};
use aicourse_client::error::ApiError;
use aicourse_client::http::ApiRequest;
use aicourse_client::session::UserRole;
use bytes::Bytes;
use mockito::Matcher;

use crate::support::{client_for, sample_user};

#[tokio::test]
async fn bearer_token_travels_on_the_wire() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/courses")
        .match_header("authorization", "Bearer tok-123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let client = client_for(&server.url());
    client
        .session
        .set_authenticated("tok-123".to_string(), sample_user(UserRole::Student))
        .unwrap();

    client.pipeline.get("/courses").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn requests_without_a_session_carry_no_auth_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/courses")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = client_for(&server.url());
    client.pipeline.get("/courses").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn a_401_signs_out_and_redirects_to_login() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/courses")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"token expired"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    client
        .session
        .set_authenticated("tok-123".to_string(), sample_user(UserRole::Student))
        .unwrap();

    let result = client.pipeline.get("/courses").await;

    assert!(matches!(result, Err(ApiError::Authentication { .. })));
    assert!(!client.session.is_logged_in());
    assert!(client.storage.snapshot().is_none());
    assert_eq!(client.navigator.pushes(), vec!["/login"]);
    assert_eq!(
        client.notifier.errors(),
        vec!["Session expired, please log in again"]
    );
    assert_eq!(client.progress.counts(), (1, 1));
}

#[tokio::test]
async fn business_envelope_rejects_an_http_200() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/ai/usage")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":500,"message":"quota exhausted"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let result = client.pipeline.get("/ai/usage").await;

    assert_eq!(
        result.unwrap_err(),
        ApiError::Business {
            code: 500,
            message: "quota exhausted".to_string()
        }
    );
    assert_eq!(client.notifier.errors(), vec!["quota exhausted"]);
}

#[tokio::test]
async fn binary_download_returns_raw_bytes() {
    let payload: &[u8] = &[0x50, 0x4b, 0x03, 0x04, 0x00, 0x07];
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/resources/download/9")
        .with_status(200)
        .with_header("content-type", "application/octet-stream")
        .with_body(payload)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let bytes = client
        .pipeline
        .download(ApiRequest::get("/resources/download/9"))
        .await
        .unwrap();

    assert_eq!(bytes.as_ref(), payload);
}

#[tokio::test]
async fn multipart_upload_reaches_the_server() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/resources/upload")
        .match_header(
            "content-type",
            Matcher::Regex("multipart/form-data.*".to_string()),
        )
        .match_body(Matcher::Regex("lecture slides".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":31}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let resources = ResourcesApi::new(client.pipeline.clone());

    let created = resources
        .upload(ResourceUpload {
            file_name: "week1.pdf".to_string(),
            mime: "application/pdf".to_string(),
            data: Bytes::from_static(b"lecture slides"),
            course_id: 42,
            description: Some("Week 1".to_string()),
            visible_to_all: Some(true),
        })
        .await
        .unwrap();

    assert_eq!(created["id"], 31);
    mock.assert_async().await;
}

//! Session lifecycle over a real HTTP connection.

use aicourse_client::api::auth::Credentials;
use aicourse_client::error::ApiError;
use aicourse_client::session::UserRole;

use crate::support::{client_for, sample_user};

fn credentials() -> Credentials {
    Credentials {
        username: "azhang".to_string(),
        password: "secret".to_string(),
    }
}

#[tokio::test]
async fn login_round_trip_persists_the_pair() {
    let mut server = mockito::Server::new_async().await;
    let user = sample_user(UserRole::Teacher);
    let body = serde_json::json!({ "token": "tok-http", "user": user }).to_string();
    let mock = server
        .mock("POST", "/auth/login")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"username":"azhang"}"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let signed_in = client.store.login(&credentials()).await.unwrap();

    assert_eq!(signed_in.role, UserRole::Teacher);
    assert!(client.session.is_logged_in());
    assert_eq!(client.session.token(), "tok-http");
    assert_eq!(client.session.default_route(), "/teacher/dashboard");

    let persisted = client.storage.snapshot().unwrap();
    assert_eq!(persisted.token, "tok-http");
    mock.assert_async().await;
}

#[tokio::test]
async fn login_without_token_is_an_authentication_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"wrong password"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let result = client.store.login(&credentials()).await;

    assert!(matches!(result, Err(ApiError::Authentication { .. })));
    assert!(!client.session.is_logged_in());
    assert!(client.storage.snapshot().is_none());
}

#[tokio::test]
async fn logout_clears_locally_even_when_the_backend_rejects() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/auth/logout")
        .with_status(500)
        .with_body(r#"{"message":"session service down"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    client
        .session
        .set_authenticated("tok-http".to_string(), sample_user(UserRole::Student))
        .unwrap();

    client.store.logout().await;

    assert!(!client.session.is_logged_in());
    assert!(client.storage.snapshot().is_none());
}

#[tokio::test]
async fn profile_refresh_failure_signs_out_fully() {
    let mut server = mockito::Server::new_async().await;
    let _me = server
        .mock("GET", "/auth/me")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"token expired"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    client
        .session
        .set_authenticated("tok-http".to_string(), sample_user(UserRole::Student))
        .unwrap();

    let result = client.store.get_current_user().await;

    assert!(matches!(result, Err(ApiError::Authentication { .. })));
    assert!(!client.session.is_logged_in());
    assert!(client.storage.snapshot().is_none());
    assert_eq!(client.navigator.pushes(), vec!["/login"]);
}

//! Integration tests for the HTTP user client using a wiremock server

use serde_json::json;
use userdir_manager::error::ServerFieldError;
use userdir_manager::{ApiError, HttpUserClient, UserApi, UserId, UserPayload};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

fn client_for(server: &MockServer) -> HttpUserClient {
    HttpUserClient::new(&format!("{}/api", server.uri()))
}

fn ann_payload() -> UserPayload {
    UserPayload {
        name: "Ann".to_string(),
        email: "ann@x.io".to_string(),
        age: 30,
        profession: "Dev".to_string(),
    }
}

#[tokio::test]
async fn test_list_users_unwraps_data_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "_id": "64f1c0",
                    "name": "Ann",
                    "email": "ann@x.io",
                    "age": 30,
                    "profession": "Dev",
                    "createdAt": "2024-01-01T10:00:00Z",
                    "updatedAt": "2024-01-02T10:00:00Z"
                },
                { "id": 2, "name": "Bob", "email": "bob@y.io", "age": 41, "profession": "Chef" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let users = client_for(&mock_server).list_users().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id, UserId::new("64f1c0"));
    assert!(users[0].created_at.is_some());
    assert_eq!(users[1].id, UserId::new("2"));
    assert_eq!(users[1].created_at, None);
}

#[tokio::test]
async fn test_list_users_accepts_bare_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let users = client_for(&mock_server).list_users().await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_get_user_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "_id": "7", "name": "Cy", "email": "cy@z.io", "age": 52, "profession": "Pilot" }
        })))
        .mount(&mock_server)
        .await;

    let user = client_for(&mock_server)
        .get_user(&UserId::new("7"))
        .await
        .unwrap();
    assert_eq!(user.name, "Cy");
    assert_eq!(user.age, 52);
}

#[tokio::test]
async fn test_create_user_posts_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(body_json(json!({
            "name": "Ann",
            "email": "ann@x.io",
            "age": 30,
            "profession": "Dev"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "_id": "new1", "name": "Ann", "email": "ann@x.io", "age": 30, "profession": "Dev" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let created = client_for(&mock_server)
        .create_user(&ann_payload())
        .await
        .unwrap();

    assert_eq!(created.id, UserId::new("new1"));
    assert_eq!(created.email, "ann@x.io");
}

#[tokio::test]
async fn test_update_user_puts_to_id_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/users/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "abc", "name": "Ann", "email": "ann@x.io", "age": 30, "profession": "Dev"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let updated = client_for(&mock_server)
        .update_user(&UserId::new("abc"), &ann_payload())
        .await
        .unwrap();
    assert_eq!(updated.id, UserId::new("abc"));
}

#[tokio::test]
async fn test_delete_user_accepts_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    client_for(&mock_server)
        .delete_user(&UserId::new("1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_bad_request_with_errors_is_validation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "Validation failed",
            "errors": ["Email already exists", { "field": "age", "message": "Age must be between 1 and 150" }]
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .create_user(&ann_payload())
        .await
        .unwrap_err();

    match err {
        ApiError::Validation { message, errors } => {
            assert_eq!(message.as_deref(), Some("Validation failed"));
            assert_eq!(
                errors,
                vec![
                    ServerFieldError::Text("Email already exists".to_string()),
                    ServerFieldError::Structured {
                        field: "age".to_string(),
                        message: "Age must be between 1 and 150".to_string(),
                    },
                ]
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_bad_request_without_errors_is_request_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Email already exists"
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .create_user(&ann_payload())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Request { .. }));
    assert_eq!(err.user_message(), Some("Email already exists"));
}

#[tokio::test]
async fn test_missing_user_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "User not found"
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .get_user(&UserId::new("ghost"))
        .await
        .unwrap_err();

    match err {
        ApiError::NotFound { message } => assert_eq!(message.as_deref(), Some("User not found")),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_without_body_is_request_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .delete_user(&UserId::new("1"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Request { .. }));
    assert_eq!(err.user_message(), None);
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_malformed_success_body_is_request_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).list_users().await.unwrap_err();
    assert!(matches!(err, ApiError::Request { .. }));
    assert!(err.to_string().contains("malformed"));
}

#[tokio::test]
async fn test_unreachable_server_is_request_failure() {
    // Port 9 (discard) is almost never served locally.
    let client = HttpUserClient::new("http://127.0.0.1:9/api");
    let err = client.list_users().await.unwrap_err();
    assert!(matches!(err, ApiError::Request { .. }));
}

#[tokio::test]
async fn test_null_error_list_keeps_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Email already exists",
            "errors": null
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .update_user(&UserId::new("1"), &ann_payload())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Request { .. }));
    assert_eq!(err.user_message(), Some("Email already exists"));
}

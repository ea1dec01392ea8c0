mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{closed_port_url, note_json, Canned, FakeBackend};
use notes_core::api::dto::NoteDto;
use notes_core::api::Method;
use notes_core::{ApiClient, ApiError};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn bearer_header_follows_token_accessor() {
    let backend = FakeBackend::spawn(|_| Canned::json(StatusCode::OK, json!([]))).await;

    let _: Vec<NoteDto> = backend
        .client(Some("abc123"))
        .request::<_, ()>("/notes/", Method::GET, &[], None)
        .await
        .unwrap();
    assert_eq!(
        backend.last_request().authorization.as_deref(),
        Some("Bearer abc123")
    );

    let _: Vec<NoteDto> = backend
        .client(None)
        .request::<_, ()>("/notes/", Method::GET, &[], None)
        .await
        .unwrap();
    assert_eq!(backend.last_request().authorization, None);
}

#[tokio::test]
async fn token_is_read_at_request_time() {
    let backend = FakeBackend::spawn(|_| Canned::json(StatusCode::OK, json!([]))).await;
    let token = Arc::new(std::sync::Mutex::new(None::<String>));
    let accessor = token.clone();
    let client = ApiClient::new(
        &backend.base_url,
        Arc::new(move || accessor.lock().unwrap().clone()),
    )
    .unwrap();

    client.request_void::<()>("/notes/", Method::GET, None).await.unwrap();
    *token.lock().unwrap() = Some("late".to_string());
    client.request_void::<()>("/notes/", Method::GET, None).await.unwrap();

    let requests = backend.requests();
    assert_eq!(requests[0].authorization, None);
    assert_eq!(requests[1].authorization.as_deref(), Some("Bearer late"));
}

#[tokio::test]
async fn json_headers_and_body_are_set() {
    let backend = FakeBackend::spawn(|_| Canned::json(StatusCode::OK, json!({}))).await;
    let client = backend.client(None);

    client
        .request_void("/auth/signup", Method::POST, Some(&json!({ "email": "a@b.c" })))
        .await
        .unwrap();
    let with_body = backend.last_request();
    assert_eq!(with_body.method, Method::POST);
    assert_eq!(with_body.accept.as_deref(), Some("application/json"));
    assert_eq!(with_body.content_type.as_deref(), Some("application/json"));
    assert_eq!(with_body.json_body(), json!({ "email": "a@b.c" }));

    client
        .request_void::<()>("/notes/1/", Method::DELETE, None)
        .await
        .unwrap();
    let without_body = backend.last_request();
    assert_eq!(without_body.accept.as_deref(), Some("application/json"));
    assert_eq!(without_body.content_type, None);
    assert!(without_body.body.is_empty());
}

#[tokio::test]
async fn query_pairs_are_forwarded() {
    let backend = FakeBackend::spawn(|_| Canned::bytes(b"%PDF".to_vec())).await;
    backend
        .client(None)
        .request_raw_bytes("/notes/1/export/pdf", Method::GET, &[("inline", "1")])
        .await
        .unwrap();
    let recorded = backend.last_request();
    assert_eq!(recorded.path, "/notes/1/export/pdf");
    assert_eq!(recorded.query.as_deref(), Some("inline=1"));
}

#[tokio::test]
async fn unauthorized_wins_over_decodable_body() {
    let backend =
        FakeBackend::spawn(|_| Canned::json(StatusCode::UNAUTHORIZED, note_json(1, "t", "c")))
            .await;
    let result = backend
        .client(Some("expired"))
        .request::<NoteDto, ()>("/notes/1/", Method::GET, &[], None)
        .await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn undecodable_success_body_is_a_decoding_error() {
    let backend =
        FakeBackend::spawn(|_| Canned::json(StatusCode::OK, json!({ "unexpected": true }))).await;
    let result = backend
        .client(None)
        .request::<NoteDto, ()>("/notes/1/", Method::GET, &[], None)
        .await;
    assert!(matches!(result, Err(ApiError::Decoding(_))));
}

#[tokio::test]
async fn unsupported_date_is_a_decoding_error_naming_the_value() {
    let backend = FakeBackend::spawn(|_| {
        Canned::json(
            StatusCode::OK,
            json!({
                "id": 1,
                "title": "t",
                "content": "c",
                "created_at": "May 1st",
                "updated_at": "2024-05-01T10:20:30Z",
            }),
        )
    })
    .await;
    let result = backend
        .client(None)
        .request::<NoteDto, ()>("/notes/1/", Method::GET, &[], None)
        .await;
    match result {
        Err(ApiError::Decoding(error)) => {
            assert!(error.to_string().contains("Unsupported date: May 1st"));
        }
        other => panic!("expected decoding error, got {other:?}"),
    }
}

#[tokio::test]
async fn other_statuses_carry_code_and_body() {
    let backend =
        FakeBackend::spawn(|_| Canned::text(StatusCode::UNPROCESSABLE_ENTITY, "title missing"))
            .await;
    let result = backend
        .client(None)
        .request_void::<()>("/notes/", Method::POST, None)
        .await;
    match result {
        Err(ApiError::BadStatus { status, body }) => {
            assert_eq!(status, 422);
            assert_eq!(body.as_deref(), Some("title missing"));
        }
        other => panic!("expected bad status, got {other:?}"),
    }
}

#[tokio::test]
async fn raw_bytes_are_returned_unparsed() {
    let pdf = b"%PDF-1.7\n\xff\xfe binary".to_vec();
    let expected = pdf.clone();
    let backend = FakeBackend::spawn(move |_| Canned::bytes(pdf.clone())).await;
    let bytes = backend
        .client(None)
        .request_raw_bytes("/notes/1/export/pdf", Method::GET, &[])
        .await
        .unwrap();
    assert_eq!(bytes, expected);
}

#[tokio::test]
async fn connection_failure_is_a_transport_error() {
    let client = ApiClient::new(closed_port_url().await, Arc::new(|| None)).unwrap();
    let result = client.request_void::<()>("/notes/", Method::GET, None).await;
    assert!(matches!(result, Err(ApiError::Transport(_))));
}

#[tokio::test]
async fn malformed_url_fails_before_sending() {
    let client = ApiClient::new("http://127.0.0.1:99999", Arc::new(|| None)).unwrap();
    let result = client.request_raw_bytes("/notes/", Method::GET, &[]).await;
    assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
}

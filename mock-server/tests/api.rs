use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{MockMisskey, Note};
use tower::ServiceExt;

const TOKEN: &str = "test-token";

fn mock() -> MockMisskey {
    MockMisskey::new(TOKEN)
        .with_note("n1", "2024-03-01T12:00:00.000Z", Some("hello world"))
        .with_note("n2", "2024-03-01T12:00:01.000Z", Some("spam link"))
        .with_note("n3", "2024-03-01T12:00:02.000Z", None)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn timeline_request(token: Option<&str>) -> Request<String> {
    let mut builder = Request::builder().method("POST").uri("/api/notes/global-timeline");
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, token);
    }
    builder.body(String::new()).unwrap()
}

fn delete_request(token: &str, note_id: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/api/notes/delete")
        .header(http::header::AUTHORIZATION, token)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(serde_json::json!({ "noteId": note_id }).to_string())
        .unwrap()
}

// --- global timeline ---

#[tokio::test]
async fn timeline_returns_seeded_notes_in_order() {
    let resp = mock().app().oneshot(timeline_request(Some(TOKEN))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let notes: Vec<Note> = serde_json::from_value(body["messages"].clone()).unwrap();
    let ids: Vec<_> = notes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["n1", "n2", "n3"]);
    assert!(notes[2].text.is_none());
}

#[tokio::test]
async fn timeline_without_token_is_401() {
    let resp = mock().app().oneshot(timeline_request(None)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], "AUTHENTICATION_FAILED");
}

#[tokio::test]
async fn timeline_rejects_get() {
    let resp = mock()
        .app()
        .oneshot(
            Request::builder()
                .uri("/api/notes/global-timeline")
                .header(http::header::AUTHORIZATION, TOKEN)
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- delete ---

#[tokio::test]
async fn delete_existing_note_returns_200_and_removes_it() {
    let mock = mock();
    let resp = mock.app().oneshot(delete_request(TOKEN, "n2")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(mock.delete_attempts(), ["n2"]);
    let ids: Vec<_> = mock.notes().into_iter().map(|n| n.id).collect();
    assert_eq!(ids, ["n1", "n3"]);
}

#[tokio::test]
async fn delete_missing_note_returns_404() {
    let mock = mock();
    let resp = mock.app().oneshot(delete_request(TOKEN, "nope")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["error"]["code"], "NO_SUCH_NOTE");
    assert_eq!(mock.delete_attempts(), ["nope"]);
}

#[tokio::test]
async fn delete_with_wrong_token_is_401_and_keeps_note() {
    let mock = mock();
    let resp = mock.app().oneshot(delete_request("wrong", "n1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(mock.notes().len(), 3);
    assert_eq!(mock.delete_attempts(), ["n1"]);
}

#[tokio::test]
async fn forced_status_overrides_delete() {
    let mock = mock().with_delete_status("n1", 500);
    let resp = mock.app().oneshot(delete_request(TOKEN, "n1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(mock.notes().len(), 3);
}

#[tokio::test]
async fn delete_malformed_body_is_rejected() {
    let resp = mock()
        .app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/notes/delete")
                .header(http::header::AUTHORIZATION, TOKEN)
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(r#"{"id":"n1"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- timeline reflects deletes ---

#[tokio::test]
async fn timeline_after_delete() {
    use tower::Service;

    let mock = mock();
    let mut app = mock.app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(delete_request(TOKEN, "n1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(timeline_request(Some(TOKEN)))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["messages"].as_array().unwrap().len(), 2);
    assert_eq!(body["messages"][0]["id"], "n2");
}

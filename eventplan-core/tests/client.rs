use eventplan_core::query::{FilterSet, SessionQuery};
use eventplan_core::{EventPlanError, HttpSessionClient, Session, SessionApi};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SESSIONS: &str = "/api/v1/events/sessions";

fn client_for(server: &MockServer) -> HttpSessionClient {
    HttpSessionClient::new(format!("{}{}", server.uri(), SESSIONS)).unwrap()
}

#[tokio::test]
async fn list_sends_only_non_empty_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SESSIONS))
        .and(header("accept", "application/json"))
        .and(query_param("page", "1"))
        .and(query_param("size", "10"))
        .and(query_param("sortBy", "startDateTime"))
        .and(query_param("speaker", "Jane"))
        .and(query_param_is_missing("priority"))
        .and(query_param_is_missing("startDateTime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [
                {"id": 1, "title": "Keynote", "speaker": "Jane",
                 "startDateTime": "2025-10-21T09:00:00", "endDateTime": "2025-10-21T10:00:00"}
            ],
            "totalElements": 11, "totalPages": 2, "size": 10, "number": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = SessionQuery::new(
        1,
        10,
        FilterSet {
            speaker: Some("Jane".into()),
            ..Default::default()
        },
    );
    let page = client_for(&server).list_sessions(&query).await.unwrap();

    assert_eq!(page.total_elements, 11);
    assert_eq!(page.number, 1);
    assert!(!page.has_next());
    assert_eq!(page.content[0].title, "Keynote");
}

#[tokio::test]
async fn create_posts_json_without_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SESSIONS))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"title": "Workshop", "priority": 2, "vip": true})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 42, "title": "Workshop", "priority": 2, "vip": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = Session {
        id: Some(999),
        title: "Workshop".into(),
        priority: Some(2),
        vip: Some(true),
        ..Default::default()
    };
    let created = client_for(&server).create_session(&draft).await.unwrap();
    assert_eq!(created.id, Some(42));
}

#[tokio::test]
async fn update_puts_to_item_url() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("{SESSIONS}/7")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "title": "Renamed"})))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session {
        id: Some(7),
        title: "Renamed".into(),
        ..Default::default()
    };
    let updated = client_for(&server).update_session(7, &session).await.unwrap();
    assert_eq!(updated.title, "Renamed");
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{SESSIONS}/3")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).delete_session(3).await.unwrap();
}

#[tokio::test]
async fn non_success_status_is_an_error_with_code() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .mount(&server)
        .await;

    let err = client_for(&server).delete_session(5).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Failed to delete session: 404");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let client = HttpSessionClient::new("http://127.0.0.1:9/api/v1/events/sessions").unwrap();
    let err = client
        .list_sessions(&SessionQuery::new(0, 10, FilterSet::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, EventPlanError::Transport { .. }));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_sessions(&SessionQuery::new(0, 10, FilterSet::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, EventPlanError::Decode { .. }));
}

use chrono_tz::UTC;
use eventplan_core::HttpSessionClient;
use eventplan_core::manager::SessionManager;
use eventplan_core::notify::{ChangeNotifier, SessionChange};
use eventplan_core::Session;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SESSIONS: &str = "/api/v1/events/sessions";

fn page_json(number: u32, total_pages: u32, content: Value) -> Value {
    json!({
        "content": content,
        "totalElements": total_pages * 10,
        "totalPages": total_pages,
        "size": 10,
        "number": number
    })
}

fn manager_for(server: &MockServer) -> SessionManager<HttpSessionClient> {
    let client = HttpSessionClient::new(format!("{}{}", server.uri(), SESSIONS)).unwrap();
    SessionManager::new(client, UTC)
}

async fn mount_list(server: &MockServer, number: u32, total_pages: u32) {
    Mock::given(method("GET"))
        .and(path(SESSIONS))
        .and(query_param("page", number.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            number,
            total_pages,
            json!([{"id": 1, "title": "Keynote"}]),
        )))
        .mount(server)
        .await;
}

#[tokio::test]
async fn load_failure_keeps_previous_page() {
    let server = MockServer::start().await;
    mount_list(&server, 0, 3).await;
    Mock::given(method("GET"))
        .and(path(SESSIONS))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut manager = manager_for(&server);
    manager.load(0, 10, Default::default()).await;
    assert_eq!(manager.sessions().len(), 1);

    manager.next_page().await;
    assert_eq!(manager.error(), Some("Failed to load sessions: 500"));
    assert_eq!(manager.page().map(|p| p.number), Some(0));
    assert_eq!(manager.sessions().len(), 1);
    assert!(!manager.is_loading());
}

#[tokio::test]
async fn pagination_controls_follow_page_bounds() {
    let server = MockServer::start().await;
    mount_list(&server, 0, 3).await;
    mount_list(&server, 2, 3).await;

    let mut manager = manager_for(&server);
    manager.load(0, 10, Default::default()).await;
    assert!(!manager.has_previous());
    assert!(manager.has_next());

    manager.load(2, 10, Default::default()).await;
    assert!(manager.has_previous());
    assert!(!manager.has_next());

    // Disabled control issues no request.
    manager.next_page().await;
    assert_eq!(manager.page().map(|p| p.number), Some(2));
}

#[tokio::test]
async fn search_filters_survive_paging() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SESSIONS))
        .and(query_param("speaker", "Jane"))
        .and(query_param("priority", "1"))
        .and(query_param("startDateTime", "2025-10-01T00:00:00.000Z"))
        .and(query_param_is_missing("endDateTime"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(0, 2, json!([]))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SESSIONS))
        .and(query_param("speaker", "Jane"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(1, 2, json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let mut manager = manager_for(&server);
    manager.search.speaker = " Jane ".into();
    manager.search.priority = "1".into();
    manager.search.start_date = "2025-10-01".into();
    manager.apply_search().await;
    assert_eq!(manager.error(), None);

    manager.next_page().await;
    assert_eq!(manager.page().map(|p| p.number), Some(1));
}

#[tokio::test]
async fn invalid_search_date_is_reported_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(0, 1, json!([]))))
        .expect(0)
        .mount(&server)
        .await;

    let mut manager = manager_for(&server);
    manager.search.end_date = "31/10/2025".into();
    manager.apply_search().await;
    assert!(manager.error().unwrap().contains("YYYY-MM-DD"));
}

#[tokio::test]
async fn rejected_create_keeps_the_draft() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SESSIONS))
        .and(body_json(json!({"speaker": "Jane", "title": ""})))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let mut manager = manager_for(&server);
    manager.draft_mut().speaker = Some("Jane".into());

    assert!(!manager.submit().await);
    assert_eq!(manager.error(), Some("Failed to create session: 400"));
    assert_eq!(manager.draft().speaker.as_deref(), Some("Jane"));
    assert_eq!(manager.draft().title, "");
    assert!(!manager.is_loading());
}

#[tokio::test]
async fn successful_update_resets_draft_reloads_and_notifies() {
    let server = MockServer::start().await;
    mount_list(&server, 0, 1).await;
    Mock::given(method("PUT"))
        .and(path(format!("{SESSIONS}/1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "title": "Opening"})))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = ChangeNotifier::new();
    let mut changes = notifier.subscribe();
    let mut manager = manager_for(&server).with_notifier(notifier);
    manager.load(0, 10, Default::default()).await;

    let existing = manager.sessions()[0].clone();
    manager.start_edit(&existing);
    assert_eq!(manager.editing_id(), Some(1));
    manager.draft_mut().title = "Opening".into();

    assert!(manager.submit().await);
    assert!(!manager.is_editing());
    assert_eq!(manager.draft(), &Session::default());

    let received = changes.drain();
    assert_eq!(received.len(), 1);
    assert!(matches!(&received[0], SessionChange::Updated(s) if s.title == "Opening"));

    // One load before the edit, one reload after it.
    let gets = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "GET")
        .count();
    assert_eq!(gets, 2);
}

#[tokio::test]
async fn removing_an_unsaved_session_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let mut manager = manager_for(&server);
    assert!(!manager.remove(None).await);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn remove_deletes_then_reloads() {
    let server = MockServer::start().await;
    mount_list(&server, 0, 1).await;
    Mock::given(method("DELETE"))
        .and(path(format!("{SESSIONS}/1")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = ChangeNotifier::new();
    let mut changes = notifier.subscribe();
    let mut manager = manager_for(&server).with_notifier(notifier);

    assert!(manager.remove(Some(1)).await);
    assert_eq!(changes.drain(), vec![SessionChange::Deleted(1)]);
    assert_eq!(manager.sessions().len(), 1);
}

#[tokio::test]
async fn cancel_edit_returns_to_create_mode() {
    let server = MockServer::start().await;
    let mut manager = manager_for(&server);

    manager.start_edit(&Session {
        id: Some(9),
        title: "Panel".into(),
        ..Default::default()
    });
    assert_eq!(manager.draft().title, "Panel");

    manager.cancel_edit();
    assert_eq!(manager.editing_id(), None);
    assert!(manager.draft().is_draft());
    assert_eq!(manager.draft().title, "");
}

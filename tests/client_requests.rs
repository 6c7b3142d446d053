// tests/client_requests.rs
//! What the client puts on the wire and how it reads answers back.

mod common;

use common::{fixture, MockNotion, TEST_API_KEY};
use notion_typed::constants::{DEFAULT_USER_AGENT, NOTION_VERSION};
use notion_typed::{
    DatabaseId, DatabaseQuery, HttpMethod, HttpProxy, HttpResponse, NewPage, NotionError,
    NotionErrorCode, PageId, PageUpdate, Pagination, PropertyTypeValue, PropertyValue, UserId,
};
use serde_json::{json, Value};
use std::time::Duration;

fn ann() -> UserId {
    UserId::parse("d40e767c-d7af-4b18-a86d-55c61f1e39a4").unwrap()
}

fn roadmap() -> DatabaseId {
    DatabaseId::parse("d9824bdc84454327be8b5b47500af6ce").unwrap()
}

fn query_param(request: &notion_typed::HttpRequest, name: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

fn person_server() -> MockNotion {
    let body = fixture("user_person.json");
    MockNotion::new(move |_| HttpResponse::new(200, body.clone()))
}

#[tokio::test]
async fn every_request_carries_auth_and_version_headers() {
    let server = person_server();
    let client = server.client();

    let user = client.users().get_user(&ann()).await.unwrap();
    assert_eq!(user.name(), Some("Ann"));

    let request = server.last_request();
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(
        request.url.as_str(),
        "https://api.notion.com/v1/users/d40e767c-d7af-4b18-a86d-55c61f1e39a4"
    );
    assert_eq!(
        request.header("authorization"),
        Some(format!("Bearer {}", TEST_API_KEY).as_str())
    );
    assert_eq!(request.header("Notion-Version"), Some(NOTION_VERSION));
    assert_eq!(request.header("User-Agent"), Some(DEFAULT_USER_AGENT));
    assert_eq!(request.header("Content-Type"), None);
}

#[tokio::test]
async fn custom_user_agent_and_base_url_are_used() {
    let server = person_server();
    let client = server.client_with(|builder| {
        builder
            .user_agent("roadmap-sync/2.1")
            .base_url("http://localhost:8080/v1")
    });

    client.users().me().await.unwrap();

    let request = server.last_request();
    assert_eq!(request.url.as_str(), "http://localhost:8080/v1/users/me");
    assert_eq!(request.header("user-agent"), Some("roadmap-sync/2.1"));
    assert_eq!(server.opened()[0].user_agent, "roadmap-sync/2.1");
}

#[tokio::test]
async fn proxy_routes_every_request() {
    let server = person_server();
    let proxy = HttpProxy::new("proxy", 3128).unwrap();
    let client = server.client_with(|builder| builder.http_proxy(proxy.clone()));

    client.users().me().await.unwrap();
    client.users().get_user(&ann()).await.unwrap();

    assert_eq!(server.opened().len(), 1);
    assert_eq!(server.opened()[0].proxy, Some(proxy));
    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests
        .iter()
        .all(|recorded| recorded.connected_to == "proxy:3128"));
}

#[tokio::test]
async fn without_a_proxy_requests_go_to_the_origin() {
    let server = person_server();
    let client = server.client();

    client.users().me().await.unwrap();

    assert_eq!(server.opened()[0].proxy, None);
    assert_eq!(server.requests()[0].connected_to, "api.notion.com:443");
}

#[tokio::test]
async fn slow_responses_time_out() {
    let server = person_server().with_delay(Duration::from_secs(30));
    let client = server.client_with(|builder| builder.request_timeout(Duration::from_millis(50)));

    let err = client.users().me().await.unwrap_err();
    match err {
        NotionError::Timeout { after } => assert_eq!(after, Duration::from_millis(50)),
        other => panic!("expected a timeout, got {other:?}"),
    }
    assert!(!client.is_closed());
}

#[tokio::test]
async fn error_envelope_becomes_api_error() {
    let body = fixture("error_not_found.json");
    let server = MockNotion::new(move |_| HttpResponse::new(404, body.clone()));
    let client = server.client();

    let id = PageId::parse("59833787-2cf9-4fdf-8782-e53db20768a5").unwrap();
    let err = client.pages().get_page(&id).await.unwrap_err();

    assert_eq!(err.api_code(), Some(&NotionErrorCode::ObjectNotFound));
    match err {
        NotionError::Api {
            status,
            message,
            request_id,
            ..
        } => {
            assert_eq!(status, 404);
            assert!(message.starts_with("Could not find page"));
            assert_eq!(
                request_id.as_deref(),
                Some("c2f0e6d3-1c0a-4a2f-8d43-6a3c0a0f9e11")
            );
        }
        other => panic!("expected an API error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_envelope_errors_keep_the_status() {
    let server = MockNotion::replying(502, "<html>Bad gateway</html>");
    let client = server.client();

    let err = client.users().me().await.unwrap_err();
    assert_eq!(err.api_code(), Some(&NotionErrorCode::HttpStatus(502)));
}

#[tokio::test]
async fn unknown_user_type_in_a_response_is_a_conversion_error() {
    let server = MockNotion::replying(
        200,
        r#"{"object":"user","id":"d40e767c-d7af-4b18-a86d-55c61f1e39a4","type":"robot"}"#,
    );
    let client = server.client();

    let err = client.users().me().await.unwrap_err();
    assert!(matches!(err, NotionError::Conversion(_)), "{err:?}");
    assert!(err.to_string().contains("robot"));
}

#[tokio::test]
async fn list_all_follows_cursors() {
    let person: Value = serde_json::from_str(&fixture("user_person.json")).unwrap();
    let bot: Value = serde_json::from_str(&fixture("user_bot.json")).unwrap();
    let server = MockNotion::new(move |request| {
        let body = match query_param(request, "start_cursor").as_deref() {
            None => json!({
                "object": "list",
                "results": [person.clone()],
                "next_cursor": "cursor-2",
                "has_more": true,
                "type": "user",
                "user": {}
            }),
            Some("cursor-2") => json!({
                "object": "list",
                "results": [bot.clone()],
                "next_cursor": null,
                "has_more": false
            }),
            Some(other) => panic!("unexpected cursor {other}"),
        };
        HttpResponse::new(200, body.to_string())
    });
    let client = server.client();

    let users = client.users().list_all().await.unwrap();

    let names: Vec<_> = users.iter().map(|user| user.name()).collect();
    assert_eq!(names, vec![Some("Ann"), Some("Sync Integration")]);
    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(query_param(&requests[0].request, "start_cursor"), None);
    assert_eq!(
        query_param(&requests[1].request, "start_cursor").as_deref(),
        Some("cursor-2")
    );
}

#[tokio::test]
async fn list_users_sends_one_page_request() {
    let server = MockNotion::replying(
        200,
        r#"{"object":"list","results":[],"next_cursor":null,"has_more":false}"#,
    );
    let client = server.client();

    let page = client
        .users()
        .list_users(&Pagination {
            start_cursor: Some("abc".into()),
            page_size: Some(500),
        })
        .await
        .unwrap();

    assert!(page.results.is_empty());
    assert_eq!(page.continuation(), None);
    let request = server.last_request();
    assert_eq!(query_param(&request, "start_cursor").as_deref(), Some("abc"));
    assert_eq!(query_param(&request, "page_size").as_deref(), Some("100"));
}

#[tokio::test]
async fn create_page_posts_encoded_properties() {
    let body = fixture("page.json");
    let server = MockNotion::new(move |_| HttpResponse::new(200, body.clone()));
    let client = server.client();

    let new_page = NewPage::new(roadmap())
        .with_property(PropertyValue::named(
            "Estimate",
            PropertyTypeValue::Number(Some(5.0)),
        ))
        .with_property(PropertyValue::named("Done", PropertyTypeValue::Checkbox(true)));
    let created = client.pages().create_page(&new_page).await.unwrap();
    assert_eq!(created.title().as_deref(), Some("Ship the launch"));

    let request = server.last_request();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url.path(), "/v1/pages");
    assert_eq!(request.header("Content-Type"), Some("application/json"));

    let sent: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(
        sent["parent"],
        json!({"type": "database_id", "database_id": "d9824bdc-8445-4327-be8b-5b47500af6ce"})
    );
    assert_eq!(sent["properties"]["Estimate"]["number"], json!(5.0));
    assert_eq!(sent["properties"]["Done"]["checkbox"], json!(true));
    assert!(sent.get("id").is_none());
}

#[tokio::test]
async fn archiving_a_page_patches_only_the_flag() {
    let body = fixture("page.json");
    let server = MockNotion::new(move |_| HttpResponse::new(200, body.clone()));
    let client = server.client();

    let id = PageId::parse("59833787-2cf9-4fdf-8782-e53db20768a5").unwrap();
    client
        .pages()
        .update_page(&id, &PageUpdate::default().archive())
        .await
        .unwrap();

    let request = server.last_request();
    assert_eq!(request.method, HttpMethod::Patch);
    let sent: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(sent, json!({"archived": true}));
}

#[tokio::test]
async fn query_all_sends_the_cursor_in_the_body() {
    let page: Value = serde_json::from_str(&fixture("page.json")).unwrap();
    let server = MockNotion::new(move |request| {
        let sent: Value = serde_json::from_str(request.body.as_deref().unwrap_or("{}")).unwrap();
        let body = match sent.get("start_cursor").and_then(Value::as_str) {
            None => json!({
                "object": "list",
                "results": [page.clone()],
                "next_cursor": "next",
                "has_more": true
            }),
            Some(_) => json!({
                "object": "list",
                "results": [page.clone()],
                "next_cursor": null,
                "has_more": false
            }),
        };
        HttpResponse::new(200, body.to_string())
    });
    let client = server.client();

    let query = DatabaseQuery {
        filter: Some(json!({"property": "Done", "checkbox": {"equals": false}})),
        ..DatabaseQuery::default()
    };
    let pages = client.databases().query_all(&roadmap(), &query).await.unwrap();

    assert_eq!(pages.len(), 2);
    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests
        .iter()
        .all(|recorded| recorded.request.url.path()
            == "/v1/databases/d9824bdc-8445-4327-be8b-5b47500af6ce/query"));

    let second: Value =
        serde_json::from_str(requests[1].request.body.as_deref().unwrap()).unwrap();
    assert_eq!(second["start_cursor"], json!("next"));
    assert_eq!(second["filter"], query.filter.unwrap());
}

#[tokio::test]
async fn get_database_decodes_the_schema() {
    let body = fixture("database.json");
    let server = MockNotion::new(move |_| HttpResponse::new(200, body.clone()));
    let client = server.client();

    let database = client.databases().get_database(&roadmap()).await.unwrap();

    assert_eq!(database.title_text(), "Roadmap");
    assert_eq!(database.property_specs().len(), 4);
}

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value as JsonValue, json};
use shelf_client::{
    ApiClient, ClientError, HttpRequest, HttpResponse, LibraryItemsQuery, Transport,
};

/// Replays canned responses in order and records every request.
#[derive(Debug, Default)]
struct ScriptedTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    fn reply(self, status: u16, body: JsonValue) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(HttpResponse::json(status, &body));
        self
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> shelf_client::Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| HttpResponse::new(404, "no scripted response")))
    }
}

fn login_body() -> JsonValue {
    json!({
        "user": {
            "id": "usr_1",
            "username": "reader",
            "type": "user",
            "token": "tok_reader",
            "permissions": {"download": true, "update": false, "delete": false, "upload": false,
                            "accessAllLibraries": true, "accessAllTags": true, "accessExplicitContent": false}
        },
        "userDefaultLibraryId": "lib_1"
    })
}

#[tokio::test]
async fn login_then_browse_a_library() {
    let transport = ScriptedTransport::default()
        .reply(200, login_body())
        .reply(
            200,
            json!({
                "authors": [
                    {"id": "aut_1", "name": "Ann Leckie", "libraryId": "lib_1",
                     "addedAt": 1650621073750_i64, "updatedAt": 1650621073750_i64, "numBooks": 3}
                ]
            }),
        )
        .reply(
            200,
            json!({
                "results": [{"id": "li_1"}, {"id": "li_2"}],
                "total": 14,
                "limit": 2,
                "page": 1,
                "sortBy": "media.metadata.title",
                "sortDesc": false,
                "filterBy": null,
                "mediaType": "book",
                "minified": true,
                "collapseseries": false,
                "include": ""
            }),
        );

    let client = ApiClient::with_transport(transport);
    let session = client.authorize("reader", "pw").await.unwrap();
    let library_id = session.default_library_id().unwrap().to_owned();
    assert!(!session.user().unwrap().is_admin());

    let authors = client.library_authors(&session, &library_id).await.unwrap();
    assert_eq!(authors[0].num_books(), Some(3));

    let page = client
        .library_items(
            &session,
            &library_id,
            &LibraryItemsQuery::new()
                .limit(2)
                .page(1)
                .sort("media.metadata.title", false)
                .minified(true),
        )
        .await
        .unwrap();
    assert_eq!(page.total(), Some(14));
    assert_eq!(page.results().len(), 2);
}

#[tokio::test]
async fn requests_use_relative_paths_and_bearer_tokens() {
    let transport = std::sync::Arc::new(
        ScriptedTransport::default()
            .reply(200, login_body())
            .reply(200, json!({"totalListeningSessions": 0})),
    );

    let client = ApiClient::with_transport(SharedTransport(transport.clone()));
    let session = client.authorize("reader", "pw").await.unwrap();
    client.user_year_stats(&session, 2024).await.unwrap();

    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, "login");
    assert!(requests[0].bearer.is_none());
    assert_eq!(requests[1].path, "api/me/stats/year/2024");
    assert_eq!(
        requests[1].bearer.as_ref().map(|token| token.as_str()),
        Some("tok_reader")
    );
    assert!(requests[1].body.is_none());
}

#[tokio::test]
async fn server_errors_stop_the_flow() {
    let transport = ScriptedTransport::default()
        .reply(200, login_body())
        .reply(404, json!({"error": "Library not found"}));

    let client = ApiClient::with_transport(transport);
    let session = client.authorize("reader", "pw").await.unwrap();
    let err = client
        .delete_library(&session, "lib_missing")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::UnexpectedStatus(404)));
}

#[derive(Debug)]
struct SharedTransport(std::sync::Arc<ScriptedTransport>);

#[async_trait]
impl Transport for SharedTransport {
    async fn send(&self, request: HttpRequest) -> shelf_client::Result<HttpResponse> {
        self.0.send(request).await
    }
}

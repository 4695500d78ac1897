use hearsay::chat::{ChatSession, CompletionSession, Role};
use hearsay::error::HearsayError;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_for(server: &MockServer) -> ChatSession {
    ChatSession::new("test-key".to_string(), "Be terse.").with_base_url(server.uri())
}

async fn mount_reply(server: &MockServer, text: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": text}}]
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn complete_returns_reply_and_grows_history() {
    let server = MockServer::start().await;
    mount_reply(&server, "short.", 1).await;

    let mut session = session_for(&server);
    let reply = session.complete("explain transference").await.unwrap();

    assert_eq!(reply, "short.");
    let messages = session.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].role, Role::System);
    assert_eq!(messages[0].content, "Be terse.");
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[1].content, "explain transference");
    assert_eq!(messages[2].role, Role::Assistant);
    assert_eq!(messages[2].content, "short.");
}

#[tokio::test]
async fn each_call_sends_the_full_history() {
    let server = MockServer::start().await;
    mount_reply(&server, "ok", 2).await;

    let mut session = session_for(&server);
    session.complete("first").await.unwrap();
    session.complete("second").await.unwrap();

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 2);

    let second_body: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    let messages = second_body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4); // system, user, assistant, user
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["content"], "first");
    assert_eq!(messages[2]["role"], "assistant");
    assert_eq!(messages[3]["content"], "second");
}

#[tokio::test]
async fn server_error_leaves_history_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let err = session.complete("hello").await.unwrap_err();

    assert!(matches!(err, HearsayError::Api { status: 500, .. }));
    // The unanswered user message is dropped.
    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.messages()[0].role, Role::System);
}

#[tokio::test]
async fn unauthorized_maps_to_authentication() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let err = session.complete("hello").await.unwrap_err();

    assert!(matches!(err, HearsayError::Authentication(_)));
}

#[tokio::test]
async fn empty_choices_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let err = session.complete("hello").await.unwrap_err();

    assert!(
        matches!(err, HearsayError::Api { status: 200, message } if message.contains("No choices"))
    );
}

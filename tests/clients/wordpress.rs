use autopost::clients::wordpress::{WordPressClient, WordPressConfig, WordPressError};
use autopost::publisher::payload::{Payload, PostStatus};
use wiremock::matchers::{basic_auth, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> WordPressConfig {
    WordPressConfig {
        url: format!("{}/", server.uri()),
        username: "editor".to_string(),
        app_password: "app pass".to_string(),
        timeout_secs: Some(5),
    }
}

fn payload() -> Payload {
    Payload {
        title: "Hello".to_string(),
        content: "<p>Body</p>".to_string(),
        status: PostStatus::Publish,
        meta: None,
    }
}

#[tokio::test]
async fn posts_payload_with_basic_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(basic_auth("editor", "app pass"))
        .and(body_json(serde_json::json!({
            "title": "Hello",
            "content": "<p>Body</p>",
            "status": "publish"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 42,
            "link": "https://blog.example.com/?p=42",
            "status": "publish"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = WordPressClient::new(config_for(&server)).expect("Failed to create client");
    assert_eq!(
        client.endpoint(),
        format!("{}/wp-json/wp/v2/posts", server.uri())
    );

    let post = client.submit(&payload()).await.expect("Submission failed");

    assert_eq!(post.id, Some(42));
    assert_eq!(post.link.as_deref(), Some("https://blog.example.com/?p=42"));
}

#[tokio::test]
async fn non_success_status_surfaces_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/posts"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"code":"rest_not_logged_in"}"#),
        )
        .mount(&server)
        .await;

    let client = WordPressClient::new(config_for(&server)).expect("Failed to create client");
    let err = client.submit(&payload()).await.expect_err("Expected error");

    assert!(err.to_string().contains("status 401"));
    match err {
        WordPressError::ApiStatus { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("rest_not_logged_in"));
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_non_http_url() {
    let err = WordPressClient::new(WordPressConfig {
        url: "ftp://blog.example.com".to_string(),
        username: "editor".to_string(),
        app_password: "secret".to_string(),
        timeout_secs: None,
    })
    .expect_err("Expected invalid url error");

    match err {
        WordPressError::InvalidUrl(value) => assert_eq!(value, "ftp://blog.example.com"),
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_unparseable_url() {
    let err = WordPressClient::new(WordPressConfig {
        url: "not a url".to_string(),
        username: "editor".to_string(),
        app_password: "secret".to_string(),
        timeout_secs: None,
    })
    .expect_err("Expected invalid url error");

    assert!(matches!(err, WordPressError::InvalidUrl(_)));
    assert_eq!(err.to_string(), "Invalid WordPress URL: not a url");
}

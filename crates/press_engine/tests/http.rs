use chrono::{TimeZone, Utc};
use press_core::{FormEncoding, FormFeedback, FormSubmission, NewComment};
use press_engine::{
    CommentStore, FeedLoadError, FeedLoader, FeedSource, FetchSettings, FormRelayClient,
    RelayError, RestCommentStore, StoreError,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED: &str = r#"[
  {"id": 1, "title": "Old", "slug": "old", "date": "2025-01-01", "sector": "Biotech", "summary": "s"},
  {"id": 2, "title": "New", "slug": "new", "date": "2025-06-01", "category": "Pharma", "excerpt": "e", "contentUrl": "/posts/new.html"}
]"#;

#[tokio::test]
async fn feed_loads_from_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/posts.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FEED, "application/json"))
        .mount(&server)
        .await;

    let loader = FeedLoader::new(FetchSettings::default()).unwrap();
    let source = FeedSource::parse(&format!("{}/posts/posts.json", server.uri()));
    let posts = loader.load(&source).await.expect("feed loads");
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].category, "Biotech");
    assert_eq!(posts[1].content_url, "/posts/new.html");
}

#[tokio::test]
async fn feed_http_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/posts.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let loader = FeedLoader::new(FetchSettings::default()).unwrap();
    let source = FeedSource::Url(format!("{}/posts/posts.json", server.uri()));
    let err = loader.load(&source).await.unwrap_err();
    assert!(matches!(err, FeedLoadError::HttpStatus(404)));
}

#[tokio::test]
async fn oversized_feed_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/posts.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FEED, "application/json"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 16,
        ..FetchSettings::default()
    };
    let loader = FeedLoader::new(settings).unwrap();
    let source = FeedSource::Url(format!("{}/posts/posts.json", server.uri()));
    let err = loader.load(&source).await.unwrap_err();
    assert!(matches!(err, FeedLoadError::TooLarge { max_bytes: 16 }));
}

#[tokio::test]
async fn malformed_feed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("posts.json");
    std::fs::write(&file, "{\"not\": \"a list\"}").unwrap();

    let loader = FeedLoader::new(FetchSettings::default()).unwrap();
    let err = loader.load(&FeedSource::File(file)).await.unwrap_err();
    assert!(matches!(err, FeedLoadError::Parse(_)));
}

#[tokio::test]
async fn comments_are_listed_with_filter_and_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/comments"))
        .and(query_param("article_id", "eq.gene-therapy"))
        .and(query_param("order", "created_at.desc"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"article_id":"gene-therapy","user_id":"u1","user_name":"Ada","user_avatar":null,"content":"Nice","created_at":"2025-06-02T10:00:00Z","id":7}]"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let store = RestCommentStore::new(&server.uri(), "anon-key").unwrap();
    let comments = store.list("gene-therapy").await.expect("list ok");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].user_name, "Ada");
    assert_eq!(
        comments[0].created_at,
        Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn comment_insert_posts_json_row() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/comments"))
        .and(header("content-type", "application/json"))
        .and(body_string(
            r#"[{"article_id":"a","user_id":"u1","user_name":"Ada","user_avatar":null,"content":"Hi"}]"#,
        ))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let store = RestCommentStore::new(&server.uri(), "anon-key").unwrap();
    let comment = NewComment {
        article_id: "a".into(),
        user_id: "u1".into(),
        user_name: "Ada".into(),
        user_avatar: None,
        content: "Hi".into(),
    };
    store.insert(&comment).await.expect("insert ok");
}

#[tokio::test]
async fn rejected_insert_surfaces_store_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/comments"))
        .respond_with(ResponseTemplate::new(403).set_body_raw(
            r#"{"code":"42501","message":"new row violates row-level security policy"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let store = RestCommentStore::new(&server.uri(), "anon-key").unwrap();
    let comment = NewComment {
        article_id: "a".into(),
        user_id: "u1".into(),
        user_name: "Ada".into(),
        user_avatar: None,
        content: "Hi".into(),
    };
    let err = store.insert(&comment).await.unwrap_err();
    assert_eq!(
        err,
        StoreError::Rejected {
            status: 403,
            message: "new row violates row-level security policy".into()
        }
    );
}

#[tokio::test]
async fn form_relay_posts_fields_and_reports_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/f/contact"))
        .and(header("accept", "application/json"))
        .and(body_string("email=a%40b.org&message=Hello+there"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"ok\":true}", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = FormRelayClient::new(&format!("{}/f/contact", server.uri())).unwrap();
    let form = FormSubmission::new("Thanks! We will reply to {email}.")
        .field("email", "a@b.org")
        .field("message", "Hello there");
    let feedback = client.submit(&form).await.expect("sent");
    assert_eq!(feedback.text(), "Thanks! We will reply to a@b.org.");
}

#[tokio::test]
async fn form_relay_failure_and_validation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = FormRelayClient::new(&server.uri()).unwrap();
    let mut form = FormSubmission::new("ok").field("email", "a@b.org");
    form.encoding = FormEncoding::Json;
    let err = client.submit(&form).await.unwrap_err();
    assert_eq!(err, RelayError::Status(500));
    assert_eq!(err.feedback(), FormFeedback::Failed);

    let blank = FormSubmission::new("ok").field("email", " ");
    let err = client.submit(&blank).await.unwrap_err();
    assert_eq!(err.feedback(), FormFeedback::InvalidEmail);
}

mod mocks;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use mocks::{summarizer::MockSummarizer, transcripts::MockTranscripts};
use ytsum::config::Defaults;
use ytsum::{Orchestrator, SummaryType};

fn app(transcripts: MockTranscripts, summarizer: MockSummarizer) -> axum::Router {
    ytsum::server::router(Orchestrator::new(transcripts, summarizer), Defaults::default())
}

async fn post(app: axum::Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    send(app, uri, Some("application/json"), body.to_string()).await
}

async fn send(
    app: axum::Router,
    uri: &str,
    content_type: Option<&str>,
    body: String,
) -> (StatusCode, serde_json::Value) {
    let mut request = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        request = request.header("content-type", content_type);
    }
    let request = request.body(Body::from(body)).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_summarize_route() {
    let summarizer = MockSummarizer::new("abc123", "the whole transcript", "Short summary.");
    let calls = summarizer.calls.clone();
    let app = app(MockTranscripts::with_languages(&["es", "fr"]), summarizer);

    let (status, body) = post(
        app,
        "/api/summarize",
        serde_json::json!({
            "video": "abc123",
            "languages": ["en"],
            "summaryType": "bullet-points",
            "showTranscript": true
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["videoId"], "abc123");
    assert_eq!(body["data"]["transcriptLength"], 20);
    assert_eq!(body["data"]["summary"], "Short summary.");
    assert_eq!(body["data"]["transcript"], "the whole transcript");
    assert!(body.get("error").is_none());

    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].1, "es");
    assert_eq!(calls[0].2, "gpt-5-chat-latest");
    assert_eq!(calls[0].3, SummaryType::BulletPoints);
}

#[tokio::test]
async fn test_summarize_route_hides_transcript_by_default() {
    let app = app(
        MockTranscripts::with_languages(&["en"]),
        MockSummarizer::new("abc123", "the whole transcript", "Short summary."),
    );

    let (status, body) = post(app, "/api/summarize", serde_json::json!({"video": "abc123"})).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].get("transcript").is_none());
}

#[tokio::test]
async fn test_missing_video_is_bad_request() {
    for uri in ["/api/summarize", "/api/transcript", "/api/list-transcripts"] {
        let app = app(
            MockTranscripts::with_languages(&["en"]),
            MockSummarizer::new("abc123", "text", "summary"),
        );
        let (status, body) = post(app, uri, serde_json::json!({"languages": ["en"]})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Video URL or ID is required");
        assert!(body.get("data").is_none());
    }
}

#[tokio::test]
async fn test_collaborator_failure_is_server_error() {
    let app = app(
        MockTranscripts::failing_list(),
        MockSummarizer::failing("Video unavailable: xyz"),
    );

    let (status, body) = post(app, "/api/summarize", serde_json::json!({"video": "xyz"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Video unavailable: xyz");
}

#[tokio::test]
async fn test_transcript_route() {
    let app = app(
        MockTranscripts::with_languages(&["de"]).text("de", "  hallo welt \n"),
        MockSummarizer::new("abc123", "unused", "unused"),
    );

    let (status, body) = post(app, "/api/transcript", serde_json::json!({"video": "abc123"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["videoId"], "abc123");
    assert_eq!(body["data"]["transcript"], "hallo welt");
}

#[tokio::test]
async fn test_list_transcripts_route() {
    let app = app(
        MockTranscripts::with_languages(&["en", "es-MX"]),
        MockSummarizer::new("abc123", "unused", "unused"),
    );

    let (status, body) = post(app, "/api/list-transcripts", serde_json::json!({"video": "abc123"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["videoId"], "abc123");
    let transcripts = body["data"]["transcripts"].as_array().unwrap();
    assert_eq!(transcripts.len(), 2);
    assert_eq!(transcripts[1]["language_code"], "es-MX");
    assert_eq!(transcripts[1]["is_translatable"], true);
}

#[tokio::test]
async fn test_list_transcripts_route_failure() {
    let app = app(
        MockTranscripts::failing_list(),
        MockSummarizer::new("abc123", "unused", "unused"),
    );

    let (status, body) = post(app, "/api/list-transcripts", serde_json::json!({"video": "abc123"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Error listing transcripts: Transcripts are disabled for video: abc123"
    );
}

#[tokio::test]
async fn test_list_transcripts_route_reports_normalized_video_id() {
    let app = app(
        MockTranscripts::with_languages(&["en"]).normalizing("dQw4w9WgXcQ"),
        MockSummarizer::new("", "unused", "unused"),
    );

    let (status, body) = post(
        app,
        "/api/list-transcripts",
        serde_json::json!({"video": "https://youtu.be/dQw4w9WgXcQ"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["videoId"], "dQw4w9WgXcQ");
}

#[tokio::test]
async fn test_unknown_summary_type_keeps_envelope() {
    let summarizer = MockSummarizer::new("abc123", "text", "summary");
    let recorded = summarizer.clone();
    let app = app(MockTranscripts::with_languages(&["en"]), summarizer);

    let (status, body) = post(
        app,
        "/api/summarize",
        serde_json::json!({"video": "abc123", "summaryType": "haiku"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert!(body.get("data").is_none());
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("haiku"), "{error}");
    assert!(recorded.languages().is_empty());
}

#[tokio::test]
async fn test_malformed_body_keeps_envelope() {
    for uri in ["/api/summarize", "/api/transcript", "/api/list-transcripts"] {
        let app = app(
            MockTranscripts::with_languages(&["en"]),
            MockSummarizer::new("abc123", "text", "summary"),
        );

        let (status, body) = send(app, uri, Some("application/json"), "{\"video\": ".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn test_missing_content_type_keeps_envelope() {
    let app = app(
        MockTranscripts::with_languages(&["en"]),
        MockSummarizer::new("abc123", "text", "summary"),
    );

    let (status, body) = send(app, "/api/transcript", None, r#"{"video": "abc123"}"#.to_string()).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

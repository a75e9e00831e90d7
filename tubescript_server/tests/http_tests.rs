use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;

use tubescript_core::{
    CaptionSource, LanguagePreference, MetadataSource, TranscriptError, TranscriptLine,
    TranscriptResolver, TranscriptTrack, VideoId, VideoMetadata,
};
use tubescript_server::{app, AppState, ServerConfig};

struct StaticCaptions {
    lines: Option<Vec<TranscriptLine>>,
}

#[async_trait]
impl CaptionSource for StaticCaptions {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch_preferred(
        &self,
        _video_id: &VideoId,
        _languages: &LanguagePreference,
    ) -> tubescript_core::Result<Vec<TranscriptLine>> {
        self.lines
            .clone()
            .ok_or_else(|| TranscriptError::Provider("no direct match".to_string()))
    }

    async fn list_tracks(
        &self,
        _video_id: &VideoId,
    ) -> tubescript_core::Result<Vec<TranscriptTrack>> {
        Ok(Vec::new())
    }

    async fn fetch_track(
        &self,
        _video_id: &VideoId,
        _track: &TranscriptTrack,
    ) -> tubescript_core::Result<Vec<TranscriptLine>> {
        Err(TranscriptError::Provider("not reachable".to_string()))
    }
}

struct PanickingCaptions;

#[async_trait]
impl CaptionSource for PanickingCaptions {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn fetch_preferred(
        &self,
        _video_id: &VideoId,
        _languages: &LanguagePreference,
    ) -> tubescript_core::Result<Vec<TranscriptLine>> {
        panic!("captions backend blew up")
    }

    async fn list_tracks(
        &self,
        _video_id: &VideoId,
    ) -> tubescript_core::Result<Vec<TranscriptTrack>> {
        panic!("captions backend blew up")
    }

    async fn fetch_track(
        &self,
        _video_id: &VideoId,
        _track: &TranscriptTrack,
    ) -> tubescript_core::Result<Vec<TranscriptLine>> {
        panic!("captions backend blew up")
    }
}

struct StaticMetadata;

#[async_trait]
impl MetadataSource for StaticMetadata {
    async fn video_metadata(&self, _video_id: &VideoId) -> tubescript_core::Result<VideoMetadata> {
        Ok(VideoMetadata {
            title: Some("Test title".to_string()),
            channel: Some("Test channel".to_string()),
        })
    }
}

fn router(lines: Option<Vec<TranscriptLine>>) -> axum::Router {
    let resolver = TranscriptResolver::new(
        Arc::new(StaticCaptions { lines }),
        Arc::new(StaticMetadata),
    );
    app(AppState::new(resolver, ServerConfig::default()))
}

fn working_router() -> axum::Router {
    router(Some(vec![
        TranscriptLine::new("hello", 0.0, 1.5),
        TranscriptLine::new("world", 1.5, 2.0),
    ]))
}

async fn send(router: axum::Router, method: Method, uri: &str) -> Response {
    router
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn assert_cors(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, OPTIONS");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "Content-Type, Authorization"
    );
}

#[tokio::test]
async fn get_transcript_success() {
    let response = send(
        working_router(),
        Method::GET,
        "/api/get_transcript?videoId=https%3A%2F%2Fyoutu.be%2Fabc123&languages=de",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["languageUsed"], "de");
    assert_eq!(body["transcript"][0]["text"], "hello");
    assert_eq!(body["transcript"][1]["start"], 1.5);
    assert_eq!(body["videoInfo"]["title"], "Test title");
    assert_eq!(body["videoInfo"]["channel"], "Test channel");
    assert!(body["error"].is_null());
    assert!(body.get("debug").is_none());
}

#[tokio::test]
async fn missing_video_id_is_bad_request() {
    for uri in [
        "/api/get_transcript",
        "/api/get_transcript?languages=en",
        "/api/get_transcript?videoId=%20",
    ] {
        let response = send(working_router(), Method::GET, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        assert_cors(&response);

        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Missing videoId parameter");
        assert!(body["transcript"].is_null());
    }
}

#[tokio::test]
async fn options_preflight() {
    let response = send(working_router(), Method::OPTIONS, "/api/get_transcript").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_MAX_AGE], "86400");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn other_methods_are_rejected() {
    for method in [Method::POST, Method::PUT, Method::DELETE] {
        let response = send(
            working_router(),
            method.clone(),
            "/api/get_transcript?videoId=abc",
        )
        .await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{}", method);
        assert_cors(&response);
        assert_eq!(response.headers()[header::ALLOW], "GET, OPTIONS");

        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Method not allowed");
    }
}

#[tokio::test]
async fn head_is_rejected_without_resolving() {
    let resolver = TranscriptResolver::new(Arc::new(PanickingCaptions), Arc::new(StaticMetadata));
    let router = app(AppState::new(resolver, ServerConfig::default()));

    let response = send(router, Method::HEAD, "/api/get_transcript?videoId=abc").await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_cors(&response);
    assert_eq!(response.headers()[header::ALLOW], "GET, OPTIONS");
}

#[tokio::test]
async fn handler_panic_becomes_internal_error() {
    let resolver = TranscriptResolver::new(Arc::new(PanickingCaptions), Arc::new(StaticMetadata));
    let router = app(AppState::new(resolver, ServerConfig::default()));

    let response = send(router, Method::GET, "/api/get_transcript?videoId=abc").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&response);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Internal server error");
    assert!(body["transcript"].is_null());
}

#[tokio::test]
async fn resolver_failure_is_still_ok() {
    let response = send(router(None), Method::GET, "/api/get_transcript?videoId=abc123").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "No transcript available for video abc123 in languages: en"
    );
    assert_eq!(body["videoInfo"]["title"], "Test title");
    assert!(body["transcript"].is_null());
    assert!(body.get("languageUsed").is_none());
}

#[tokio::test]
async fn debug_flag_adds_debug_object() {
    let response = send(
        working_router(),
        Method::GET,
        "/api/get_transcript?videoId=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3Dabc123&debug=true",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);

    let debug = &body["debug"];
    assert_eq!(debug["videoId"], "abc123");
    assert_eq!(debug["input"], "https://www.youtube.com/watch?v=abc123");
    assert_eq!(debug["languages"], serde_json::json!(["en"]));
    assert!(debug["elapsedMs"].is_u64());
    assert!(debug["stages"].as_array().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn health_check() {
    let response = send(working_router(), Method::GET, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(json_body(response).await, serde_json::json!({ "status": "ok" }));
}

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tower_http::{
    catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::info;
use tubescript_core::{
    normalize, LanguagePreference, ServiceConfig, StageAttempt, TranscriptResolver, VideoId,
};

use crate::config::ServerConfig;
use crate::error::{handle_panic, ApiError};

const CORS_ALLOW_ORIGIN: &str = "*";
const CORS_ALLOW_METHODS: &str = "GET, OPTIONS";
const CORS_ALLOW_HEADERS: &str = "Content-Type, Authorization";
const CORS_MAX_AGE: &str = "86400";

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub resolver: TranscriptResolver,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(resolver: TranscriptResolver, config: ServerConfig) -> Self {
        Self {
            resolver,
            config: Arc::new(config),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/get_transcript",
            get(get_transcript)
                .head(method_not_allowed)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(CORS_ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ))
}

/// Query parameters of a transcript request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptQuery {
    pub video_id: Option<String>,
    pub languages: LanguagePreference,
    pub debug: bool,
}

impl TranscriptQuery {
    /// Parse a raw query string. `languages` may repeat and keeps its order;
    /// unknown keys are ignored.
    pub fn parse(raw: Option<&str>, default_language: &str) -> Self {
        let mut video_id = None;
        let mut languages = Vec::new();
        let mut debug = false;

        for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "videoId" if video_id.is_none() => {
                    let value = value.trim();
                    if !value.is_empty() {
                        video_id = Some(value.to_string());
                    }
                }
                "languages" => languages.push(value.into_owned()),
                "debug" => debug = value.eq_ignore_ascii_case("true"),
                _ => {}
            }
        }

        Self {
            video_id,
            languages: LanguagePreference::new(languages, default_language),
            debug,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DebugInfo<'a> {
    input: &'a str,
    video_id: &'a VideoId,
    languages: &'a LanguagePreference,
    stages: &'a [StageAttempt],
    elapsed_ms: u64,
    config: &'a ServiceConfig,
}

async fn get_transcript(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Response, ApiError> {
    let started = Instant::now();
    let query = TranscriptQuery::parse(raw.as_deref(), &state.config.service.default_language);
    let input = query.video_id.ok_or(ApiError::MissingVideoId)?;
    let video_id = normalize(&input);

    info!(
        video_id = %video_id,
        languages = %query.languages.joined(),
        debug = query.debug,
        "Processing transcript request"
    );

    let result = state.resolver.resolve(&video_id, &query.languages).await;

    let mut body = serde_json::to_value(&result)?;
    if query.debug {
        let debug = DebugInfo {
            input: &input,
            video_id: &video_id,
            languages: &query.languages,
            stages: result.trace(),
            elapsed_ms: started.elapsed().as_millis() as u64,
            config: &state.config.service,
        };
        let debug = serde_json::to_value(&debug)?;
        match body.as_object_mut() {
            Some(obj) => {
                obj.insert("debug".to_string(), debug);
            }
            None => {
                return Err(ApiError::Internal(
                    "transcript result did not serialize to an object".to_string(),
                ))
            }
        }
    }

    info!(
        video_id = %video_id,
        success = result.success(),
        language_used = result.language_used().unwrap_or_default(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Transcript request finished"
    );

    Ok((StatusCode::OK, Json::<Value>(body)).into_response())
}

async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::ACCESS_CONTROL_MAX_AGE, CORS_MAX_AGE)],
    )
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn health_handler() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

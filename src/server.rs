//! JSON API in front of the orchestrator.
//!
//! Every route answers `{ "success": bool, "data"?: ..., "error"?: string }`.
//! A missing video is a 400; any other failure is a 500. Bodies that fail to
//! deserialize keep axum's rejection status but use the same envelope.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::collaborator::{LanguageDetector, Summarizer, TranscriptService};
use crate::config::{Defaults, Overrides};
use crate::{Orchestrator, ProcessError, ProcessingResult, SummaryType, TranscriptInfo, VideoSummary};

struct AppState<T, S, D> {
    orchestrator: Orchestrator<T, S, D>,
    defaults: Defaults,
}

type SharedState<T, S, D> = State<Arc<AppState<T, S, D>>>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    #[serde(default)]
    pub video: String,
    #[serde(default)]
    pub languages: Vec<String>,
    pub model: Option<String>,
    pub summary_type: Option<SummaryType>,
    #[serde(default)]
    pub show_transcript: bool,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    #[serde(default)]
    pub video: String,
    #[serde(default)]
    pub languages: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListTranscriptsRequest {
    #[serde(default)]
    pub video: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptData {
    pub video_id: String,
    pub transcript: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTranscriptsData {
    pub video_id: String,
    pub transcripts: Vec<TranscriptInfo>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

type Reply<T> = (StatusCode, Json<ApiResponse<T>>);

fn ok<T>(data: T) -> Reply<T> {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }),
    )
}

fn failed<T>(route: &str, err: &ProcessError) -> Reply<T> {
    let status = if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        error!("Error in {route} API: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(err.to_string()),
        }),
    )
}

fn rejected<T>(route: &str, rejection: JsonRejection) -> Reply<T> {
    let message = rejection.body_text();
    warn!("Rejected {route} request: {message}");

    (
        rejection.status(),
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }),
    )
}

/// Build the API router around an orchestrator
pub fn router<T, S, D>(orchestrator: Orchestrator<T, S, D>, defaults: Defaults) -> Router
where
    T: TranscriptService + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    D: LanguageDetector + Send + Sync + 'static,
{
    let state = Arc::new(AppState { orchestrator, defaults });

    Router::new()
        .route("/api/summarize", post(summarize::<T, S, D>))
        .route("/api/transcript", post(transcript::<T, S, D>))
        .route("/api/list-transcripts", post(list_transcripts::<T, S, D>))
        .with_state(state)
}

/// Serve the API until the process is stopped
pub async fn serve<T, S, D>(listen: &str, orchestrator: Orchestrator<T, S, D>, defaults: Defaults) -> eyre::Result<()>
where
    T: TranscriptService + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    D: LanguageDetector + Send + Sync + 'static,
{
    let listener = tokio::net::TcpListener::bind(listen).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(orchestrator, defaults)).await?;
    Ok(())
}

async fn summarize<T, S, D>(
    State(state): SharedState<T, S, D>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Reply<VideoSummary>
where
    T: TranscriptService + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    D: LanguageDetector + Send + Sync + 'static,
{
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected("summarize", rejection),
    };

    let options = state.defaults.options(Overrides {
        languages: req.languages,
        model: req.model,
        summary_type: req.summary_type,
        show_transcript: req.show_transcript,
    });

    match state.orchestrator.process(&req.video, &options).await {
        ProcessingResult::Success(summary) => ok(summary),
        ProcessingResult::Failure(err) => failed("summarize", &err),
    }
}

async fn transcript<T, S, D>(
    State(state): SharedState<T, S, D>,
    payload: Result<Json<TranscriptRequest>, JsonRejection>,
) -> Reply<TranscriptData>
where
    T: TranscriptService + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    D: LanguageDetector + Send + Sync + 'static,
{
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected("transcript", rejection),
    };

    let options = state.defaults.transcript_options(req.languages);

    match state.orchestrator.process(&req.video, &options).await {
        ProcessingResult::Success(summary) => ok(TranscriptData {
            video_id: summary.video_id,
            transcript: summary.transcript.unwrap_or_default().trim().to_string(),
        }),
        ProcessingResult::Failure(err) => failed("transcript", &err),
    }
}

async fn list_transcripts<T, S, D>(
    State(state): SharedState<T, S, D>,
    payload: Result<Json<ListTranscriptsRequest>, JsonRejection>,
) -> Reply<ListTranscriptsData>
where
    T: TranscriptService + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    D: LanguageDetector + Send + Sync + 'static,
{
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected("list-transcripts", rejection),
    };

    match state.orchestrator.list_transcripts(&req.video).await {
        Ok(listing) => ok(ListTranscriptsData {
            video_id: listing.video_id,
            transcripts: listing.transcripts,
        }),
        Err(err) => failed("list-transcripts", &err),
    }
}

/// API route handlers for Vidrelay.
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use vidrelay_shared::RelayError;

use crate::AppState;

/// Content type forced on every relayed body.
const RELAY_CONTENT_TYPE: &str = "video/mp4";

// ====== REQUEST / RESPONSE TYPES ======

#[derive(Serialize)]
pub struct VideoUrlResponse {
    #[serde(rename = "videoUrl")]
    pub video_url: Option<String>,
}

#[derive(Deserialize)]
pub struct ProxyQuery {
    pub url: Option<String>,
}

pub type ErrorResponse = (StatusCode, Json<serde_json::Value>);

/// Convert a relay error into its JSON response. `context` labels
/// unexpected failures, which also carry the underlying message.
fn error_response(err: &RelayError, context: &str) -> ErrorResponse {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match err {
        RelayError::NoMatchingStream(available) => serde_json::json!({
            "error": err.to_string(),
            "available": available,
        }),
        e if e.is_unexpected() => serde_json::json!({
            "error": context,
            "details": e.to_string(),
        }),
        e => serde_json::json!({ "error": e.to_string() }),
    };

    (status, Json(body))
}

// ====== RESOLVER ======

/// GET /api/video/:id - Resolve a playable MP4 stream URL
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> Result<Json<VideoUrlResponse>, ErrorResponse> {
    match state.upstream.resolve_stream(&video_id).await {
        Ok(stream) => Ok(Json(VideoUrlResponse {
            video_url: stream.descriptor.url,
        })),
        Err(e) => {
            if e.is_unexpected() {
                error!("Error fetching video {}: {}", video_id, e);
            } else {
                info!("Video {} not resolved: {}", video_id, e);
            }
            Err(error_response(&e, "Server error"))
        }
    }
}

// ====== RELAY ======

/// GET /proxy-video?url= - Relay media bytes as video/mp4
pub async fn proxy_video(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProxyQuery>,
) -> Result<Response, ErrorResponse> {
    let url = query
        .url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| error_response(&RelayError::MissingParameter("url"), "Proxy error"))?;

    let upstream = state.upstream.open_media(&url).await.map_err(|e| {
        if e.is_unexpected() {
            error!("Proxy error for {}: {}", url, e);
        }
        error_response(&e, "Proxy error")
    })?;

    let content_length = upstream.content_length();

    // Dropping the body (client gone) drops the upstream response with it.
    let source = url.clone();
    let stream = upstream
        .bytes_stream()
        .inspect_err(move |e| warn!("Relay from {} interrupted: {}", source, e));

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, RELAY_CONTENT_TYPE);
    if let Some(len) = content_length {
        builder = builder.header(header::CONTENT_LENGTH, len);
    }

    builder.body(Body::from_stream(stream)).map_err(|e| {
        error!("Failed to build relay response for {}: {}", url, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "Proxy error", "details": e.to_string() })),
        )
    })
}

/// HTTP client for the upstream video metadata/media service.
use std::time::Duration;

use tracing::{info, warn};

use crate::errors::{RelayError, RelayResult};
use crate::models::{AvailableStreams, ResolvedStream, VideoMetadata};
use crate::selection::select_stream;

/// Stateless handle to the upstream service.
///
/// Wraps a single `reqwest::Client` so outbound connections are pooled.
/// Cloning is cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    /// Build a client for `base_url`. With `connect_timeout` unset, outbound
    /// calls wait as long as the underlying transport allows.
    pub fn new(base_url: impl Into<String>, connect_timeout: Option<Duration>) -> RelayResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Metadata endpoint for a video identifier.
    pub fn video_endpoint(&self, video_id: &str) -> String {
        format!("{}/api/v1/videos/{}", self.base_url, video_id)
    }

    /// Fetch and decode metadata for `video_id`.
    pub async fn fetch_video(&self, video_id: &str) -> RelayResult<VideoMetadata> {
        let endpoint = self.video_endpoint(video_id);
        let resp = self.http.get(&endpoint).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            warn!("Upstream metadata error {} for video {}", status, video_id);
            return Err(RelayError::UpstreamStatus(status));
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch metadata for `video_id` and pick one playable MP4 stream.
    pub async fn resolve_stream(&self, video_id: &str) -> RelayResult<ResolvedStream> {
        let metadata = self.fetch_video(video_id).await?;

        match select_stream(&metadata) {
            Some(stream) => {
                info!(
                    "Resolved video {} to {} stream (itag {:?})",
                    video_id, stream.kind, stream.descriptor.itag
                );
                Ok(stream)
            }
            None => Err(RelayError::NoMatchingStream(Box::new(AvailableStreams::from(
                metadata,
            )))),
        }
    }

    /// Open a media URL for relaying. The returned response has only its
    /// headers read; the body is left for the caller to stream.
    pub async fn open_media(&self, url: &str) -> RelayResult<reqwest::Response> {
        let resp = self.http.get(url).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            warn!("Upstream media error {} for {}", status, url);
            return Err(RelayError::StreamUnavailable(status));
        }

        Ok(resp)
    }
}

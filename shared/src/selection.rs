/// MP4 stream selection policy.
///
/// Rules are tried in order and the first hit wins:
/// 1. progressive stream with itag 18 (MP4 360p)
/// 2. first progressive stream whose MIME type contains `video/mp4`
/// 3. first adaptive stream whose MIME type contains `video/mp4`
///
/// Upstream order is kept as-is; nothing is re-sorted.
use crate::models::{ResolvedStream, StreamDescriptor, StreamKind, VideoMetadata};

/// Progressive MP4 360p format code on the upstream service.
pub const PROGRESSIVE_MP4_ITAG: u32 = 18;

/// MIME fragment identifying an MP4 video stream.
pub const MP4_MIME: &str = "video/mp4";

fn first_match<'a, F>(streams: Option<&'a [StreamDescriptor]>, pred: F) -> Option<&'a StreamDescriptor>
where
    F: Fn(&StreamDescriptor) -> bool,
{
    streams.and_then(|s| s.iter().find(|&d| pred(d)))
}

/// Pick one playable MP4 stream from the upstream metadata.
pub fn select_stream(metadata: &VideoMetadata) -> Option<ResolvedStream> {
    let progressive = metadata.format_streams.as_deref();
    let adaptive = metadata.adaptive_formats.as_deref();

    first_match(progressive, |d| d.has_itag(PROGRESSIVE_MP4_ITAG))
        .or_else(|| first_match(progressive, |d| d.mime_contains(MP4_MIME)))
        .map(|d| ResolvedStream {
            descriptor: d.clone(),
            kind: StreamKind::Progressive,
        })
        .or_else(|| {
            first_match(adaptive, |d| d.mime_contains(MP4_MIME)).map(|d| ResolvedStream {
                descriptor: d.clone(),
                kind: StreamKind::Adaptive,
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(json: serde_json::Value) -> VideoMetadata {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_itag_18_wins_even_when_listed_later() {
        let m = metadata(serde_json::json!({
            "formatStreams": [
                { "itag": "22", "mimeType": "video/mp4", "url": "u1" },
                { "itag": 18, "mimeType": "video/mp4", "url": "u2" }
            ]
        }));
        let picked = select_stream(&m).unwrap();
        assert_eq!(picked.url(), Some("u2"));
        assert_eq!(picked.kind, StreamKind::Progressive);
    }

    #[test]
    fn test_itag_18_beats_mime_type() {
        // itag 18 wins even if its MIME type does not say mp4
        let m = metadata(serde_json::json!({
            "formatStreams": [
                { "itag": 22, "mimeType": "video/mp4", "url": "mp4" },
                { "itag": "18", "mimeType": "video/webm", "url": "tagged" }
            ]
        }));
        assert_eq!(select_stream(&m).unwrap().url(), Some("tagged"));
    }

    #[test]
    fn test_first_progressive_mp4() {
        let m = metadata(serde_json::json!({
            "formatStreams": [
                { "itag": 43, "mimeType": "video/webm", "url": "webm" },
                { "itag": 22, "mimeType": "video/mp4; codecs=\"avc1\"", "url": "first" },
                { "itag": 37, "mimeType": "video/mp4", "url": "second" }
            ],
            "adaptiveFormats": [
                { "itag": 137, "mimeType": "video/mp4", "url": "adaptive" }
            ]
        }));
        assert_eq!(select_stream(&m).unwrap().url(), Some("first"));
    }

    #[test]
    fn test_falls_back_to_adaptive() {
        let m = metadata(serde_json::json!({
            "formatStreams": [
                { "itag": 43, "mimeType": "video/webm", "url": "webm" }
            ],
            "adaptiveFormats": [
                { "itag": 140, "mimeType": "audio/mp4", "url": "audio" },
                { "itag": 137, "mimeType": "video/mp4", "url": "video-a" },
                { "itag": 136, "mimeType": "video/mp4", "url": "video-b" }
            ]
        }));
        let picked = select_stream(&m).unwrap();
        assert_eq!(picked.url(), Some("video-a"));
        assert_eq!(picked.kind, StreamKind::Adaptive);
    }

    #[test]
    fn test_absent_progressive_uses_adaptive() {
        let m = metadata(serde_json::json!({
            "adaptiveFormats": [ { "mimeType": "video/mp4", "url": "only" } ]
        }));
        assert_eq!(select_stream(&m).unwrap().url(), Some("only"));
    }

    #[test]
    fn test_no_match() {
        let m = metadata(serde_json::json!({
            "formatStreams": [ { "itag": 43, "mimeType": "video/webm", "url": "webm" } ],
            "adaptiveFormats": [ { "itag": 251, "mimeType": "audio/webm", "url": "opus" } ]
        }));
        assert!(select_stream(&m).is_none());
        assert!(select_stream(&VideoMetadata::default()).is_none());
    }

    #[test]
    fn test_adaptive_itag_18_not_preferred() {
        // itag preference only applies to progressive streams
        let m = metadata(serde_json::json!({
            "adaptiveFormats": [
                { "itag": 18, "mimeType": "video/webm", "url": "tagged" },
                { "itag": 137, "mimeType": "video/mp4", "url": "mp4" }
            ]
        }));
        assert_eq!(select_stream(&m).unwrap().url(), Some("mp4"));
    }
}

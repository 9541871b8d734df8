/// Upstream payload models shared across Vidrelay crates.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upstream format code. The service sends it either as a JSON number or
/// as a numeric string, so both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Itag {
    Number(serde_json::Number),
    Text(String),
    /// Any other JSON shape. Kept so one odd entry does not fail the whole
    /// payload; it never matches a format code.
    Other(Value),
}

impl Itag {
    /// Numeric value of the tag, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Itag::Number(n) => n.as_f64(),
            Itag::Text(s) => s.trim().parse::<f64>().ok(),
            Itag::Other(_) => None,
        }
    }

    /// Check whether the tag numerically equals `code`.
    pub fn is(&self, code: u32) -> bool {
        self.as_number() == Some(f64::from(code))
    }
}

/// One candidate stream as reported by the upstream service. Only the
/// fields used for selection are typed; the rest are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    #[serde(default)]
    pub itag: Option<Itag>,
    #[serde(rename = "mimeType", default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl StreamDescriptor {
    /// Whether the declared MIME type contains `needle`. Absent MIME never matches.
    pub fn mime_contains(&self, needle: &str) -> bool {
        self.mime_type
            .as_deref()
            .map(|m| m.contains(needle))
            .unwrap_or(false)
    }

    /// Whether the itag numerically equals `code`. Absent itag never matches.
    pub fn has_itag(&self, code: u32) -> bool {
        self.itag.as_ref().map(|t| t.is(code)).unwrap_or(false)
    }
}

/// Subset of the upstream `/api/v1/videos/{id}` response used for stream
/// resolution. Both sequences may be missing or `null`.
///
/// The typed sequences drive selection; `raw` holds the sequences exactly as
/// the upstream sent them, for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "AvailableStreams")]
pub struct VideoMetadata {
    pub format_streams: Option<Vec<StreamDescriptor>>,
    pub adaptive_formats: Option<Vec<StreamDescriptor>>,
    pub raw: AvailableStreams,
}

impl TryFrom<AvailableStreams> for VideoMetadata {
    type Error = serde_json::Error;

    fn try_from(raw: AvailableStreams) -> Result<Self, Self::Error> {
        fn typed(seq: &Option<Value>) -> serde_json::Result<Option<Vec<StreamDescriptor>>> {
            seq.as_ref().map(|v| serde_json::from_value(v.clone())).transpose()
        }

        Ok(Self {
            format_streams: typed(&raw.format_streams)?,
            adaptive_formats: typed(&raw.adaptive_formats)?,
            raw,
        })
    }
}

/// Which upstream sequence a resolved stream came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    Progressive,
    Adaptive,
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamKind::Progressive => write!(f, "progressive"),
            StreamKind::Adaptive => write!(f, "adaptive"),
        }
    }
}

/// The descriptor picked by the selection policy for a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStream {
    pub descriptor: StreamDescriptor,
    pub kind: StreamKind,
}

impl ResolvedStream {
    pub fn url(&self) -> Option<&str> {
        self.descriptor.url.as_deref()
    }
}

/// Upstream stream sequences, untouched. Returned as the diagnostic payload
/// when no MP4 stream matches; absent sequences serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailableStreams {
    #[serde(rename = "formatStreams", default)]
    pub format_streams: Option<Value>,
    #[serde(rename = "adaptiveFormats", default)]
    pub adaptive_formats: Option<Value>,
}

impl From<VideoMetadata> for AvailableStreams {
    fn from(metadata: VideoMetadata) -> Self {
        metadata.raw
    }
}

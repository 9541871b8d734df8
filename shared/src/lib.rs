/// Shared building blocks for Vidrelay.
///
/// Holds the upstream data model, the MP4 stream selection policy, the error
/// taxonomy, and the HTTP client used to reach the upstream service.
pub mod errors;
pub mod models;
pub mod selection;
pub mod upstream;

pub use errors::{RelayError, RelayResult};
pub use models::{AvailableStreams, Itag, ResolvedStream, StreamDescriptor, VideoMetadata};
pub use upstream::UpstreamClient;

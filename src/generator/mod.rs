pub mod http;
pub mod mock;

use anyhow::Result;
use async_trait::async_trait;

/// What the service hands back for a finished generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedVideo {
    /// Location of the artifact, exactly as the service returned it —
    /// a path relative to the service base (e.g. `/videos/abc.mp4`).
    pub video_url: String,
}

/// The transport seam. Could be the real HTTP service or a test script.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, topic: &str) -> Result<GeneratedVideo>;
}

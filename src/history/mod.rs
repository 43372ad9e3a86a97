pub mod sqlite;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One completed generation: the topic asked for and where the video ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub topic: String,
    pub video_url: String,
}

/// A record of past generations. Could be in-memory, SQLite, etc.
#[async_trait]
pub trait History: Send + Sync {
    async fn record(&self, entry: HistoryEntry) -> Result<()>;
    /// The last `limit` entries, oldest first.
    async fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>>;
    async fn clear(&self) -> Result<()>;
}

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{GeneratedVideo, Generator};

/// What a scripted call should produce.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Resolve with this video location.
    Url(String),
    /// Fail with this error text (stands in for network/status/body errors).
    Error(String),
}

/// A scripted generator for tests. Returns pre-defined outcomes in order
/// and counts calls, so tests can assert the one-call-per-submit rule.
pub struct MockGenerator {
    outcomes: Vec<Scripted>,
    index: AtomicUsize,
}

impl MockGenerator {
    pub fn new(outcomes: Vec<Scripted>) -> Self {
        Self {
            outcomes,
            index: AtomicUsize::new(0),
        }
    }

    /// How many times `generate` has been called.
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, _topic: &str) -> Result<GeneratedVideo> {
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        let outcome = self.outcomes.get(i).ok_or_else(|| {
            anyhow::anyhow!("MockGenerator: no more outcomes (called {} times)", i + 1)
        })?;
        match outcome {
            Scripted::Url(url) => Ok(GeneratedVideo {
                video_url: url.clone(),
            }),
            Scripted::Error(msg) => Err(anyhow::anyhow!("{msg}")),
        }
    }
}

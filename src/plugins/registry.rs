use async_trait::async_trait;
use crate::core::error::{Result, SplitMergeError};
use crate::core::events::EventSender;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_STREAM_CHUNK_SIZE: usize = 2 * 1024 * 1024;
pub const MAX_STREAM_CHUNK_SIZE: usize = 1024 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct MergeContext {
    /// Read buffer size for the stream strategy.
    pub chunk_size: usize,
    pub events: Option<EventSender>,
}

impl Default for MergeContext {
    fn default() -> Self {
        Self { chunk_size: DEFAULT_STREAM_CHUNK_SIZE, events: None }
    }
}

/// Concatenates `inputs`, in order, into `output`.
///
/// Every implementation produces the same bytes for the same input list;
/// they differ only in peak memory and file handle usage.
#[async_trait]
pub trait MergeStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn merge(&self, inputs: &[PathBuf], output: &Path, ctx: &MergeContext) -> Result<PathBuf>;
}

pub fn ensure_inputs(inputs: &[PathBuf]) -> Result<()> {
    if inputs.is_empty() {
        return Err(SplitMergeError::InvalidArgument(
            "merge needs at least one input file".to_string(),
        ));
    }
    Ok(())
}

pub struct MergeRegistry {
    strategies: Vec<Arc<dyn MergeStrategy>>,
}

impl MergeRegistry {
    pub fn with_defaults() -> Self {
        let mut reg = Self { strategies: vec![] };

        reg.strategies.push(Arc::new(crate::plugins::merge::append::AppendMerge::new()));
        reg.strategies.push(Arc::new(crate::plugins::merge::buffer::BufferMerge::new()));
        reg.strategies.push(Arc::new(crate::plugins::merge::stream::StreamMerge::new()));
        reg
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn MergeStrategy>> {
        self.strategies.iter().find(|s| s.name() == name).cloned()
    }
}

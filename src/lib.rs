//! Split a file into contiguous byte-range parts and merge part files back.
//!
//! Parts are written next to the source as `<file>-chunk-<index>`, the index
//! zero-padded to the digit count of the number of parts. No manifest is kept:
//! the caller passes the part list back to one of the merge functions in order.

pub mod core;
pub mod plugins;

use crate::core::model::PlanMode;
use crate::core::splitter::FileSplitter;
use crate::plugins::merge::{append::AppendMerge, buffer::BufferMerge, stream::StreamMerge};
use crate::plugins::registry::{MergeContext, MergeStrategy};
use std::path::{Path, PathBuf};

pub use crate::core::error::{Result, SplitMergeError};
pub use crate::core::model::{PartPlan, PartRange};
pub use crate::plugins::registry::DEFAULT_STREAM_CHUNK_SIZE;

/// Splits `path` into `parts` parts; the last part takes the remainder.
pub async fn split_by_parts(path: impl AsRef<Path>, parts: u64) -> Result<Vec<PathBuf>> {
    FileSplitter::default().split(path.as_ref(), PlanMode::ByCount(parts)).await
}

/// Splits `path` into parts of at most `max_part_bytes` bytes.
pub async fn split_by_sizes(path: impl AsRef<Path>, max_part_bytes: u64) -> Result<Vec<PathBuf>> {
    FileSplitter::default().split(path.as_ref(), PlanMode::ByMaxSize(max_part_bytes)).await
}

/// Splits `path` along an already computed plan.
pub async fn split_file(path: impl AsRef<Path>, plan: &PartPlan) -> Result<Vec<PathBuf>> {
    FileSplitter::default().split_with_plan(path.as_ref(), plan).await
}

/// Merges by appending one fully read input at a time.
pub async fn fs_merge(parts: &[PathBuf], output: impl AsRef<Path>) -> Result<PathBuf> {
    AppendMerge::new().merge(parts, output.as_ref(), &MergeContext::default()).await
}

/// Merges by concatenating all inputs in memory and writing once.
pub async fn buffer_merge(parts: &[PathBuf], output: impl AsRef<Path>) -> Result<PathBuf> {
    BufferMerge::new().merge(parts, output.as_ref(), &MergeContext::default()).await
}

/// Merges by streaming each input through a `chunk_size` buffer into one
/// open output. [`DEFAULT_STREAM_CHUNK_SIZE`] is 2 MiB.
pub async fn stream_merge(parts: &[PathBuf], output: impl AsRef<Path>, chunk_size: usize) -> Result<PathBuf> {
    let ctx = MergeContext { chunk_size, events: None };
    StreamMerge::new().merge(parts, output.as_ref(), &ctx).await
}

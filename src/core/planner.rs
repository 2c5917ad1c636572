use crate::core::error::{IoContext, Result, SplitMergeError};
use crate::core::model::{PartPlan, PartRange, PlanMode, SourceFileMeta};
use std::path::Path;
use tracing::debug;

/// Equal parts of `total / parts` bytes; the last part also takes the remainder.
pub fn plan_by_count(total: u64, parts: u64) -> Result<PartPlan> {
    check_part_count(parts)?;
    check_total(total)?;

    let split_size = total / parts;
    if split_size < 1 {
        return Err(SplitMergeError::TooManyParts(format!(
            "{} parts requested for {} bytes",
            parts, total
        )));
    }
    let last_size = split_size + total % parts;

    let ranges = (0..parts)
        .map(|i| {
            let start = i * split_size;
            let len = if i == parts - 1 { last_size } else { split_size };
            PartRange { index: i, start, end: start + len }
        })
        .collect();

    Ok(PartPlan { total_size: total, ranges })
}

fn check_part_count(parts: u64) -> Result<()> {
    if parts < 1 {
        return Err(SplitMergeError::InvalidArgument(format!(
            "part count must be at least 1, got {}",
            parts
        )));
    }
    Ok(())
}

fn check_total(total: u64) -> Result<()> {
    if total == 0 {
        return Err(SplitMergeError::TooManyParts("nothing to split in 0 bytes".to_string()));
    }
    Ok(())
}

/// Converts a signed count or size from user input, rejecting negatives.
/// Zero passes through and is judged by the planner.
pub fn non_negative(name: &str, v: i64) -> Result<u64> {
    u64::try_from(v)
        .map_err(|_| SplitMergeError::InvalidArgument(format!("{} must not be negative, got {}", name, v)))
}

/// Parts of `max_size` bytes; the last one is clamped to `total`.
pub fn plan_by_max_size(total: u64, max_size: u64) -> Result<PartPlan> {
    if max_size < 1 {
        return Err(SplitMergeError::TooManyParts(format!(
            "part size must be at least 1 byte ({} bytes total)",
            total
        )));
    }
    check_total(total)?;

    let mut ranges = Vec::with_capacity(total.div_ceil(max_size) as usize);
    let mut offset = 0u64;
    while offset < total {
        let len = (total - offset).min(max_size);
        ranges.push(PartRange { index: ranges.len() as u64, start: offset, end: offset + len });
        offset += len;
    }

    Ok(PartPlan { total_size: total, ranges })
}

pub async fn read_source_meta(path: &Path) -> Result<SourceFileMeta> {
    let md = tokio::fs::metadata(path)
        .await
        .io_context(|| format!("stat {}", path.display()))?;

    if !md.is_file() {
        return Err(SplitMergeError::NotAFile(path.to_path_buf()));
    }
    if md.len() == 0 {
        return Err(SplitMergeError::EmptyFile(path.to_path_buf()));
    }

    Ok(SourceFileMeta { path: path.to_path_buf(), size: md.len() })
}

pub async fn plan_file(path: &Path, mode: PlanMode) -> Result<PartPlan> {
    // argument checks come before any filesystem access
    if let PlanMode::ByCount(parts) = mode {
        check_part_count(parts)?;
    }

    let meta = read_source_meta(path).await?;
    let plan = match mode {
        PlanMode::ByCount(parts) => plan_by_count(meta.size, parts)?,
        PlanMode::ByMaxSize(max) => plan_by_max_size(meta.size, max)?,
    };
    debug!(path = %meta.path.display(), size = meta.size, ?mode, parts = plan.part_count(), "planned split");
    Ok(plan)
}

pub async fn plan_file_by_count(path: &Path, parts: u64) -> Result<PartPlan> {
    plan_file(path, PlanMode::ByCount(parts)).await
}

pub async fn plan_file_by_max_size(path: &Path, max_size: u64) -> Result<PartPlan> {
    plan_file(path, PlanMode::ByMaxSize(max_size)).await
}

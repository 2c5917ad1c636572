use std::path::PathBuf;

/// One contiguous byte range `[start, end)` of the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartRange {
    pub index: u64,
    pub start: u64,
    pub end: u64,
}

impl PartRange {
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub struct SourceFileMeta {
    pub path: PathBuf,
    pub size: u64,
}

/// Ordered ranges covering `0..total_size` without gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartPlan {
    pub total_size: u64,
    pub ranges: Vec<PartRange>,
}

impl PartPlan {
    pub fn part_count(&self) -> u64 {
        self.ranges.len() as u64
    }

    pub fn sizes(&self) -> Vec<u64> {
        self.ranges.iter().map(PartRange::len).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMode {
    ByCount(u64),
    ByMaxSize(u64),
}

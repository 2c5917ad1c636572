use crate::core::assembler::Assembler;
use crate::core::error::{IoContext, Result, SplitMergeError};
use crate::core::events::{emit, EventSender, OperationKind, ToolEvent};
use crate::core::model::{PartPlan, PlanMode};
use crate::core::naming::part_path;
use crate::core::planner::plan_file;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::{debug, info};

const COPY_BUF_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Default)]
pub struct SplitContext {
    pub events: Option<EventSender>,
}

#[derive(Debug, Clone, Default)]
pub struct FileSplitter {
    ctx: SplitContext,
}

impl FileSplitter {
    pub fn new(ctx: SplitContext) -> Self {
        Self { ctx }
    }

    pub async fn split(&self, path: &Path, mode: PlanMode) -> Result<Vec<PathBuf>> {
        let plan = plan_file(path, mode).await?;
        self.split_with_plan(path, &plan).await
    }

    /// Writes one part file per range, in index order, one part at a time.
    /// A failure leaves the parts written so far on disk.
    pub async fn split_with_plan(&self, path: &Path, plan: &PartPlan) -> Result<Vec<PathBuf>> {
        if plan.ranges.is_empty() {
            return Err(SplitMergeError::InvalidArgument("plan has no ranges".to_string()));
        }
        let total = plan.part_count();
        info!(source = %path.display(), parts = total, bytes = plan.total_size, "split started");
        emit(
            self.ctx.events.as_ref(),
            ToolEvent::PlanReady { source: path.to_path_buf(), parts: total, total_bytes: plan.total_size },
        );

        let mut buf = vec![0u8; COPY_BUF_SIZE];
        let mut part_files = Vec::with_capacity(plan.ranges.len());

        for range in &plan.ranges {
            let part_name = part_path(path, range.index, total);

            let mut reader = File::open(path)
                .await
                .io_context(|| format!("open {}", path.display()))?;
            reader
                .seek(SeekFrom::Start(range.start))
                .await
                .io_context(|| format!("seek {} to {}", path.display(), range.start))?;
            let mut reader = reader.take(range.len());

            let mut writer = Assembler::create(&part_name).await?;
            let copied = writer.copy_from(&mut reader, &mut buf, path).await?;
            if copied != range.len() {
                return Err(SplitMergeError::Io {
                    context: format!("read {} range {}..{}", path.display(), range.start, range.end),
                    source: std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        format!("expected {} bytes, got {}", range.len(), copied),
                    ),
                });
            }
            let part_name = writer.finish().await?;

            debug!(part = %part_name.display(), index = range.index, bytes = copied, "part written");
            emit(
                self.ctx.events.as_ref(),
                ToolEvent::PartWritten {
                    index: range.index,
                    path: part_name.clone(),
                    bytes: copied,
                    completed: range.index + 1,
                    total,
                },
            );
            part_files.push(part_name);
        }

        info!(source = %path.display(), parts = part_files.len(), "split finished");
        emit(
            self.ctx.events.as_ref(),
            ToolEvent::Finished { kind: OperationKind::Split, output: path.to_path_buf() },
        );
        Ok(part_files)
    }
}

use async_trait::async_trait;
use crate::core::assembler::Assembler;
use crate::core::error::{IoContext, Result, SplitMergeError};
use crate::core::events::{emit, OperationKind, ToolEvent};
use crate::plugins::registry::{ensure_inputs, MergeContext, MergeStrategy, MAX_STREAM_CHUNK_SIZE};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tracing::{debug, info};

/// Keeps the output open across all inputs and pipes each input through a
/// fixed `chunk_size` buffer. At most one input and the output are open.
pub struct StreamMerge;

impl StreamMerge {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MergeStrategy for StreamMerge {
    fn name(&self) -> &'static str {
        "stream"
    }

    async fn merge(&self, inputs: &[PathBuf], output: &Path, ctx: &MergeContext) -> Result<PathBuf> {
        ensure_inputs(inputs)?;
        let mut buf = chunk_buffer(ctx.chunk_size)?;
        info!(
            output = %output.display(),
            inputs = inputs.len(),
            chunk_size = ctx.chunk_size,
            strategy = self.name(),
            "merge started"
        );

        let mut out = Assembler::create(output).await?;
        let total = inputs.len() as u64;

        for (i, input) in inputs.iter().enumerate() {
            let mut reader = File::open(input)
                .await
                .io_context(|| format!("open {}", input.display()))?;
            let copied = out.copy_from(&mut reader, &mut buf, input).await?;

            debug!(input = %input.display(), bytes = copied, "piped");
            emit(
                ctx.events.as_ref(),
                ToolEvent::InputMerged {
                    index: i as u64,
                    path: input.clone(),
                    bytes: copied,
                    completed: i as u64 + 1,
                    total,
                },
            );
        }

        let written = out.written();
        let output = out.finish().await?;

        info!(output = %output.display(), bytes = written, "merge finished");
        emit(ctx.events.as_ref(), ToolEvent::Finished { kind: OperationKind::Merge, output: output.clone() });
        Ok(output)
    }
}

fn chunk_buffer(chunk_size: usize) -> Result<Vec<u8>> {
    if chunk_size == 0 || chunk_size > MAX_STREAM_CHUNK_SIZE {
        return Err(SplitMergeError::InvalidArgument(format!(
            "stream chunk size must be between 1 and {} bytes, got {}",
            MAX_STREAM_CHUNK_SIZE, chunk_size
        )));
    }

    let mut buf = Vec::new();
    buf.try_reserve_exact(chunk_size).map_err(|e| {
        SplitMergeError::InvalidArgument(format!("cannot allocate {} byte stream buffer: {}", chunk_size, e))
    })?;
    buf.resize(chunk_size, 0);
    Ok(buf)
}

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use crate::core::assembler::Assembler;
use crate::core::error::{IoContext, Result};
use crate::core::events::{emit, OperationKind, ToolEvent};
use crate::plugins::registry::{ensure_inputs, MergeContext, MergeStrategy};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Loads every input into memory, concatenates, then writes the output once.
/// Peak memory is the sum of all input sizes.
pub struct BufferMerge;

impl BufferMerge {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MergeStrategy for BufferMerge {
    fn name(&self) -> &'static str {
        "buffer"
    }

    async fn merge(&self, inputs: &[PathBuf], output: &Path, ctx: &MergeContext) -> Result<PathBuf> {
        ensure_inputs(inputs)?;
        info!(output = %output.display(), inputs = inputs.len(), strategy = self.name(), "merge started");

        let total = inputs.len() as u64;
        let mut buffers: Vec<Bytes> = Vec::with_capacity(inputs.len());
        for (i, input) in inputs.iter().enumerate() {
            let data = tokio::fs::read(input)
                .await
                .io_context(|| format!("read {}", input.display()))?;
            debug!(input = %input.display(), bytes = data.len(), "buffered");
            emit(
                ctx.events.as_ref(),
                ToolEvent::InputMerged {
                    index: i as u64,
                    path: input.clone(),
                    bytes: data.len() as u64,
                    completed: i as u64 + 1,
                    total,
                },
            );
            buffers.push(Bytes::from(data));
        }

        let mut merged = BytesMut::with_capacity(buffers.iter().map(Bytes::len).sum());
        for b in &buffers {
            merged.extend_from_slice(b);
        }
        drop(buffers);

        let mut out = Assembler::create(output).await?;
        out.write(&merged).await?;
        let output = out.finish().await?;

        info!(output = %output.display(), bytes = merged.len(), "merge finished");
        emit(ctx.events.as_ref(), ToolEvent::Finished { kind: OperationKind::Merge, output: output.clone() });
        Ok(output)
    }
}

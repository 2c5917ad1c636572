use async_trait::async_trait;
use crate::core::assembler::Assembler;
use crate::core::error::{IoContext, Result};
use crate::core::events::{emit, OperationKind, ToolEvent};
use crate::plugins::registry::{ensure_inputs, MergeContext, MergeStrategy};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads one input fully, appends it, closes the output; repeats per input.
pub struct AppendMerge;

impl AppendMerge {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MergeStrategy for AppendMerge {
    fn name(&self) -> &'static str {
        "append"
    }

    async fn merge(&self, inputs: &[PathBuf], output: &Path, ctx: &MergeContext) -> Result<PathBuf> {
        ensure_inputs(inputs)?;
        info!(output = %output.display(), inputs = inputs.len(), strategy = self.name(), "merge started");

        // start from an empty output so repeated runs do not accumulate bytes
        Assembler::create(output).await?.finish().await?;

        let total = inputs.len() as u64;
        for (i, input) in inputs.iter().enumerate() {
            let data = tokio::fs::read(input)
                .await
                .io_context(|| format!("read {}", input.display()))?;

            let mut out = Assembler::append_to(output).await?;
            out.write(&data).await?;
            out.finish().await?;

            debug!(input = %input.display(), bytes = data.len(), "appended");
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
        }

        info!(output = %output.display(), "merge finished");
        emit(ctx.events.as_ref(), ToolEvent::Finished { kind: OperationKind::Merge, output: output.to_path_buf() });
        Ok(output.to_path_buf())
    }
}

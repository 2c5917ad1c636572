use std::path::PathBuf;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Split,
    Merge,
}

#[derive(Debug, Clone)]
pub enum ToolEvent {
    PlanReady { source: PathBuf, parts: u64, total_bytes: u64 },
    PartWritten { index: u64, path: PathBuf, bytes: u64, completed: u64, total: u64 },
    InputMerged { index: u64, path: PathBuf, bytes: u64, completed: u64, total: u64 },
    Finished { kind: OperationKind, output: PathBuf },
}

pub type EventSender = broadcast::Sender<ToolEvent>;

pub fn channel() -> (EventSender, broadcast::Receiver<ToolEvent>) {
    broadcast::channel(256)
}

/// Sends to observers if any are attached; a closed channel is not an error.
pub fn emit(tx: Option<&EventSender>, evt: ToolEvent) {
    if let Some(tx) = tx {
        let _ = tx.send(evt);
    }
}

//! Write-behind queue
//!
//! Snapshots are handed to a single background task that writes them in
//! order under one key. Enqueueing never blocks the caller. Failed writes
//! are logged and dropped; the in-memory state stays authoritative.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::persistence::KeyValueStore;

#[derive(Debug)]
enum Command {
    Write(Vec<u8>),
    Flush(oneshot::Sender<()>),
}

/// Handle to a background writer for one storage key.
///
/// Dropping the handle lets the writer drain any pending snapshots and exit.
#[derive(Debug)]
pub struct WriteQueue {
    key: String,
    commands: mpsc::UnboundedSender<Command>,
}

impl WriteQueue {
    /// Spawn the writer task on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn spawn(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let (commands, receiver) = mpsc::unbounded_channel();

        tokio::spawn(drain(storage, key.clone(), receiver));

        Self { key, commands }
    }

    /// Storage key this queue writes to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Queue a snapshot for writing. Returns immediately.
    pub fn enqueue(&self, snapshot: Vec<u8>) {
        if self.commands.send(Command::Write(snapshot)).is_err() {
            warn!(key = %self.key, "persistence writer stopped; snapshot dropped");
        }
    }

    /// Wait until every snapshot enqueued before this call has been attempted.
    pub async fn flush(&self) {
        let (done, flushed) = oneshot::channel();

        if self.commands.send(Command::Flush(done)).is_err() {
            return;
        }

        _ = flushed.await;
    }
}

async fn drain(
    storage: Arc<dyn KeyValueStore>,
    key: String,
    mut receiver: mpsc::UnboundedReceiver<Command>,
) {
    while let Some(command) = receiver.recv().await {
        match command {
            Command::Write(snapshot) => {
                let bytes = snapshot.len();

                match storage.set(&key, snapshot).await {
                    Ok(()) => debug!(key, bytes, "persisted snapshot"),
                    Err(error) => warn!(key, %error, "failed to persist snapshot"),
                }
            }
            Command::Flush(done) => {
                _ = done.send(());
            }
        }
    }

    debug!(key, "persistence writer stopped");
}

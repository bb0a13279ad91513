// Single ordered writer in front of the durable pair store.

use crate::domain::errors::PersistenceError;
use crate::domain::ports::PairStore;
use crate::domain::state::TetrahedronPair;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, warn};

enum StoreCommand {
    Upsert(TetrahedronPair),
    Delete(String),
}

impl StoreCommand {
    fn pair_id(&self) -> &str {
        match self {
            StoreCommand::Upsert(pair) => &pair.id,
            StoreCommand::Delete(pair_id) => pair_id,
        }
    }
}

/// Queue of store writes applied one at a time, in submission order.
///
/// Enqueueing never waits; when the queue is full the write is dropped and logged.
#[derive(Clone)]
pub struct PersistenceQueue {
    tx: mpsc::Sender<StoreCommand>,
}

impl PersistenceQueue {
    /// Spawns the writer task; it exits once every queue handle is dropped.
    pub fn spawn(store: Arc<dyn PairStore>, limit: Duration, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        tokio::spawn(persistence_task(store, rx, limit));
        Self { tx }
    }

    pub fn upsert(&self, pair: TetrahedronPair) {
        self.enqueue(StoreCommand::Upsert(pair));
    }

    pub fn delete(&self, pair_id: String) {
        self.enqueue(StoreCommand::Delete(pair_id));
    }

    fn enqueue(&self, command: StoreCommand) {
        if let Err(err) = self.tx.try_send(command) {
            let (reason, command) = match err {
                mpsc::error::TrySendError::Full(command) => ("queue full", command),
                mpsc::error::TrySendError::Closed(command) => ("writer stopped", command),
            };
            warn!(pair_id = %command.pair_id(), reason, "dropping store write");
        }
    }
}

async fn persistence_task(
    store: Arc<dyn PairStore>,
    mut rx: mpsc::Receiver<StoreCommand>,
    limit: Duration,
) {
    while let Some(command) = rx.recv().await {
        match command {
            StoreCommand::Upsert(pair) => {
                let result = match timeout(limit, store.upsert(&pair)).await {
                    Ok(result) => result,
                    Err(_) => Err(PersistenceError::Timeout),
                };
                if let Err(err) = result {
                    warn!(pair_id = %pair.id, error = %err, "failed to persist pair");
                }
            }
            StoreCommand::Delete(pair_id) => {
                let result = match timeout(limit, store.delete(&pair_id)).await {
                    Ok(result) => result.map(|_| ()),
                    Err(_) => Err(PersistenceError::Timeout),
                };
                if let Err(err) = result {
                    warn!(pair_id = %pair_id, error = %err, "failed to delete persisted pair");
                }
            }
        }
    }
    debug!("persistence writer stopped");
}

// Subscriber registry: one bounded outbound channel per connected WebSocket.

use crate::domain::SimulationState;
use crate::domain::ports::SnapshotPublisher;
use crate::interface_adapters::protocol::SimulationStateDto;
use axum::extract::ws::Utf8Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Receiving half handed to a connection task.
pub struct Subscription {
    pub id: u64,
    pub rx: mpsc::Receiver<Utf8Bytes>,
}

/// Outcome of one fan-out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PublishReport {
    pub delivered: usize,
    // Subscriber channel full; this snapshot was skipped for them.
    pub lagged: usize,
    // Receiver gone; the subscriber was removed.
    pub closed: usize,
}

/// Thread-safe set of live subscribers keyed by connection id.
///
/// The lock is only held to copy or edit the map, never across a send, so connects and
/// disconnects are not blocked by an in-flight broadcast.
#[derive(Debug)]
pub struct SubscriberRegistry {
    next_id: AtomicU64,
    channel_capacity: usize,
    subscribers: RwLock<HashMap<u64, mpsc::Sender<Utf8Bytes>>>,
}

impl SubscriberRegistry {
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            channel_capacity: channel_capacity.max(1),
            subscribers: RwLock::new(HashMap::new()),
        }
    }

    pub fn subscribe(&self) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, tx);
        Subscription { id, rx }
    }

    /// Returns whether the subscriber was still registered.
    pub fn unsubscribe(&self, id: u64) -> bool {
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every sender so each connection task sees its stream end.
    pub fn close_all(&self) -> usize {
        let drained: Vec<_> = self
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .collect();
        info!(subscribers = drained.len(), "subscriber registry closed");
        drained.len()
    }

    /// Offers the same bytes to every subscriber without waiting on any of them.
    pub fn broadcast(&self, bytes: &Utf8Bytes) -> PublishReport {
        let targets: Vec<(u64, mpsc::Sender<Utf8Bytes>)> = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect();

        let mut report = PublishReport::default();
        let mut gone = Vec::new();
        for (id, tx) in targets {
            match tx.try_send(bytes.clone()) {
                Ok(()) => report.delivered += 1,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    report.lagged += 1;
                    debug!(conn_id = id, "subscriber channel full; skipping snapshot");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    report.closed += 1;
                    gone.push(id);
                }
            }
        }

        if !gone.is_empty() {
            let mut subscribers = self
                .subscribers
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            for id in &gone {
                subscribers.remove(id);
            }
            debug!(removed = gone.len(), "dropped closed subscribers");
        }

        report
    }
}

/// Serializes a snapshot once so every subscriber shares the same bytes.
pub fn encode_snapshot(snapshot: &SimulationState) -> Result<Utf8Bytes, serde_json::Error> {
    let txt = serde_json::to_string(&SimulationStateDto::from(snapshot))?;
    Ok(Utf8Bytes::from(txt))
}

impl SnapshotPublisher for SubscriberRegistry {
    fn publish(&self, snapshot: &SimulationState) -> usize {
        let bytes = match encode_snapshot(snapshot) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = ?e, "failed to serialize simulation snapshot");
                return 0;
            }
        };
        self.broadcast(&bytes).delivered
    }
}

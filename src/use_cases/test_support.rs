use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::errors::PersistenceError;
use crate::domain::ports::{PairStore, SnapshotPublisher};
use crate::domain::state::{SimulationState, TetrahedronPair};

pub(crate) use crate::domain::test_support::{FixedRandom, SequenceRandom};

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub upsert: bool,
    pub delete: bool,
}

#[derive(Clone, Default)]
pub(crate) struct RecordingStore {
    pairs: Arc<Mutex<HashMap<String, TetrahedronPair>>>,
    deleted: Arc<Mutex<Vec<String>>>,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn stored(&self, pair_id: &str) -> Option<TetrahedronPair> {
        let guard = self.pairs.lock().expect("pairs mutex poisoned");
        guard.get(pair_id).cloned()
    }

    pub(crate) fn deleted_ids(&self) -> Vec<String> {
        let guard = self.deleted.lock().expect("deleted mutex poisoned");
        guard.clone()
    }
}

#[async_trait]
impl PairStore for RecordingStore {
    async fn upsert(&self, pair: &TetrahedronPair) -> Result<(), PersistenceError> {
        if self.failures.upsert {
            return Err(PersistenceError::Backend("upsert failed".to_string()));
        }

        let mut guard = self.pairs.lock().expect("pairs mutex poisoned");
        guard.insert(pair.id.clone(), pair.clone());
        Ok(())
    }

    async fn delete(&self, pair_id: &str) -> Result<bool, PersistenceError> {
        self.deleted
            .lock()
            .expect("deleted mutex poisoned")
            .push(pair_id.to_string());
        if self.failures.delete {
            return Err(PersistenceError::Backend("delete failed".to_string()));
        }

        let mut guard = self.pairs.lock().expect("pairs mutex poisoned");
        Ok(guard.remove(pair_id).is_some())
    }
}

// Delays every upsert so a later delete is ready to run first if writes are not ordered.
#[derive(Clone)]
pub(crate) struct SlowUpsertStore {
    pub inner: RecordingStore,
    pub delay: Duration,
}

#[async_trait]
impl PairStore for SlowUpsertStore {
    async fn upsert(&self, pair: &TetrahedronPair) -> Result<(), PersistenceError> {
        tokio::time::sleep(self.delay).await;
        self.inner.upsert(pair).await
    }

    async fn delete(&self, pair_id: &str) -> Result<bool, PersistenceError> {
        self.inner.delete(pair_id).await
    }
}

#[derive(Default)]
pub(crate) struct RecordingPublisher {
    snapshots: Mutex<Vec<SimulationState>>,
}

impl RecordingPublisher {
    pub(crate) fn snapshots(&self) -> Vec<SimulationState> {
        self.snapshots.lock().expect("snapshots mutex poisoned").clone()
    }
}

impl SnapshotPublisher for RecordingPublisher {
    fn publish(&self, snapshot: &SimulationState) -> usize {
        self.snapshots
            .lock()
            .expect("snapshots mutex poisoned")
            .push(snapshot.clone());
        1
    }
}

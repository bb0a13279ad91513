// Shared, lock-guarded access to the engine for request handlers and the tick loop.

use crate::domain::errors::SimulationError;
use crate::domain::ports::{PairStore, SnapshotPublisher};
use crate::domain::state::{SimulationState, TetrahedronPair, Vector3};
use crate::use_cases::engine::SimulationEngine;
use crate::use_cases::persistence::PersistenceQueue;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

const PERSISTENCE_QUEUE_CAPACITY: usize = 1024;

/// Summary of one published loop iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub time_step: f64,
    pub pairs: usize,
    pub delivered: usize,
}

/// Cloneable handle to the single simulation engine.
///
/// Every read and write goes through one mutex. Store writes are queued after the mutex is
/// released and applied in order by a single writer task, so the in-memory mutation never
/// waits on the store.
#[derive(Clone)]
pub struct SimulationHandle {
    engine: Arc<Mutex<SimulationEngine>>,
    persistence: PersistenceQueue,
}

impl SimulationHandle {
    pub fn new(
        engine: SimulationEngine,
        store: Arc<dyn PairStore>,
        persistence_timeout: Duration,
    ) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            persistence: PersistenceQueue::spawn(
                store,
                persistence_timeout,
                PERSISTENCE_QUEUE_CAPACITY,
            ),
        }
    }

    /// Creates a pair; `separation` falls back to the tuned default.
    pub async fn create_pair(
        &self,
        center: Vector3,
        separation: Option<f64>,
    ) -> Result<TetrahedronPair, SimulationError> {
        let pair = {
            let mut engine = self.engine.lock().await;
            let separation = separation.unwrap_or_else(|| engine.default_separation());
            engine.create_pair(center, separation)?
        };

        info!(
            pair_id = %pair.id,
            frequency = pair.matter.oscillation_frequency,
            pairing_strength = pair.pairing_strength,
            "pair created"
        );
        self.persistence.upsert(pair.clone());
        Ok(pair)
    }

    /// Removes a pair; returns whether it existed.
    pub async fn remove_pair(&self, pair_id: &str) -> bool {
        let existed = self.engine.lock().await.remove_pair(pair_id);
        if existed {
            info!(pair_id, "pair removed");
            self.persistence.delete(pair_id.to_string());
        } else {
            debug!(pair_id, "remove requested for unknown pair");
        }
        existed
    }

    pub async fn list_pairs(&self) -> Vec<TetrahedronPair> {
        self.engine.lock().await.pairs().to_vec()
    }

    pub async fn get_pair(&self, pair_id: &str) -> Result<TetrahedronPair, SimulationError> {
        self.engine
            .lock()
            .await
            .pair(pair_id)
            .cloned()
            .ok_or(SimulationError::NotFound)
    }

    pub async fn start(&self) {
        self.engine.lock().await.start();
        info!("simulation started");
    }

    pub async fn stop(&self) {
        self.engine.lock().await.stop();
        info!("simulation stopped");
    }

    pub async fn reset(&self) {
        let mut engine = self.engine.lock().await;
        engine.reset();
        info!(state_id = %engine.state().id, "simulation reset");
    }

    pub async fn is_running(&self) -> bool {
        self.engine.lock().await.is_running()
    }

    pub async fn current_state(&self) -> SimulationState {
        self.engine.lock().await.current_state()
    }

    /// Hands `f` the current state while holding the engine lock, so no step can publish
    /// between the read and whatever `f` does with it.
    pub async fn observe_state<R>(&self, f: impl FnOnce(&SimulationState) -> R) -> R {
        let mut engine = self.engine.lock().await;
        engine.recompute_aggregates();
        f(engine.state())
    }

    /// Runs one loop iteration when the simulation is running and publishes the result.
    ///
    /// Publishing happens before the lock is released, so a reader using `observe_state`
    /// can tell which queued frames are older than its own read.
    pub async fn step_and_publish(
        &self,
        dt: f64,
        publisher: &dyn SnapshotPublisher,
    ) -> Option<StepReport> {
        let mut engine = self.engine.lock().await;
        if !engine.is_running() {
            return None;
        }
        engine.step(dt);
        let snapshot = engine.state();
        let delivered = publisher.publish(snapshot);
        Some(StepReport {
            time_step: snapshot.time_step,
            pairs: snapshot.pairs.len(),
            delivered,
        })
    }
}

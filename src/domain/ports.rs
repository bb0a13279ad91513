use async_trait::async_trait;

use crate::domain::errors::PersistenceError;
use crate::domain::state::{SimulationState, TetrahedronPair};

// Port for the durable pair store. Calls are best-effort and never block the simulation.
#[async_trait]
pub trait PairStore: Send + Sync {
    async fn upsert(&self, pair: &TetrahedronPair) -> Result<(), PersistenceError>;
    async fn delete(&self, pair_id: &str) -> Result<bool, PersistenceError>;
}

/// Source of the cosmetic randomness used when building pairs.
///
/// Injected so tests can pin every drawn value.
pub trait RandomSource: Send {
    /// Draws from the half-open range `low..high`; returns `low` when the range is empty.
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

// Output port for the tick loop: fan a snapshot out to every current subscriber.
pub trait SnapshotPublisher: Send + Sync {
    /// Returns how many subscribers accepted the snapshot.
    fn publish(&self, snapshot: &SimulationState) -> usize;
}

// Fixed-cadence loop that ticks the engine and publishes snapshots to subscribers.

use crate::domain::ports::SnapshotPublisher;
use crate::use_cases::simulation::SimulationHandle;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    /// Wall-clock time between iterations.
    pub tick_interval: Duration,
    /// Simulated seconds applied per iteration.
    pub dt: f64,
}

/// Runs until `shutdown` is notified.
///
/// The interval always elapses between iterations; while the simulation is stopped the tick
/// and publish are skipped, not the wait. A tick already in progress is never cancelled.
pub async fn simulation_task(
    simulation: SimulationHandle,
    publisher: Arc<dyn SnapshotPublisher>,
    settings: LoopSettings,
    shutdown: Arc<Notify>,
) {
    let mut interval = tokio::time::interval(settings.tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(
        tick_interval_ms = settings.tick_interval.as_millis() as u64,
        dt = settings.dt,
        "simulation loop started"
    );

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                break;
            }
            _ = interval.tick() => {}
        }

        let Some(report) = simulation
            .step_and_publish(settings.dt, publisher.as_ref())
            .await
        else {
            continue;
        };

        debug!(
            time_step = report.time_step,
            pairs = report.pairs,
            delivered = report.delivered,
            "snapshot published"
        );
    }

    info!("simulation loop stopped");
}

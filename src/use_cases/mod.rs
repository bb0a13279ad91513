// Use cases layer: the engine, its shared handle and the tick-and-broadcast loop.

pub mod engine;
pub mod persistence;
pub mod simulation;
pub mod simulation_loop;
#[cfg(test)]
pub(crate) mod test_support;

pub use engine::SimulationEngine;
pub use persistence::PersistenceQueue;
pub use simulation::{SimulationHandle, StepReport};
pub use simulation_loop::{LoopSettings, simulation_task};

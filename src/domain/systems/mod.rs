// Per-pair rules applied by the engine on creation and on every tick.

pub mod oscillation;
pub mod stability;

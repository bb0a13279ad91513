use std::{env, time::Duration};

// Runtime/server constants (not simulation tuning).

pub fn http_port() -> u16 {
    env::var("TETRACORE_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8001)
}

// Absent or blank means the in-memory pair store.
pub fn database_url() -> Option<String> {
    env::var("DATABASE_URL")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn subscriber_send_timeout() -> Duration {
    millis_from_env("SUBSCRIBER_SEND_TIMEOUT_MS", 500)
}

pub fn persistence_timeout() -> Duration {
    millis_from_env("PERSISTENCE_TIMEOUT_MS", 2000)
}

fn millis_from_env(key: &str, default: u64) -> Duration {
    let millis = env::var(key)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default);
    Duration::from_millis(millis)
}

pub const SUBSCRIBER_CHANNEL_CAPACITY: usize = 16;
pub const DB_MAX_CONNECTIONS: u32 = 5;
pub const DB_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
// Simulated seconds per tick; decoupled from the wall-clock interval.
pub const SIMULATION_DT: f64 = 0.1;

use crate::interface_adapters::net::registry::SubscriberRegistry;
use crate::use_cases::SimulationHandle;
use std::sync::Arc;
use std::time::Duration;

// Shared state handed to every HTTP and WebSocket handler.
#[derive(Clone)]
pub struct AppState {
    pub simulation: SimulationHandle,
    // Live WebSocket observers; also the tick loop's snapshot publisher.
    pub subscribers: Arc<SubscriberRegistry>,
    // Upper bound on a single socket write before the subscriber is dropped.
    pub subscriber_send_timeout: Duration,
}

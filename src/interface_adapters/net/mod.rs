// Network adapter modules: per-connection socket handling and the subscriber fan-out.

pub mod client;
pub mod registry;

pub use client::ws_handler;
pub use registry::{PublishReport, SubscriberRegistry, Subscription, encode_snapshot};

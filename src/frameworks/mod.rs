// Frameworks layer: runtime configuration, database bootstrap and the server entry point.

pub mod config;
pub mod db;
pub mod server;

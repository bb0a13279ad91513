// Interface adapters: HTTP routes, wire protocol, WebSocket fan-out and store adapters.

pub mod handlers;
pub mod http;
pub mod net;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod stores;
pub mod utils;

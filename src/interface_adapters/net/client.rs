use crate::interface_adapters::net::registry::{Subscription, encode_snapshot};
use crate::interface_adapters::state::AppState;

use axum::{
    extract::{
        State,
        ws::{CloseFrame, Message, Utf8Bytes, WebSocketUpgrade, close_code},
    },
    response::IntoResponse,
};
use futures::{Sink, SinkExt, Stream, StreamExt};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::time::timeout;
use tracing::{Instrument, debug, info, info_span, warn};

#[derive(Debug, thiserror::Error)]
enum NetError {
    // Categorizes connection lifecycle failures so callers can decide policy.
    #[error("websocket error: {0}")]
    Ws(#[from] axum::Error),
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("send timed out")]
    SendTimeout,
}

enum LoopControl {
    Continue,
    Disconnect,
}

const LOG_THROTTLE: Duration = Duration::from_secs(2);

// Two-way message transport; `WebSocket` in production.
trait MessageSocket:
    Sink<Message, Error = axum::Error> + Stream<Item = Result<Message, axum::Error>> + Unpin
{
}

impl<T> MessageSocket for T where
    T: Sink<Message, Error = axum::Error> + Stream<Item = Result<Message, axum::Error>> + Unpin
{
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket<S: MessageSocket>(socket: S, state: Arc<AppState>) {
    // Register before anything else (awaits) so no published snapshot is missed.
    let subscription = state.subscribers.subscribe();
    let span = info_span!("conn", conn_id = subscription.id);
    serve_subscriber(socket, subscription, state)
        .instrument(span)
        .await;
}

struct ConnStats {
    msgs_in: u64,
    msgs_out: u64,
    bytes_out: u64,
    ignored_in: u64,
    last_ignored_log: Instant,
}

impl ConnStats {
    fn new() -> Self {
        Self {
            msgs_in: 0,
            msgs_out: 0,
            bytes_out: 0,
            ignored_in: 0,
            last_ignored_log: Instant::now()
                .checked_sub(LOG_THROTTLE)
                .unwrap_or_else(Instant::now),
        }
    }
}

async fn serve_subscriber<S: MessageSocket>(
    mut socket: S,
    mut subscription: Subscription,
    state: Arc<AppState>,
) {
    let conn_id = subscription.id;
    let send_timeout = state.subscriber_send_timeout;
    info!(subscribers = state.subscribers.len(), "subscriber connected");

    let mut stats = ConnStats::new();

    // Send Initial State
    // Frames queued since subscribing were published before this read and are no newer
    // than it; dropping them keeps time_step from repeating or going backwards.
    let (initial, stale) = state
        .simulation
        .observe_state(|snapshot| {
            let mut stale = 0usize;
            while subscription.rx.try_recv().is_ok() {
                stale += 1;
            }
            (encode_snapshot(snapshot), stale)
        })
        .await;
    if stale > 0 {
        debug!(stale, "dropped frames older than the initial snapshot");
    }

    let bootstrap = match initial {
        Ok(bytes) => send_frame(&mut socket, bytes, send_timeout, &mut stats).await,
        Err(e) => Err(NetError::Serialization(e)),
    };

    let mut close_frame: Option<CloseFrame> = None;
    let outcome = match bootstrap {
        Ok(()) => {
            run_client_loop(
                &mut socket,
                &mut subscription,
                send_timeout,
                &mut stats,
                &mut close_frame,
            )
            .await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = &outcome {
        // Delivery failures only end this connection; the loop and other subscribers carry on.
        warn!(error = %e, "subscriber dropped after delivery failure");
    }

    if let Some(frame) = close_frame.take() {
        let _ = timeout(send_timeout, socket.send(Message::Close(Some(frame)))).await;
    }
    if let Ok(Err(err)) = timeout(send_timeout, socket.close()).await {
        debug!(error = ?err, "socket close error");
    }

    state.subscribers.unsubscribe(conn_id);
    debug!(
        msgs_in = stats.msgs_in,
        msgs_out = stats.msgs_out,
        bytes_out = stats.bytes_out,
        ignored_in = stats.ignored_in,
        "connection stats"
    );
    info!("subscriber disconnected");
}

async fn run_client_loop<S: MessageSocket>(
    socket: &mut S,
    subscription: &mut Subscription,
    send_timeout: Duration,
    stats: &mut ConnStats,
    close_frame: &mut Option<CloseFrame>,
) -> Result<(), NetError> {
    loop {
        let control = tokio::select! {
            // Incoming Message from Client
            incoming = socket.next() => handle_incoming_ws(incoming, stats, close_frame),

            // Outgoing Snapshot
            snapshot = subscription.rx.recv() => match snapshot {
                Some(bytes) => {
                    send_frame(socket, bytes, send_timeout, stats).await?;
                    LoopControl::Continue
                }
                None => {
                    // Registry closed: the server is shutting down.
                    *close_frame = Some(CloseFrame {
                        code: close_code::AWAY,
                        reason: "server shutting down".into(),
                    });
                    LoopControl::Disconnect
                }
            },
        };

        if let LoopControl::Disconnect = control {
            return Ok(());
        }
    }
}

// Each write is bounded so one stalled peer cannot hold its snapshot queue forever.
async fn send_frame<S: MessageSocket>(
    socket: &mut S,
    bytes: Utf8Bytes,
    send_timeout: Duration,
    stats: &mut ConnStats,
) -> Result<(), NetError> {
    let len = bytes.as_str().len();
    match timeout(send_timeout, socket.send(Message::Text(bytes))).await {
        Ok(Ok(())) => {
            stats.msgs_out += 1;
            stats.bytes_out += len as u64;
            Ok(())
        }
        Ok(Err(e)) => Err(NetError::Ws(e)),
        Err(_) => Err(NetError::SendTimeout),
    }
}

fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}

fn handle_incoming_ws(
    incoming: Option<Result<Message, axum::Error>>,
    stats: &mut ConnStats,
    close_frame: &mut Option<CloseFrame>,
) -> LoopControl {
    match incoming {
        Some(Ok(msg)) => match msg {
            Message::Text(text) => {
                // Observers are receive-only; client text is counted and ignored.
                stats.msgs_in += 1;
                stats.ignored_in += 1;
                if should_log(&mut stats.last_ignored_log) {
                    debug!(bytes = text.as_str().len(), "ignoring client message");
                }
                LoopControl::Continue
            }
            Message::Binary(_) => {
                *close_frame = Some(CloseFrame {
                    code: close_code::UNSUPPORTED,
                    reason: "binary messages not supported".into(),
                });
                LoopControl::Disconnect
            }
            Message::Ping(_) | Message::Pong(_) => LoopControl::Continue,
            Message::Close(_) => LoopControl::Disconnect,
        },
        Some(Err(e)) => {
            warn!(error = %e, "websocket recv error");
            LoopControl::Disconnect
        }
        None => {
            info!("websocket closed");
            LoopControl::Disconnect
        }
    }
}

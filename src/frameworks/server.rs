// Framework bootstrap for the tetracore server runtime.

use crate::domain::ports::{PairStore, SnapshotPublisher};
use crate::frameworks::{config, db};
use crate::interface_adapters::net::SubscriberRegistry;
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::stores::{InMemoryPairStore, PostgresPairStore};
use crate::interface_adapters::utils::rng::SystemRandom;
use crate::use_cases::{LoopSettings, SimulationEngine, SimulationHandle, simulation_task};

use std::net::SocketAddr;
use std::{io::Result, sync::Arc};
use tokio::sync::Notify;

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let address = listener.local_addr()?;
    let shutdown = Arc::new(Notify::new());
    // build state
    let state = build_state(shutdown.clone()).await;
    let subscribers = state.subscribers.clone();
    let app = app(state);

    tracing::info!(%address, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown, subscribers))
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, "server error");
        })?;

    tracing::info!("server stopped");
    Ok(())
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([0, 0, 0, 0], config::http_port()));

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

async fn build_state(shutdown: Arc<Notify>) -> Arc<AppState> {
    let store = build_store().await;
    let persistence_timeout = config::persistence_timeout();
    let subscriber_send_timeout = config::subscriber_send_timeout();
    tracing::debug!(
        persistence_timeout_ms = persistence_timeout.as_millis() as u64,
        subscriber_send_timeout_ms = subscriber_send_timeout.as_millis() as u64,
        "timeouts configured"
    );

    let engine = SimulationEngine::new(Box::new(SystemRandom::new()));
    let simulation = SimulationHandle::new(engine, store, persistence_timeout);
    let subscribers = Arc::new(SubscriberRegistry::new(config::SUBSCRIBER_CHANNEL_CAPACITY));

    // Spawn the Simulation Loop
    // The only writer of time_step; ticks while running, idles otherwise.
    let publisher: Arc<dyn SnapshotPublisher> = subscribers.clone();
    tokio::spawn(simulation_task(
        simulation.clone(),
        publisher,
        LoopSettings {
            tick_interval: config::TICK_INTERVAL,
            dt: config::SIMULATION_DT,
        },
        shutdown,
    ));

    Arc::new(AppState {
        simulation,
        subscribers,
        subscriber_send_timeout,
    })
}

// Falls back to the in-memory store so the simulation runs without a database.
async fn build_store() -> Arc<dyn PairStore> {
    let Some(database_url) = config::database_url() else {
        tracing::info!("DATABASE_URL not set; using in-memory pair store");
        return Arc::new(InMemoryPairStore::new());
    };

    let pool = match db::connect_pool(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(error = %e, "database unreachable; using in-memory pair store");
            return Arc::new(InMemoryPairStore::new());
        }
    };

    if let Err(e) = db::run_migrations(&pool).await {
        tracing::warn!(error = %e, "migrations failed; using in-memory pair store");
        return Arc::new(InMemoryPairStore::new());
    }

    tracing::info!("using postgres pair store");
    Arc::new(PostgresPairStore { db: pool })
}

async fn shutdown_signal(shutdown: Arc<Notify>, subscribers: Arc<SubscriberRegistry>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server simply runs until killed.
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }

    tracing::info!("shutdown requested");
    // notify_one stores a permit, so the loop sees it even mid-tick.
    shutdown.notify_one();
    subscribers.close_all();
}

use crate::frameworks::config;
use sqlx::{PgPool, postgres::PgPoolOptions};

// Build a small PostgreSQL pool for pair persistence.
pub async fn connect_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config::DB_MAX_CONNECTIONS)
        .acquire_timeout(config::DB_ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}

// Run database migrations for the pair table.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
    MIGRATOR.run(pool).await
}

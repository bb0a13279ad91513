use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::errors::PersistenceError;
use crate::domain::ports::PairStore;
use crate::domain::state::TetrahedronPair;
use crate::interface_adapters::protocol::PairDto;

// Stored records use the same JSON shape as the public pair payload.
fn encode_payload(pair: &TetrahedronPair) -> Result<String, PersistenceError> {
    serde_json::to_string(&PairDto::from(pair))
        .map_err(|err| PersistenceError::Backend(format!("payload encoding failed: {err}")))
}

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        PersistenceError::Backend(err.to_string())
    }
}

// PostgreSQL-backed pair store.
#[derive(Clone)]
pub struct PostgresPairStore {
    pub db: PgPool,
}

#[async_trait]
impl PairStore for PostgresPairStore {
    async fn upsert(&self, pair: &TetrahedronPair) -> Result<(), PersistenceError> {
        let payload = encode_payload(pair)?;

        sqlx::query(
            r#"
            INSERT INTO tetrahedron_pairs (id, payload, created_at)
            VALUES ($1, $2::jsonb, $3)
            ON CONFLICT (id) DO UPDATE SET
                payload = EXCLUDED.payload
            "#,
        )
        .bind(&pair.id)
        .bind(payload)
        .bind(pair.created_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn delete(&self, pair_id: &str) -> Result<bool, PersistenceError> {
        let result = sqlx::query("DELETE FROM tetrahedron_pairs WHERE id = $1")
            .bind(pair_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// In-memory pair store used when no database is configured or reachable.
#[derive(Clone, Default)]
pub struct InMemoryPairStore {
    pub records: Arc<Mutex<HashMap<String, serde_json::Value>>>,
}

impl InMemoryPairStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PairStore for InMemoryPairStore {
    async fn upsert(&self, pair: &TetrahedronPair) -> Result<(), PersistenceError> {
        let payload = serde_json::to_value(PairDto::from(pair))
            .map_err(|err| PersistenceError::Backend(format!("payload encoding failed: {err}")))?;
        let mut records = self.records.lock().await;
        records.insert(pair.id.clone(), payload);
        Ok(())
    }

    async fn delete(&self, pair_id: &str) -> Result<bool, PersistenceError> {
        let mut records = self.records.lock().await;
        Ok(records.remove(pair_id).is_some())
    }
}

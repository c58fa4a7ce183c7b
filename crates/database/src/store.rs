use super::snapshot::Snapshot;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_postgres::Client;

/// Table for persisted room snapshots.
pub const ROOM_STATE: &str = "room_state";

const CREATES: &str = const_format::concatcp!(
    "CREATE TABLE IF NOT EXISTS ",
    ROOM_STATE,
    " (
        room_id    TEXT PRIMARY KEY,
        state      JSONB NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    );"
);

const UPSERTS: &str = const_format::concatcp!(
    "INSERT INTO ",
    ROOM_STATE,
    " (room_id, state, updated_at)
      VALUES ($1, $2::jsonb, now())
      ON CONFLICT (room_id)
      DO UPDATE SET state = EXCLUDED.state, updated_at = now();"
);

const SELECTS: &str = const_format::concatcp!(
    "SELECT state::text FROM ",
    ROOM_STATE,
    " WHERE room_id = $1;"
);

/// Persistence gateway at the durable-store boundary.
///
/// Load absence means "start a fresh room with this id". Save is
/// best-effort: callers log failures and keep playing; the in-memory
/// room stays authoritative until the next successful write.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Verifies connectivity; used by the health probe.
    async fn ping(&self) -> anyhow::Result<()>;
    async fn load(&self, room_id: &str) -> anyhow::Result<Option<Snapshot>>;
    async fn save(&self, snapshot: &Snapshot) -> anyhow::Result<()>;
}

/// PostgreSQL-backed store: one JSONB row per room, upsert on save.
pub struct Postgres(Arc<Client>);

impl Postgres {
    /// Connects via `DB_URL` and ensures the snapshot table exists.
    pub async fn connect() -> anyhow::Result<Self> {
        log::info!("connecting to database");
        let tls = tokio_postgres::tls::NoTls;
        let url = std::env::var("DB_URL")?;
        let (client, connection) = tokio_postgres::connect(&url, tls).await?;
        tokio::spawn(connection);
        client.execute(CREATES, &[]).await?;
        Ok(Self(Arc::new(client)))
    }
}

#[async_trait::async_trait]
impl Store for Postgres {
    async fn ping(&self) -> anyhow::Result<()> {
        self.0.execute("SELECT 1", &[]).await?;
        Ok(())
    }
    async fn load(&self, room_id: &str) -> anyhow::Result<Option<Snapshot>> {
        let row = self.0.query_opt(SELECTS, &[&room_id]).await?;
        match row {
            None => Ok(None),
            Some(row) => {
                let state: String = row.get(0);
                Ok(Some(serde_json::from_str(&state)?))
            }
        }
    }
    async fn save(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let state = serde_json::to_string(snapshot)?;
        self.0
            .execute(UPSERTS, &[&snapshot.room_id, &state])
            .await?;
        Ok(())
    }
}

/// In-process store for tests and `DB_URL`-less runs.
/// Durability ends with the process; everything else behaves like the
/// real gateway.
#[derive(Default)]
pub struct Memory(tokio::sync::Mutex<HashMap<String, String>>);

#[async_trait::async_trait]
impl Store for Memory {
    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
    async fn load(&self, room_id: &str) -> anyhow::Result<Option<Snapshot>> {
        match self.0.lock().await.get(room_id) {
            None => Ok(None),
            Some(state) => Ok(Some(serde_json::from_str(state)?)),
        }
    }
    async fn save(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let state = serde_json::to_string(snapshot)?;
        self.0
            .lock()
            .await
            .insert(snapshot.room_id.clone(), state);
        Ok(())
    }
}

/// Picks the store from the environment: Postgres when `DB_URL` is set,
/// otherwise an in-memory store with persistence disabled.
pub async fn store() -> Arc<dyn Store> {
    match std::env::var("DB_URL") {
        Ok(_) => match Postgres::connect().await {
            Ok(pg) => Arc::new(pg),
            Err(e) => {
                log::error!("database connection failed: {}", e);
                panic!("DB_URL is set but unusable: {}", e);
            }
        },
        Err(_) => {
            log::warn!("DB_URL not set, persistence disabled");
            Arc::new(Memory::default())
        }
    }
}

use async_trait::async_trait;
use mongodb::{Client, Database};
use tracing::{info, warn};

use crate::models::SessionRecord;

/// Collection receiving one document per `/analyze` call.
pub const SESSION_COLLECTION: &str = "rafaelsession";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document store is not configured")]
    Unavailable,
    #[error("document store write failed: {0}")]
    Write(#[from] mongodb::error::Error),
}

/// Seam for session-log persistence. Injected into the responder so tests
/// can substitute failing or recording stores.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Appends one already-validated record to the named collection.
    /// No retries: a failed write is permanently lost.
    async fn insert(&self, collection: &str, record: &SessionRecord) -> Result<(), StoreError>;

    /// Whether a store handle is configured. Not a liveness probe.
    fn is_available(&self) -> bool;
}

/// MongoDB-backed store. Holds `None` when no connection string is
/// configured, in which case every insert reports `Unavailable`.
pub struct MongoSessionStore {
    database: Option<Database>,
}

impl MongoSessionStore {
    /// Builds the store from `MONGODB_URI` / `MONGODB_DB`. Absent or broken
    /// configuration degrades to a disabled store; it never aborts startup.
    /// The driver connects lazily, so an unreachable server surfaces as
    /// write-time errors rather than a construction failure.
    pub async fn from_env() -> Self {
        let Ok(uri) = std::env::var("MONGODB_URI") else {
            info!("MONGODB_URI not set, session logging disabled");
            return Self::disabled();
        };
        let db_name = std::env::var("MONGODB_DB").unwrap_or_else(|_| "rafael".to_string());

        match Client::with_uri_str(&uri).await {
            Ok(client) => Self {
                database: Some(client.database(&db_name)),
            },
            Err(e) => {
                warn!("failed to build MongoDB client, session logging disabled: {e}");
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { database: None }
    }
}

#[async_trait]
impl SessionStore for MongoSessionStore {
    async fn insert(&self, collection: &str, record: &SessionRecord) -> Result<(), StoreError> {
        let database = self.database.as_ref().ok_or(StoreError::Unavailable)?;
        database
            .collection::<SessionRecord>(collection)
            .insert_one(record)
            .await?;
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.database.is_some()
    }
}

use std::time::Duration;

use chrono::Utc;
use redis::{aio::MultiplexedConnection, AsyncCommands};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::cache::CachedCollection;
use crate::models::contact::ContactMessage;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from the cache store. These never reach an HTTP response directly:
/// callers pattern-match and degrade (serve live data, or flag the advisory
/// warning on the contact path).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store was unreachable at startup; the process runs without it.
    #[error("cache store is unavailable")]
    Unavailable,

    #[error("cache store error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("cache document error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Wraps the one Redis connection shared by all requests.
///
/// The connection is established once at startup. If that attempt fails the
/// store is permanently degraded for the process lifetime and every operation
/// returns `StoreError::Unavailable`; there is no reconnection. Failures on
/// individual calls after a successful connect are local to that call and do
/// not change the store's state.
#[derive(Clone)]
pub struct CacheStore {
    conn: Option<MultiplexedConnection>,
    namespace: String,
}

impl CacheStore {
    /// Connects to Redis, degrading to an unavailable store on any failure.
    pub async fn connect(redis_url: &str, namespace: &str) -> Self {
        match Self::try_connect(redis_url).await {
            Ok(conn) => {
                info!("Cache store connected (namespace: {namespace})");
                CacheStore {
                    conn: Some(conn),
                    namespace: namespace.to_string(),
                }
            }
            Err(e) => {
                warn!("Cache store connection failed: {e}");
                warn!("Continuing without cache (caching and contact storage disabled)");
                Self::disconnected(namespace)
            }
        }
    }

    /// A store with no backing connection; every operation is `Unavailable`.
    pub fn disconnected(namespace: &str) -> Self {
        CacheStore {
            conn: None,
            namespace: namespace.to_string(),
        }
    }

    async fn try_connect(redis_url: &str) -> anyhow::Result<MultiplexedConnection> {
        let client = redis::Client::open(redis_url)?;
        let conn = tokio::time::timeout(
            CONNECT_TIMEOUT,
            client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| anyhow::anyhow!("timed out after {CONNECT_TIMEOUT:?}"))??;
        Ok(conn)
    }

    pub fn is_available(&self) -> bool {
        self.conn.is_some()
    }

    /// Logs the shutdown teardown. The multiplexed connection itself is closed
    /// when the last clone is dropped.
    pub fn close(&self) {
        if self.is_available() {
            info!("Cache store connection closed");
        }
    }

    fn conn(&self) -> Result<MultiplexedConnection, StoreError> {
        self.conn.clone().ok_or(StoreError::Unavailable)
    }

    fn collection_key(&self, kind: &str, owner: &str) -> String {
        format!("{}:{}:{}", self.namespace, kind, owner)
    }

    /// Reads the cached collection for `(kind, owner)`, `None` when the key
    /// has never been written.
    pub async fn read_collection<T: DeserializeOwned>(
        &self,
        kind: &str,
        owner: &str,
    ) -> Result<Option<CachedCollection<T>>, StoreError> {
        let mut conn = self.conn()?;
        let raw: Option<String> = conn.get(self.collection_key(kind, owner)).await?;
        match raw {
            Some(doc) => Ok(Some(CachedCollection::from_json(&doc)?)),
            None => Ok(None),
        }
    }

    /// Upserts the collection for `(kind, owner)` with the current timestamp.
    /// Concurrent writers for the same key are not coordinated; the payload is
    /// idempotent, so last writer wins.
    pub async fn write_collection<T: Serialize>(
        &self,
        kind: &str,
        owner: &str,
        items: &[T],
    ) -> Result<(), StoreError> {
        #[derive(Serialize)]
        struct CollectionDoc<'a, T> {
            owner_key: &'a str,
            items: &'a [T],
            updated_at: String,
        }

        let doc = serde_json::to_string(&CollectionDoc {
            owner_key: owner,
            items,
            updated_at: Utc::now().to_rfc3339(),
        })?;

        let mut conn = self.conn()?;
        let _: () = conn.set(self.collection_key(kind, owner), doc).await?;
        Ok(())
    }

    /// Appends a contact message to the contacts list.
    pub async fn store_contact(&self, message: &ContactMessage) -> Result<(), StoreError> {
        let doc = serde_json::to_string(message)?;
        let mut conn = self.conn()?;
        let _: () = conn
            .rpush(format!("{}:contacts", self.namespace), doc)
            .await?;
        Ok(())
    }
}

use std::fmt;
use std::future::Future;
use std::path::Path;

use chrono::{DateTime, Utc};
use libsql::Builder;
use recon_config::CacheConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::CacheError;

const MIGRATION_001: &str = include_str!("../migrations/001_snapshots.sql");

/// Path that keeps the cache in memory for the life of the process.
pub const IN_MEMORY: &str = ":memory:";

/// Independent snapshot families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// ERP-side output: hierarchy and classification.
    Erp,
    /// Target-side directories, one key per entity kind.
    Directory,
}

impl Namespace {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Erp => "erp",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot cache over a local libSQL database.
///
/// There is no TTL: a snapshot is served until a caller forces a refresh or
/// replaces it with [`SnapshotStore::put`].
pub struct SnapshotStore {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl fmt::Debug for SnapshotStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotStore").finish_non_exhaustive()
    }
}

impl SnapshotStore {
    /// Open (creating if needed) the cache at `path`; `:memory:` stays in memory.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the parent directory, database, or schema
    /// cannot be created.
    pub async fn open(path: &str) -> Result<Self, CacheError> {
        if path != IN_MEMORY
            && let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        conn.execute_batch(MIGRATION_001)
            .await
            .map_err(|e| CacheError::Migration(format!("001_snapshots: {e}")))?;
        debug!(path, "opened snapshot cache");
        Ok(Self { db, conn })
    }

    /// # Errors
    ///
    /// Same as [`Self::open`].
    pub async fn from_config(config: &CacheConfig) -> Result<Self, CacheError> {
        Self::open(&config.path).await
    }

    /// Serve the snapshot under `(namespace, key)`, or build it with `loader`.
    ///
    /// `loader` runs when `force_refresh` is set, when nothing is stored, or
    /// when the stored payload no longer deserializes as `T`. Its result is
    /// persisted before being returned. A loader error is returned as-is and
    /// leaves the previous snapshot untouched.
    ///
    /// # Errors
    ///
    /// Returns the loader's error, or a [`CacheError`] converted into `E`.
    pub async fn get<T, E, F, Fut>(
        &self,
        namespace: Namespace,
        key: &str,
        force_refresh: bool,
        loader: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !force_refresh {
            match self.peek::<T>(namespace, key).await {
                Ok(Some(value)) => {
                    debug!(%namespace, key, "snapshot hit");
                    return Ok(value);
                }
                Ok(None) => {}
                Err(CacheError::Serde(e)) => {
                    warn!(%namespace, key, error = %e, "stored snapshot unreadable, reloading");
                }
                Err(e) => return Err(e.into()),
            }
        }

        let value = loader().await?;
        self.put(namespace, key, &value).await?;
        info!(%namespace, key, "snapshot refreshed");
        Ok(value)
    }

    /// Replace the snapshot under `(namespace, key)`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] on serialization or write failure.
    pub async fn put<T: Serialize + ?Sized>(
        &self,
        namespace: Namespace,
        key: &str,
        value: &T,
    ) -> Result<(), CacheError> {
        let payload = serde_json::to_string(value)?;
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT OR REPLACE INTO snapshots (namespace, key, payload, refreshed_at) \
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![namespace.as_str(), key, payload, now],
            )
            .await?;
        Ok(())
    }

    /// Stored snapshot, without loading on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Serde`] if the payload does not deserialize as `T`.
    pub async fn peek<T: DeserializeOwned>(
        &self,
        namespace: Namespace,
        key: &str,
    ) -> Result<Option<T>, CacheError> {
        let mut rows = self
            .conn
            .query(
                "SELECT payload FROM snapshots WHERE namespace = ?1 AND key = ?2",
                libsql::params![namespace.as_str(), key],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        let payload = row.get::<String>(0)?;
        Ok(Some(serde_json::from_str(&payload)?))
    }

    /// When the snapshot under `(namespace, key)` was last written.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidRow`] if the stored timestamp is not RFC 3339.
    pub async fn refreshed_at(
        &self,
        namespace: Namespace,
        key: &str,
    ) -> Result<Option<DateTime<Utc>>, CacheError> {
        let mut rows = self
            .conn
            .query(
                "SELECT refreshed_at FROM snapshots WHERE namespace = ?1 AND key = ?2",
                libsql::params![namespace.as_str(), key],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        let raw = row.get::<String>(0)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| CacheError::InvalidRow(format!("refreshed_at '{raw}': {e}")))
    }
}

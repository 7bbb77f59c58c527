use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::SystemTime;

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;

use crate::error::{AppError, AppResult};
use crate::models::{CreateItemRequest, Item};

/// Source of truth for item records.
///
/// Implementations are deliberately unsynchronized: the backing medium is
/// shared with external editors and concurrent writers can race
/// (last-writer-wins). Callers must not assume otherwise.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Reads the full ordered collection.
    async fn read_all(&self) -> AppResult<Vec<Item>>;

    /// Assigns an id, appends to a fresh read of the collection and
    /// persists the whole collection back.
    async fn append_and_persist(&self, payload: CreateItemRequest) -> AppResult<Item>;

    /// Change marker for poll-based watchers. `None` when the backing
    /// medium does not exist yet.
    async fn modified_at(&self) -> AppResult<Option<SystemTime>>;
}

/// Flat-file store: one JSON array of items, rewritten in full on every
/// append.
pub struct JsonFileStore {
    path: PathBuf,
    last_id: AtomicI64,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_id: AtomicI64::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Timestamp-derived ids, bumped past the previous one so ids stay
    /// monotonically increasing within a process even if the clock
    /// reads the same millisecond twice.
    fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .map(|last| now.max(last + 1))
            .unwrap_or(now)
    }
}

#[async_trait]
impl ItemStore for JsonFileStore {
    async fn read_all(&self) -> AppResult<Vec<Item>> {
        let raw = fs::read(&self.path).await?;
        let items = serde_json::from_slice(&raw)?;
        Ok(items)
    }

    async fn append_and_persist(&self, payload: CreateItemRequest) -> AppResult<Item> {
        let name = payload
            .name
            .ok_or_else(|| AppError::validation("Invalid item payload"))?;

        let item = Item {
            id: self.next_id(),
            name,
            category: payload.category,
            price: payload.price,
        };

        let mut items = self.read_all().await?;
        items.push(item.clone());

        let serialized = serde_json::to_vec_pretty(&items)?;
        fs::write(&self.path, serialized).await?;

        Ok(item)
    }

    async fn modified_at(&self) -> AppResult<Option<SystemTime>> {
        match fs::metadata(&self.path).await {
            Ok(meta) => Ok(Some(meta.modified()?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

//! Process-wide stats cache.
//!
//! The cache starts unset, is primed best-effort at startup, refreshed
//! fire-and-forget after every append, and refreshed reactively when the
//! backing store's modification marker changes (fixed-interval poll, since
//! the file may be edited by any process). A request-triggered refresh and
//! a watcher refresh may race; both compute from current store contents, so
//! whichever finishes last wins.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::error::AppResult;
use crate::models::{Item, Stats};
use crate::store::ItemStore;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone)]
pub struct StatsCache {
    store: Arc<dyn ItemStore>,
    cached: Arc<RwLock<Option<Stats>>>,
}

pub fn compute(items: &[Item]) -> Stats {
    let total = items.len();
    let average_price = if total > 0 {
        items.iter().map(|item| item.price.unwrap_or(0.0)).sum::<f64>() / total as f64
    } else {
        0.0
    };
    Stats {
        total,
        average_price,
    }
}

impl StatsCache {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Serves the cached value when present; otherwise computes, stores
    /// and returns. A compute failure propagates and leaves the cache
    /// unset so the next call retries.
    pub async fn get(&self) -> AppResult<Stats> {
        if let Some(stats) = *self.cached.read().await {
            return Ok(stats);
        }
        self.refresh().await
    }

    /// Recomputes from the store. On failure the cache is cleared so a
    /// later `get` recomputes instead of serving a stale value.
    pub async fn refresh(&self) -> AppResult<Stats> {
        match self.store.read_all().await {
            Ok(items) => {
                let stats = compute(&items);
                *self.cached.write().await = Some(stats);
                Ok(stats)
            }
            Err(err) => {
                *self.cached.write().await = None;
                Err(err)
            }
        }
    }

    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }

    /// Fire-and-forget refresh for the write path and startup priming.
    /// Failures are logged and swallowed; the triggering request never
    /// waits on or fails with this.
    pub fn refresh_detached(&self, reason: &'static str) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            if let Err(err) = cache.refresh().await {
                error!(%err, reason, "failed to refresh stats cache");
            }
        })
    }

    /// Watches the store's modification marker at a fixed interval and
    /// refreshes when it changes.
    pub fn spawn_watcher(&self, interval: Duration) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            ticker.tick().await;

            let mut last_seen: Option<SystemTime> = cache.store.modified_at().await.ok().flatten();

            loop {
                ticker.tick().await;
                let current = match cache.store.modified_at().await {
                    Ok(marker) => marker,
                    Err(err) => {
                        debug!(%err, "stats watcher could not stat the store");
                        continue;
                    }
                };
                if current != last_seen {
                    last_seen = current;
                    if let Err(err) = cache.refresh().await {
                        error!(%err, "failed to refresh stats cache after file change");
                    }
                }
            }
        })
    }
}

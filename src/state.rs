use std::sync::Arc;

use crate::stats::StatsCache;
use crate::store::ItemStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
    pub stats: StatsCache,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        let stats = StatsCache::new(store.clone());
        Self { store, stats }
    }
}

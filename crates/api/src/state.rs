use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::QueryCache;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: leadtrack_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Cached lead lists and activity timelines.
    pub cache: Arc<QueryCache>,
}

impl AppState {
    pub fn new(pool: leadtrack_db::DbPool, config: ServerConfig) -> Self {
        let capacity = NonZeroUsize::new(config.cache_capacity).unwrap_or(NonZeroUsize::MIN);
        let cache = QueryCache::new(capacity, Duration::from_secs(config.cache_ttl_secs));
        Self {
            pool,
            config: Arc::new(config),
            cache: Arc::new(cache),
        }
    }
}

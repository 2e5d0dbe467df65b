//! Service layer hosting every repository.
//!
//! `HiService` wraps `HiDb` (raw database access) together with the market
//! stats cache. All repo methods are implemented as `impl HiService` blocks
//! under `repos/`.

use std::time::Duration;

use hifi_core::responses::MarketStats;

use crate::HiDb;
use crate::cache::TtlCache;
use crate::error::DatabaseError;

/// Default lifetime of cached market statistics.
pub const DEFAULT_STATS_TTL: Duration = Duration::from_secs(300);

pub struct HiService {
    db: HiDb,
    stats_cache: TtlCache<MarketStats>,
}

impl HiService {
    /// Open a local database and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, stats_ttl: Duration) -> Result<Self, DatabaseError> {
        let db = HiDb::open_local(db_path).await?;
        Ok(Self::from_db(db, stats_ttl))
    }

    /// Create from an existing `HiDb` (for testing).
    #[must_use]
    pub const fn from_db(db: HiDb, stats_ttl: Duration) -> Self {
        Self {
            db,
            stats_cache: TtlCache::new(stats_ttl),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &HiDb {
        &self.db
    }

    #[must_use]
    pub const fn stats_cache(&self) -> &TtlCache<MarketStats> {
        &self.stats_cache
    }

    /// Drop cached aggregates after a write.
    pub fn invalidate(&self) {
        self.stats_cache.invalidate();
    }
}

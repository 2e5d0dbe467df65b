//! Market statistics, served from the service's TTL cache when fresh.

use std::collections::BTreeMap;

use chrono::Utc;

use hifi_core::responses::MarketStats;

use crate::error::DatabaseError;
use crate::helpers::get_u32;
use crate::service::HiService;

impl HiService {
    /// Catalog and marketplace counters, recomputed at most once per TTL.
    pub async fn market_stats(&self) -> Result<MarketStats, DatabaseError> {
        if let Some(stats) = self.stats_cache().get() {
            tracing::debug!("market stats served from cache");
            return Ok(stats);
        }

        let stats = MarketStats {
            components_by_category: self
                .grouped_counts("SELECT category, COUNT(*) FROM components GROUP BY category")
                .await?,
            listings_by_status: self
                .grouped_counts("SELECT status, COUNT(*) FROM used_listings GROUP BY status")
                .await?,
            available_by_source: self
                .grouped_counts(
                    "SELECT source, COUNT(*) FROM used_listings WHERE status = 'available' GROUP BY source",
                )
                .await?,
            mean_asking_price: self.mean_asking_price().await?,
            computed_at: Utc::now().to_rfc3339(),
        };

        self.stats_cache().put(stats.clone());
        Ok(stats)
    }

    async fn grouped_counts(&self, sql: &str) -> Result<BTreeMap<String, u32>, DatabaseError> {
        let mut rows = self.db().conn().query(sql, ()).await?;
        let mut counts = BTreeMap::new();
        while let Some(row) = rows.next().await? {
            counts.insert(row.get::<String>(0)?, get_u32(&row, 1)?);
        }
        Ok(counts)
    }

    async fn mean_asking_price(&self) -> Result<Option<f64>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT AVG(price) FROM used_listings WHERE status = 'available'",
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<Option<f64>>(0)?)
    }
}

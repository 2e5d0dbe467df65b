//! Used listing repository: upsert by URL, status transitions, price statistics.

use chrono::{Duration, Utc};

use hifi_core::entities::{NewListing, UsedListing};
use hifi_core::enums::{ListingSource, ListingStatus};
use hifi_core::errors::CoreError;
use hifi_core::ids::PREFIX_LISTING;
use hifi_core::responses::PriceSummary;

use crate::error::DatabaseError;
use crate::helpers::{
    bool_value, get_bool, get_opt_string, opt_value, parse_datetime, parse_enum,
    parse_optional_datetime,
};
use crate::repos::{UpsertOutcome, limit_clause};
use crate::service::HiService;

pub(crate) const SELECT_COLS: &str = "id, component_id, source, external_id, url, title, price, \
     condition, status, location, seller_username, seller_feedback, is_bundle, bundle_group_id, \
     bundle_total_price, posted_at, date_sold, created_at, updated_at";

/// Window for sold-price statistics.
pub const SOLD_WINDOW_DAYS: i64 = 90;

fn row_to_listing(row: &libsql::Row) -> Result<UsedListing, DatabaseError> {
    Ok(UsedListing {
        id: row.get(0)?,
        component_id: row.get(1)?,
        source: parse_enum(&row.get::<String>(2)?)?,
        external_id: get_opt_string(row, 3)?,
        url: row.get(4)?,
        title: row.get(5)?,
        price: row.get(6)?,
        condition: parse_enum(&row.get::<String>(7)?)?,
        status: parse_enum(&row.get::<String>(8)?)?,
        location: get_opt_string(row, 9)?,
        seller_username: get_opt_string(row, 10)?,
        seller_feedback: row.get::<Option<i64>>(11)?,
        is_bundle: get_bool(row, 12)?,
        bundle_group_id: get_opt_string(row, 13)?,
        bundle_total_price: row.get::<Option<f64>>(14)?,
        posted_at: parse_datetime(&row.get::<String>(15)?)?,
        date_sold: parse_optional_datetime(get_opt_string(row, 16)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(17)?)?,
        updated_at: parse_datetime(&row.get::<String>(18)?)?,
    })
}

/// Filters for [`HiService::list_listings`].
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub component_id: Option<String>,
    pub status: Option<ListingStatus>,
    pub source: Option<ListingSource>,
    pub max_price: Option<f64>,
    pub bundles_only: bool,
    pub limit: Option<u32>,
}

fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some(f64::midpoint(sorted[n / 2 - 1], sorted[n / 2])),
    }
}

impl HiService {
    /// Insert a listing, or refresh the one already stored under the same URL.
    ///
    /// Refreshing updates price, title, condition, seller and bundle data. An
    /// expired listing seen again becomes available. Sold and removed listings
    /// are returned untouched with [`UpsertOutcome::Skipped`].
    pub async fn upsert_listing(
        &self,
        input: &NewListing,
    ) -> Result<(UsedListing, UpsertOutcome), DatabaseError> {
        input.validate()?;
        // Unknown components report NotFound rather than a FK failure.
        self.get_component(&input.component_id).await?;

        let now = Utc::now();
        if let Some(existing) = self.find_listing_by_url(&input.url).await? {
            if matches!(existing.status, ListingStatus::Sold | ListingStatus::Removed) {
                tracing::debug!(id = %existing.id, status = %existing.status, "listing is final; not refreshed");
                return Ok((existing, UpsertOutcome::Skipped));
            }
            self.db()
                .conn()
                .execute(
                    "UPDATE used_listings SET component_id = ?1, title = ?2, price = ?3, condition = ?4, \
                     location = ?5, seller_username = ?6, seller_feedback = ?7, is_bundle = ?8, \
                     bundle_group_id = ?9, bundle_total_price = ?10, status = 'available', \
                     updated_at = ?11 WHERE id = ?12",
                    libsql::params_from_iter(vec![
                        libsql::Value::from(input.component_id.clone()),
                        input.title.clone().into(),
                        input.price.into(),
                        input.condition.as_str().into(),
                        opt_value(input.location.clone()),
                        opt_value(input.seller_username.clone()),
                        opt_value(input.seller_feedback),
                        bool_value(input.is_bundle),
                        opt_value(input.bundle_group_id.clone()),
                        opt_value(input.bundle_total_price),
                        now.to_rfc3339().into(),
                        existing.id.clone().into(),
                    ]),
                )
                .await?;
            tracing::debug!(id = %existing.id, price = input.price, "listing refreshed");
            self.invalidate();
            return Ok((self.get_listing(&existing.id).await?, UpsertOutcome::Updated));
        }

        let id = self.db().generate_id(PREFIX_LISTING).await?;
        let posted_at = input.posted_at.unwrap_or(now);
        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO used_listings ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)"
                ),
                libsql::params_from_iter(vec![
                    libsql::Value::from(id.clone()),
                    input.component_id.clone().into(),
                    input.source.as_str().into(),
                    opt_value(input.external_id.clone()),
                    input.url.clone().into(),
                    input.title.clone().into(),
                    input.price.into(),
                    input.condition.as_str().into(),
                    ListingStatus::Available.as_str().into(),
                    opt_value(input.location.clone()),
                    opt_value(input.seller_username.clone()),
                    opt_value(input.seller_feedback),
                    bool_value(input.is_bundle),
                    opt_value(input.bundle_group_id.clone()),
                    opt_value(input.bundle_total_price),
                    posted_at.to_rfc3339().into(),
                    libsql::Value::Null,
                    now.to_rfc3339().into(),
                    now.to_rfc3339().into(),
                ]),
            )
            .await?;

        tracing::debug!(%id, url = %input.url, price = input.price, "listing inserted");
        self.invalidate();
        Ok((self.get_listing(&id).await?, UpsertOutcome::Inserted))
    }

    pub async fn get_listing(&self, id: &str) -> Result<UsedListing, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM used_listings WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("listing", id))?;
        row_to_listing(&row)
    }

    pub async fn find_listing_by_url(&self, url: &str) -> Result<Option<UsedListing>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM used_listings WHERE url = ?1"),
                [url],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_listing(&row)?)),
            None => Ok(None),
        }
    }

    /// Listings matching `filter`, newest first.
    pub async fn list_listings(
        &self,
        filter: &ListingFilter,
    ) -> Result<Vec<UsedListing>, DatabaseError> {
        let mut wheres = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref component_id) = filter.component_id {
            params.push(component_id.clone().into());
            wheres.push(format!("component_id = ?{}", params.len()));
        }
        if let Some(status) = filter.status {
            params.push(status.as_str().into());
            wheres.push(format!("status = ?{}", params.len()));
        }
        if let Some(source) = filter.source {
            params.push(source.as_str().into());
            wheres.push(format!("source = ?{}", params.len()));
        }
        if let Some(max) = filter.max_price {
            params.push(max.into());
            wheres.push(format!("price <= ?{}", params.len()));
        }
        if filter.bundles_only {
            wheres.push("is_bundle = 1".to_string());
        }

        let where_sql = if wheres.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", wheres.join(" AND "))
        };
        let sql = format!(
            "SELECT {SELECT_COLS} FROM used_listings{where_sql} ORDER BY posted_at DESC, id{}",
            limit_clause(filter.limit)
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut listings = Vec::new();
        while let Some(row) = rows.next().await? {
            listings.push(row_to_listing(&row)?);
        }
        Ok(listings)
    }

    /// Available listings for one component, cheapest first.
    pub async fn available_listings(
        &self,
        component_id: &str,
    ) -> Result<Vec<UsedListing>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM used_listings
                     WHERE component_id = ?1 AND status = 'available'
                     ORDER BY price, id"
                ),
                [component_id],
            )
            .await?;
        let mut listings = Vec::new();
        while let Some(row) = rows.next().await? {
            listings.push(row_to_listing(&row)?);
        }
        Ok(listings)
    }

    /// Move a listing through its lifecycle.
    ///
    /// Marking a listing sold stamps `date_sold`; relisting clears it.
    pub async fn transition_listing(
        &self,
        id: &str,
        new_status: ListingStatus,
    ) -> Result<UsedListing, DatabaseError> {
        let current = self.get_listing(id).await?;

        if !current.status.can_transition_to(new_status) {
            return Err(CoreError::InvalidTransition {
                entity_type: "listing".into(),
                id: id.to_string(),
                from: current.status.to_string(),
                to: new_status.to_string(),
            }
            .into());
        }

        let now = Utc::now();
        let date_sold = match new_status {
            ListingStatus::Sold => libsql::Value::from(now.to_rfc3339()),
            _ => libsql::Value::Null,
        };
        self.db()
            .conn()
            .execute(
                "UPDATE used_listings SET status = ?1, date_sold = ?2, updated_at = ?3 WHERE id = ?4",
                libsql::params_from_iter(vec![
                    libsql::Value::from(new_status.as_str()),
                    date_sold,
                    now.to_rfc3339().into(),
                    id.into(),
                ]),
            )
            .await?;

        tracing::debug!(id, from = %current.status, to = %new_status, "listing transitioned");
        self.invalidate();
        self.get_listing(id).await
    }

    /// Expire available listings posted more than `days` days ago.
    ///
    /// Returns the number of listings expired.
    pub async fn expire_stale_listings(&self, days: u32) -> Result<u64, DatabaseError> {
        let now = Utc::now();
        // A cutoff before chrono's earliest date leaves nothing old enough.
        let Some(cutoff) = now.checked_sub_signed(Duration::days(i64::from(days))) else {
            return Ok(0);
        };
        let expired = self
            .db()
            .conn()
            .execute(
                "UPDATE used_listings SET status = 'expired', updated_at = ?1
                 WHERE status = 'available' AND posted_at < ?2",
                libsql::params![now.to_rfc3339(), cutoff.to_rfc3339()],
            )
            .await?;
        if expired > 0 {
            tracing::debug!(expired, days, "stale listings expired");
            self.invalidate();
        }
        Ok(expired)
    }

    /// Asking-price statistics for available listings plus recent sold prices.
    pub async fn price_summary(&self, component_id: &str) -> Result<PriceSummary, DatabaseError> {
        self.get_component(component_id).await?;

        let prices: Vec<f64> = self
            .available_listings(component_id)
            .await?
            .iter()
            .map(|l| l.price)
            .collect();

        let cutoff = Utc::now() - Duration::days(SOLD_WINDOW_DAYS);
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*), AVG(price) FROM used_listings
                 WHERE component_id = ?1 AND status = 'sold' AND date_sold >= ?2",
                libsql::params![component_id, cutoff.to_rfc3339()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let sold_count = u32::try_from(row.get::<i64>(0)?)
            .map_err(|e| DatabaseError::InvalidState(format!("sold count: {e}")))?;
        let mean_sold_price = row.get::<Option<f64>>(1)?;

        #[allow(clippy::cast_precision_loss)]
        let mean_price = (!prices.is_empty()).then(|| prices.iter().sum::<f64>() / prices.len() as f64);

        Ok(PriceSummary {
            component_id: component_id.to_string(),
            available_count: u32::try_from(prices.len()).unwrap_or(u32::MAX),
            min_price: prices.first().copied(),
            median_price: median(&prices),
            mean_price,
            sold_count,
            mean_sold_price,
        })
    }
}

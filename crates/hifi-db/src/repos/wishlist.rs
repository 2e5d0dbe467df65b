//! Wishlist repository.

use chrono::Utc;

use hifi_core::entities::WishlistItem;
use hifi_core::errors::CoreError;
use hifi_core::ids::PREFIX_WISHLIST;
use hifi_core::responses::WishlistEntry;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_u32, parse_datetime};
use crate::service::HiService;

const SELECT_COLS: &str = "id, user_id, component_id, target_price, notes, created_at";

fn row_to_item(row: &libsql::Row) -> Result<WishlistItem, DatabaseError> {
    Ok(WishlistItem {
        id: row.get(0)?,
        user_id: row.get(1)?,
        component_id: row.get(2)?,
        target_price: row.get::<Option<f64>>(3)?,
        notes: get_opt_string(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl HiService {
    /// Add a component to a user's wishlist. Each component appears once per user.
    pub async fn add_to_wishlist(
        &self,
        user_id: &str,
        component_id: &str,
        target_price: Option<f64>,
        notes: Option<&str>,
    ) -> Result<WishlistItem, DatabaseError> {
        if target_price.is_some_and(|p| !p.is_finite() || p < 0.0) {
            return Err(CoreError::validation("target price must be non-negative").into());
        }
        let component = self.get_component(component_id).await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id FROM wishlists WHERE user_id = ?1 AND component_id = ?2",
                libsql::params![user_id, component_id],
            )
            .await?;
        if rows.next().await?.is_some() {
            return Err(CoreError::validation(format!(
                "{} is already on the wishlist",
                component.display_name()
            ))
            .into());
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_WISHLIST).await?;
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO wishlists ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
                libsql::params![id.as_str(), user_id, component_id, target_price, notes, now.to_rfc3339()],
            )
            .await?;

        tracing::debug!(%id, user_id, component_id, "wishlist item added");
        Ok(WishlistItem {
            id,
            user_id: user_id.to_string(),
            component_id: component_id.to_string(),
            target_price,
            notes: notes.map(String::from),
            created_at: now,
        })
    }

    pub async fn remove_from_wishlist(&self, id: &str) -> Result<(), DatabaseError> {
        let removed = self
            .db()
            .conn()
            .execute("DELETE FROM wishlists WHERE id = ?1", [id])
            .await?;
        if removed == 0 {
            return Err(CoreError::not_found("wishlist item", id).into());
        }
        tracing::debug!(id, "wishlist item removed");
        Ok(())
    }

    /// A user's wishlist with the cheapest available listing for each item.
    pub async fn list_wishlist(&self, user_id: &str) -> Result<Vec<WishlistEntry>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM wishlists WHERE user_id = ?1 ORDER BY created_at, id"),
                [user_id],
            )
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_item(&row)?);
        }

        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            let component = self.get_component(&item.component_id).await?;
            let mut rows = self
                .db()
                .conn()
                .query(
                    "SELECT MIN(price), COUNT(*) FROM used_listings
                     WHERE component_id = ?1 AND status = 'available'",
                    [item.component_id.as_str()],
                )
                .await?;
            let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
            let lowest_available_price = row.get::<Option<f64>>(0)?;
            let available_listings = get_u32(&row, 1)?;
            let below_target = matches!(
                (lowest_available_price, item.target_price),
                (Some(lowest), Some(target)) if lowest <= target
            );
            entries.push(WishlistEntry {
                item,
                component,
                lowest_available_price,
                available_listings,
                below_target,
            });
        }
        Ok(entries)
    }
}

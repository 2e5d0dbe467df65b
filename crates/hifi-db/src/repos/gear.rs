//! User gear repository: ownership records, soft removal, collection value.

use std::collections::BTreeMap;

use chrono::Utc;

use hifi_core::entities::{NewGear, UserGear};
use hifi_core::enums::Condition;
use hifi_core::errors::CoreError;
use hifi_core::ids::PREFIX_GEAR;
use hifi_core::responses::CollectionValue;

use crate::error::DatabaseError;
use crate::helpers::{
    get_bool, get_opt_string, opt_value, parse_datetime, parse_enum, parse_optional_date,
    parse_optional_enum,
};
use crate::service::HiService;
use crate::updates::SetClauses;
use crate::updates::gear::GearUpdate;

pub(crate) const SELECT_COLS: &str = "id, user_id, component_id, custom_brand, custom_name, \
     custom_category, purchase_price, purchase_date, condition, notes, is_active, created_at, \
     updated_at";

/// Share of the purchase price assumed to remain for gear outside the catalog.
pub const CUSTOM_GEAR_RETAINED_VALUE: f64 = 0.7;

pub(crate) fn row_to_gear(row: &libsql::Row) -> Result<UserGear, DatabaseError> {
    row_to_gear_at(row, 0)
}

/// Parse gear whose columns start at `offset` (for joined queries).
pub(crate) fn row_to_gear_at(row: &libsql::Row, offset: i32) -> Result<UserGear, DatabaseError> {
    Ok(UserGear {
        id: row.get(offset)?,
        user_id: row.get(offset + 1)?,
        component_id: get_opt_string(row, offset + 2)?,
        custom_brand: get_opt_string(row, offset + 3)?,
        custom_name: get_opt_string(row, offset + 4)?,
        custom_category: parse_optional_enum(get_opt_string(row, offset + 5)?.as_deref())?,
        purchase_price: row.get::<Option<f64>>(offset + 6)?,
        purchase_date: parse_optional_date(get_opt_string(row, offset + 7)?.as_deref())?,
        condition: parse_enum(&row.get::<String>(offset + 8)?)?,
        notes: get_opt_string(row, offset + 9)?,
        is_active: get_bool(row, offset + 10)?,
        created_at: parse_datetime(&row.get::<String>(offset + 11)?)?,
        updated_at: parse_datetime(&row.get::<String>(offset + 12)?)?,
    })
}

fn date_value(date: Option<chrono::NaiveDate>) -> libsql::Value {
    opt_value(date.map(|d| d.format("%Y-%m-%d").to_string()))
}

impl HiService {
    pub async fn add_gear(&self, user_id: &str, input: &NewGear) -> Result<UserGear, DatabaseError> {
        input.validate()?;
        if let Some(ref component_id) = input.component_id {
            self.get_component(component_id).await?;
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_GEAR).await?;
        let condition = input.condition.unwrap_or(Condition::Good);

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO user_gear ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 1, ?11, ?12)"
                ),
                libsql::params_from_iter(vec![
                    libsql::Value::from(id.clone()),
                    user_id.into(),
                    opt_value(input.component_id.clone()),
                    opt_value(input.custom_brand.clone()),
                    opt_value(input.custom_name.clone()),
                    opt_value(input.custom_category.map(|c| c.as_str())),
                    opt_value(input.purchase_price),
                    date_value(input.purchase_date),
                    condition.as_str().into(),
                    opt_value(input.notes.clone()),
                    now.to_rfc3339().into(),
                    now.to_rfc3339().into(),
                ]),
            )
            .await?;

        tracing::debug!(%id, user_id, "gear added");
        self.get_gear(&id).await
    }

    pub async fn get_gear(&self, id: &str) -> Result<UserGear, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM user_gear WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("gear", id))?;
        row_to_gear(&row)
    }

    pub async fn update_gear(&self, id: &str, update: GearUpdate) -> Result<UserGear, DatabaseError> {
        let current = self.get_gear(id).await?;

        if let Some(Some(price)) = update.purchase_price {
            if !price.is_finite() || price < 0.0 {
                return Err(CoreError::validation("purchase price must be non-negative").into());
            }
        }
        if current.component_id.is_none()
            && matches!(update.custom_name, Some(None))
        {
            return Err(CoreError::validation("custom gear must keep its name").into());
        }

        let mut sets = SetClauses::default();
        if let Some(brand) = update.custom_brand {
            sets.push_opt("custom_brand", brand);
        }
        if let Some(name) = update.custom_name {
            sets.push_opt("custom_name", name);
        }
        if let Some(price) = update.purchase_price {
            sets.push_opt("purchase_price", price);
        }
        if let Some(date) = update.purchase_date {
            sets.push("purchase_date", date_value(date));
        }
        if let Some(condition) = update.condition {
            sets.push("condition", condition.as_str());
        }
        if let Some(notes) = update.notes {
            sets.push_opt("notes", notes);
        }

        if sets.is_empty() {
            return Ok(current);
        }
        sets.push("updated_at", Utc::now().to_rfc3339());

        let (sql, params) = sets.into_update("user_gear", id);
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        tracing::debug!(id, "gear updated");
        self.get_gear(id).await
    }

    /// Soft delete: the record stays for history but drops out of active lists.
    pub async fn remove_gear(&self, id: &str) -> Result<UserGear, DatabaseError> {
        self.get_gear(id).await?;
        self.db()
            .conn()
            .execute(
                "UPDATE user_gear SET is_active = 0, updated_at = ?1 WHERE id = ?2",
                libsql::params![Utc::now().to_rfc3339(), id],
            )
            .await?;
        tracing::debug!(id, "gear removed");
        self.get_gear(id).await
    }

    pub async fn list_gear(
        &self,
        user_id: &str,
        include_inactive: bool,
    ) -> Result<Vec<UserGear>, DatabaseError> {
        let active_sql = if include_inactive { "" } else { " AND is_active = 1" };
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM user_gear WHERE user_id = ?1{active_sql}
                     ORDER BY created_at DESC, id"
                ),
                [user_id],
            )
            .await?;
        let mut gear = Vec::new();
        while let Some(row) = rows.next().await? {
            gear.push(row_to_gear(&row)?);
        }
        Ok(gear)
    }

    /// What the user's active gear cost and is worth today.
    ///
    /// Catalog gear is valued at the component's typical used price. Custom
    /// gear keeps [`CUSTOM_GEAR_RETAINED_VALUE`] of its purchase price.
    pub async fn collection_value(&self, user_id: &str) -> Result<CollectionValue, DatabaseError> {
        let gear = self.list_gear(user_id, false).await?;

        let mut purchase_total = 0.0;
        let mut estimated_value = 0.0;
        let mut by_category: BTreeMap<String, u32> = BTreeMap::new();

        for item in &gear {
            let paid = item.purchase_price.unwrap_or(0.0);
            purchase_total += paid;

            let (category, estimate) = match item.component_id {
                Some(ref component_id) => {
                    let component = self.get_component(component_id).await?;
                    (
                        Some(component.category),
                        component.avg_price().unwrap_or(paid * CUSTOM_GEAR_RETAINED_VALUE),
                    )
                }
                None => (item.custom_category, paid * CUSTOM_GEAR_RETAINED_VALUE),
            };
            estimated_value += estimate;
            if let Some(category) = category {
                *by_category.entry(category.as_str().to_string()).or_default() += 1;
            }
        }

        Ok(CollectionValue {
            user_id: user_id.to_string(),
            item_count: u32::try_from(gear.len()).unwrap_or(u32::MAX),
            purchase_total,
            estimated_value,
            change: estimated_value - purchase_total,
            by_category,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{seed_component, seed_gear, test_service};
    use crate::updates::gear::GearUpdateBuilder;
    use hifi_core::enums::Category;

    #[tokio::test]
    async fn add_catalog_and_custom_gear() {
        let svc = test_service().await;
        let c = seed_component(&svc, "Sennheiser", "HD 600", 399.0).await;

        let owned = seed_gear(&svc, "alice", &c.id, 300.0).await;
        assert!(owned.id.starts_with("gea-"));
        assert_eq!(owned.condition, Condition::Good);
        assert!(owned.is_active);

        let custom = svc
            .add_gear(
                "alice",
                &NewGear {
                    custom_brand: Some("DIY".into()),
                    custom_name: Some("Cmoy".into()),
                    custom_category: Some(Category::Amp),
                    purchase_price: Some(40.0),
                    purchase_date: NaiveDate::from_ymd_opt(2024, 3, 1),
                    ..NewGear::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(custom.purchase_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(svc.list_gear("alice", false).await.unwrap().len(), 2);
        assert!(svc.list_gear("bob", false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn gear_for_unknown_component_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .add_gear(
                "alice",
                &NewGear {
                    component_id: Some("cmp-missing".into()),
                    ..NewGear::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err.as_core(), Some(CoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn update_sets_and_clears_fields() {
        let svc = test_service().await;
        let c = seed_component(&svc, "Sennheiser", "HD 600", 399.0).await;
        let g = seed_gear(&svc, "alice", &c.id, 300.0).await;

        let updated = svc
            .update_gear(
                &g.id,
                GearUpdateBuilder::new()
                    .condition(Condition::Excellent)
                    .notes(Some("new pads".into()))
                    .purchase_price(None)
                    .build(),
            )
            .await
            .unwrap();
        assert_eq!(updated.condition, Condition::Excellent);
        assert_eq!(updated.notes.as_deref(), Some("new pads"));
        assert_eq!(updated.purchase_price, None);

        let unchanged = svc.update_gear(&g.id, GearUpdate::default()).await.unwrap();
        assert_eq!(unchanged.notes.as_deref(), Some("new pads"));
    }

    #[tokio::test]
    async fn negative_price_update_rejected() {
        let svc = test_service().await;
        let c = seed_component(&svc, "Sennheiser", "HD 600", 399.0).await;
        let g = seed_gear(&svc, "alice", &c.id, 300.0).await;
        let err = svc
            .update_gear(&g.id, GearUpdateBuilder::new().purchase_price(Some(-1.0)).build())
            .await
            .unwrap_err();
        assert!(matches!(err.as_core(), Some(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn remove_is_soft() {
        let svc = test_service().await;
        let c = seed_component(&svc, "Sennheiser", "HD 600", 399.0).await;
        let g = seed_gear(&svc, "alice", &c.id, 300.0).await;

        let removed = svc.remove_gear(&g.id).await.unwrap();
        assert!(!removed.is_active);
        assert!(svc.list_gear("alice", false).await.unwrap().is_empty());
        assert_eq!(svc.list_gear("alice", true).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn collection_value_mixes_catalog_and_custom() {
        let svc = test_service().await;
        let mut hd600 = crate::test_support::helpers::new_component(
            "Sennheiser",
            "HD 600",
            Category::Headphones,
            399.0,
        );
        hd600.price_used_min = Some(220.0);
        hd600.price_used_max = Some(280.0);
        let (c, _) = svc.upsert_component(&hd600).await.unwrap();
        seed_gear(&svc, "alice", &c.id, 300.0).await;
        svc.add_gear(
            "alice",
            &NewGear {
                custom_brand: Some("DIY".into()),
                custom_name: Some("Cmoy".into()),
                custom_category: Some(Category::Amp),
                purchase_price: Some(100.0),
                ..NewGear::default()
            },
        )
        .await
        .unwrap();

        let value = svc.collection_value("alice").await.unwrap();
        assert_eq!(value.item_count, 2);
        assert!((value.purchase_total - 400.0).abs() < 1e-9);
        assert!((value.estimated_value - 320.0).abs() < 1e-9);
        assert!((value.change + 80.0).abs() < 1e-9);
        assert_eq!(value.by_category.get("headphones"), Some(&1));
        assert_eq!(value.by_category.get("amp"), Some(&1));
    }
}

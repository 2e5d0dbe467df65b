//! Price alert repository: CRUD, evaluation against available listings, history.

use chrono::Utc;

use hifi_core::entities::{AlertTrigger, NewAlert, PriceAlert, validate_alert_prices};
use hifi_core::enums::Condition;
use hifi_core::errors::CoreError;
use hifi_core::ids::{PREFIX_ALERT, PREFIX_TRIGGER};
use hifi_core::responses::{AlertCheckReport, AlertCheckResult};

use crate::error::DatabaseError;
use crate::helpers::{
    bool_value, get_bool, get_opt_string, get_u32, opt_value, parse_datetime, parse_enum,
    parse_optional_datetime, parse_optional_enum,
};
use crate::service::HiService;
use crate::updates::SetClauses;
use crate::updates::alert::AlertUpdate;

const SELECT_COLS: &str = "id, user_id, component_id, alert_type, target_price, price_min, \
     price_max, min_condition, is_active, trigger_count, last_triggered_at, created_at, updated_at";

const TRIGGER_COLS: &str = "id, alert_id, listing_id, listing_price, listing_title, triggered_at";

fn row_to_alert(row: &libsql::Row) -> Result<PriceAlert, DatabaseError> {
    Ok(PriceAlert {
        id: row.get(0)?,
        user_id: row.get(1)?,
        component_id: row.get(2)?,
        alert_type: parse_enum(&row.get::<String>(3)?)?,
        target_price: row.get::<Option<f64>>(4)?,
        price_min: row.get::<Option<f64>>(5)?,
        price_max: row.get::<Option<f64>>(6)?,
        min_condition: parse_optional_enum(get_opt_string(row, 7)?.as_deref())?,
        is_active: get_bool(row, 8)?,
        trigger_count: get_u32(row, 9)?,
        last_triggered_at: parse_optional_datetime(get_opt_string(row, 10)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(11)?)?,
        updated_at: parse_datetime(&row.get::<String>(12)?)?,
    })
}

fn row_to_trigger(row: &libsql::Row) -> Result<AlertTrigger, DatabaseError> {
    Ok(AlertTrigger {
        id: row.get(0)?,
        alert_id: row.get(1)?,
        listing_id: row.get(2)?,
        listing_price: row.get(3)?,
        listing_title: row.get(4)?,
        triggered_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl HiService {
    pub async fn create_alert(&self, user_id: &str, input: &NewAlert) -> Result<PriceAlert, DatabaseError> {
        input.validate()?;
        self.get_component(&input.component_id).await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_ALERT).await?;
        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO price_alerts ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1, 0, NULL, ?9, ?10)"
                ),
                libsql::params_from_iter(vec![
                    libsql::Value::from(id.clone()),
                    user_id.into(),
                    input.component_id.clone().into(),
                    input.alert_type.as_str().into(),
                    opt_value(input.target_price),
                    opt_value(input.price_min),
                    opt_value(input.price_max),
                    opt_value(input.min_condition.map(Condition::as_str)),
                    now.to_rfc3339().into(),
                    now.to_rfc3339().into(),
                ]),
            )
            .await?;

        tracing::debug!(%id, user_id, component_id = %input.component_id, "alert created");
        self.get_alert(&id).await
    }

    pub async fn get_alert(&self, id: &str) -> Result<PriceAlert, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM price_alerts WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("alert", id))?;
        row_to_alert(&row)
    }

    pub async fn list_alerts(
        &self,
        user_id: &str,
        active_only: bool,
    ) -> Result<Vec<PriceAlert>, DatabaseError> {
        let active_sql = if active_only { " AND is_active = 1" } else { "" };
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM price_alerts WHERE user_id = ?1{active_sql}
                     ORDER BY created_at, id"
                ),
                [user_id],
            )
            .await?;
        let mut alerts = Vec::new();
        while let Some(row) = rows.next().await? {
            alerts.push(row_to_alert(&row)?);
        }
        Ok(alerts)
    }

    /// Apply an update, re-validating the merged price fields.
    pub async fn update_alert(&self, id: &str, update: AlertUpdate) -> Result<PriceAlert, DatabaseError> {
        let current = self.get_alert(id).await?;

        let alert_type = update.alert_type.unwrap_or(current.alert_type);
        let target_price = update.target_price.unwrap_or(current.target_price);
        let price_min = update.price_min.unwrap_or(current.price_min);
        let price_max = update.price_max.unwrap_or(current.price_max);
        validate_alert_prices(alert_type, target_price, price_min, price_max)?;

        let mut sets = SetClauses::default();
        if let Some(alert_type) = update.alert_type {
            sets.push("alert_type", alert_type.as_str());
        }
        if let Some(target) = update.target_price {
            sets.push_opt("target_price", target);
        }
        if let Some(min) = update.price_min {
            sets.push_opt("price_min", min);
        }
        if let Some(max) = update.price_max {
            sets.push_opt("price_max", max);
        }
        if let Some(condition) = update.min_condition {
            sets.push_opt("min_condition", condition.map(Condition::as_str));
        }

        if sets.is_empty() {
            return Ok(current);
        }
        sets.push("updated_at", Utc::now().to_rfc3339());

        let (sql, params) = sets.into_update("price_alerts", id);
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        tracing::debug!(id, "alert updated");
        self.get_alert(id).await
    }

    pub async fn set_alert_active(&self, id: &str, active: bool) -> Result<PriceAlert, DatabaseError> {
        self.get_alert(id).await?;
        self.db()
            .conn()
            .execute(
                "UPDATE price_alerts SET is_active = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params_from_iter(vec![
                    bool_value(active),
                    Utc::now().to_rfc3339().into(),
                    id.into(),
                ]),
            )
            .await?;
        tracing::debug!(id, active, "alert toggled");
        self.get_alert(id).await
    }

    pub async fn delete_alert(&self, id: &str) -> Result<(), DatabaseError> {
        let deleted = self
            .db()
            .conn()
            .execute("DELETE FROM price_alerts WHERE id = ?1", [id])
            .await?;
        if deleted == 0 {
            return Err(CoreError::not_found("alert", id).into());
        }
        tracing::debug!(id, "alert deleted");
        Ok(())
    }

    /// Evaluate active alerts against available listings of their components.
    ///
    /// Each alert fires at most once per listing; firings are recorded in
    /// `alert_triggers` and bump the alert's `trigger_count`.
    pub async fn check_alerts(&self, user_id: Option<&str>) -> Result<AlertCheckReport, DatabaseError> {
        let alerts = match user_id {
            Some(user) => self.list_alerts(user, true).await?,
            None => self.all_active_alerts().await?,
        };

        let mut report = AlertCheckReport {
            alerts_checked: u32::try_from(alerts.len()).unwrap_or(u32::MAX),
            triggered: Vec::new(),
        };

        for alert in alerts {
            let listings = self.available_listings(&alert.component_id).await?;
            let mut new_triggers = Vec::new();

            for listing in listings
                .iter()
                .filter(|l| alert.matches(l.price, l.condition))
            {
                let now = Utc::now();
                let trigger_id = self.db().generate_id(PREFIX_TRIGGER).await?;
                let inserted = self
                    .db()
                    .conn()
                    .execute(
                        &format!(
                            "INSERT OR IGNORE INTO alert_triggers ({TRIGGER_COLS})
                             VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
                        ),
                        libsql::params![
                            trigger_id.as_str(),
                            alert.id.as_str(),
                            listing.id.as_str(),
                            listing.price,
                            listing.title.as_str(),
                            now.to_rfc3339()
                        ],
                    )
                    .await?;
                if inserted > 0 {
                    new_triggers.push(AlertTrigger {
                        id: trigger_id,
                        alert_id: alert.id.clone(),
                        listing_id: listing.id.clone(),
                        listing_price: listing.price,
                        listing_title: listing.title.clone(),
                        triggered_at: now,
                    });
                }
            }

            if new_triggers.is_empty() {
                continue;
            }

            let fired = i64::try_from(new_triggers.len()).unwrap_or(i64::MAX);
            self.db()
                .conn()
                .execute(
                    "UPDATE price_alerts SET trigger_count = trigger_count + ?1,
                     last_triggered_at = ?2, updated_at = ?2 WHERE id = ?3",
                    libsql::params![fired, Utc::now().to_rfc3339(), alert.id.as_str()],
                )
                .await?;
            tracing::debug!(alert_id = %alert.id, fired, "alert triggered");

            report.triggered.push(AlertCheckResult {
                alert: self.get_alert(&alert.id).await?,
                new_triggers,
            });
        }

        Ok(report)
    }

    async fn all_active_alerts(&self) -> Result<Vec<PriceAlert>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM price_alerts WHERE is_active = 1 ORDER BY created_at, id"),
                (),
            )
            .await?;
        let mut alerts = Vec::new();
        while let Some(row) = rows.next().await? {
            alerts.push(row_to_alert(&row)?);
        }
        Ok(alerts)
    }

    /// Every firing of an alert, newest first.
    pub async fn alert_history(&self, alert_id: &str) -> Result<Vec<AlertTrigger>, DatabaseError> {
        self.get_alert(alert_id).await?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {TRIGGER_COLS} FROM alert_triggers WHERE alert_id = ?1
                     ORDER BY triggered_at DESC, id"
                ),
                [alert_id],
            )
            .await?;
        let mut triggers = Vec::new();
        while let Some(row) = rows.next().await? {
            triggers.push(row_to_trigger(&row)?);
        }
        Ok(triggers)
    }
}

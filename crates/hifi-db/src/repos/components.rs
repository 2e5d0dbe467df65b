//! Component catalog repository: upsert by brand and name, filters, FTS search.

use chrono::Utc;

use hifi_core::entities::{Component, NewComponent};
use hifi_core::enums::{BudgetTier, Category, SoundSignature};
use hifi_core::errors::CoreError;
use hifi_core::ids::PREFIX_COMPONENT;

use crate::error::DatabaseError;
use crate::helpers::{
    bool_value, get_bool, get_opt_string, get_opt_u32, opt_value, parse_datetime, parse_enum,
    parse_optional_enum,
};
use crate::repos::{UpsertOutcome, limit_clause};
use crate::service::HiService;

pub(crate) const SELECT_COLS: &str = "id, brand, name, category, price_new, price_used_min, \
     price_used_max, budget_tier, sound_signature, impedance, sensitivity, needs_amp, \
     driver_type, expert_grade, value_rating, why_recommended, created_at, updated_at";

/// Typical market price expression, mirroring `Component::avg_price`.
const AVG_PRICE_SQL: &str = "COALESCE((price_used_min + price_used_max) / 2.0, price_new)";

pub(crate) fn row_to_component(row: &libsql::Row) -> Result<Component, DatabaseError> {
    row_to_component_at(row, 0)
}

/// Parse a component whose columns start at `offset` (for joined queries).
pub(crate) fn row_to_component_at(row: &libsql::Row, offset: i32) -> Result<Component, DatabaseError> {
    Ok(Component {
        id: row.get(offset)?,
        brand: row.get(offset + 1)?,
        name: row.get(offset + 2)?,
        category: parse_enum(&row.get::<String>(offset + 3)?)?,
        price_new: row.get::<Option<f64>>(offset + 4)?,
        price_used_min: row.get::<Option<f64>>(offset + 5)?,
        price_used_max: row.get::<Option<f64>>(offset + 6)?,
        budget_tier: parse_enum(&row.get::<String>(offset + 7)?)?,
        sound_signature: parse_optional_enum(get_opt_string(row, offset + 8)?.as_deref())?,
        impedance: get_opt_u32(row, offset + 9)?,
        sensitivity: row.get::<Option<f64>>(offset + 10)?,
        needs_amp: get_bool(row, offset + 11)?,
        driver_type: get_opt_string(row, offset + 12)?,
        expert_grade: get_opt_string(row, offset + 13)?,
        value_rating: row.get::<Option<f64>>(offset + 14)?,
        why_recommended: get_opt_string(row, offset + 15)?,
        created_at: parse_datetime(&row.get::<String>(offset + 16)?)?,
        updated_at: parse_datetime(&row.get::<String>(offset + 17)?)?,
    })
}

/// Filters for [`HiService::list_components`].
#[derive(Debug, Clone, Default)]
pub struct ComponentFilter {
    pub category: Option<Category>,
    pub budget_tier: Option<BudgetTier>,
    pub sound_signature: Option<SoundSignature>,
    /// Case-insensitive exact brand.
    pub brand: Option<String>,
    /// Bounds on the typical market price.
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub limit: Option<u32>,
}

/// Turn free text into an FTS5 query of quoted prefix terms.
///
/// Quoting keeps user punctuation (`HD-600`, `"`) from being read as FTS syntax.
fn fts_query(text: &str) -> Option<String> {
    let terms: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| format!("\"{}\"*", t.to_lowercase()))
        .collect();
    (!terms.is_empty()).then(|| terms.join(" "))
}

impl HiService {
    /// Insert a component, or refresh the one with the same brand and name.
    ///
    /// Brand and name compare case-insensitively. The budget tier is always
    /// recomputed from the incoming prices.
    pub async fn upsert_component(
        &self,
        input: &NewComponent,
    ) -> Result<(Component, UpsertOutcome), DatabaseError> {
        input.validate()?;
        let brand = input.brand.trim();
        let name = input.name.trim();
        let tier = input.budget_tier();
        let now = Utc::now();

        let existing_id = {
            let mut rows = self
                .db()
                .conn()
                .query(
                    "SELECT id FROM components WHERE brand = ?1 AND name = ?2",
                    libsql::params![brand, name],
                )
                .await?;
            match rows.next().await? {
                Some(row) => Some(row.get::<String>(0)?),
                None => None,
            }
        };

        let attributes: Vec<libsql::Value> = vec![
            input.category.as_str().into(),
            opt_value(input.price_new),
            opt_value(input.price_used_min),
            opt_value(input.price_used_max),
            tier.as_str().into(),
            opt_value(input.sound_signature.map(SoundSignature::as_str)),
            opt_value(input.impedance.map(i64::from)),
            opt_value(input.sensitivity),
            bool_value(input.needs_amp),
            opt_value(input.driver_type.clone()),
            opt_value(input.expert_grade.clone()),
            opt_value(input.value_rating),
            opt_value(input.why_recommended.clone()),
            now.to_rfc3339().into(),
        ];

        let (id, outcome) = if let Some(id) = existing_id {
            let mut params = attributes;
            params.push(id.clone().into());
            self.db()
                .conn()
                .execute(
                    "UPDATE components SET category = ?1, price_new = ?2, price_used_min = ?3, \
                     price_used_max = ?4, budget_tier = ?5, sound_signature = ?6, impedance = ?7, \
                     sensitivity = ?8, needs_amp = ?9, driver_type = ?10, expert_grade = ?11, \
                     value_rating = ?12, why_recommended = ?13, updated_at = ?14 WHERE id = ?15",
                    libsql::params_from_iter(params),
                )
                .await?;
            (id, UpsertOutcome::Updated)
        } else {
            let id = self.db().generate_id(PREFIX_COMPONENT).await?;
            let mut params: Vec<libsql::Value> =
                vec![id.clone().into(), brand.into(), name.into()];
            params.extend(attributes);
            params.push(now.to_rfc3339().into());
            self.db()
                .conn()
                .execute(
                    "INSERT INTO components (id, brand, name, category, price_new, price_used_min, \
                     price_used_max, budget_tier, sound_signature, impedance, sensitivity, needs_amp, \
                     driver_type, expert_grade, value_rating, why_recommended, updated_at, created_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
                    libsql::params_from_iter(params),
                )
                .await?;
            (id, UpsertOutcome::Inserted)
        };

        tracing::debug!(%id, brand, name, ?outcome, "component upserted");
        self.invalidate();
        Ok((self.get_component(&id).await?, outcome))
    }

    pub async fn get_component(&self, id: &str) -> Result<Component, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM components WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("component", id))?;
        row_to_component(&row)
    }

    pub async fn list_components(
        &self,
        filter: &ComponentFilter,
    ) -> Result<Vec<Component>, DatabaseError> {
        let mut wheres = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(category) = filter.category {
            params.push(category.as_str().into());
            wheres.push(format!("category = ?{}", params.len()));
        }
        if let Some(tier) = filter.budget_tier {
            params.push(tier.as_str().into());
            wheres.push(format!("budget_tier = ?{}", params.len()));
        }
        if let Some(signature) = filter.sound_signature {
            params.push(signature.as_str().into());
            wheres.push(format!("sound_signature = ?{}", params.len()));
        }
        if let Some(ref brand) = filter.brand {
            params.push(brand.trim().into());
            wheres.push(format!("brand = ?{}", params.len()));
        }
        if let Some(min) = filter.min_price {
            params.push(min.into());
            wheres.push(format!("{AVG_PRICE_SQL} >= ?{}", params.len()));
        }
        if let Some(max) = filter.max_price {
            params.push(max.into());
            wheres.push(format!("{AVG_PRICE_SQL} <= ?{}", params.len()));
        }

        let where_sql = if wheres.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", wheres.join(" AND "))
        };
        let sql = format!(
            "SELECT {SELECT_COLS} FROM components{where_sql} ORDER BY brand, name{}",
            limit_clause(filter.limit)
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut components = Vec::new();
        while let Some(row) = rows.next().await? {
            components.push(row_to_component(&row)?);
        }
        Ok(components)
    }

    /// Full-text search over brand, name, driver type and description.
    pub async fn search_components(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Component>, DatabaseError> {
        let Some(fts) = fts_query(query) else {
            return Ok(Vec::new());
        };
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT c.id, c.brand, c.name, c.category, c.price_new, c.price_used_min, \
                 c.price_used_max, c.budget_tier, c.sound_signature, c.impedance, c.sensitivity, \
                 c.needs_amp, c.driver_type, c.expert_grade, c.value_rating, c.why_recommended, \
                 c.created_at, c.updated_at \
                 FROM components_fts \
                 JOIN components c ON c.rowid = components_fts.rowid \
                 WHERE components_fts MATCH ?1 \
                 ORDER BY rank LIMIT ?2",
                libsql::params![fts, limit],
            )
            .await?;

        let mut components = Vec::new();
        while let Some(row) = rows.next().await? {
            components.push(row_to_component(&row)?);
        }
        Ok(components)
    }

    /// Every component, for matching and recommendation.
    pub async fn catalog(&self) -> Result<Vec<Component>, DatabaseError> {
        self.list_components(&ComponentFilter::default()).await
    }
}

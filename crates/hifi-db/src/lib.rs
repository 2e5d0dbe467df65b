//! # hifi-db
//!
//! libSQL persistence for HiFinder: the component catalog, used-market
//! listings, user gear, stacks, wishlists and price alerts.
//!
//! Uses the `libsql` crate (C `SQLite` fork) for native FTS5 over the catalog.

pub mod cache;
pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
pub(crate) mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for all HiFinder state.
///
/// Wraps a libSQL database and connection and provides ID generation.
pub struct HiDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl HiDb {
    /// Open a local database at the given path, or `":memory:"` for tests.
    ///
    /// Runs migrations automatically on every open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let hi_db = Self { db, conn };
        hi_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(hi_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"cmp-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> HiDb {
        HiDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "components",
            "components_fts",
            "used_listings",
            "user_gear",
            "user_stacks",
            "stack_components",
            "wishlists",
            "price_alerts",
            "alert_triggers",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("cmp").await.unwrap();
        assert!(id.starts_with("cmp-"), "ID should start with 'cmp-': {id}");
        assert_eq!(id.len(), 12, "ID should be 12 chars: {id}");
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_is_unique() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            assert!(ids.insert(db.generate_id("lst").await.unwrap()));
        }
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO wishlists (id, user_id, component_id) VALUES ('wsh-1', 'u', 'cmp-missing')",
                (),
            )
            .await;
        assert!(result.is_err(), "dangling component_id should be rejected");
    }

    #[tokio::test]
    async fn fts5_trigger_populates_on_insert() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO components (id, brand, name, category, budget_tier, driver_type)
                 VALUES ('cmp-test1', 'HiFiMAN', 'Sundara', 'headphones', 'entry', 'planar')",
                (),
            )
            .await
            .unwrap();

        let mut rows = db
            .conn()
            .query(
                "SELECT rowid FROM components_fts WHERE components_fts MATCH 'planar'",
                (),
            )
            .await
            .unwrap();
        assert!(rows.next().await.unwrap().is_some());
    }
}

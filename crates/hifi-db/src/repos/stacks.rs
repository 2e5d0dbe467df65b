//! Stack repository: named, ordered groups of a user's gear.

use chrono::Utc;

use hifi_core::entities::{StackMember, UserStack};
use hifi_core::enums::StackPurpose;
use hifi_core::errors::CoreError;
use hifi_core::ids::PREFIX_STACK;
use hifi_core::responses::{StackDetail, StackGear};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_u32, parse_datetime, parse_enum};
use crate::repos::gear::row_to_gear_at;
use crate::service::HiService;
use crate::updates::SetClauses;
use crate::updates::stack::StackUpdate;

const SELECT_COLS: &str = "id, user_id, name, description, purpose, created_at, updated_at";

fn row_to_stack(row: &libsql::Row) -> Result<UserStack, DatabaseError> {
    Ok(UserStack {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        description: get_opt_string(row, 3)?,
        purpose: parse_enum(&row.get::<String>(4)?)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl HiService {
    pub async fn create_stack(
        &self,
        user_id: &str,
        name: &str,
        description: Option<&str>,
        purpose: StackPurpose,
    ) -> Result<UserStack, DatabaseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::validation("stack name is required").into());
        }
        self.ensure_stack_name_free(user_id, name, None).await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_STACK).await?;
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO user_stacks ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
                libsql::params![
                    id.as_str(),
                    user_id,
                    name,
                    description,
                    purpose.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        tracing::debug!(%id, user_id, name, "stack created");
        self.get_stack_record(&id).await
    }

    async fn ensure_stack_name_free(
        &self,
        user_id: &str,
        name: &str,
        except_id: Option<&str>,
    ) -> Result<(), DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id FROM user_stacks WHERE user_id = ?1 AND name = ?2",
                libsql::params![user_id, name],
            )
            .await?;
        if let Some(row) = rows.next().await? {
            let id: String = row.get(0)?;
            if except_id != Some(id.as_str()) {
                return Err(CoreError::validation(format!("stack '{name}' already exists")).into());
            }
        }
        Ok(())
    }

    /// The stack row without its gear.
    pub async fn get_stack_record(&self, id: &str) -> Result<UserStack, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM user_stacks WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("stack", id))?;
        row_to_stack(&row)
    }

    /// A stack with its active gear in position order.
    pub async fn get_stack(&self, id: &str) -> Result<StackDetail, DatabaseError> {
        let stack = self.get_stack_record(id).await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT sc.position, g.id, g.user_id, g.component_id, g.custom_brand, g.custom_name, \
                 g.custom_category, g.purchase_price, g.purchase_date, g.condition, g.notes, \
                 g.is_active, g.created_at, g.updated_at \
                 FROM stack_components sc \
                 JOIN user_gear g ON g.id = sc.gear_id \
                 WHERE sc.stack_id = ?1 AND g.is_active = 1 \
                 ORDER BY sc.position, g.id",
                [id],
            )
            .await?;

        let mut members = Vec::new();
        while let Some(row) = rows.next().await? {
            let position = get_u32(&row, 0)?;
            let gear = row_to_gear_at(&row, 1)?;
            members.push((position, gear));
        }

        let mut gear = Vec::with_capacity(members.len());
        let mut total_purchase_price = 0.0;
        for (position, item) in members {
            total_purchase_price += item.purchase_price.unwrap_or(0.0);
            let component = match item.component_id {
                Some(ref component_id) => Some(self.get_component(component_id).await?),
                None => None,
            };
            gear.push(StackGear {
                position,
                gear: item,
                component,
            });
        }

        Ok(StackDetail {
            stack,
            gear,
            total_purchase_price,
        })
    }

    pub async fn list_stacks(&self, user_id: &str) -> Result<Vec<UserStack>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM user_stacks WHERE user_id = ?1 ORDER BY name"),
                [user_id],
            )
            .await?;
        let mut stacks = Vec::new();
        while let Some(row) = rows.next().await? {
            stacks.push(row_to_stack(&row)?);
        }
        Ok(stacks)
    }

    pub async fn update_stack(&self, id: &str, update: StackUpdate) -> Result<UserStack, DatabaseError> {
        let current = self.get_stack_record(id).await?;

        let mut sets = SetClauses::default();
        if let Some(ref name) = update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(CoreError::validation("stack name is required").into());
            }
            self.ensure_stack_name_free(&current.user_id, name, Some(id)).await?;
            sets.push("name", name.to_string());
        }
        if let Some(description) = update.description {
            sets.push_opt("description", description);
        }
        if let Some(purpose) = update.purpose {
            sets.push("purpose", purpose.as_str());
        }

        if sets.is_empty() {
            return Ok(current);
        }
        sets.push("updated_at", Utc::now().to_rfc3339());

        let (sql, params) = sets.into_update("user_stacks", id);
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        tracing::debug!(id, "stack updated");
        self.get_stack_record(id).await
    }

    /// Put gear into a stack, or move it if it is already there.
    ///
    /// Without a position the gear goes to the end. Gear must belong to the
    /// stack's owner and be active.
    pub async fn add_gear_to_stack(
        &self,
        stack_id: &str,
        gear_id: &str,
        position: Option<u32>,
    ) -> Result<StackMember, DatabaseError> {
        let stack = self.get_stack_record(stack_id).await?;
        let gear = self.get_gear(gear_id).await?;
        if gear.user_id != stack.user_id {
            return Err(CoreError::validation(format!(
                "gear {gear_id} does not belong to the owner of stack {stack_id}"
            ))
            .into());
        }
        if !gear.is_active {
            return Err(CoreError::validation(format!("gear {gear_id} has been removed")).into());
        }

        let position = match position {
            Some(p) => p,
            None => {
                let mut rows = self
                    .db()
                    .conn()
                    .query(
                        "SELECT COALESCE(MAX(position) + 1, 0) FROM stack_components WHERE stack_id = ?1",
                        [stack_id],
                    )
                    .await?;
                let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
                get_u32(&row, 0)?
            }
        };

        self.db()
            .conn()
            .execute(
                "INSERT INTO stack_components (stack_id, gear_id, position) VALUES (?1, ?2, ?3)
                 ON CONFLICT(stack_id, gear_id) DO UPDATE SET position = excluded.position",
                libsql::params![stack_id, gear_id, i64::from(position)],
            )
            .await?;
        self.touch_stack(stack_id).await?;

        tracing::debug!(stack_id, gear_id, position, "gear added to stack");
        Ok(StackMember {
            stack_id: stack_id.to_string(),
            gear_id: gear_id.to_string(),
            position,
        })
    }

    pub async fn remove_gear_from_stack(
        &self,
        stack_id: &str,
        gear_id: &str,
    ) -> Result<(), DatabaseError> {
        let removed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM stack_components WHERE stack_id = ?1 AND gear_id = ?2",
                libsql::params![stack_id, gear_id],
            )
            .await?;
        if removed == 0 {
            return Err(CoreError::not_found("stack member", &format!("{stack_id}/{gear_id}")).into());
        }
        self.touch_stack(stack_id).await?;
        tracing::debug!(stack_id, gear_id, "gear removed from stack");
        Ok(())
    }

    pub async fn delete_stack(&self, id: &str) -> Result<(), DatabaseError> {
        let deleted = self
            .db()
            .conn()
            .execute("DELETE FROM user_stacks WHERE id = ?1", [id])
            .await?;
        if deleted == 0 {
            return Err(CoreError::not_found("stack", id).into());
        }
        tracing::debug!(id, "stack deleted");
        Ok(())
    }

    async fn touch_stack(&self, id: &str) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute(
                "UPDATE user_stacks SET updated_at = ?1 WHERE id = ?2",
                libsql::params![Utc::now().to_rfc3339(), id],
            )
            .await?;
        Ok(())
    }
}

// Tenant rows.

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use jot_core::model::{Plan, Tenant};

use crate::{fmt_ts, parse_enum, parse_ts, Store, StoreResult};

const TENANT_COLS: &str = "id, name, slug, subscription_plan, created_at";

fn tenant_from_row(row: &Row<'_>) -> rusqlite::Result<Tenant> {
    Ok(Tenant {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        subscription_plan: parse_enum(3, row.get(3)?)?,
        created_at: parse_ts(4, row.get(4)?)?,
    })
}

impl Store {
    pub fn create_tenant(&self, name: &str, slug: &str, plan: Plan) -> StoreResult<Tenant> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO tenants (name, slug, subscription_plan, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![name, slug, plan.as_str(), fmt_ts(Utc::now())],
        )?;
        let id = conn.last_insert_rowid();

        let tenant = conn.query_row(
            &format!("SELECT {TENANT_COLS} FROM tenants WHERE id = ?1"),
            params![id],
            tenant_from_row,
        )?;
        Ok(tenant)
    }

    pub fn tenant_by_id(&self, id: i64) -> StoreResult<Option<Tenant>> {
        let conn = self.conn.lock().unwrap();
        let tenant = conn
            .query_row(
                &format!("SELECT {TENANT_COLS} FROM tenants WHERE id = ?1"),
                params![id],
                tenant_from_row,
            )
            .optional()?;
        Ok(tenant)
    }

    pub fn tenant_by_slug(&self, slug: &str) -> StoreResult<Option<Tenant>> {
        let conn = self.conn.lock().unwrap();
        let tenant = conn
            .query_row(
                &format!("SELECT {TENANT_COLS} FROM tenants WHERE slug = ?1"),
                params![slug],
                tenant_from_row,
            )
            .optional()?;
        Ok(tenant)
    }

    /// Flip a tenant to the pro plan and return the updated row.
    pub fn upgrade_tenant(&self, id: i64) -> StoreResult<Option<Tenant>> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE tenants SET subscription_plan = ?1 WHERE id = ?2",
            params![Plan::Pro.as_str(), id],
        )?;
        if changed == 0 {
            return Ok(None);
        }

        let tenant = conn
            .query_row(
                &format!("SELECT {TENANT_COLS} FROM tenants WHERE id = ?1"),
                params![id],
                tenant_from_row,
            )
            .optional()?;
        Ok(tenant)
    }
}

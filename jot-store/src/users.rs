// User rows.

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use jot_core::model::{Role, User};

use crate::{fmt_ts, parse_enum, parse_ts, Store, StoreResult};

const USER_COLS: &str = "id, email, password, role, tenant_id, created_at";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        role: parse_enum(3, row.get(3)?)?,
        tenant_id: row.get(4)?,
        created_at: parse_ts(5, row.get(5)?)?,
    })
}

impl Store {
    pub fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        role: Role,
        tenant_id: i64,
    ) -> StoreResult<User> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO users (email, password, role, tenant_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![email, password_hash, role.as_str(), tenant_id, fmt_ts(Utc::now())],
        )?;
        let id = conn.last_insert_rowid();

        let user = conn.query_row(
            &format!("SELECT {USER_COLS} FROM users WHERE id = ?1"),
            params![id],
            user_from_row,
        )?;
        Ok(user)
    }

    pub fn user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let conn = self.conn.lock().unwrap();
        let user = conn
            .query_row(
                &format!("SELECT {USER_COLS} FROM users WHERE email = ?1"),
                params![email],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }
}

// Schema creation and seeding.

use jot_core::model::{Plan, Role};

use crate::{Store, StoreResult};

impl Store {
    pub(crate) fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS tenants (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                slug TEXT UNIQUE NOT NULL,
                subscription_plan TEXT NOT NULL DEFAULT 'free'
                    CHECK (subscription_plan IN ('free', 'pro')),
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL,
                role TEXT NOT NULL CHECK (role IN ('admin', 'member')),
                tenant_id INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (tenant_id) REFERENCES tenants (id)
            );

            CREATE TABLE IF NOT EXISTS notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                tenant_id INTEGER NOT NULL,
                user_id INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (tenant_id) REFERENCES tenants (id),
                FOREIGN KEY (user_id) REFERENCES users (id)
            );

            CREATE INDEX IF NOT EXISTS idx_users_tenant_id ON users(tenant_id);
            CREATE INDEX IF NOT EXISTS idx_notes_tenant_id ON notes(tenant_id);
            CREATE INDEX IF NOT EXISTS idx_notes_user_id ON notes(user_id);
            ",
        )?;

        Ok(())
    }

    /// Seed the demo tenants and users if the database is empty.
    ///
    /// Idempotent: a database that already holds tenants is left untouched.
    /// Every seeded user shares `password_hash`. Returns whether seeding ran.
    pub fn seed_demo_data(&self, password_hash: &str) -> StoreResult<bool> {
        {
            let conn = self.conn.lock().unwrap();
            let tenants: i64 =
                conn.query_row("SELECT COUNT(*) FROM tenants", [], |row| row.get(0))?;
            if tenants > 0 {
                return Ok(false);
            }
        }

        let acme = self.create_tenant("Acme Corp", "acme", Plan::Free)?;
        let globex = self.create_tenant("Globex Corp", "globex", Plan::Free)?;

        self.create_user("admin@acme.test", password_hash, Role::Admin, acme.id)?;
        self.create_user("user@acme.test", password_hash, Role::Member, acme.id)?;
        self.create_user("admin@globex.test", password_hash, Role::Admin, globex.id)?;
        self.create_user("user@globex.test", password_hash, Role::Member, globex.id)?;

        tracing::info!("database seeded with demo tenants and users");
        Ok(true)
    }
}

// Note rows.
//
// Every operation here takes a tenant id and scopes its statement to it;
// a note in another tenant is indistinguishable from a missing one.

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row, Transaction};

use jot_core::model::Note;
use jot_core::policy;

use crate::{fmt_ts, parse_enum, parse_ts, Store, StoreResult};

const NOTE_COLS: &str = "id, title, content, tenant_id, user_id, created_at, updated_at";

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        tenant_id: row.get(3)?,
        user_id: row.get(4)?,
        created_at: parse_ts(5, row.get(5)?)?,
        updated_at: parse_ts(6, row.get(6)?)?,
    })
}

/// Outcome of a quota-checked note insert.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteCreation {
    Created(Note),
    LimitReached,
}

impl Store {
    /// All notes of a tenant, newest-created first.
    pub fn notes_for_tenant(&self, tenant_id: i64) -> StoreResult<Vec<Note>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {NOTE_COLS} FROM notes WHERE tenant_id = ?1
             ORDER BY created_at DESC, id DESC"
        ))?;
        let notes = stmt
            .query_map(params![tenant_id], note_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    pub fn note_for_tenant(&self, tenant_id: i64, note_id: i64) -> StoreResult<Option<Note>> {
        let conn = self.conn.lock().unwrap();
        let note = conn
            .query_row(
                &format!("SELECT {NOTE_COLS} FROM notes WHERE id = ?1 AND tenant_id = ?2"),
                params![note_id, tenant_id],
                note_from_row,
            )
            .optional()?;
        Ok(note)
    }

    pub fn note_count(&self, tenant_id: i64) -> StoreResult<i64> {
        let conn = self.conn.lock().unwrap();
        let count = conn.query_row(
            "SELECT COUNT(*) FROM notes WHERE tenant_id = ?1",
            params![tenant_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Insert a note, enforcing the free-plan quota.
    ///
    /// Plan lookup, note count, and insert commit as one transaction, so two
    /// concurrent creates at the limit cannot both slip under it.
    pub fn create_note(
        &self,
        tenant_id: i64,
        user_id: i64,
        title: &str,
        content: &str,
    ) -> StoreResult<NoteCreation> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let plan = tx.query_row(
            "SELECT subscription_plan FROM tenants WHERE id = ?1",
            params![tenant_id],
            |row| parse_enum(0, row.get(0)?),
        )?;
        let existing = note_count_tx(&tx, tenant_id)?;
        if !policy::note_quota_allows(plan, existing) {
            return Ok(NoteCreation::LimitReached);
        }

        let now = fmt_ts(Utc::now());
        tx.execute(
            "INSERT INTO notes (title, content, tenant_id, user_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![title, content, tenant_id, user_id, now],
        )?;
        let id = tx.last_insert_rowid();

        let note = tx.query_row(
            &format!("SELECT {NOTE_COLS} FROM notes WHERE id = ?1"),
            params![id],
            note_from_row,
        )?;
        tx.commit()?;
        Ok(NoteCreation::Created(note))
    }

    /// Replace a note's title and content, refreshing `updated_at`.
    pub fn update_note(
        &self,
        tenant_id: i64,
        note_id: i64,
        title: &str,
        content: &str,
    ) -> StoreResult<Option<Note>> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE notes SET title = ?1, content = ?2, updated_at = ?3
             WHERE id = ?4 AND tenant_id = ?5",
            params![title, content, fmt_ts(Utc::now()), note_id, tenant_id],
        )?;
        if changed == 0 {
            return Ok(None);
        }

        let note = conn
            .query_row(
                &format!("SELECT {NOTE_COLS} FROM notes WHERE id = ?1 AND tenant_id = ?2"),
                params![note_id, tenant_id],
                note_from_row,
            )
            .optional()?;
        Ok(note)
    }

    /// Delete a note. Returns whether a row was removed; a second delete of
    /// the same id reports `false`, not an error.
    pub fn delete_note(&self, tenant_id: i64, note_id: i64) -> StoreResult<bool> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "DELETE FROM notes WHERE id = ?1 AND tenant_id = ?2",
            params![note_id, tenant_id],
        )?;
        Ok(changed > 0)
    }
}

fn note_count_tx(tx: &Transaction<'_>, tenant_id: i64) -> rusqlite::Result<i64> {
    tx.query_row(
        "SELECT COUNT(*) FROM notes WHERE tenant_id = ?1",
        params![tenant_id],
        |row| row.get(0),
    )
}

#[cfg(test)]
mod tests {
    use jot_core::model::{Plan, Role, User};
    use jot_core::policy::FREE_PLAN_NOTE_LIMIT;

    use super::NoteCreation;
    use crate::Store;

    fn store_with_user(plan: Plan) -> (Store, User, i64) {
        let store = Store::open_in_memory().unwrap();
        let tenant = store.create_tenant("Acme Corp", "acme", plan).unwrap();
        let user = store
            .create_user("admin@acme.test", "hash", Role::Admin, tenant.id)
            .unwrap();
        let tenant_id = tenant.id;
        (store, user, tenant_id)
    }

    fn create(store: &Store, tenant_id: i64, user_id: i64, title: &str) -> NoteCreation {
        store.create_note(tenant_id, user_id, title, "content").unwrap()
    }

    #[test]
    fn free_plan_insert_stops_exactly_at_the_limit() {
        let (store, user, tenant_id) = store_with_user(Plan::Free);

        for i in 0..FREE_PLAN_NOTE_LIMIT {
            let outcome = create(&store, tenant_id, user.id, &format!("note {i}"));
            assert!(matches!(outcome, NoteCreation::Created(_)));
        }

        let outcome = create(&store, tenant_id, user.id, "one too many");
        assert_eq!(outcome, NoteCreation::LimitReached);
        assert_eq!(store.note_count(tenant_id).unwrap(), FREE_PLAN_NOTE_LIMIT);
    }

    #[test]
    fn pro_plan_is_unlimited() {
        let (store, user, tenant_id) = store_with_user(Plan::Pro);
        for i in 0..FREE_PLAN_NOTE_LIMIT + 2 {
            let outcome = create(&store, tenant_id, user.id, &format!("note {i}"));
            assert!(matches!(outcome, NoteCreation::Created(_)));
        }
    }

    #[test]
    fn listing_is_newest_first_and_tenant_scoped() {
        let (store, user, tenant_id) = store_with_user(Plan::Pro);
        let other = store.create_tenant("Globex Corp", "globex", Plan::Free).unwrap();
        let other_user = store
            .create_user("admin@globex.test", "hash", Role::Admin, other.id)
            .unwrap();

        create(&store, tenant_id, user.id, "first");
        create(&store, tenant_id, user.id, "second");
        create(&store, other.id, other_user.id, "elsewhere");

        let notes = store.notes_for_tenant(tenant_id).unwrap();
        let titles: Vec<_> = notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["second", "first"]);
    }

    #[test]
    fn cross_tenant_lookups_see_nothing() {
        let (store, user, tenant_id) = store_with_user(Plan::Free);
        let other = store.create_tenant("Globex Corp", "globex", Plan::Free).unwrap();

        let NoteCreation::Created(note) = create(&store, tenant_id, user.id, "mine") else {
            panic!("expected creation");
        };

        assert!(store.note_for_tenant(other.id, note.id).unwrap().is_none());
        assert!(store
            .update_note(other.id, note.id, "stolen", "c")
            .unwrap()
            .is_none());
        assert!(!store.delete_note(other.id, note.id).unwrap());

        // Still intact for its own tenant.
        let mine = store.note_for_tenant(tenant_id, note.id).unwrap().unwrap();
        assert_eq!(mine.title, "mine");
    }

    #[test]
    fn update_refreshes_updated_at_and_delete_is_effectively_idempotent() {
        let (store, user, tenant_id) = store_with_user(Plan::Free);
        let NoteCreation::Created(note) = create(&store, tenant_id, user.id, "v1") else {
            panic!("expected creation");
        };

        std::thread::sleep(std::time::Duration::from_millis(5));
        let updated = store
            .update_note(tenant_id, note.id, "v2", "new content")
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "v2");
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.updated_at > note.created_at);

        assert!(store.delete_note(tenant_id, note.id).unwrap());
        assert!(!store.delete_note(tenant_id, note.id).unwrap());
        assert!(store.note_for_tenant(tenant_id, note.id).unwrap().is_none());
    }
}

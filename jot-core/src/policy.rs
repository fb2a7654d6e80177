//! Authorization predicates.
//!
//! Every role or tenant-ownership decision in the service goes through one
//! of these pure functions instead of an inline comparison in a handler.
//! Each predicate either passes or produces the structured error the HTTP
//! boundary will serialize.

use crate::errors::{JotError, JotResult};
use crate::model::{Plan, Principal, Role};

/// Maximum number of notes a free-plan tenant may hold.
pub const FREE_PLAN_NOTE_LIMIT: i64 = 3;

/// Only admins may pass.
pub fn require_admin(principal: &Principal) -> JotResult<()> {
    match principal.role {
        Role::Admin => Ok(()),
        Role::Member => Err(JotError::forbidden("Admin access required").into_anyhow()),
    }
}

/// The caller must belong to the given tenant. An admin of tenant A holds no
/// authority over tenant B, even knowing its slug.
pub fn require_same_tenant(principal: &Principal, tenant_id: i64) -> JotResult<()> {
    if principal.tenant_id == tenant_id {
        Ok(())
    } else {
        Err(JotError::forbidden("Access denied").into_anyhow())
    }
}

/// Whether a tenant on `plan` with `existing_notes` notes may create another.
pub fn note_quota_allows(plan: Plan, existing_notes: i64) -> bool {
    match plan {
        Plan::Pro => true,
        Plan::Free => existing_notes < FREE_PLAN_NOTE_LIMIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    fn principal(role: Role, tenant_id: i64) -> Principal {
        Principal {
            user_id: 7,
            email: "user@acme.test".into(),
            role,
            tenant_id,
        }
    }

    #[test]
    fn members_are_not_admins() {
        let err = require_admin(&principal(Role::Member, 1)).unwrap_err();
        let jot = JotError::from_anyhow(&err).unwrap();
        assert_eq!(jot.code(), 403);
        assert_eq!(jot.message, "Admin access required");

        assert!(require_admin(&principal(Role::Admin, 1)).is_ok());
    }

    #[test]
    fn tenant_ownership_is_exact() {
        assert!(require_same_tenant(&principal(Role::Admin, 1), 1).is_ok());

        let err = require_same_tenant(&principal(Role::Admin, 1), 2).unwrap_err();
        let jot = JotError::from_anyhow(&err).unwrap();
        assert_eq!(jot.code(), 403);
        assert_eq!(jot.message, "Access denied");
    }

    #[test]
    fn free_plan_caps_at_the_limit_and_pro_never_does() {
        assert!(note_quota_allows(Plan::Free, 0));
        assert!(note_quota_allows(Plan::Free, FREE_PLAN_NOTE_LIMIT - 1));
        assert!(!note_quota_allows(Plan::Free, FREE_PLAN_NOTE_LIMIT));
        assert!(!note_quota_allows(Plan::Free, FREE_PLAN_NOTE_LIMIT + 5));

        assert!(note_quota_allows(Plan::Pro, 0));
        assert!(note_quota_allows(Plan::Pro, 10_000));
    }
}

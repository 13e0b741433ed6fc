use crate::model::SessionContext;
use serde::Serialize;

/// Actions the current user may take on the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Permissions {
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_manage_categories: bool,
}

impl Permissions {
    /// Whether the table needs an actions column at all.
    pub fn has_row_actions(&self) -> bool {
        self.can_edit || self.can_delete
    }
}

/// Editing follows `can_edit`; deleting and category management follow `is_admin`.
pub fn permissions_for(session: &SessionContext) -> Permissions {
    Permissions {
        can_create: session.can_edit(),
        can_edit: session.can_edit(),
        can_delete: session.is_admin(),
        can_manage_categories: session.is_admin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, User};

    #[test]
    fn test_flags_are_independent() {
        let user = User::new("u-7", "lead@pharmacy.test");
        let admin_only = SessionContext::new(Some(user), Some(Role::Admin), false, true);
        let perms = permissions_for(&admin_only);

        assert!(!perms.can_create && !perms.can_edit);
        assert!(perms.can_delete && perms.can_manage_categories);
        assert!(perms.has_row_actions());
    }

    #[test]
    fn test_well_known_roles() {
        let user = User::new("u-1", "staff@pharmacy.test");

        let editor = permissions_for(&SessionContext::for_role(user.clone(), Role::Editor));
        assert_eq!(
            editor,
            Permissions {
                can_create: true,
                can_edit: true,
                can_delete: false,
                can_manage_categories: false,
            }
        );

        let viewer = permissions_for(&SessionContext::for_role(user, Role::Viewer));
        assert_eq!(viewer, Permissions::default());
        assert!(!viewer.has_row_actions());
    }
}

//! Role-based access evaluation.

use crate::schema::EntitySchema;

/// Whether a role may open an entity tab.
///
/// An empty allow list means the tab is unrestricted. Otherwise the role
/// must match one of the allowed values exactly; a missing role sees only
/// unrestricted tabs. There is no role hierarchy, `admin` is just another
/// string the registry lists where appropriate.
pub fn can_access(schema: &EntitySchema, role: Option<&str>) -> bool {
    if schema.roles_allowed.is_empty() {
        return true;
    }
    match role {
        Some(role) => schema.roles_allowed.iter().any(|allowed| *allowed == role),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::entity;

    #[test]
    fn test_listed_roles_are_allowed() {
        let requests = entity("requests").unwrap();
        assert!(can_access(requests, Some("Оператор")));
        assert!(can_access(requests, Some("Менеджер")));
        assert!(can_access(requests, Some("admin")));
    }

    #[test]
    fn test_unlisted_roles_are_rejected() {
        let statistics = entity("statistics").unwrap();
        assert!(!can_access(statistics, Some("Оператор")));
        assert!(!can_access(statistics, Some("Заказчик")));
        // Matching is exact, case differences count as different roles
        assert!(!can_access(statistics, Some("менеджер")));
    }

    #[test]
    fn test_membership_ignores_other_entities() {
        use crate::schema::EntityKind;
        let narrow = EntitySchema {
            key: "narrow",
            label: "Узкая",
            roles_allowed: &["Специалист", "admin"],
            kind: EntityKind::Custom {
                render_function: "renderQuality",
            },
        };
        assert!(!can_access(&narrow, Some("Оператор")));
        assert!(can_access(&narrow, Some("Специалист")));
    }

    #[test]
    fn test_missing_role_sees_nothing_restricted() {
        let requests = entity("requests").unwrap();
        assert!(!can_access(requests, None));
        assert!(!can_access(requests, Some("")));
    }

    #[test]
    fn test_empty_allow_list_is_unrestricted() {
        use crate::schema::EntityKind;
        let open = EntitySchema {
            key: "open",
            label: "Открытая",
            roles_allowed: &[],
            kind: EntityKind::Custom {
                render_function: "renderQuality",
            },
        };
        assert!(can_access(&open, Some("Заказчик")));
        assert!(can_access(&open, None));
    }
}

//! Role sources: where the engine learns which roles an entity holds.

use std::sync::Arc;

use crate::policy::{EntityId, Role};

/// Read interface over role assignments.
///
/// Implementations must be safe to call from many decision requests at
/// once. An unknown entity and an entity assigned to nothing look the same:
/// an empty list.
pub trait RoleSource: Send + Sync {
    /// Roles held by `entity`, in evaluation order.
    fn roles_for(&self, entity: &EntityId) -> Vec<Role>;
}

impl<S: RoleSource + ?Sized> RoleSource for Arc<S> {
    fn roles_for(&self, entity: &EntityId) -> Vec<Role> {
        (**self).roles_for(entity)
    }
}

impl<S: RoleSource + ?Sized> RoleSource for &S {
    fn roles_for(&self, entity: &EntityId) -> Vec<Role> {
        (**self).roles_for(entity)
    }
}

/// Role source backed by a fixed list of roles.
///
/// An entity holds every role whose assignments contain it, in list order.
///
/// # Example
///
/// ```
/// use warden_rbac::{EntityId, Role, RoleSource, StaticRoleSource};
///
/// let source = StaticRoleSource::new(vec![
///     Role::new("Reader", "", vec![], vec![EntityId::from("alice")], vec![]),
/// ]);
///
/// assert_eq!(source.roles_for(&EntityId::from("alice")).len(), 1);
/// assert!(source.roles_for(&EntityId::from("bob")).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticRoleSource {
    roles: Vec<Role>,
}

impl StaticRoleSource {
    /// Create a source from a role list.
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    /// Every role known to this source.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }
}

impl FromIterator<Role> for StaticRoleSource {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl RoleSource for StaticRoleSource {
    fn roles_for(&self, entity: &EntityId) -> Vec<Role> {
        self.roles
            .iter()
            .filter(|role| role.is_entity_assigned(entity))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(name: &str, assigned: &[&str]) -> Role {
        Role::new(
            name,
            "",
            vec![],
            assigned.iter().map(|id| EntityId::from(*id)).collect(),
            vec![],
        )
    }

    #[test]
    fn test_roles_for_filters_by_assignment() {
        let source: StaticRoleSource = vec![
            role("a", &["alice"]),
            role("b", &["bob"]),
            role("c", &["alice", "bob"]),
        ]
        .into_iter()
        .collect();

        let names: Vec<String> = source
            .roles_for(&"alice".into())
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(source.roles().len(), 3);
    }

    #[test]
    fn test_unknown_and_empty_entities_have_no_roles() {
        let source = StaticRoleSource::new(vec![role("a", &["alice"])]);

        assert!(source.roles_for(&"mallory".into()).is_empty());
        assert!(source.roles_for(&EntityId::default()).is_empty());
        assert!(StaticRoleSource::default().roles_for(&"alice".into()).is_empty());
    }

    #[test]
    fn test_shared_source() {
        let source = Arc::new(StaticRoleSource::new(vec![role("a", &["alice"])]));
        let shared: &dyn RoleSource = &source;
        assert_eq!(shared.roles_for(&"alice".into()).len(), 1);
    }
}

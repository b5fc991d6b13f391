//! # Policies and Roles
//!
//! ```text
//! Role = name + tags + assignments (entity ids) + [Policy]
//! Policy = name + [Statement]
//! ```
//!
//! Roles and policies are plain values owned by whatever role source serves
//! them. Order is preserved exactly as given; duplicate policies or tags are
//! not collapsed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::statement::Statement;

/// Identifier of the principal being authorized.
///
/// Opaque: it is compared byte for byte and never interpreted. The empty id
/// is valid and simply has no roles.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create an entity id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Classification label on a role. Not used in decisions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Tag {
    /// Tag identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Tag {
    /// Create a tag.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A named, ordered list of statements.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Policy {
    /// Policy name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Statements, evaluated in order.
    pub statements: Vec<Statement>,
}

impl Policy {
    /// Create a policy.
    pub fn new(name: impl Into<String>, description: impl Into<String>, statements: Vec<Statement>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            statements,
        }
    }
}

/// A named bundle of policies and the entities it is assigned to.
///
/// # Example
///
/// ```
/// use warden_rbac::{Effect, EntityId, Env, Method, Policy, Role, Statement, Tag};
///
/// let policy = Policy::new(
///     "AccessControl",
///     "Defines access control policies.",
///     vec![Statement::endpoint(Env::Prod, Method::Get, "/example", Effect::Allow)],
/// );
/// let role = Role::new(
///     "Administrator",
///     "Admin role with all permissions.",
///     vec![Tag::new("1", "Admin")],
///     vec![EntityId::from("entity1")],
///     vec![policy],
/// );
///
/// assert!(role.is_entity_assigned(&EntityId::from("entity1")));
/// assert!(!role.is_entity_assigned(&EntityId::from("entity2")));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    /// Role name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Classification tags.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Entities holding this role.
    #[serde(default)]
    pub assignments: Vec<EntityId>,
    /// Policies, evaluated in order.
    #[serde(default)]
    pub policies: Vec<Policy>,
}

impl Role {
    /// Create a role.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        tags: Vec<Tag>,
        assignments: Vec<EntityId>,
        policies: Vec<Policy>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tags,
            assignments,
            policies,
        }
    }

    /// Check whether an entity holds this role.
    pub fn is_entity_assigned(&self, entity: &EntityId) -> bool {
        self.assignments.iter().any(|id| id == entity)
    }

    /// Iterate over every statement of every policy, in evaluation order.
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.policies.iter().flat_map(|policy| policy.statements.iter())
    }
}

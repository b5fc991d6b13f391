//! # Decision Engine
//!
//! Resolves whether an entity may perform a requested statement.
//!
//! ## Algorithm
//!
//! Default deny, deny overrides, no short-circuit on allow:
//!
//! 1. Fetch the entity's roles. No roles means deny.
//! 2. Walk roles, then policies, then statements, in order.
//! 3. A statement applies when its resource and action match the request.
//!    - An applicable **allow** records a grant and scanning continues, so a
//!      later deny can still override it.
//!    - An applicable **deny** refuses immediately.
//! 4. After a full walk, access is granted only if some allow applied.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::policy::EntityId;
use crate::source::RoleSource;
use crate::statement::{MatchReason, Statement};

/// Something that can answer authorization questions.
pub trait Authorizer: Send + Sync {
    /// Whether `entity` may perform `request`.
    fn is_authorized(&self, entity: &EntityId, request: &Statement) -> bool;
}

impl<A: Authorizer + ?Sized> Authorizer for Arc<A> {
    fn is_authorized(&self, entity: &EntityId, request: &Statement) -> bool {
        (**self).is_authorized(entity, request)
    }
}

impl<A: Authorizer + ?Sized> Authorizer for &A {
    fn is_authorized(&self, entity: &EntityId, request: &Statement) -> bool {
        (**self).is_authorized(entity, request)
    }
}

/// A resolved decision with its diagnostic reason.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Decision {
    /// Whether access is granted.
    pub allowed: bool,
    /// Why. Informational only.
    pub reason: MatchReason,
}

impl Decision {
    fn from_scan(allowed: bool) -> Self {
        Self {
            allowed,
            reason: if allowed {
                MatchReason::AllowMatch
            } else {
                MatchReason::LeastPrivilege
            },
        }
    }

    fn denied() -> Self {
        Self {
            allowed: false,
            reason: MatchReason::DenyMatch,
        }
    }
}

/// Stateless RBAC evaluator over a [`RoleSource`].
///
/// # Example
///
/// ```
/// use warden_rbac::{
///     Authorizer, DecisionEngine, Effect, EntityId, Env, Method, Policy, Role, Statement,
///     StaticRoleSource,
/// };
///
/// let policy = Policy::new(
///     "AccessControl",
///     "",
///     vec![Statement::endpoint(Env::Prod, Method::Get, "/example", Effect::Allow)],
/// );
/// let source = StaticRoleSource::new(vec![Role::new(
///     "Administrator",
///     "",
///     vec![],
///     vec![EntityId::from("entity1")],
///     vec![policy],
/// )]);
/// let engine = DecisionEngine::new(source);
///
/// let read = Statement::endpoint(Env::Prod, Method::Get, "/example", Effect::Allow);
/// let create = Statement::endpoint(Env::Prod, Method::Post, "/example", Effect::Allow);
///
/// assert!(engine.is_authorized(&EntityId::from("entity1"), &read));
/// assert!(!engine.is_authorized(&EntityId::from("entity1"), &create));
/// assert!(!engine.is_authorized(&EntityId::from("entity2"), &read));
/// ```
#[derive(Debug, Clone)]
pub struct DecisionEngine<S> {
    source: S,
}

impl<S: RoleSource> DecisionEngine<S> {
    /// Create an engine reading roles from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The role source this engine reads.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Evaluate a request and report why it was decided that way.
    pub fn evaluate(&self, entity: &EntityId, request: &Statement) -> Decision {
        let roles = self.source.roles_for(entity);

        let mut allowed = false;
        for role in &roles {
            for statement in role.statements() {
                match statement.allowed(request).reason {
                    MatchReason::DenyMatch => {
                        tracing::debug!(
                            entity = %entity,
                            request = %request,
                            role = %role.name,
                            statement = %statement,
                            "Request denied by matching statement"
                        );
                        return Decision::denied();
                    }
                    MatchReason::AllowMatch => allowed = true,
                    MatchReason::LeastPrivilege => {}
                }
            }
        }

        let decision = Decision::from_scan(allowed);
        tracing::debug!(
            entity = %entity,
            request = %request,
            roles = roles.len(),
            allowed = decision.allowed,
            reason = %decision.reason,
            "Authorization decided"
        );
        decision
    }
}

impl<S: RoleSource> Authorizer for DecisionEngine<S> {
    fn is_authorized(&self, entity: &EntityId, request: &Statement) -> bool {
        self.evaluate(entity, request).allowed
    }
}

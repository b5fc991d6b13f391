//! # Statements
//!
//! A statement is a single authorization clause: one resource, one effect
//! and one action.
//!
//! ```text
//! Statement = Resource + Effect + Action
//!
//! Examples:
//!   "PROD:GET:/example:ALLOW:READ"     - allow reading /example in prod
//!   "DEV:POST:/example:DENY:CREATE"    - refuse creating via /example in dev
//! ```
//!
//! The string form is the statement's identity for cache keys and logs. It
//! is never parsed back.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::actions::Action;
use crate::effects::Effect;
use crate::resources::{Env, Method, Resource};

/// Why a statement granted or refused a request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchReason {
    /// A matching statement allows the request.
    AllowMatch,
    /// A matching statement denies the request.
    DenyMatch,
    /// Nothing matched; access is refused by default.
    LeastPrivilege,
}

impl MatchReason {
    /// Get the string representation of the reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchReason::AllowMatch => "ALLOW_MATCH",
            MatchReason::DenyMatch => "DENY_MATCH",
            MatchReason::LeastPrivilege => "LEAST_PRIVILEGE",
        }
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating one statement against a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessResult {
    /// Whether this statement grants access.
    pub access: bool,
    /// Why.
    pub reason: MatchReason,
}

impl AccessResult {
    fn allow() -> Self {
        Self {
            access: true,
            reason: MatchReason::AllowMatch,
        }
    }

    fn deny() -> Self {
        Self {
            access: false,
            reason: MatchReason::DenyMatch,
        }
    }

    fn no_match() -> Self {
        Self {
            access: false,
            reason: MatchReason::LeastPrivilege,
        }
    }
}

/// An immutable authorization clause.
///
/// # Example
///
/// ```
/// use warden_rbac::{Effect, Env, Method, Statement};
///
/// let stmt = Statement::endpoint(Env::Prod, Method::Get, "/example", Effect::Allow);
/// assert_eq!(stmt.to_string(), "PROD:GET:/example:ALLOW:READ");
///
/// let request = Statement::endpoint(Env::Prod, Method::Get, "/example", Effect::Allow);
/// assert!(stmt.allowed(&request).access);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Statement {
    /// What the statement applies to.
    pub resource: Resource,
    /// Whether a match grants or refuses.
    pub effect: Effect,
    /// Which operation it covers.
    pub action: Action,
}

impl Statement {
    /// Create a statement from its parts.
    pub fn new(resource: Resource, effect: Effect, action: Action) -> Self {
        Self {
            resource,
            effect,
            action,
        }
    }

    /// Create an environment-scoped endpoint statement, deriving the action
    /// from the method (see [`Action::for_method`]).
    pub fn endpoint(env: Env, method: Method, path: impl Into<String>, effect: Effect) -> Self {
        Self {
            resource: Resource::env_endpoint(env, method, path),
            effect,
            action: Action::for_method(method),
        }
    }

    /// Evaluate this statement against a requested statement.
    ///
    /// The request matches when both its resource and its action match this
    /// statement's. A match yields this statement's effect; anything else is
    /// [`MatchReason::LeastPrivilege`]. The request's own effect plays no
    /// part.
    pub fn allowed(&self, request: &Statement) -> AccessResult {
        if !self.applies_to(request) {
            return AccessResult::no_match();
        }

        match self.effect {
            Effect::Allow => AccessResult::allow(),
            Effect::Deny => AccessResult::deny(),
        }
    }

    /// Whether this statement covers the request's resource and action.
    pub fn applies_to(&self, request: &Statement) -> bool {
        self.resource.matches(&request.resource) && self.action.matches(&request.action)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.resource, self.effect, self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_example(effect: Effect) -> Statement {
        Statement::endpoint(Env::Prod, Method::Get, "/example", effect)
    }

    #[test]
    fn test_statement_string_identity() {
        assert_eq!(read_example(Effect::Allow).to_string(), "PROD:GET:/example:ALLOW:READ");
        assert_eq!(
            Statement::endpoint(Env::Dev, Method::Post, "/example", Effect::Deny).to_string(),
            "DEV:POST:/example:DENY:CREATE"
        );
        assert_eq!(
            Statement::new(Resource::endpoint(Method::Get, "/x"), Effect::Allow, Action::Read).to_string(),
            "GET:/x:ALLOW:READ"
        );
    }

    #[test]
    fn test_endpoint_derives_action() {
        let put = Statement::endpoint(Env::Prod, Method::Put, "/items", Effect::Allow);
        assert_eq!(put.action, Action::Update);

        let post = Statement::endpoint(Env::Prod, Method::Post, "/items", Effect::Allow);
        assert_eq!(post.action, Action::Create);
    }

    #[test]
    fn test_allow_match() {
        let result = read_example(Effect::Allow).allowed(&read_example(Effect::Allow));
        assert_eq!(result, AccessResult { access: true, reason: MatchReason::AllowMatch });
    }

    #[test]
    fn test_deny_match() {
        let result = read_example(Effect::Deny).allowed(&read_example(Effect::Allow));
        assert_eq!(result, AccessResult { access: false, reason: MatchReason::DenyMatch });
    }

    #[test]
    fn test_request_effect_is_ignored() {
        // A deny-shaped request against an allow statement is still allowed.
        let result = read_example(Effect::Allow).allowed(&read_example(Effect::Deny));
        assert!(result.access);
    }

    #[test]
    fn test_no_match_is_least_privilege() {
        let stmt = read_example(Effect::Allow);

        let other_method = Statement::endpoint(Env::Prod, Method::Post, "/example", Effect::Allow);
        assert_eq!(stmt.allowed(&other_method).reason, MatchReason::LeastPrivilege);

        let other_env = Statement::endpoint(Env::Dev, Method::Get, "/example", Effect::Allow);
        assert_eq!(stmt.allowed(&other_env).reason, MatchReason::LeastPrivilege);

        // Same resource, different action.
        let other_action = Statement::new(stmt.resource.clone(), Effect::Allow, Action::Delete);
        assert!(!stmt.allowed(&other_action).access);
    }

    #[test]
    fn test_shape_mismatch_is_skipped() {
        let scoped = read_example(Effect::Deny);
        let bare = Statement::new(Resource::endpoint(Method::Get, "/example"), Effect::Allow, Action::Read);

        assert_eq!(scoped.allowed(&bare).reason, MatchReason::LeastPrivilege);
        assert_eq!(bare.allowed(&scoped).reason, MatchReason::LeastPrivilege);
    }

    #[test]
    fn test_match_reason_strings() {
        assert_eq!(MatchReason::AllowMatch.to_string(), "ALLOW_MATCH");
        assert_eq!(MatchReason::DenyMatch.as_str(), "DENY_MATCH");
        assert_eq!(
            serde_json::to_string(&MatchReason::LeastPrivilege).unwrap(),
            "\"LEAST_PRIVILEGE\""
        );
    }
}

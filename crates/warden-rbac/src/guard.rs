//! # Request Guard
//!
//! Thin adapter between a transport and an [`Authorizer`]. It turns the raw
//! pieces of an incoming request (entity header, method, path) into a
//! statement, asks for a decision and reports an outcome the transport can
//! map to a response. It is not tied to any HTTP framework.
//!
//! A missing entity header is not a distinct error: the request is
//! evaluated for the empty entity, which holds no roles, and is forbidden.

use serde::{Deserialize, Serialize};

use crate::effects::Effect;
use crate::engine::Authorizer;
use crate::policy::EntityId;
use crate::resources::{Env, Method};
use crate::statement::Statement;

/// Header conventionally carrying the entity id.
pub const ENTITY_ID_HEADER: &str = "X-Entity-ID";

/// Result of guarding a request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GuardOutcome {
    /// The request may proceed.
    Permitted,
    /// The request must be refused.
    Forbidden,
}

impl GuardOutcome {
    /// Whether the request may proceed.
    pub fn is_permitted(&self) -> bool {
        matches!(self, GuardOutcome::Permitted)
    }

    /// Get HTTP status code for this outcome.
    pub fn status_code(&self) -> u16 {
        match self {
            GuardOutcome::Permitted => 200,
            GuardOutcome::Forbidden => 403,
        }
    }
}

impl From<bool> for GuardOutcome {
    fn from(allowed: bool) -> Self {
        if allowed {
            GuardOutcome::Permitted
        } else {
            GuardOutcome::Forbidden
        }
    }
}

/// Guards requests against an [`Authorizer`] for one environment.
///
/// # Example
///
/// ```
/// use warden_rbac::{DecisionEngine, Env, GuardOutcome, RequestGuard, StaticRoleSource};
///
/// let guard = RequestGuard::new(DecisionEngine::new(StaticRoleSource::default()), Env::Prod);
///
/// let outcome = guard.check(Some("entity1"), "GET", "/example");
/// assert_eq!(outcome, GuardOutcome::Forbidden);
/// assert_eq!(outcome.status_code(), 403);
/// ```
#[derive(Debug, Clone)]
pub struct RequestGuard<A> {
    authorizer: A,
    env: Env,
}

impl<A: Authorizer> RequestGuard<A> {
    /// Create a guard for requests served in `env`.
    pub fn new(authorizer: A, env: Env) -> Self {
        Self { authorizer, env }
    }

    /// Create a guard for production requests.
    pub fn production(authorizer: A) -> Self {
        Self::new(authorizer, Env::Prod)
    }

    /// The environment requests are scoped to.
    pub fn env(&self) -> Env {
        self.env
    }

    /// The authorizer consulted.
    pub fn authorizer(&self) -> &A {
        &self.authorizer
    }

    /// Build the statement a request asks for.
    ///
    /// Returns `None` for methods with no endpoint counterpart.
    pub fn request_statement(&self, method: &str, path: &str) -> Option<Statement> {
        let method = Method::parse(method)?;
        Some(Statement::endpoint(self.env, method, path, Effect::Allow))
    }

    /// Decide whether a request may proceed.
    ///
    /// # Arguments
    ///
    /// * `entity_header` - value of [`ENTITY_ID_HEADER`], if the request had one
    /// * `method` - request method as sent, e.g. `"GET"`
    /// * `path` - request path, compared exactly
    pub fn check(&self, entity_header: Option<&str>, method: &str, path: &str) -> GuardOutcome {
        let entity = EntityId::new(entity_header.unwrap_or_default());

        let Some(request) = self.request_statement(method, path) else {
            tracing::debug!(entity = %entity, method, path, "Forbidden: unknown method");
            return GuardOutcome::Forbidden;
        };

        let outcome = GuardOutcome::from(self.authorizer.is_authorized(&entity, &request));
        if !outcome.is_permitted() {
            tracing::debug!(entity = %entity, request = %request, "Forbidden");
        }
        outcome
    }
}

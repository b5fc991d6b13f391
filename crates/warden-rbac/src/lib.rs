//! # Warden RBAC (Role-Based Access Control)
//!
//! This crate decides whether an entity may perform a requested action on a
//! resource, by evaluating the entity's roles against ordered policy
//! statements.
//!
//! ## Overview
//!
//! The warden-rbac crate handles:
//! - **Matchers**: Resources, Effects and Actions with exact matching
//! - **Statements**: Resource + Effect + Action clauses
//! - **Policies and Roles**: Ordered statement lists bundled into roles
//! - **Role Sources**: Lookup of the roles an entity holds
//! - **Decision Engine**: Default-deny, deny-overrides evaluation
//! - **Caching**: Memoized decisions with LRU eviction and TTL
//! - **Request Guard**: Mapping transport requests to decisions
//!
//! ## Architecture
//!
//! ```text
//! request -> RequestGuard -> CachingAuthorizer -> DecisionEngine -> RoleSource
//!                                 |                     |
//!                          ExpiringLruCache     roles -> policies -> statements
//! ```
//!
//! ## Decision Rules
//!
//! - No roles, or no matching statement: **deny** (least privilege)
//! - A matching allow grants access unless a matching deny exists anywhere
//! - A matching deny refuses access, regardless of order
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use warden_rbac::{
//!     Authorizer, CachingAuthorizer, DecisionEngine, Effect, EntityId, Env, Method, Policy,
//!     Role, Statement, StaticRoleSource, Tag,
//! };
//! use warden_cache::CacheConfig;
//!
//! let policy = Policy::new(
//!     "AccessControl",
//!     "Defines access control policies.",
//!     vec![Statement::endpoint(Env::Prod, Method::Get, "/example", Effect::Allow)],
//! );
//! let role = Role::new(
//!     "Administrator",
//!     "Admin role with all permissions.",
//!     vec![Tag::new("1", "Admin")],
//!     vec![EntityId::from("entity1")],
//!     vec![policy],
//! );
//!
//! let engine = DecisionEngine::new(StaticRoleSource::new(vec![role]));
//! let authorizer = CachingAuthorizer::new(engine, CacheConfig::new(10_000, Duration::from_secs(60)));
//!
//! let request = Statement::endpoint(Env::Prod, Method::Get, "/example", Effect::Allow);
//! assert!(authorizer.is_authorized(&EntityId::from("entity1"), &request));
//! ```

pub mod actions;
pub mod cached;
pub mod effects;
pub mod engine;
pub mod error;
pub mod guard;
pub mod policy;
pub mod resources;
pub mod source;
pub mod statement;

// Re-export main types for convenience
pub use actions::Action;
pub use cached::{CachingAuthorizer, DecisionCache};
pub use effects::Effect;
pub use engine::{Authorizer, Decision, DecisionEngine};
pub use error::{RbacError, RbacResult};
pub use guard::{GuardOutcome, RequestGuard, ENTITY_ID_HEADER};
pub use policy::{EntityId, Policy, Role, Tag};
pub use resources::{EndpointResource, Env, Method, Resource};
pub use source::{RoleSource, StaticRoleSource};
pub use statement::{AccessResult, MatchReason, Statement};

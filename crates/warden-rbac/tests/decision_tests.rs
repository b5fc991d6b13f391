//! End-to-end authorization tests.
//!
//! These exercise the full path: role source -> decision engine -> decision
//! cache -> request guard, the way a service would wire them together.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use warden_cache::{spawn_sweeper, CacheConfig};
use warden_rbac::{
    Action, Authorizer, CachingAuthorizer, DecisionEngine, Effect, EntityId, Env, GuardOutcome,
    Method, Policy, RequestGuard, Resource, Role, RoleSource, Statement, StaticRoleSource, Tag,
};

// ============================================================================
// Fixtures
// ============================================================================

fn admin_role() -> Role {
    Role::new(
        "Administrator",
        "Admin role with all permissions.",
        vec![Tag::new("1", "Admin")],
        vec![EntityId::from("entity1")],
        vec![Policy::new(
            "AccessControl",
            "Defines access control policies.",
            vec![Statement::endpoint(Env::Prod, Method::Get, "/example", Effect::Allow)],
        )],
    )
}

/// Role source that counts lookups, standing in for a remote store.
struct CountingSource {
    inner: StaticRoleSource,
    lookups: AtomicUsize,
}

impl CountingSource {
    fn new(roles: Vec<Role>) -> Self {
        Self {
            inner: StaticRoleSource::new(roles),
            lookups: AtomicUsize::new(0),
        }
    }

    fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl RoleSource for CountingSource {
    fn roles_for(&self, entity: &EntityId) -> Vec<Role> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.roles_for(entity)
    }
}

fn get_example() -> Statement {
    Statement::endpoint(Env::Prod, Method::Get, "/example", Effect::Allow)
}

fn post_example() -> Statement {
    Statement::endpoint(Env::Prod, Method::Post, "/example", Effect::Allow)
}

// ============================================================================
// Decision engine
// ============================================================================

#[test]
fn test_end_to_end_scenario() {
    let source = Arc::new(CountingSource::new(vec![admin_role()]));
    let engine = DecisionEngine::new(Arc::clone(&source));
    let authorizer = CachingAuthorizer::new(engine, CacheConfig::new(100, Duration::from_secs(300)));
    let entity = EntityId::from("entity1");

    assert!(authorizer.is_authorized(&entity, &get_example()));
    assert!(!authorizer.is_authorized(&entity, &post_example()));
    assert_eq!(source.lookups(), 2);

    // Same question again is served from the cache.
    assert!(authorizer.is_authorized(&entity, &get_example()));
    assert_eq!(source.lookups(), 2);
}

#[test]
fn test_default_deny_for_every_statement() {
    let engine = DecisionEngine::new(StaticRoleSource::new(vec![admin_role()]));
    let nobody = EntityId::from("entity2");

    for method in [Method::Get, Method::Post, Method::Put, Method::Delete] {
        for env in [Env::Dev, Env::Prod] {
            let request = Statement::endpoint(env, method, "/example", Effect::Allow);
            assert!(!engine.is_authorized(&nobody, &request), "{}", request);
        }
    }
}

#[test]
fn test_deny_in_any_role_overrides_allow_in_another() {
    let blocker = Role::new(
        "Suspended",
        "",
        vec![],
        vec!["entity1".into()],
        vec![Policy::new(
            "Block",
            "",
            vec![Statement::endpoint(Env::Prod, Method::Get, "/example", Effect::Deny)],
        )],
    );

    for roles in [vec![admin_role(), blocker.clone()], vec![blocker, admin_role()]] {
        let engine = DecisionEngine::new(StaticRoleSource::new(roles));
        let decision = engine.evaluate(&"entity1".into(), &get_example());
        assert!(!decision.allowed);
    }
}

#[test]
fn test_deny_in_first_role_beats_later_allow() {
    struct DenyFirst;
    impl RoleSource for DenyFirst {
        fn roles_for(&self, _entity: &EntityId) -> Vec<Role> {
            let deny = Role::new(
                "Deny",
                "",
                vec![],
                vec![],
                vec![Policy::new(
                    "p",
                    "",
                    vec![Statement::endpoint(Env::Prod, Method::Get, "/example", Effect::Deny)],
                )],
            );
            vec![deny, admin_role()]
        }
    }

    let engine = DecisionEngine::new(DenyFirst);
    assert!(!engine.is_authorized(&"anyone".into(), &get_example()));
}

#[test]
fn test_bare_and_scoped_resources_are_distinct() {
    let bare = Statement::new(Resource::endpoint(Method::Get, "/example"), Effect::Allow, Action::Read);
    let role = Role::new(
        "Bare",
        "",
        vec![],
        vec!["entity1".into()],
        vec![Policy::new("p", "", vec![bare.clone()])],
    );
    let engine = DecisionEngine::new(StaticRoleSource::new(vec![role]));

    assert!(engine.is_authorized(&"entity1".into(), &bare));
    assert!(!engine.is_authorized(&"entity1".into(), &get_example()));
}

// ============================================================================
// Guard + cache wiring
// ============================================================================

#[test]
fn test_guard_over_cached_engine() {
    let source = Arc::new(CountingSource::new(vec![admin_role()]));
    let authorizer = CachingAuthorizer::new(
        DecisionEngine::new(Arc::clone(&source)),
        CacheConfig::new(100, Duration::from_secs(300)),
    );
    let guard = RequestGuard::production(authorizer);

    assert_eq!(guard.check(Some("entity1"), "GET", "/example"), GuardOutcome::Permitted);
    assert_eq!(guard.check(Some("entity2"), "GET", "/example"), GuardOutcome::Forbidden);
    assert_eq!(guard.check(Some("entity1"), "GET", "/example"), GuardOutcome::Permitted);
    assert_eq!(source.lookups(), 2);

    // Unknown methods never reach the engine.
    assert_eq!(guard.check(Some("entity1"), "BREW", "/example"), GuardOutcome::Forbidden);
    assert_eq!(source.lookups(), 2);

    let stats = guard.authorizer().stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.entries, 2);
}

#[test]
fn test_stale_decision_survives_until_expiry() {
    let source = Arc::new(CountingSource::new(vec![admin_role()]));
    let authorizer = CachingAuthorizer::new(
        DecisionEngine::new(Arc::clone(&source)),
        CacheConfig::new(100, Duration::from_millis(50)),
    );

    assert!(authorizer.is_authorized(&"entity1".into(), &get_example()));
    assert!(authorizer.is_authorized(&"entity1".into(), &get_example()));
    assert_eq!(source.lookups(), 1);

    std::thread::sleep(Duration::from_millis(100));

    assert!(authorizer.is_authorized(&"entity1".into(), &get_example()));
    assert_eq!(source.lookups(), 2);
}

#[test]
fn test_concurrent_decisions() {
    let source = Arc::new(CountingSource::new(vec![admin_role()]));
    let authorizer = Arc::new(CachingAuthorizer::new(
        DecisionEngine::new(Arc::clone(&source)),
        CacheConfig::new(4, Duration::from_secs(300)),
    ));

    let workers: Vec<_> = (0..8)
        .map(|worker| {
            let authorizer = Arc::clone(&authorizer);
            std::thread::spawn(move || {
                for i in 0..200 {
                    let entity = EntityId::new(format!("entity{}", (worker + i) % 3));
                    let expected = entity.as_str() == "entity1";
                    assert_eq!(authorizer.is_authorized(&entity, &get_example()), expected);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert!(authorizer.cache().len() <= 4);
}

#[tokio::test]
async fn test_sweeper_clears_expired_decisions() {
    let authorizer = CachingAuthorizer::new(
        DecisionEngine::new(StaticRoleSource::new(vec![admin_role()])),
        CacheConfig::new(100, Duration::from_millis(5)),
    );

    assert!(authorizer.is_authorized(&"entity1".into(), &get_example()));
    assert!(!authorizer.is_authorized(&"entity2".into(), &get_example()));
    assert_eq!(authorizer.cache().len(), 2);

    let sweeper = spawn_sweeper(Arc::clone(authorizer.cache()), Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(authorizer.cache().is_empty());
    sweeper.shutdown().await;
}

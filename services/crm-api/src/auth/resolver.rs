//! Per-request scope resolution against the policy store.
//!
//! # Purpose
//! Bridges the pure conflict-resolution algorithm in `crm-access` to the
//! policy store: fetch the rows for the principal's groups, resolve, done.
//! The resolver is handed its store at construction; nothing here reaches
//! for ambient globals.
//!
//! # Failure semantics
//! Missing rows fail closed to `Scope::None`. A store read failure is NOT
//! missing data and propagates as an error; collapsing the two would make an
//! infrastructure outage indistinguishable from "no policy configured".
use crate::auth::Principal;
use crate::store::{PolicyStore, StoreResult};
use crm_access::{Scope, resolve_scope};
use std::sync::Arc;

#[derive(Clone)]
pub struct ScopeResolver {
    policies: Arc<dyn PolicyStore + Send + Sync>,
}

impl ScopeResolver {
    pub fn new(policies: Arc<dyn PolicyStore + Send + Sync>) -> Self {
        Self { policies }
    }

    /// Resolve the effective scope for a principal from current policy rows.
    ///
    /// Recomputes on every call; policy edits take effect on the next
    /// request without any cache invalidation.
    pub async fn resolve(&self, principal: &Principal) -> StoreResult<Scope> {
        let scope = if principal.is_superuser {
            Scope::All
        } else if principal.groups.is_empty() {
            // No groups means no reachable policy; skip the store roundtrip.
            Scope::None
        } else {
            let rows = self.policies.policies_for_groups(&principal.groups).await?;
            resolve_scope(false, &rows)
        };
        metrics::counter!("crm_scope_resolutions_total", "scope" => scope.as_str()).increment(1);
        Ok(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use crate::store::{StoreError, StoreResult};
    use async_trait::async_trait;
    use crm_access::RolePolicy;

    fn principal(user: &str, groups: &[&str], superuser: bool) -> Principal {
        Principal {
            user_id: user.to_string(),
            is_superuser: superuser,
            groups: groups.iter().map(|group| group.to_string()).collect(),
        }
    }

    async fn store_with_policies(rows: &[(&str, Scope, u32)]) -> Arc<InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        for (group, scope, priority) in rows {
            store
                .upsert_policy(RolePolicy {
                    group: group.to_string(),
                    scope: *scope,
                    priority: *priority,
                })
                .await
                .expect("policy");
        }
        store
    }

    #[tokio::test]
    async fn superuser_resolves_all_without_policies() {
        let resolver = ScopeResolver::new(store_with_policies(&[]).await);
        let scope = resolver
            .resolve(&principal("root", &[], true))
            .await
            .expect("scope");
        assert_eq!(scope, Scope::All);
    }

    #[tokio::test]
    async fn no_groups_resolves_none_even_with_policies_present() {
        let store = store_with_policies(&[
            ("sales", Scope::Owned, 50),
            ("ops", Scope::WorkCell, 20),
            ("finance", Scope::Owned, 30),
            ("hr", Scope::None, 10),
            ("board", Scope::All, 1),
        ])
        .await;
        let resolver = ScopeResolver::new(store);
        let scope = resolver
            .resolve(&principal("ana", &[], false))
            .await
            .expect("scope");
        assert_eq!(scope, Scope::None);
    }

    #[tokio::test]
    async fn groups_without_policies_resolve_none() {
        let store = store_with_policies(&[("sales", Scope::Owned, 50)]).await;
        let resolver = ScopeResolver::new(store);
        let scope = resolver
            .resolve(&principal("ana", &["unmapped"], false))
            .await
            .expect("scope");
        assert_eq!(scope, Scope::None);
    }

    #[tokio::test]
    async fn lowest_priority_policy_wins_across_groups() {
        let store = store_with_policies(&[
            ("sales", Scope::Owned, 50),
            ("sales-directors", Scope::All, 10),
        ])
        .await;
        let resolver = ScopeResolver::new(store);
        let scope = resolver
            .resolve(&principal("ana", &["sales", "sales-directors"], false))
            .await
            .expect("scope");
        assert_eq!(scope, Scope::All);
    }

    #[tokio::test]
    async fn repeated_resolution_is_stable() {
        let store = store_with_policies(&[
            ("a", Scope::Owned, 10),
            ("b", Scope::WorkCell, 10),
        ])
        .await;
        let resolver = ScopeResolver::new(store);
        let who = principal("ana", &["a", "b"], false);
        let first = resolver.resolve(&who).await.expect("scope");
        let second = resolver.resolve(&who).await.expect("scope");
        assert_eq!(first, Scope::WorkCell);
        assert_eq!(first, second);
    }

    struct FailingPolicyStore;

    #[async_trait]
    impl PolicyStore for FailingPolicyStore {
        async fn list_policies(&self) -> StoreResult<Vec<RolePolicy>> {
            Err(StoreError::Unexpected(anyhow::anyhow!("store unreachable")))
        }

        async fn policies_for_groups(&self, _groups: &[String]) -> StoreResult<Vec<RolePolicy>> {
            Err(StoreError::Unexpected(anyhow::anyhow!("store unreachable")))
        }

        async fn upsert_policy(&self, _policy: RolePolicy) -> StoreResult<RolePolicy> {
            Err(StoreError::Unexpected(anyhow::anyhow!("store unreachable")))
        }

        async fn delete_policy(&self, _group: &str) -> StoreResult<()> {
            Err(StoreError::Unexpected(anyhow::anyhow!("store unreachable")))
        }
    }

    #[tokio::test]
    async fn store_failure_propagates_instead_of_failing_closed() {
        let resolver = ScopeResolver::new(Arc::new(FailingPolicyStore));
        let err = resolver
            .resolve(&principal("ana", &["sales"], false))
            .await
            .expect_err("store error");
        assert!(matches!(err, StoreError::Unexpected(_)));
    }
}

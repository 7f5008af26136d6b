//! Scope conflict resolution.
//!
//! # Purpose and responsibility
//! Turns the policy rows reachable through a user's group memberships into a
//! single effective [`Scope`]. Keeping the algorithm in one pure function
//! avoids precedence drift between the collection filter and the
//! object-level check.
//!
//! # Key invariants and assumptions
//! - Callers pass only the rows for groups the user actually belongs to.
//! - No rows means no access: the function degrades to [`Scope::None`],
//!   never to a broader scope.
//! - The function performs no I/O and no mutation; it runs on every
//!   list/detail request and must stay deterministic.
use crate::{RolePolicy, Scope};

/// Resolve the effective scope for a user from the policy rows of their
/// groups.
///
/// Precedence: superusers get [`Scope::All`] without any policy lookup.
/// Otherwise the numerically smallest `priority` wins, and among rows tied
/// at that priority the broadest scope wins. Rows tied on both priority and
/// scope are equivalent, so the pick among them is immaterial.
///
/// The broad-scope tie-break intentionally favors permissiveness; see
/// DESIGN.md for the audit note on that choice. Do not change it without
/// revisiting every downstream permission check.
pub fn resolve_scope(is_superuser: bool, policies: &[RolePolicy]) -> Scope {
    if is_superuser {
        return Scope::All;
    }
    let Some(min_priority) = policies.iter().map(|policy| policy.priority).min() else {
        // No policy reachable for any group: fail closed.
        return Scope::None;
    };
    policies
        .iter()
        .filter(|policy| policy.priority == min_priority)
        .map(|policy| policy.scope)
        .max()
        .unwrap_or(Scope::None)
}

#[cfg(test)]
mod tests {
    use super::resolve_scope;
    use crate::{RolePolicy, Scope};

    fn policy(group: &str, scope: Scope, priority: u32) -> RolePolicy {
        RolePolicy {
            group: group.to_string(),
            scope,
            priority,
        }
    }

    #[test]
    fn superuser_short_circuits_policy_lookup() {
        assert_eq!(resolve_scope(true, &[]), Scope::All);
        // Even a restrictive policy set cannot narrow a superuser.
        let rows = vec![policy("restricted", Scope::None, 0)];
        assert_eq!(resolve_scope(true, &rows), Scope::All);
    }

    #[test]
    fn no_rows_resolves_to_none() {
        assert_eq!(resolve_scope(false, &[]), Scope::None);
    }

    #[test]
    fn single_policy_wins_outright() {
        let rows = vec![policy("sales", Scope::Owned, 50)];
        assert_eq!(resolve_scope(false, &rows), Scope::Owned);
    }

    #[test]
    fn lowest_priority_number_takes_precedence() {
        let rows = vec![
            policy("sales", Scope::Owned, 50),
            policy("sales-directors", Scope::All, 10),
        ];
        assert_eq!(resolve_scope(false, &rows), Scope::All);

        // Swapped priorities flip the outcome: the restrictive group now wins.
        let rows = vec![
            policy("sales", Scope::Owned, 10),
            policy("sales-directors", Scope::All, 50),
        ];
        assert_eq!(resolve_scope(false, &rows), Scope::Owned);
    }

    #[test]
    fn priority_ties_resolve_to_the_broadest_scope() {
        let rows = vec![
            policy("a", Scope::Owned, 10),
            policy("b", Scope::WorkCell, 10),
        ];
        assert_eq!(resolve_scope(false, &rows), Scope::WorkCell);

        let rows = vec![
            policy("a", Scope::None, 5),
            policy("b", Scope::All, 5),
            policy("c", Scope::WorkCell, 5),
            policy("d", Scope::Owned, 99),
        ];
        assert_eq!(resolve_scope(false, &rows), Scope::All);
    }

    #[test]
    fn lower_priority_rows_are_ignored_even_when_broader() {
        let rows = vec![
            policy("a", Scope::Owned, 1),
            policy("b", Scope::All, 2),
        ];
        assert_eq!(resolve_scope(false, &rows), Scope::Owned);
    }

    #[test]
    fn resolution_is_deterministic_for_unchanged_inputs() {
        let rows = vec![
            policy("a", Scope::WorkCell, 7),
            policy("b", Scope::Owned, 7),
        ];
        let first = resolve_scope(false, &rows);
        let second = resolve_scope(false, &rows);
        assert_eq!(first, second);
        assert_eq!(first, Scope::WorkCell);
    }
}

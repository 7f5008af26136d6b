//! Row-level filtering and object-level permission checks.
//!
//! # Purpose and responsibility
//! Applies a resolved [`Scope`] to a resource collection or a single record.
//! The two entry points share one match so collection filtering and detail
//! authorization cannot diverge; they are enforced at different points of
//! the request pipeline and must agree.
//!
//! # Key invariants and assumptions
//! - [`Scope::All`] is the identity filter and [`Scope::None`] yields an
//!   empty collection; neither raises.
//! - Relationship traversal is supplied by the caller as typed predicates
//!   ([`ScopePaths`]); the data-access layer pre-joins whatever relations the
//!   predicates need before calling in here.
use crate::Scope;

/// Typed relationship paths for one resource type.
///
/// Different resources reach "owner" and "work cell" through different
/// relationship chains (a contact reaches its work cells via
/// clients -> projects -> work cell, a project directly). Each resource's
/// data-access layer supplies the two predicates and the compiler checks
/// them against the resource type, so a path typo fails at compile time
/// rather than filtering everything out at runtime.
pub struct ScopePaths<O, W> {
    /// True when the record is owned by the given user.
    pub owned_by: O,
    /// True when the record's work-cell user set contains the given user.
    pub in_work_cell: W,
}

impl<O, W> ScopePaths<O, W> {
    pub fn new(owned_by: O, in_work_cell: W) -> Self {
        Self {
            owned_by,
            in_work_cell,
        }
    }
}

/// Narrow a collection to the records visible under `scope`.
pub fn filter_by_scope<T, O, W>(
    scope: Scope,
    requester: &str,
    items: Vec<T>,
    paths: &ScopePaths<O, W>,
) -> Vec<T>
where
    O: Fn(&T, &str) -> bool,
    W: Fn(&T, &str) -> bool,
{
    match scope {
        Scope::All => items,
        Scope::WorkCell => items
            .into_iter()
            .filter(|item| (paths.in_work_cell)(item, requester))
            .collect(),
        Scope::Owned => items
            .into_iter()
            .filter(|item| (paths.owned_by)(item, requester))
            .collect(),
        Scope::None => Vec::new(),
    }
}

/// Decide whether a single record is accessible under `scope`.
///
/// Must match [`filter_by_scope`] exactly: a record that survives the
/// collection filter is permitted here and vice versa.
pub fn permits_object<T, O, W>(
    scope: Scope,
    requester: &str,
    record: &T,
    paths: &ScopePaths<O, W>,
) -> bool
where
    O: Fn(&T, &str) -> bool,
    W: Fn(&T, &str) -> bool,
{
    match scope {
        Scope::All => true,
        Scope::WorkCell => (paths.in_work_cell)(record, requester),
        Scope::Owned => (paths.owned_by)(record, requester),
        Scope::None => false,
    }
}

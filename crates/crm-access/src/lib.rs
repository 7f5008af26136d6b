//! Access-control primitives shared by CRM services.
//!
//! # Purpose
//! Centralizes the role-scope model (scope lattice, role policies), the
//! conflict-resolution algorithm that turns a user's group memberships into a
//! single effective scope, and the row-level filtering applied to every
//! collection and detail query.
//!
//! # How it fits
//! API services fetch the policy rows for a principal's groups, resolve the
//! effective scope once per request, and narrow every resource query through
//! [`filter_by_scope`] / [`permits_object`] with resource-specific
//! [`ScopePaths`]. Fetching rows and pre-joining relationships is the
//! caller's job; everything in this crate is pure and deterministic.
//!
//! # Key invariants
//! - Absence of data always degrades to [`Scope::None`] (fail-closed); no
//!   code path in this crate widens access on missing input.
//! - Resolution is a pure function of its inputs: repeated calls with
//!   unchanged inputs return the same scope.
//! - Collection filtering and object-level checks share one set of scope
//!   semantics and must never diverge.
//!
//! # Examples
//! ```rust
//! use crm_access::{resolve_scope, RolePolicy, Scope};
//!
//! let policies = vec![
//!     RolePolicy { group: "sales".into(), scope: Scope::Owned, priority: 50 },
//!     RolePolicy { group: "sales-directors".into(), scope: Scope::All, priority: 10 },
//! ];
//! assert_eq!(resolve_scope(false, &policies), Scope::All);
//! ```
//!
//! # Common pitfalls
//! - Passing policy rows for groups the user does not belong to; callers must
//!   pre-filter rows to the user's group set.
//! - Treating a store read failure as "no rows". Callers must propagate
//!   infrastructure errors instead of resolving them to `Scope::None`.

mod filter;
mod policy;
mod resolver;
mod scope;

pub use filter::{ScopePaths, filter_by_scope, permits_object};
pub use policy::RolePolicy;
pub use resolver::resolve_scope;
pub use scope::Scope;

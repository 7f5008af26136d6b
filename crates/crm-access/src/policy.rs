//! Role policy records.
//!
//! # Purpose
//! Defines the administrator-managed mapping from a group to a scope and a
//! precedence number, shared between storage and the HTTP API.
use crate::Scope;
use serde::{Deserialize, Serialize};

/// One access policy per group: which scope membership grants and how it
/// ranks against the user's other groups.
///
/// Lower `priority` means higher precedence. The policy store keeps at most
/// one row per group; the resolver treats these rows as read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePolicy {
    pub group: String,
    pub scope: Scope,
    pub priority: u32,
}

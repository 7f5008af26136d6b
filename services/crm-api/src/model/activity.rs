//! Activity log model.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ActivityLog {
    pub activity_id: String,
    pub client_id: String,
    /// The user who performed the activity; the owner for owned-scope checks.
    pub agent: String,
    pub kind: ActivityKind,
    pub summary: String,
    /// Unix timestamp (seconds) supplied by the caller.
    pub occurred_at: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ActivityKind {
    Call,
    Email,
    Meeting,
    Note,
}

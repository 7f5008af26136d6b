//! Work-cell model.
//!
//! # Purpose
//! A work cell is the organizational unit whose membership grants
//! work-cell-scoped visibility into the records reachable from it.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct WorkCell {
    pub work_cell_id: String,
    pub display_name: String,
    /// User identifiers of the cell's members. Membership is managed by
    /// administrators; the scoping layer only reads it.
    pub members: Vec<String>,
}

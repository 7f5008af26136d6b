//! Project model.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Project {
    pub project_id: String,
    pub client_id: String,
    /// The work cell executing this project; the anchor of the work-cell
    /// relationship chain for every record hanging off the project.
    pub work_cell_id: String,
    pub display_name: String,
    pub agent: String,
}

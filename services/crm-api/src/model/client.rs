//! Client (account) model.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Client {
    pub client_id: String,
    pub display_name: String,
    /// Responsible sales agent; the owner for owned-scope checks.
    pub agent: String,
}

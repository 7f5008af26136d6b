//! Contact model.
//!
//! Contacts have no agent of their own: ownership and work-cell reach both
//! flow through the linked clients (clients → projects → work cell).
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Contact {
    pub contact_id: String,
    pub display_name: String,
    pub email: Option<String>,
    /// Clients this contact belongs to. May be empty for an orphaned
    /// contact, which is then visible only under unrestricted scope.
    pub client_ids: Vec<String>,
}

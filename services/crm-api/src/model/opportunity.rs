//! Sales opportunity model and purchase-status tracking.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Opportunity {
    pub opportunity_id: String,
    pub client_id: String,
    /// Optional link to the project the deal belongs to. When present the
    /// work-cell chain goes through the project; otherwise through the
    /// client's projects.
    pub project_id: Option<String>,
    pub display_name: String,
    pub agent: String,
    pub stage: PurchaseStage,
    pub amount_cents: Option<i64>,
}

/// Purchase status of an opportunity.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PurchaseStage {
    Prospecting,
    Quoted,
    Negotiation,
    Won,
    Lost,
}

//! HTTP API request/response types.
//!
//! # Purpose
//! Defines shared payload shapes for the CRM REST API and OpenAPI schema
//! generation.
use crate::model::{
    ActivityKind, ActivityLog, Client, Contact, Opportunity, Project, PurchaseStage, WorkCell,
};
use crm_access::{RolePolicy, Scope};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SystemInfo {
    pub environment: String,
    pub api_version: String,
    pub backend: String,
    pub durable_storage: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub request_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct WorkCellCreateRequest {
    pub work_cell_id: String,
    pub display_name: String,
    pub members: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ClientCreateRequest {
    pub client_id: String,
    pub display_name: String,
    pub agent: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ContactCreateRequest {
    pub contact_id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub client_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProjectCreateRequest {
    pub project_id: String,
    pub client_id: String,
    pub work_cell_id: String,
    pub display_name: String,
    pub agent: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OpportunityCreateRequest {
    pub opportunity_id: String,
    pub client_id: String,
    pub project_id: Option<String>,
    pub display_name: String,
    pub agent: String,
    pub stage: PurchaseStage,
    pub amount_cents: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ActivityCreateRequest {
    pub activity_id: String,
    pub client_id: String,
    pub agent: String,
    pub kind: ActivityKind,
    pub summary: String,
    pub occurred_at: i64,
}

/// Wire shape of a role policy. Mirrors `crm_access::RolePolicy`, which
/// stays free of HTTP schema concerns.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct PolicyRecord {
    pub group: String,
    #[schema(value_type = String, example = "work_cell")]
    pub scope: Scope,
    pub priority: u32,
}

impl From<RolePolicy> for PolicyRecord {
    fn from(policy: RolePolicy) -> Self {
        Self {
            group: policy.group,
            scope: policy.scope,
            priority: policy.priority,
        }
    }
}

impl From<PolicyRecord> for RolePolicy {
    fn from(record: PolicyRecord) -> Self {
        Self {
            group: record.group,
            scope: record.scope,
            priority: record.priority,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PolicyListResponse {
    pub items: Vec<PolicyRecord>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WorkCellListResponse {
    pub items: Vec<WorkCell>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientListResponse {
    pub items: Vec<Client>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactListResponse {
    pub items: Vec<Contact>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectListResponse {
    pub items: Vec<Project>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OpportunityListResponse {
    pub items: Vec<Opportunity>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActivityListResponse {
    pub items: Vec<ActivityLog>,
}

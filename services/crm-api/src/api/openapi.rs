//! OpenAPI schema aggregation for the CRM API.
//!
//! # Purpose
//! Collects all routes and schema types into a single OpenAPI document for
//! docs and client generation.
use crate::api::{
    activities, clients, contacts, opportunities, policies, projects, system, work_cells,
    types::{
        ActivityCreateRequest, ActivityListResponse, ClientCreateRequest, ClientListResponse,
        ContactCreateRequest, ContactListResponse, ErrorResponse, HealthStatus,
        OpportunityCreateRequest, OpportunityListResponse, PolicyListResponse, PolicyRecord,
        ProjectCreateRequest, ProjectListResponse, SystemInfo, WorkCellCreateRequest,
        WorkCellListResponse,
    },
};
use crate::model::{
    ActivityKind, ActivityLog, Client, Contact, Opportunity, Project, PurchaseStage, WorkCell,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "crm-api",
        version = "v1",
        description = "Scoped CRM HTTP API"
    ),
    paths(
        system::system_info,
        system::system_health,
        policies::list_policies,
        policies::upsert_policy,
        policies::delete_policy,
        work_cells::list_work_cells,
        work_cells::get_work_cell,
        work_cells::create_work_cell,
        work_cells::delete_work_cell,
        clients::list_clients,
        clients::get_client,
        clients::create_client,
        clients::delete_client,
        contacts::list_contacts,
        contacts::get_contact,
        contacts::create_contact,
        contacts::delete_contact,
        projects::list_projects,
        projects::get_project,
        projects::create_project,
        projects::delete_project,
        opportunities::list_opportunities,
        opportunities::get_opportunity,
        opportunities::create_opportunity,
        opportunities::delete_opportunity,
        activities::list_activities,
        activities::get_activity,
        activities::create_activity,
        activities::delete_activity
    ),
    components(schemas(
        SystemInfo,
        HealthStatus,
        ErrorResponse,
        PolicyRecord,
        PolicyListResponse,
        WorkCell,
        WorkCellCreateRequest,
        WorkCellListResponse,
        Client,
        ClientCreateRequest,
        ClientListResponse,
        Contact,
        ContactCreateRequest,
        ContactListResponse,
        Project,
        ProjectCreateRequest,
        ProjectListResponse,
        Opportunity,
        OpportunityCreateRequest,
        OpportunityListResponse,
        PurchaseStage,
        ActivityLog,
        ActivityKind,
        ActivityCreateRequest,
        ActivityListResponse
    )),
    tags(
        (name = "system", description = "System and health endpoints"),
        (name = "policies", description = "Role policy administration"),
        (name = "work-cells", description = "Work cell management"),
        (name = "clients", description = "Client accounts"),
        (name = "contacts", description = "Contacts linked to clients"),
        (name = "projects", description = "Client projects"),
        (name = "opportunities", description = "Purchase opportunities"),
        (name = "activities", description = "Activity log entries")
    )
)]
pub struct ApiDoc;

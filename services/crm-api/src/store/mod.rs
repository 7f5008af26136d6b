//! Storage traits and error taxonomy for the CRM API.
//!
//! # Purpose
//! Defines the async storage seams the handlers and the scope resolver work
//! against. [`CrmStore`] covers the CRM entities, [`PolicyStore`] the
//! administrator-managed role policies; backends implement both and are
//! injected as one [`CrmAccessStore`] handle.
use crate::model::{ActivityLog, Client, Contact, Opportunity, Project, WorkCell};
use async_trait::async_trait;
use crm_access::RolePolicy;
use thiserror::Error;

pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CrmStore: Send + Sync {
    async fn list_work_cells(&self) -> StoreResult<Vec<WorkCell>>;
    async fn get_work_cell(&self, work_cell_id: &str) -> StoreResult<WorkCell>;
    async fn create_work_cell(&self, work_cell: WorkCell) -> StoreResult<WorkCell>;
    async fn delete_work_cell(&self, work_cell_id: &str) -> StoreResult<()>;
    async fn work_cell_exists(&self, work_cell_id: &str) -> StoreResult<bool>;

    async fn list_clients(&self) -> StoreResult<Vec<Client>>;
    async fn get_client(&self, client_id: &str) -> StoreResult<Client>;
    async fn create_client(&self, client: Client) -> StoreResult<Client>;
    async fn delete_client(&self, client_id: &str) -> StoreResult<()>;
    async fn client_exists(&self, client_id: &str) -> StoreResult<bool>;

    async fn list_contacts(&self) -> StoreResult<Vec<Contact>>;
    async fn get_contact(&self, contact_id: &str) -> StoreResult<Contact>;
    async fn create_contact(&self, contact: Contact) -> StoreResult<Contact>;
    async fn delete_contact(&self, contact_id: &str) -> StoreResult<()>;

    async fn list_projects(&self) -> StoreResult<Vec<Project>>;
    async fn get_project(&self, project_id: &str) -> StoreResult<Project>;
    async fn create_project(&self, project: Project) -> StoreResult<Project>;
    async fn delete_project(&self, project_id: &str) -> StoreResult<()>;
    async fn project_exists(&self, project_id: &str) -> StoreResult<bool>;

    async fn list_opportunities(&self) -> StoreResult<Vec<Opportunity>>;
    async fn get_opportunity(&self, opportunity_id: &str) -> StoreResult<Opportunity>;
    async fn create_opportunity(&self, opportunity: Opportunity) -> StoreResult<Opportunity>;
    async fn delete_opportunity(&self, opportunity_id: &str) -> StoreResult<()>;

    async fn list_activities(&self) -> StoreResult<Vec<ActivityLog>>;
    async fn get_activity(&self, activity_id: &str) -> StoreResult<ActivityLog>;
    async fn create_activity(&self, activity: ActivityLog) -> StoreResult<ActivityLog>;
    async fn delete_activity(&self, activity_id: &str) -> StoreResult<()>;

    async fn health_check(&self) -> StoreResult<()>;
    fn is_durable(&self) -> bool;
    fn backend_name(&self) -> &'static str;
}

/// Read/write access to role policies. The resolver only reads; writes come
/// from the admin endpoints.
#[async_trait]
pub trait PolicyStore: Send + Sync {
    async fn list_policies(&self) -> StoreResult<Vec<RolePolicy>>;
    /// Policy rows whose group is in the given set. Groups without a policy
    /// simply contribute no row; that is not an error.
    async fn policies_for_groups(&self, groups: &[String]) -> StoreResult<Vec<RolePolicy>>;
    /// Insert or replace the policy for `policy.group`. At most one row per
    /// group may exist.
    async fn upsert_policy(&self, policy: RolePolicy) -> StoreResult<RolePolicy>;
    async fn delete_policy(&self, group: &str) -> StoreResult<()>;
}

pub trait CrmAccessStore: CrmStore + PolicyStore {}

impl<T: CrmStore + PolicyStore> CrmAccessStore for T {}

//! In-memory implementation of the CRM stores.
//!
//! # Purpose
//! Implements [`CrmStore`] and [`PolicyStore`] entirely in memory using
//! `HashMap`s guarded by `tokio::sync::RwLock`. It exists for:
//! - local development and tests (no external dependencies)
//! - deployments where durability is not required
//!
//! # Durability and consistency
//! - **Not durable**: all state is lost on process restart.
//! - **Single-process consistency**: write locks for mutations, read locks
//!   for reads.
//!
//! # Referential integrity
//! Creates check that parent records exist. Deleting a client cascades to
//! its projects, opportunities, and activity logs and detaches the client
//! from contacts. Deleting a work cell is rejected while projects still
//! reference it, since that would silently cut the scope chain for every
//! dependent record.
//!
//! # Metrics
//! Entity-count gauges are updated on mutation so observability behavior
//! matches what a durable backend would report.
use super::{CrmStore, PolicyStore, StoreError, StoreResult};
use crate::model::{ActivityLog, Client, Contact, Opportunity, Project, WorkCell};
use async_trait::async_trait;
use crm_access::RolePolicy;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory CRM store.
///
/// All maps are wrapped in `Arc<RwLock<...>>` so the store can be cloned and
/// shared across async request handlers, reads proceed concurrently, and
/// writes are serialized to preserve invariants.
#[derive(Default)]
pub struct InMemoryStore {
    work_cells: Arc<RwLock<HashMap<String, WorkCell>>>,
    clients: Arc<RwLock<HashMap<String, Client>>>,
    contacts: Arc<RwLock<HashMap<String, Contact>>>,
    projects: Arc<RwLock<HashMap<String, Project>>>,
    opportunities: Arc<RwLock<HashMap<String, Opportunity>>>,
    activities: Arc<RwLock<HashMap<String, ActivityLog>>>,
    /// Role policies keyed by group; the unique-group invariant falls out of
    /// the map key.
    policies: Arc<RwLock<HashMap<String, RolePolicy>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CrmStore for InMemoryStore {
    async fn list_work_cells(&self) -> StoreResult<Vec<WorkCell>> {
        // Lists come back sorted by id so responses are stable.
        let mut items: Vec<WorkCell> = self.work_cells.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.work_cell_id.cmp(&b.work_cell_id));
        Ok(items)
    }

    async fn get_work_cell(&self, work_cell_id: &str) -> StoreResult<WorkCell> {
        self.work_cells
            .read()
            .await
            .get(work_cell_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("work cell".into()))
    }

    async fn create_work_cell(&self, work_cell: WorkCell) -> StoreResult<WorkCell> {
        let mut work_cells = self.work_cells.write().await;
        if work_cells.contains_key(&work_cell.work_cell_id) {
            return Err(StoreError::Conflict("work cell exists".into()));
        }
        work_cells.insert(work_cell.work_cell_id.clone(), work_cell.clone());
        metrics::gauge!("crm_work_cells_total").set(work_cells.len() as f64);
        Ok(work_cell)
    }

    async fn delete_work_cell(&self, work_cell_id: &str) -> StoreResult<()> {
        // Reject while projects still anchor their scope chain on this cell.
        let referenced = self
            .projects
            .read()
            .await
            .values()
            .any(|project| project.work_cell_id == work_cell_id);
        if referenced {
            return Err(StoreError::Conflict(
                "work cell still referenced by projects".into(),
            ));
        }
        let mut work_cells = self.work_cells.write().await;
        if work_cells.remove(work_cell_id).is_none() {
            return Err(StoreError::NotFound("work cell".into()));
        }
        metrics::gauge!("crm_work_cells_total").set(work_cells.len() as f64);
        Ok(())
    }

    async fn work_cell_exists(&self, work_cell_id: &str) -> StoreResult<bool> {
        Ok(self.work_cells.read().await.contains_key(work_cell_id))
    }

    async fn list_clients(&self) -> StoreResult<Vec<Client>> {
        let mut items: Vec<Client> = self.clients.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.client_id.cmp(&b.client_id));
        Ok(items)
    }

    async fn get_client(&self, client_id: &str) -> StoreResult<Client> {
        self.clients
            .read()
            .await
            .get(client_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("client".into()))
    }

    async fn create_client(&self, client: Client) -> StoreResult<Client> {
        let mut clients = self.clients.write().await;
        if clients.contains_key(&client.client_id) {
            return Err(StoreError::Conflict("client exists".into()));
        }
        clients.insert(client.client_id.clone(), client.clone());
        metrics::gauge!("crm_clients_total").set(clients.len() as f64);
        Ok(client)
    }

    async fn delete_client(&self, client_id: &str) -> StoreResult<()> {
        let mut clients = self.clients.write().await;
        if clients.remove(client_id).is_none() {
            return Err(StoreError::NotFound("client".into()));
        }
        metrics::gauge!("crm_clients_total").set(clients.len() as f64);
        drop(clients);

        // Cascading delete: projects, opportunities, and activities hang off
        // the client; contacts merely link to it and are detached instead.
        let mut projects = self.projects.write().await;
        projects.retain(|_, project| project.client_id != client_id);
        metrics::gauge!("crm_projects_total").set(projects.len() as f64);
        drop(projects);

        let mut opportunities = self.opportunities.write().await;
        opportunities.retain(|_, opportunity| opportunity.client_id != client_id);
        metrics::gauge!("crm_opportunities_total").set(opportunities.len() as f64);
        drop(opportunities);

        let mut activities = self.activities.write().await;
        activities.retain(|_, activity| activity.client_id != client_id);
        metrics::gauge!("crm_activities_total").set(activities.len() as f64);
        drop(activities);

        let mut contacts = self.contacts.write().await;
        for contact in contacts.values_mut() {
            contact.client_ids.retain(|id| id != client_id);
        }
        Ok(())
    }

    async fn client_exists(&self, client_id: &str) -> StoreResult<bool> {
        Ok(self.clients.read().await.contains_key(client_id))
    }

    async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        let mut items: Vec<Contact> = self.contacts.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.contact_id.cmp(&b.contact_id));
        Ok(items)
    }

    async fn get_contact(&self, contact_id: &str) -> StoreResult<Contact> {
        self.contacts
            .read()
            .await
            .get(contact_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("contact".into()))
    }

    async fn create_contact(&self, contact: Contact) -> StoreResult<Contact> {
        let mut contacts = self.contacts.write().await;
        if contacts.contains_key(&contact.contact_id) {
            return Err(StoreError::Conflict("contact exists".into()));
        }
        contacts.insert(contact.contact_id.clone(), contact.clone());
        metrics::gauge!("crm_contacts_total").set(contacts.len() as f64);
        Ok(contact)
    }

    async fn delete_contact(&self, contact_id: &str) -> StoreResult<()> {
        let mut contacts = self.contacts.write().await;
        if contacts.remove(contact_id).is_none() {
            return Err(StoreError::NotFound("contact".into()));
        }
        metrics::gauge!("crm_contacts_total").set(contacts.len() as f64);
        Ok(())
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let mut items: Vec<Project> = self.projects.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.project_id.cmp(&b.project_id));
        Ok(items)
    }

    async fn get_project(&self, project_id: &str) -> StoreResult<Project> {
        self.projects
            .read()
            .await
            .get(project_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("project".into()))
    }

    async fn create_project(&self, project: Project) -> StoreResult<Project> {
        let mut projects = self.projects.write().await;
        if projects.contains_key(&project.project_id) {
            return Err(StoreError::Conflict("project exists".into()));
        }
        projects.insert(project.project_id.clone(), project.clone());
        metrics::gauge!("crm_projects_total").set(projects.len() as f64);
        Ok(project)
    }

    async fn delete_project(&self, project_id: &str) -> StoreResult<()> {
        let mut projects = self.projects.write().await;
        if projects.remove(project_id).is_none() {
            return Err(StoreError::NotFound("project".into()));
        }
        metrics::gauge!("crm_projects_total").set(projects.len() as f64);
        drop(projects);

        // Opportunities keep their client linkage; only the project link is
        // cleared so their scope chain falls back to the client's projects.
        let mut opportunities = self.opportunities.write().await;
        for opportunity in opportunities.values_mut() {
            if opportunity.project_id.as_deref() == Some(project_id) {
                opportunity.project_id = None;
            }
        }
        Ok(())
    }

    async fn project_exists(&self, project_id: &str) -> StoreResult<bool> {
        Ok(self.projects.read().await.contains_key(project_id))
    }

    async fn list_opportunities(&self) -> StoreResult<Vec<Opportunity>> {
        let mut items: Vec<Opportunity> =
            self.opportunities.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.opportunity_id.cmp(&b.opportunity_id));
        Ok(items)
    }

    async fn get_opportunity(&self, opportunity_id: &str) -> StoreResult<Opportunity> {
        self.opportunities
            .read()
            .await
            .get(opportunity_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("opportunity".into()))
    }

    async fn create_opportunity(&self, opportunity: Opportunity) -> StoreResult<Opportunity> {
        let mut opportunities = self.opportunities.write().await;
        if opportunities.contains_key(&opportunity.opportunity_id) {
            return Err(StoreError::Conflict("opportunity exists".into()));
        }
        opportunities.insert(opportunity.opportunity_id.clone(), opportunity.clone());
        metrics::gauge!("crm_opportunities_total").set(opportunities.len() as f64);
        Ok(opportunity)
    }

    async fn delete_opportunity(&self, opportunity_id: &str) -> StoreResult<()> {
        let mut opportunities = self.opportunities.write().await;
        if opportunities.remove(opportunity_id).is_none() {
            return Err(StoreError::NotFound("opportunity".into()));
        }
        metrics::gauge!("crm_opportunities_total").set(opportunities.len() as f64);
        Ok(())
    }

    async fn list_activities(&self) -> StoreResult<Vec<ActivityLog>> {
        let mut items: Vec<ActivityLog> = self.activities.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.activity_id.cmp(&b.activity_id));
        Ok(items)
    }

    async fn get_activity(&self, activity_id: &str) -> StoreResult<ActivityLog> {
        self.activities
            .read()
            .await
            .get(activity_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("activity".into()))
    }

    async fn create_activity(&self, activity: ActivityLog) -> StoreResult<ActivityLog> {
        let mut activities = self.activities.write().await;
        if activities.contains_key(&activity.activity_id) {
            return Err(StoreError::Conflict("activity exists".into()));
        }
        activities.insert(activity.activity_id.clone(), activity.clone());
        metrics::gauge!("crm_activities_total").set(activities.len() as f64);
        Ok(activity)
    }

    async fn delete_activity(&self, activity_id: &str) -> StoreResult<()> {
        let mut activities = self.activities.write().await;
        if activities.remove(activity_id).is_none() {
            return Err(StoreError::NotFound("activity".into()));
        }
        metrics::gauge!("crm_activities_total").set(activities.len() as f64);
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        // In-memory backend is always "healthy" if the process is running.
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[async_trait]
impl PolicyStore for InMemoryStore {
    async fn list_policies(&self) -> StoreResult<Vec<RolePolicy>> {
        let mut items: Vec<RolePolicy> = self.policies.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.group.cmp(&b.group));
        Ok(items)
    }

    async fn policies_for_groups(&self, groups: &[String]) -> StoreResult<Vec<RolePolicy>> {
        let policies = self.policies.read().await;
        Ok(groups
            .iter()
            .filter_map(|group| policies.get(group).cloned())
            .collect())
    }

    async fn upsert_policy(&self, policy: RolePolicy) -> StoreResult<RolePolicy> {
        let mut policies = self.policies.write().await;
        policies.insert(policy.group.clone(), policy.clone());
        metrics::gauge!("crm_role_policies_total").set(policies.len() as f64);
        Ok(policy)
    }

    async fn delete_policy(&self, group: &str) -> StoreResult<()> {
        let mut policies = self.policies.write().await;
        if policies.remove(group).is_none() {
            return Err(StoreError::NotFound("policy".into()));
        }
        metrics::gauge!("crm_role_policies_total").set(policies.len() as f64);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActivityKind, PurchaseStage};
    use crm_access::Scope;

    fn client(id: &str, agent: &str) -> Client {
        Client {
            client_id: id.to_string(),
            display_name: format!("Client {id}"),
            agent: agent.to_string(),
        }
    }

    fn project(id: &str, client_id: &str, cell: &str) -> Project {
        Project {
            project_id: id.to_string(),
            client_id: client_id.to_string(),
            work_cell_id: cell.to_string(),
            display_name: format!("Project {id}"),
            agent: "agent".to_string(),
        }
    }

    #[tokio::test]
    async fn create_conflicts_and_lookup_errors() {
        let store = InMemoryStore::new();
        store.create_client(client("c1", "ana")).await.expect("client");

        let err = store
            .create_client(client("c1", "bea"))
            .await
            .expect_err("duplicate client");
        assert!(matches!(err, StoreError::Conflict(_)));

        let err = store.get_client("missing").await.expect_err("missing client");
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn client_delete_cascades_and_detaches_contacts() {
        let store = InMemoryStore::new();
        store
            .create_work_cell(WorkCell {
                work_cell_id: "north".to_string(),
                display_name: "North".to_string(),
                members: vec!["ana".to_string()],
            })
            .await
            .expect("cell");
        store.create_client(client("c1", "ana")).await.expect("client");
        store
            .create_project(project("p1", "c1", "north"))
            .await
            .expect("project");
        store
            .create_opportunity(Opportunity {
                opportunity_id: "o1".to_string(),
                client_id: "c1".to_string(),
                project_id: Some("p1".to_string()),
                display_name: "Deal".to_string(),
                agent: "ana".to_string(),
                stage: PurchaseStage::Quoted,
                amount_cents: Some(125_000),
            })
            .await
            .expect("opportunity");
        store
            .create_activity(ActivityLog {
                activity_id: "a1".to_string(),
                client_id: "c1".to_string(),
                agent: "ana".to_string(),
                kind: ActivityKind::Call,
                summary: "Intro call".to_string(),
                occurred_at: 1_700_000_000,
            })
            .await
            .expect("activity");
        store
            .create_contact(Contact {
                contact_id: "ct1".to_string(),
                display_name: "Maria".to_string(),
                email: None,
                client_ids: vec!["c1".to_string()],
            })
            .await
            .expect("contact");

        store.delete_client("c1").await.expect("delete");

        assert!(matches!(
            store.get_project("p1").await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.get_opportunity("o1").await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.get_activity("a1").await,
            Err(StoreError::NotFound(_))
        ));
        let contact = store.get_contact("ct1").await.expect("contact survives");
        assert!(contact.client_ids.is_empty());
    }

    #[tokio::test]
    async fn work_cell_delete_rejected_while_referenced() {
        let store = InMemoryStore::new();
        store
            .create_work_cell(WorkCell {
                work_cell_id: "north".to_string(),
                display_name: "North".to_string(),
                members: Vec::new(),
            })
            .await
            .expect("cell");
        store.create_client(client("c1", "ana")).await.expect("client");
        store
            .create_project(project("p1", "c1", "north"))
            .await
            .expect("project");

        let err = store.delete_work_cell("north").await.expect_err("referenced");
        assert!(matches!(err, StoreError::Conflict(_)));

        store.delete_project("p1").await.expect("drop project");
        store.delete_work_cell("north").await.expect("now unreferenced");
    }

    #[tokio::test]
    async fn project_delete_clears_opportunity_link() {
        let store = InMemoryStore::new();
        store.create_client(client("c1", "ana")).await.expect("client");
        store
            .create_project(project("p1", "c1", "north"))
            .await
            .expect("project");
        store
            .create_opportunity(Opportunity {
                opportunity_id: "o1".to_string(),
                client_id: "c1".to_string(),
                project_id: Some("p1".to_string()),
                display_name: "Deal".to_string(),
                agent: "ana".to_string(),
                stage: PurchaseStage::Prospecting,
                amount_cents: None,
            })
            .await
            .expect("opportunity");

        store.delete_project("p1").await.expect("delete project");
        let opportunity = store.get_opportunity("o1").await.expect("opportunity");
        assert_eq!(opportunity.project_id, None);
    }

    #[tokio::test]
    async fn policy_upsert_keeps_one_row_per_group() {
        let store = InMemoryStore::new();
        store
            .upsert_policy(RolePolicy {
                group: "sales".to_string(),
                scope: Scope::Owned,
                priority: 50,
            })
            .await
            .expect("insert");
        store
            .upsert_policy(RolePolicy {
                group: "sales".to_string(),
                scope: Scope::WorkCell,
                priority: 20,
            })
            .await
            .expect("replace");

        let rows = store.list_policies().await.expect("list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].scope, Scope::WorkCell);
        assert_eq!(rows[0].priority, 20);

        let rows = store
            .policies_for_groups(&["sales".to_string(), "other".to_string()])
            .await
            .expect("by groups");
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn backend_health_and_identity() {
        let store = InMemoryStore::new();
        store.health_check().await.expect("health");
        assert!(!store.is_durable());
        assert_eq!(store.backend_name(), "memory");
    }
}

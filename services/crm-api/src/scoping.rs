//! Pre-joined relationship index and per-resource scope paths.
//!
//! # Purpose
//! The filter in `crm-access` is resource-agnostic; what varies per resource
//! is how it reaches its owner and its work cell. [`ScopeIndex`] snapshots
//! the relationship chains once per request (work-cell membership,
//! project → work cell, client → work cells via its projects, client →
//! agent) and hands each resource its typed [`ScopePaths`].
//!
//! # Notes
//! The index is a point-in-time snapshot: build it, filter with it, drop it.
//! It must never be cached across requests or scope changes would lag
//! membership edits.
use crate::model::{ActivityLog, Client, Contact, Opportunity, Project, WorkCell};
use crm_access::ScopePaths;
use std::collections::{HashMap, HashSet};

pub struct ScopeIndex {
    cell_members: HashMap<String, HashSet<String>>,
    project_cell: HashMap<String, String>,
    client_cells: HashMap<String, HashSet<String>>,
    client_agent: HashMap<String, String>,
}

impl ScopeIndex {
    /// Build the index from entity snapshots. Callers fetch the three lists
    /// from the store; keeping this constructor synchronous keeps it
    /// trivially testable.
    pub fn build(work_cells: Vec<WorkCell>, clients: Vec<Client>, projects: Vec<Project>) -> Self {
        let mut cell_members: HashMap<String, HashSet<String>> = HashMap::new();
        for cell in work_cells {
            cell_members.insert(cell.work_cell_id, cell.members.into_iter().collect());
        }

        let mut project_cell = HashMap::new();
        let mut client_cells: HashMap<String, HashSet<String>> = HashMap::new();
        for project in projects {
            client_cells
                .entry(project.client_id)
                .or_default()
                .insert(project.work_cell_id.clone());
            project_cell.insert(project.project_id, project.work_cell_id);
        }

        let mut client_agent = HashMap::new();
        for client in clients {
            client_agent.insert(client.client_id, client.agent);
        }

        Self {
            cell_members,
            project_cell,
            client_cells,
            client_agent,
        }
    }

    fn cell_contains(&self, work_cell_id: &str, user_id: &str) -> bool {
        self.cell_members
            .get(work_cell_id)
            .is_some_and(|members| members.contains(user_id))
    }

    fn client_reaches(&self, client_id: &str, user_id: &str) -> bool {
        self.client_cells
            .get(client_id)
            .is_some_and(|cells| cells.iter().any(|cell| self.cell_contains(cell, user_id)))
    }

    fn project_reaches(&self, project_id: &str, user_id: &str) -> bool {
        self.project_cell
            .get(project_id)
            .is_some_and(|cell| self.cell_contains(cell, user_id))
    }

    /// Clients: owned via `agent`, work cell via the client's projects.
    pub fn client_paths(
        &self,
    ) -> ScopePaths<impl Fn(&Client, &str) -> bool + '_, impl Fn(&Client, &str) -> bool + '_> {
        ScopePaths::new(
            |client: &Client, user: &str| client.agent == user,
            |client: &Client, user: &str| self.client_reaches(&client.client_id, user),
        )
    }

    /// Contacts: both chains run through the linked clients
    /// (clients → agent, clients → projects → work cell).
    pub fn contact_paths(
        &self,
    ) -> ScopePaths<impl Fn(&Contact, &str) -> bool + '_, impl Fn(&Contact, &str) -> bool + '_>
    {
        ScopePaths::new(
            |contact: &Contact, user: &str| {
                contact.client_ids.iter().any(|client_id| {
                    self.client_agent
                        .get(client_id)
                        .is_some_and(|agent| agent == user)
                })
            },
            |contact: &Contact, user: &str| {
                contact
                    .client_ids
                    .iter()
                    .any(|client_id| self.client_reaches(client_id, user))
            },
        )
    }

    /// Projects: owned via `agent`, work cell directly via `work_cell_id`.
    pub fn project_paths(
        &self,
    ) -> ScopePaths<impl Fn(&Project, &str) -> bool + '_, impl Fn(&Project, &str) -> bool + '_>
    {
        ScopePaths::new(
            |project: &Project, user: &str| project.agent == user,
            |project: &Project, user: &str| self.cell_contains(&project.work_cell_id, user),
        )
    }

    /// Opportunities: owned via `agent`; work cell via the linked project
    /// when present, otherwise via the client's projects.
    pub fn opportunity_paths(
        &self,
    ) -> ScopePaths<
        impl Fn(&Opportunity, &str) -> bool + '_,
        impl Fn(&Opportunity, &str) -> bool + '_,
    > {
        ScopePaths::new(
            |opportunity: &Opportunity, user: &str| opportunity.agent == user,
            |opportunity: &Opportunity, user: &str| match &opportunity.project_id {
                Some(project_id) => self.project_reaches(project_id, user),
                None => self.client_reaches(&opportunity.client_id, user),
            },
        )
    }

    /// Activity logs: owned via `agent`, work cell via the client.
    pub fn activity_paths(
        &self,
    ) -> ScopePaths<
        impl Fn(&ActivityLog, &str) -> bool + '_,
        impl Fn(&ActivityLog, &str) -> bool + '_,
    > {
        ScopePaths::new(
            |activity: &ActivityLog, user: &str| activity.agent == user,
            |activity: &ActivityLog, user: &str| self.client_reaches(&activity.client_id, user),
        )
    }
}

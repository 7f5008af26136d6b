//! HTTP endpoint modules and shared handler plumbing.
//!
//! # Purpose
//! Every resource handler follows the same sequence: extract the principal,
//! resolve its scope, then either filter the collection or check the single
//! object against the scope. The helpers here keep that sequence uniform so
//! a new resource module cannot accidentally skip a step.
pub mod activities;
pub mod clients;
pub mod contacts;
pub mod error;
pub mod openapi;
pub mod opportunities;
pub mod policies;
pub mod projects;
pub mod system;
pub mod types;
pub mod work_cells;

use crate::api::error::{ApiError, api_forbidden, api_internal, api_not_found};
use crate::app::AppState;
use crate::auth::Principal;
use crate::scoping::ScopeIndex;
use crate::store::CrmStore;
use crm_access::Scope;

/// Resolve the principal's effective scope, mapping store failures to 500.
/// A failed policy read must never silently widen or narrow access.
pub(crate) async fn request_scope(
    state: &AppState,
    principal: &Principal,
) -> Result<Scope, ApiError> {
    state
        .resolver
        .resolve(principal)
        .await
        .map_err(|err| api_internal("failed to resolve access scope", &err))
}

/// Snapshot the relationship chains needed to evaluate OWNED and WORKCELL
/// scopes. Skipped entirely for ALL and NONE, which need no joins.
pub(crate) async fn scope_index(state: &AppState) -> Result<ScopeIndex, ApiError> {
    let work_cells = state
        .store
        .list_work_cells()
        .await
        .map_err(|err| api_internal("failed to load work cells", &err))?;
    let clients = state
        .store
        .list_clients()
        .await
        .map_err(|err| api_internal("failed to load clients", &err))?;
    let projects = state
        .store
        .list_projects()
        .await
        .map_err(|err| api_internal("failed to load projects", &err))?;
    Ok(ScopeIndex::build(work_cells, clients, projects))
}

pub(crate) fn ensure_superuser(principal: &Principal) -> Result<(), ApiError> {
    if principal.is_superuser {
        Ok(())
    } else {
        Err(api_forbidden("superuser privileges required"))
    }
}

/// Deny access to an existing record that is outside the requester's scope.
/// Deliberately distinct from 404: the caller learns the record exists but
/// not its contents.
pub(crate) fn deny_access(resource: &'static str) -> ApiError {
    metrics::counter!("crm_access_denied_total", "resource" => resource).increment(1);
    api_forbidden("access denied")
}

pub(crate) async fn ensure_client_exists(
    state: &AppState,
    client_id: &str,
) -> Result<(), ApiError> {
    let exists = state
        .store
        .client_exists(client_id)
        .await
        .map_err(|err| api_internal("failed to check client", &err))?;
    if exists {
        Ok(())
    } else {
        Err(api_not_found("client not found"))
    }
}

pub(crate) async fn ensure_work_cell_exists(
    state: &AppState,
    work_cell_id: &str,
) -> Result<(), ApiError> {
    let exists = state
        .store
        .work_cell_exists(work_cell_id)
        .await
        .map_err(|err| api_internal("failed to check work cell", &err))?;
    if exists {
        Ok(())
    } else {
        Err(api_not_found("work cell not found"))
    }
}

pub(crate) async fn ensure_project_exists(
    state: &AppState,
    project_id: &str,
) -> Result<(), ApiError> {
    let exists = state
        .store
        .project_exists(project_id)
        .await
        .map_err(|err| api_internal("failed to check project", &err))?;
    if exists {
        Ok(())
    } else {
        Err(api_not_found("project not found"))
    }
}

//! Project API handlers.
//!
//! # Purpose
//! Projects carry both scope anchors directly: an owning agent and a work
//! cell. Creating one requires the referenced client and work cell to exist,
//! since the project is what links clients into WORKCELL visibility.
use crate::api::error::{
    ApiError, api_conflict, api_internal, api_not_found, api_validation_error,
};
use crate::api::types::{ProjectCreateRequest, ProjectListResponse};
use crate::api::{
    deny_access, ensure_client_exists, ensure_work_cell_exists, request_scope, scope_index,
};
use crate::app::AppState;
use crate::auth::Principal;
use crate::model::Project;
use crate::store::{CrmStore, StoreError};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use crm_access::{Scope, filter_by_scope, permits_object};

#[utoipa::path(
    get,
    path = "/v1/projects",
    tag = "projects",
    responses(
        (status = 200, description = "List projects visible to the requester", body = ProjectListResponse)
    )
)]
pub(crate) async fn list_projects(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<ProjectListResponse>, ApiError> {
    let scope = request_scope(&state, &principal).await?;
    if scope == Scope::None {
        return Ok(Json(ProjectListResponse { items: Vec::new() }));
    }
    let items = state
        .store
        .list_projects()
        .await
        .map_err(|err| api_internal("failed to list projects", &err))?;
    if scope == Scope::All {
        return Ok(Json(ProjectListResponse { items }));
    }
    let index = scope_index(&state).await?;
    let items = filter_by_scope(scope, &principal.user_id, items, &index.project_paths());
    Ok(Json(ProjectListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/v1/projects/{project_id}",
    tag = "projects",
    params(
        ("project_id" = String, Path, description = "Project identifier")
    ),
    responses(
        (status = 200, description = "Project detail", body = Project),
        (status = 403, description = "Project outside requester scope", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_project(
    principal: Principal,
    Path(project_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Project>, ApiError> {
    let project = match state.store.get_project(&project_id).await {
        Ok(project) => project,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("project not found")),
        Err(err) => return Err(api_internal("failed to load project", &err)),
    };
    let scope = request_scope(&state, &principal).await?;
    if scope != Scope::All {
        let index = scope_index(&state).await?;
        if !permits_object(scope, &principal.user_id, &project, &index.project_paths()) {
            return Err(deny_access("project"));
        }
    }
    Ok(Json(project))
}

#[utoipa::path(
    post,
    path = "/v1/projects",
    tag = "projects",
    request_body = ProjectCreateRequest,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 403, description = "New project outside requester scope", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Client or work cell not found", body = crate::api::types::ErrorResponse),
        (status = 409, description = "Project already exists", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_project(
    principal: Principal,
    State(state): State<AppState>,
    Json(body): Json<ProjectCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.project_id.trim().is_empty() {
        return Err(api_validation_error("project_id must not be empty"));
    }
    ensure_client_exists(&state, &body.client_id).await?;
    ensure_work_cell_exists(&state, &body.work_cell_id).await?;
    let project = Project {
        project_id: body.project_id,
        client_id: body.client_id,
        work_cell_id: body.work_cell_id,
        display_name: body.display_name,
        agent: body.agent,
    };
    let scope = request_scope(&state, &principal).await?;
    if scope != Scope::All {
        let index = scope_index(&state).await?;
        if !permits_object(scope, &principal.user_id, &project, &index.project_paths()) {
            return Err(deny_access("project"));
        }
    }
    match state.store.create_project(project.clone()).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(StoreError::Conflict(_)) => {
            Err(api_conflict("already_exists", "project already exists"))
        }
        Err(err) => Err(api_internal("failed to create project", &err)),
    }
}

#[utoipa::path(
    delete,
    path = "/v1/projects/{project_id}",
    tag = "projects",
    params(
        ("project_id" = String, Path, description = "Project identifier")
    ),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 403, description = "Project outside requester scope", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_project(
    principal: Principal,
    Path(project_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let project = match state.store.get_project(&project_id).await {
        Ok(project) => project,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("project not found")),
        Err(err) => return Err(api_internal("failed to load project", &err)),
    };
    let scope = request_scope(&state, &principal).await?;
    if scope != Scope::All {
        let index = scope_index(&state).await?;
        if !permits_object(scope, &principal.user_id, &project, &index.project_paths()) {
            return Err(deny_access("project"));
        }
    }
    match state.store.delete_project(&project_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound(_)) => Err(api_not_found("project not found")),
        Err(err) => Err(api_internal("failed to delete project", &err)),
    }
}

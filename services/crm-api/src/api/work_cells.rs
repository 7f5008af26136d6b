//! Work cell API handlers.
//!
//! # Purpose
//! Work cells are organizational structure, not scoped business records:
//! any authenticated principal may read them, but only superusers may
//! change membership, since membership directly widens WORKCELL-scoped
//! visibility.
use crate::api::error::{
    ApiError, api_conflict, api_internal, api_not_found, api_validation_error,
};
use crate::api::types::{WorkCellCreateRequest, WorkCellListResponse};
use crate::api::ensure_superuser;
use crate::app::AppState;
use crate::auth::Principal;
use crate::model::WorkCell;
use crate::store::{CrmStore, StoreError};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/v1/work-cells",
    tag = "work-cells",
    responses(
        (status = 200, description = "List work cells", body = WorkCellListResponse)
    )
)]
pub(crate) async fn list_work_cells(
    _principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<WorkCellListResponse>, ApiError> {
    let items = state
        .store
        .list_work_cells()
        .await
        .map_err(|err| api_internal("failed to list work cells", &err))?;
    Ok(Json(WorkCellListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/v1/work-cells/{work_cell_id}",
    tag = "work-cells",
    params(
        ("work_cell_id" = String, Path, description = "Work cell identifier")
    ),
    responses(
        (status = 200, description = "Work cell detail", body = WorkCell),
        (status = 404, description = "Work cell not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_work_cell(
    _principal: Principal,
    Path(work_cell_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<WorkCell>, ApiError> {
    match state.store.get_work_cell(&work_cell_id).await {
        Ok(cell) => Ok(Json(cell)),
        Err(StoreError::NotFound(_)) => Err(api_not_found("work cell not found")),
        Err(err) => Err(api_internal("failed to load work cell", &err)),
    }
}

#[utoipa::path(
    post,
    path = "/v1/work-cells",
    tag = "work-cells",
    request_body = WorkCellCreateRequest,
    responses(
        (status = 201, description = "Work cell created", body = WorkCell),
        (status = 403, description = "Superuser required", body = crate::api::types::ErrorResponse),
        (status = 409, description = "Work cell already exists", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_work_cell(
    principal: Principal,
    State(state): State<AppState>,
    Json(body): Json<WorkCellCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_superuser(&principal)?;
    if body.work_cell_id.trim().is_empty() {
        return Err(api_validation_error("work_cell_id must not be empty"));
    }
    let cell = WorkCell {
        work_cell_id: body.work_cell_id,
        display_name: body.display_name,
        members: body.members,
    };
    match state.store.create_work_cell(cell.clone()).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(StoreError::Conflict(_)) => {
            Err(api_conflict("already_exists", "work cell already exists"))
        }
        Err(err) => Err(api_internal("failed to create work cell", &err)),
    }
}

#[utoipa::path(
    delete,
    path = "/v1/work-cells/{work_cell_id}",
    tag = "work-cells",
    params(
        ("work_cell_id" = String, Path, description = "Work cell identifier")
    ),
    responses(
        (status = 204, description = "Work cell deleted"),
        (status = 403, description = "Superuser required", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Work cell not found", body = crate::api::types::ErrorResponse),
        (status = 409, description = "Work cell still referenced by projects", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_work_cell(
    principal: Principal,
    Path(work_cell_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    ensure_superuser(&principal)?;
    match state.store.delete_work_cell(&work_cell_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound(_)) => Err(api_not_found("work cell not found")),
        Err(StoreError::Conflict(_)) => Err(api_conflict(
            "still_referenced",
            "work cell still referenced by projects",
        )),
        Err(err) => Err(api_internal("failed to delete work cell", &err)),
    }
}

//! Activity log API handlers.
//!
//! # Purpose
//! Activity entries record interactions against a client account. They are
//! append-and-delete only; there is no update surface. Visibility follows
//! the recording agent (OWNED) or the client's work-cell chain (WORKCELL).
use crate::api::error::{
    ApiError, api_conflict, api_internal, api_not_found, api_validation_error,
};
use crate::api::types::{ActivityCreateRequest, ActivityListResponse};
use crate::api::{deny_access, ensure_client_exists, request_scope, scope_index};
use crate::app::AppState;
use crate::auth::Principal;
use crate::model::ActivityLog;
use crate::store::{CrmStore, StoreError};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use crm_access::{Scope, filter_by_scope, permits_object};

#[utoipa::path(
    get,
    path = "/v1/activities",
    tag = "activities",
    responses(
        (status = 200, description = "List activity entries visible to the requester", body = ActivityListResponse)
    )
)]
pub(crate) async fn list_activities(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<ActivityListResponse>, ApiError> {
    let scope = request_scope(&state, &principal).await?;
    if scope == Scope::None {
        return Ok(Json(ActivityListResponse { items: Vec::new() }));
    }
    let items = state
        .store
        .list_activities()
        .await
        .map_err(|err| api_internal("failed to list activities", &err))?;
    if scope == Scope::All {
        return Ok(Json(ActivityListResponse { items }));
    }
    let index = scope_index(&state).await?;
    let items = filter_by_scope(scope, &principal.user_id, items, &index.activity_paths());
    Ok(Json(ActivityListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/v1/activities/{activity_id}",
    tag = "activities",
    params(
        ("activity_id" = String, Path, description = "Activity identifier")
    ),
    responses(
        (status = 200, description = "Activity detail", body = ActivityLog),
        (status = 403, description = "Activity outside requester scope", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Activity not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_activity(
    principal: Principal,
    Path(activity_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ActivityLog>, ApiError> {
    let activity = match state.store.get_activity(&activity_id).await {
        Ok(activity) => activity,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("activity not found")),
        Err(err) => return Err(api_internal("failed to load activity", &err)),
    };
    let scope = request_scope(&state, &principal).await?;
    if scope != Scope::All {
        let index = scope_index(&state).await?;
        if !permits_object(scope, &principal.user_id, &activity, &index.activity_paths()) {
            return Err(deny_access("activity"));
        }
    }
    Ok(Json(activity))
}

#[utoipa::path(
    post,
    path = "/v1/activities",
    tag = "activities",
    request_body = ActivityCreateRequest,
    responses(
        (status = 201, description = "Activity recorded", body = ActivityLog),
        (status = 403, description = "New activity outside requester scope", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Client not found", body = crate::api::types::ErrorResponse),
        (status = 409, description = "Activity already exists", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_activity(
    principal: Principal,
    State(state): State<AppState>,
    Json(body): Json<ActivityCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.activity_id.trim().is_empty() {
        return Err(api_validation_error("activity_id must not be empty"));
    }
    ensure_client_exists(&state, &body.client_id).await?;
    let activity = ActivityLog {
        activity_id: body.activity_id,
        client_id: body.client_id,
        agent: body.agent,
        kind: body.kind,
        summary: body.summary,
        occurred_at: body.occurred_at,
    };
    let scope = request_scope(&state, &principal).await?;
    if scope != Scope::All {
        let index = scope_index(&state).await?;
        if !permits_object(scope, &principal.user_id, &activity, &index.activity_paths()) {
            return Err(deny_access("activity"));
        }
    }
    match state.store.create_activity(activity.clone()).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(StoreError::Conflict(_)) => {
            Err(api_conflict("already_exists", "activity already exists"))
        }
        Err(err) => Err(api_internal("failed to record activity", &err)),
    }
}

#[utoipa::path(
    delete,
    path = "/v1/activities/{activity_id}",
    tag = "activities",
    params(
        ("activity_id" = String, Path, description = "Activity identifier")
    ),
    responses(
        (status = 204, description = "Activity deleted"),
        (status = 403, description = "Activity outside requester scope", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Activity not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_activity(
    principal: Principal,
    Path(activity_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let activity = match state.store.get_activity(&activity_id).await {
        Ok(activity) => activity,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("activity not found")),
        Err(err) => return Err(api_internal("failed to load activity", &err)),
    };
    let scope = request_scope(&state, &principal).await?;
    if scope != Scope::All {
        let index = scope_index(&state).await?;
        if !permits_object(scope, &principal.user_id, &activity, &index.activity_paths()) {
            return Err(deny_access("activity"));
        }
    }
    match state.store.delete_activity(&activity_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound(_)) => Err(api_not_found("activity not found")),
        Err(err) => Err(api_internal("failed to delete activity", &err)),
    }
}

//! Role policy administration handlers.
//!
//! # Purpose
//! Superuser-only CRUD over the group-to-scope policy table. Policy edits
//! take effect on the next request; scope resolution re-reads the table
//! every time, so there is no cache to invalidate.
//!
//! # Security considerations
//! Every handler checks the superuser flag before touching the store. A
//! non-superuser gets 403 regardless of whether the named group exists.
use crate::api::error::{ApiError, api_internal, api_not_found, api_validation_error};
use crate::api::types::{PolicyListResponse, PolicyRecord};
use crate::api::ensure_superuser;
use crate::app::AppState;
use crate::auth::Principal;
use crate::store::{PolicyStore, StoreError};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

#[utoipa::path(
    get,
    path = "/v1/rbac/policies",
    tag = "policies",
    responses(
        (status = 200, description = "List role policies", body = PolicyListResponse),
        (status = 403, description = "Superuser required", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_policies(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<PolicyListResponse>, ApiError> {
    ensure_superuser(&principal)?;
    let items = state
        .store
        .list_policies()
        .await
        .map_err(|err| api_internal("failed to list policies", &err))?;
    Ok(Json(PolicyListResponse {
        items: items.into_iter().map(PolicyRecord::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/v1/rbac/policies",
    tag = "policies",
    request_body = PolicyRecord,
    responses(
        (status = 204, description = "Policy stored"),
        (status = 400, description = "Invalid policy", body = crate::api::types::ErrorResponse),
        (status = 403, description = "Superuser required", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn upsert_policy(
    principal: Principal,
    State(state): State<AppState>,
    Json(body): Json<PolicyRecord>,
) -> Result<StatusCode, ApiError> {
    ensure_superuser(&principal)?;
    if body.group.trim().is_empty() {
        return Err(api_validation_error("policy group must not be empty"));
    }
    state
        .store
        .upsert_policy(body.into())
        .await
        .map_err(|err| api_internal("failed to store policy", &err))?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/v1/rbac/policies/{group}",
    tag = "policies",
    params(
        ("group" = String, Path, description = "Group whose policy is removed")
    ),
    responses(
        (status = 204, description = "Policy deleted"),
        (status = 403, description = "Superuser required", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Policy not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_policy(
    principal: Principal,
    Path(group): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    ensure_superuser(&principal)?;
    match state.store.delete_policy(&group).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound(_)) => Err(api_not_found("policy not found")),
        Err(err) => Err(api_internal("failed to delete policy", &err)),
    }
}

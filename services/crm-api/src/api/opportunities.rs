//! Opportunity API handlers.
//!
//! # Purpose
//! Opportunities are owned by an agent and optionally linked to a project.
//! When a project link exists it determines the work-cell chain; otherwise
//! the chain falls back to the client's projects.
use crate::api::error::{
    ApiError, api_conflict, api_internal, api_not_found, api_validation_error,
};
use crate::api::types::{OpportunityCreateRequest, OpportunityListResponse};
use crate::api::{
    deny_access, ensure_client_exists, ensure_project_exists, request_scope, scope_index,
};
use crate::app::AppState;
use crate::auth::Principal;
use crate::model::Opportunity;
use crate::store::{CrmStore, StoreError};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use crm_access::{Scope, filter_by_scope, permits_object};

#[utoipa::path(
    get,
    path = "/v1/opportunities",
    tag = "opportunities",
    responses(
        (status = 200, description = "List opportunities visible to the requester", body = OpportunityListResponse)
    )
)]
pub(crate) async fn list_opportunities(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<OpportunityListResponse>, ApiError> {
    let scope = request_scope(&state, &principal).await?;
    if scope == Scope::None {
        return Ok(Json(OpportunityListResponse { items: Vec::new() }));
    }
    let items = state
        .store
        .list_opportunities()
        .await
        .map_err(|err| api_internal("failed to list opportunities", &err))?;
    if scope == Scope::All {
        return Ok(Json(OpportunityListResponse { items }));
    }
    let index = scope_index(&state).await?;
    let items = filter_by_scope(
        scope,
        &principal.user_id,
        items,
        &index.opportunity_paths(),
    );
    Ok(Json(OpportunityListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/v1/opportunities/{opportunity_id}",
    tag = "opportunities",
    params(
        ("opportunity_id" = String, Path, description = "Opportunity identifier")
    ),
    responses(
        (status = 200, description = "Opportunity detail", body = Opportunity),
        (status = 403, description = "Opportunity outside requester scope", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Opportunity not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_opportunity(
    principal: Principal,
    Path(opportunity_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Opportunity>, ApiError> {
    let opportunity = match state.store.get_opportunity(&opportunity_id).await {
        Ok(opportunity) => opportunity,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("opportunity not found")),
        Err(err) => return Err(api_internal("failed to load opportunity", &err)),
    };
    let scope = request_scope(&state, &principal).await?;
    if scope != Scope::All {
        let index = scope_index(&state).await?;
        if !permits_object(
            scope,
            &principal.user_id,
            &opportunity,
            &index.opportunity_paths(),
        ) {
            return Err(deny_access("opportunity"));
        }
    }
    Ok(Json(opportunity))
}

#[utoipa::path(
    post,
    path = "/v1/opportunities",
    tag = "opportunities",
    request_body = OpportunityCreateRequest,
    responses(
        (status = 201, description = "Opportunity created", body = Opportunity),
        (status = 403, description = "New opportunity outside requester scope", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Client or project not found", body = crate::api::types::ErrorResponse),
        (status = 409, description = "Opportunity already exists", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_opportunity(
    principal: Principal,
    State(state): State<AppState>,
    Json(body): Json<OpportunityCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.opportunity_id.trim().is_empty() {
        return Err(api_validation_error("opportunity_id must not be empty"));
    }
    ensure_client_exists(&state, &body.client_id).await?;
    if let Some(project_id) = &body.project_id {
        ensure_project_exists(&state, project_id).await?;
    }
    let opportunity = Opportunity {
        opportunity_id: body.opportunity_id,
        client_id: body.client_id,
        project_id: body.project_id,
        display_name: body.display_name,
        agent: body.agent,
        stage: body.stage,
        amount_cents: body.amount_cents,
    };
    let scope = request_scope(&state, &principal).await?;
    if scope != Scope::All {
        let index = scope_index(&state).await?;
        if !permits_object(
            scope,
            &principal.user_id,
            &opportunity,
            &index.opportunity_paths(),
        ) {
            return Err(deny_access("opportunity"));
        }
    }
    match state.store.create_opportunity(opportunity.clone()).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(StoreError::Conflict(_)) => {
            Err(api_conflict("already_exists", "opportunity already exists"))
        }
        Err(err) => Err(api_internal("failed to create opportunity", &err)),
    }
}

#[utoipa::path(
    delete,
    path = "/v1/opportunities/{opportunity_id}",
    tag = "opportunities",
    params(
        ("opportunity_id" = String, Path, description = "Opportunity identifier")
    ),
    responses(
        (status = 204, description = "Opportunity deleted"),
        (status = 403, description = "Opportunity outside requester scope", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Opportunity not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_opportunity(
    principal: Principal,
    Path(opportunity_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let opportunity = match state.store.get_opportunity(&opportunity_id).await {
        Ok(opportunity) => opportunity,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("opportunity not found")),
        Err(err) => return Err(api_internal("failed to load opportunity", &err)),
    };
    let scope = request_scope(&state, &principal).await?;
    if scope != Scope::All {
        let index = scope_index(&state).await?;
        if !permits_object(
            scope,
            &principal.user_id,
            &opportunity,
            &index.opportunity_paths(),
        ) {
            return Err(deny_access("opportunity"));
        }
    }
    match state.store.delete_opportunity(&opportunity_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound(_)) => Err(api_not_found("opportunity not found")),
        Err(err) => Err(api_internal("failed to delete opportunity", &err)),
    }
}

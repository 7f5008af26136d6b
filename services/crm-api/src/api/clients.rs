//! Client account API handlers.
//!
//! # Purpose
//! CRUD over client accounts with row-level scope enforcement. Collections
//! are filtered to the requester's effective scope; single-object reads and
//! mutations run the same predicate so the two can never disagree about a
//! record.
use crate::api::error::{
    ApiError, api_conflict, api_internal, api_not_found, api_validation_error,
};
use crate::api::types::{ClientCreateRequest, ClientListResponse};
use crate::api::{deny_access, request_scope, scope_index};
use crate::app::AppState;
use crate::auth::Principal;
use crate::model::Client;
use crate::store::{CrmStore, StoreError};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use crm_access::{Scope, filter_by_scope, permits_object};

#[utoipa::path(
    get,
    path = "/v1/clients",
    tag = "clients",
    responses(
        (status = 200, description = "List clients visible to the requester", body = ClientListResponse),
        (status = 401, description = "Missing principal", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_clients(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<ClientListResponse>, ApiError> {
    let scope = request_scope(&state, &principal).await?;
    // NONE short-circuits to an empty page, never an error.
    if scope == Scope::None {
        return Ok(Json(ClientListResponse { items: Vec::new() }));
    }
    let items = state
        .store
        .list_clients()
        .await
        .map_err(|err| api_internal("failed to list clients", &err))?;
    if scope == Scope::All {
        return Ok(Json(ClientListResponse { items }));
    }
    let index = scope_index(&state).await?;
    let items = filter_by_scope(scope, &principal.user_id, items, &index.client_paths());
    Ok(Json(ClientListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/v1/clients/{client_id}",
    tag = "clients",
    params(
        ("client_id" = String, Path, description = "Client identifier")
    ),
    responses(
        (status = 200, description = "Client detail", body = Client),
        (status = 403, description = "Client outside requester scope", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Client not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_client(
    principal: Principal,
    Path(client_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Client>, ApiError> {
    // Missing record is 404 regardless of scope; scope only gates records
    // that exist.
    let client = match state.store.get_client(&client_id).await {
        Ok(client) => client,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("client not found")),
        Err(err) => return Err(api_internal("failed to load client", &err)),
    };
    let scope = request_scope(&state, &principal).await?;
    if scope != Scope::All {
        let index = scope_index(&state).await?;
        if !permits_object(scope, &principal.user_id, &client, &index.client_paths()) {
            return Err(deny_access("client"));
        }
    }
    Ok(Json(client))
}

#[utoipa::path(
    post,
    path = "/v1/clients",
    tag = "clients",
    request_body = ClientCreateRequest,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 403, description = "New client outside requester scope", body = crate::api::types::ErrorResponse),
        (status = 409, description = "Client already exists", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_client(
    principal: Principal,
    State(state): State<AppState>,
    Json(body): Json<ClientCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.client_id.trim().is_empty() {
        return Err(api_validation_error("client_id must not be empty"));
    }
    let client = Client {
        client_id: body.client_id,
        display_name: body.display_name,
        agent: body.agent,
    };
    let scope = request_scope(&state, &principal).await?;
    if scope != Scope::All {
        // The record being written must itself be visible to the writer.
        let index = scope_index(&state).await?;
        if !permits_object(scope, &principal.user_id, &client, &index.client_paths()) {
            return Err(deny_access("client"));
        }
    }
    match state.store.create_client(client.clone()).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(StoreError::Conflict(_)) => Err(api_conflict("already_exists", "client already exists")),
        Err(err) => Err(api_internal("failed to create client", &err)),
    }
}

#[utoipa::path(
    delete,
    path = "/v1/clients/{client_id}",
    tag = "clients",
    params(
        ("client_id" = String, Path, description = "Client identifier")
    ),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 403, description = "Client outside requester scope", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Client not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_client(
    principal: Principal,
    Path(client_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let client = match state.store.get_client(&client_id).await {
        Ok(client) => client,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("client not found")),
        Err(err) => return Err(api_internal("failed to load client", &err)),
    };
    let scope = request_scope(&state, &principal).await?;
    if scope != Scope::All {
        let index = scope_index(&state).await?;
        if !permits_object(scope, &principal.user_id, &client, &index.client_paths()) {
            return Err(deny_access("client"));
        }
    }
    match state.store.delete_client(&client_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound(_)) => Err(api_not_found("client not found")),
        Err(err) => Err(api_internal("failed to delete client", &err)),
    }
}

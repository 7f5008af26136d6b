//! Contact API handlers.
//!
//! # Purpose
//! Contacts have no agent of their own; visibility flows through the client
//! accounts they are linked to. A contact with no linked clients is only
//! reachable under ALL scope.
use crate::api::error::{
    ApiError, api_conflict, api_internal, api_not_found, api_validation_error,
};
use crate::api::types::{ContactCreateRequest, ContactListResponse};
use crate::api::{deny_access, ensure_client_exists, request_scope, scope_index};
use crate::app::AppState;
use crate::auth::Principal;
use crate::model::Contact;
use crate::store::{CrmStore, StoreError};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use crm_access::{Scope, filter_by_scope, permits_object};

#[utoipa::path(
    get,
    path = "/v1/contacts",
    tag = "contacts",
    responses(
        (status = 200, description = "List contacts visible to the requester", body = ContactListResponse)
    )
)]
pub(crate) async fn list_contacts(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<ContactListResponse>, ApiError> {
    let scope = request_scope(&state, &principal).await?;
    if scope == Scope::None {
        return Ok(Json(ContactListResponse { items: Vec::new() }));
    }
    let items = state
        .store
        .list_contacts()
        .await
        .map_err(|err| api_internal("failed to list contacts", &err))?;
    if scope == Scope::All {
        return Ok(Json(ContactListResponse { items }));
    }
    let index = scope_index(&state).await?;
    let items = filter_by_scope(scope, &principal.user_id, items, &index.contact_paths());
    Ok(Json(ContactListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/v1/contacts/{contact_id}",
    tag = "contacts",
    params(
        ("contact_id" = String, Path, description = "Contact identifier")
    ),
    responses(
        (status = 200, description = "Contact detail", body = Contact),
        (status = 403, description = "Contact outside requester scope", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Contact not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_contact(
    principal: Principal,
    Path(contact_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Contact>, ApiError> {
    let contact = match state.store.get_contact(&contact_id).await {
        Ok(contact) => contact,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("contact not found")),
        Err(err) => return Err(api_internal("failed to load contact", &err)),
    };
    let scope = request_scope(&state, &principal).await?;
    if scope != Scope::All {
        let index = scope_index(&state).await?;
        if !permits_object(scope, &principal.user_id, &contact, &index.contact_paths()) {
            return Err(deny_access("contact"));
        }
    }
    Ok(Json(contact))
}

#[utoipa::path(
    post,
    path = "/v1/contacts",
    tag = "contacts",
    request_body = ContactCreateRequest,
    responses(
        (status = 201, description = "Contact created", body = Contact),
        (status = 403, description = "New contact outside requester scope", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Linked client not found", body = crate::api::types::ErrorResponse),
        (status = 409, description = "Contact already exists", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_contact(
    principal: Principal,
    State(state): State<AppState>,
    Json(body): Json<ContactCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.contact_id.trim().is_empty() {
        return Err(api_validation_error("contact_id must not be empty"));
    }
    for client_id in &body.client_ids {
        ensure_client_exists(&state, client_id).await?;
    }
    let contact = Contact {
        contact_id: body.contact_id,
        display_name: body.display_name,
        email: body.email,
        client_ids: body.client_ids,
    };
    let scope = request_scope(&state, &principal).await?;
    if scope != Scope::All {
        let index = scope_index(&state).await?;
        if !permits_object(scope, &principal.user_id, &contact, &index.contact_paths()) {
            return Err(deny_access("contact"));
        }
    }
    match state.store.create_contact(contact.clone()).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(StoreError::Conflict(_)) => {
            Err(api_conflict("already_exists", "contact already exists"))
        }
        Err(err) => Err(api_internal("failed to create contact", &err)),
    }
}

#[utoipa::path(
    delete,
    path = "/v1/contacts/{contact_id}",
    tag = "contacts",
    params(
        ("contact_id" = String, Path, description = "Contact identifier")
    ),
    responses(
        (status = 204, description = "Contact deleted"),
        (status = 403, description = "Contact outside requester scope", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Contact not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_contact(
    principal: Principal,
    Path(contact_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let contact = match state.store.get_contact(&contact_id).await {
        Ok(contact) => contact,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("contact not found")),
        Err(err) => return Err(api_internal("failed to load contact", &err)),
    };
    let scope = request_scope(&state, &principal).await?;
    if scope != Scope::All {
        let index = scope_index(&state).await?;
        if !permits_object(scope, &principal.user_id, &contact, &index.contact_paths()) {
            return Err(deny_access("contact"));
        }
    }
    match state.store.delete_contact(&contact_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound(_)) => Err(api_not_found("contact not found")),
        Err(err) => Err(api_internal("failed to delete contact", &err)),
    }
}

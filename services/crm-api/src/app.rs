//! CRM HTTP application wiring.
//!
//! # Purpose
//! Builds the Axum router, configures middleware, and defines the shared
//! application state injected into handlers.
//!
//! # Notes
//! The state carries both the store and the scope resolver; both are handed
//! in at construction so tests can wire their own without touching globals.
use crate::api;
use crate::api::openapi::ApiDoc;
use crate::auth::ScopeResolver;
use crate::observability;
use crate::store::CrmAccessStore;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use utoipa::OpenApi;

#[derive(Clone)]
pub struct AppState {
    pub environment: String,
    pub api_version: String,
    pub store: Arc<dyn CrmAccessStore + Send + Sync>,
    pub resolver: ScopeResolver,
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            let parent = observability::trace_context_from_headers(request.headers());
            let span = tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            );
            span.set_parent(parent);
            span
        });

    Router::new()
        .route(
            "/v1/system/info",
            axum::routing::get(api::system::system_info),
        )
        .route(
            "/v1/system/health",
            axum::routing::get(api::system::system_health),
        )
        .route(
            "/v1/rbac/policies",
            axum::routing::get(api::policies::list_policies).post(api::policies::upsert_policy),
        )
        .route(
            "/v1/rbac/policies/:group",
            axum::routing::delete(api::policies::delete_policy),
        )
        .route(
            "/v1/work-cells",
            axum::routing::get(api::work_cells::list_work_cells)
                .post(api::work_cells::create_work_cell),
        )
        .route(
            "/v1/work-cells/:work_cell_id",
            axum::routing::get(api::work_cells::get_work_cell)
                .delete(api::work_cells::delete_work_cell),
        )
        .route(
            "/v1/clients",
            axum::routing::get(api::clients::list_clients).post(api::clients::create_client),
        )
        .route(
            "/v1/clients/:client_id",
            axum::routing::get(api::clients::get_client).delete(api::clients::delete_client),
        )
        .route(
            "/v1/contacts",
            axum::routing::get(api::contacts::list_contacts).post(api::contacts::create_contact),
        )
        .route(
            "/v1/contacts/:contact_id",
            axum::routing::get(api::contacts::get_contact).delete(api::contacts::delete_contact),
        )
        .route(
            "/v1/projects",
            axum::routing::get(api::projects::list_projects).post(api::projects::create_project),
        )
        .route(
            "/v1/projects/:project_id",
            axum::routing::get(api::projects::get_project).delete(api::projects::delete_project),
        )
        .route(
            "/v1/opportunities",
            axum::routing::get(api::opportunities::list_opportunities)
                .post(api::opportunities::create_opportunity),
        )
        .route(
            "/v1/opportunities/:opportunity_id",
            axum::routing::get(api::opportunities::get_opportunity)
                .delete(api::opportunities::delete_opportunity),
        )
        .route(
            "/v1/activities",
            axum::routing::get(api::activities::list_activities)
                .post(api::activities::create_activity),
        )
        .route(
            "/v1/activities/:activity_id",
            axum::routing::get(api::activities::get_activity)
                .delete(api::activities::delete_activity),
        )
        .merge(
            utoipa_swagger_ui::SwaggerUi::new("/docs").url("/v1/openapi.json", ApiDoc::openapi()),
        )
        .layer(trace_layer)
        .with_state(state)
}

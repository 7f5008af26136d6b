//! CRM HTTP service entry point.
//!
//! # Purpose
//! Wires configuration, storage, the scope resolver, and the HTTP router,
//! then starts the API server and the metrics endpoint.
//!
//! # Notes
//! The `build_state` helper keeps wiring testable and minimizes main setup
//! logic. All dependencies are injected here; nothing registers itself
//! through ambient globals.
mod api;
mod app;
mod auth;
mod config;
mod model;
mod observability;
mod scoping;
mod store;

use app::{AppState, build_router};
use auth::ScopeResolver;
use std::future::Future;
use std::sync::Arc;
use store::{CrmAccessStore, CrmStore, memory::InMemoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::CrmApiConfig::from_env_or_yaml().expect("crm api config");
    run_with_shutdown(config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run_with_shutdown<F>(config: config::CrmApiConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics_handle = observability::init_observability("crm-api");
    let state = build_state(config.clone());
    let metrics_task = tokio::spawn(observability::serve_metrics(
        metrics_handle,
        config.metrics_bind,
    ));

    let app = build_router(state);

    let addr = config.bind_addr;
    tracing::info!(%addr, "crm api listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tokio::pin!(shutdown);
    tokio::select! {
        result = axum::serve(listener, app.into_make_service()) => {
            result?;
        }
        _ = &mut shutdown => {}
    }

    metrics_task.abort();
    let _ = metrics_task.await;
    Ok(())
}

fn build_state(config: config::CrmApiConfig) -> AppState {
    let store = Arc::new(InMemoryStore::new());
    let resolver = ScopeResolver::new(store.clone());
    let store: Arc<dyn CrmAccessStore + Send + Sync> = store;
    AppState {
        environment: config.environment,
        api_version: "v1".to_string(),
        store,
        resolver,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn test_config() -> config::CrmApiConfig {
        config::CrmApiConfig {
            bind_addr: "127.0.0.1:0".parse().expect("bind"),
            metrics_bind: "127.0.0.1:0".parse().expect("metrics"),
            environment: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn build_state_uses_memory_backend() {
        let state = build_state(test_config());
        assert_eq!(state.environment, "test");
        assert_eq!(state.api_version, "v1");
        assert_eq!(state.store.backend_name(), "memory");
        assert!(!state.store.is_durable());
    }

    #[tokio::test]
    #[serial]
    async fn run_with_shutdown_starts_and_stops() {
        run_with_shutdown(test_config(), async {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        })
        .await
        .expect("run should stop cleanly");
    }
}

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;

// Service configuration sourced from environment variables.
#[derive(Debug, Clone)]
pub struct CrmApiConfig {
    pub bind_addr: SocketAddr,
    pub metrics_bind: SocketAddr,
    pub environment: String,
}

#[derive(Debug, Deserialize)]
struct CrmApiConfigOverride {
    bind_addr: Option<String>,
    metrics_bind: Option<String>,
    environment: Option<String>,
}

impl CrmApiConfig {
    pub fn from_env() -> Result<Self> {
        let metrics_bind = std::env::var("CRM_API_METRICS_BIND")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .with_context(|| "parse CRM_API_METRICS_BIND")?;
        let bind_addr = std::env::var("CRM_API_BIND")
            .unwrap_or_else(|_| "0.0.0.0:8443".to_string())
            .parse()
            .with_context(|| "parse CRM_API_BIND")?;
        let environment = std::env::var("CRM_API_ENV").unwrap_or_else(|_| "local".to_string());
        Ok(Self {
            bind_addr,
            metrics_bind,
            environment,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("CRM_API_CONFIG") {
            let contents =
                fs::read_to_string(&path).with_context(|| format!("read CRM_API_CONFIG: {path}"))?;
            let override_cfg: CrmApiConfigOverride =
                serde_yaml::from_str(&contents).with_context(|| "parse crm api config yaml")?;
            if let Some(value) = override_cfg.bind_addr {
                config.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
            }
            if let Some(value) = override_cfg.metrics_bind {
                config.metrics_bind = value.parse().with_context(|| "parse metrics_bind")?;
            }
            if let Some(value) = override_cfg.environment {
                config.environment = value;
            }
        }
        Ok(config)
    }
}

//! Access-control wiring for the CRM API.
//!
//! # Purpose
//! Extracts the authenticated principal from gateway headers and resolves
//! its effective scope from the policy store. Scope semantics themselves
//! live in the `crm-access` crate.
pub mod principal;
pub mod resolver;

pub use principal::Principal;
pub use resolver::ScopeResolver;

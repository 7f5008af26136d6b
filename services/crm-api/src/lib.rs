//! CRM API service library crate.
//!
//! # Purpose
//! Exposes the CRM HTTP API surface, the access-control wiring (principal
//! extraction, scope resolution, row filtering), configuration, and storage
//! implementations for use by the binary and tests.
//!
//! # Notes
//! Module boundaries mirror the HTTP API and the request pipeline: a
//! principal comes in, a scope is resolved from policy rows, and every
//! resource query is narrowed through the scoping layer before serialization.
pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod model;
pub mod observability;
pub mod scoping;
pub mod store;

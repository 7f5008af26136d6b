//! CRM domain records.
//!
//! # Purpose
//! Defines the entity shapes shared by the store and the HTTP API. Records
//! carry the relationship keys the scoping layer traverses (agent fields,
//! work-cell references, client links); they own no behavior.
mod activity;
mod client;
mod contact;
mod opportunity;
mod project;
mod work_cell;

pub use activity::{ActivityKind, ActivityLog};
pub use client::Client;
pub use contact::Contact;
pub use opportunity::{Opportunity, PurchaseStage};
pub use project::Project;
pub use work_cell::WorkCell;

//! Core types and utilities for the DialCoach training server.
//!
//! This crate is the shared leaf of the workspace. It defines:
//!
//! - [`Scenario`] / [`TenantConfig`] - the shared data model for training
//!   scenarios and the tenant's company profile
//! - `template` - fail-open `{{dotted.path}}` substitution with an opt-in
//!   strict validation pass
//! - `prompt` - deterministic prompt assembly for the voice agent and the
//!   transcript analysis modes
//! - [`SessionStore`] / [`MemorySessionStore`] - the call session registry
//!   seam and its single-process implementation
//!
//! # Example
//!
//! ```rust
//! use trainer_core::template::process_template;
//! use serde_json::json;
//!
//! let out = process_template("Hi {{company.name}}", &json!({"company": {"name": "Acme"}}));
//! assert_eq!(out, "Hi Acme");
//! ```

pub mod prompt;
pub mod sessions;
pub mod template;
mod types;

pub use sessions::{CallSession, MemorySessionStore, SessionStore};
pub use types::{
    BrandColors, CompanyProfile, Pricing, Scenario, ScenarioPatch, TenantConfig, TenantSettings,
};

// Re-export async_trait for downstream SessionStore implementations.
pub use async_trait::async_trait;

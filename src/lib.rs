//! Jira Server provider
//!
//! Declarative management of Jira Server administration entities: permission
//! schemes and their grants, project roles, groups, issue types and screens.
//!
//! # Architecture
//!
//! - **config**: Provider configuration (YAML file plus environment)
//! - **resources**: Resource adapters with create/read/update/delete
//! - **provider**: Registry of adapters keyed by resource type name
//! - **logging**: `tracing` subscriber setup
//!
//! HTTP and grant resolution live in the `jira-server` crate.

pub mod config;
pub mod error;
pub mod logging;
pub mod provider;
pub mod resources;

// Re-exports
pub use error::{ProviderError, Result};
pub use provider::Provider;

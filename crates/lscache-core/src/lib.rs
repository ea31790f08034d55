//! Versioned configuration store of the lscache plugin.
//!
//! # Features
//!
//! - Canonical option schema with per-mode defaults
//! - Tenant / network overlay for multi-tenant deployments
//! - Schema migration of persisted options
//! - One-time provisioning on activation
//! - Debug logging gated by the configured threshold
//!
//! Storage and rule file handling are injected through the adapter traits in
//! `lscache-types`.

#![forbid(unsafe_code)]

pub mod activation;
pub mod app;
pub mod cache_flag;
pub mod gate;
pub mod logger;
pub mod migration;
pub mod prelude;
pub mod purge;
pub mod resolver;
pub mod schema;

pub use crate::app::{LsCache, LsCacheBuilder, LsCacheOpts};
pub use crate::logger::{DiagnosticLogger, LogLevel};
pub use crate::resolver::ConfigResolver;

// vim: ts=4

//! Shared types, adapter traits and the error type for the lscache
//! configuration store.
//!
//! Adapter crates depend only on this crate, so they can be built without
//! pulling in the core.

pub mod deployment;
pub mod error;
pub mod option;
pub mod option_store;
pub mod prelude;
pub mod request;
pub mod rule_scanner;
pub mod types;

// vim: ts=4

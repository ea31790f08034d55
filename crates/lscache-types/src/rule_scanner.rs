//! Adapter for the rewrite-rule scanner that owns the server rule files.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::option::{OptionSet, OptionValue};
use crate::prelude::*;

/// Rule provisioning request, keyed by option name or marker name
pub type RewriteInput = BTreeMap<Box<str>, OptionValue>;

/// Prefix of the synthetic marker entries sent for enabled cache flags
pub const REWRITE_MARKER_PREFIX: &str = "lscwp_";

#[async_trait]
pub trait RuleScanner: Debug + Send + Sync {
	/// Rescans the rule files and returns the current login cookie name
	async fn scan_upgrade(&self) -> LsResult<Box<str>>;

	/// Validates and writes the common rewrite rules
	///
	/// Problems are pushed to `errors`; the call itself never fails.
	async fn validate_common_rewrites(
		&self,
		input: &RewriteInput,
		context: &OptionSet,
		errors: &mut Vec<Error>,
	);
}

// vim: ts=4

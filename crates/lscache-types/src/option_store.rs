//! Adapter that persists option records, one per scope and record name.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::option::OptionSet;
use crate::prelude::*;
use crate::types::Scope;

#[async_trait]
pub trait OptionStore: Debug + Send + Sync {
	/// Reads an option record
	///
	/// Returns `None` if nothing is stored for the scope yet.
	async fn read_options(&self, scope: Scope, name: &str) -> LsResult<Option<OptionSet>>;

	/// Stores the record only if none exists yet
	///
	/// Must be atomic: of several concurrent callers exactly one observes
	/// `true`, the others `false`.
	async fn add_options(&self, scope: Scope, name: &str, options: &OptionSet) -> LsResult<bool>;

	/// Stores the record, replacing any previous value
	async fn update_options(&self, scope: Scope, name: &str, options: &OptionSet) -> LsResult<bool>;
}

// vim: ts=4

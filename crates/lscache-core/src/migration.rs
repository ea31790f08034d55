//! Schema migration of a persisted option set
//!
//! Runs whenever a loaded set was written by another schema version (or has a
//! different key count). Missing keys get their default, retired keys are
//! dropped, the version is bumped and the login cookie is re-derived from the
//! rule files. Persisting is best effort: the corrected set is used for the
//! current request either way, a failed write is retried on the next load.

use lscache_types::deployment::DeploymentMode;
use lscache_types::option::{OptionKey, OptionSet, OptionValue};
use lscache_types::option_store::OptionStore;
use lscache_types::rule_scanner::RuleScanner;

use crate::logger::DiagnosticLogger;
use crate::prelude::*;
use crate::schema::{self, SCHEMA_VERSION};

/// What a migration run did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Migration {
	/// Keys added with their default values
	pub added: Vec<(Box<str>, OptionValue)>,
	/// Keys no longer part of the schema
	pub removed: Vec<Box<str>>,
	/// Login cookie re-derived by the rule scanner
	pub login_cookie: Option<Box<str>>,
	/// False when the set was already current
	pub performed: bool,
	pub persisted: bool,
}

impl Migration {
	/// Audit text listing added and removed keys
	pub fn summary(&self) -> String {
		let mut log = String::new();
		for (key, value) in &self.added {
			log.push_str(&format!(" Added {} = {}", key, value));
		}
		for key in &self.removed {
			log.push_str(&format!(" Removed {}", key));
		}
		log
	}
}

/// Whether `current` already matches the schema
///
/// Only the version and the key count are compared.
pub fn is_current(current: &OptionSet, defaults: &OptionSet) -> bool {
	current.version() == defaults.version() && current.len() == defaults.len()
}

pub async fn migrate(
	current: &mut OptionSet,
	store: &dyn OptionStore,
	deployment: &dyn DeploymentMode,
	scanner: &dyn RuleScanner,
	tn_id: TnId,
	logger: &DiagnosticLogger,
) -> Migration {
	let multi_tenant = deployment.is_multi_tenant();
	let defaults = schema::defaults(multi_tenant);

	if is_current(current, &defaults) {
		return Migration::default();
	}

	let mut migration = Migration { performed: true, ..Migration::default() };

	for (key, value) in defaults.iter() {
		if !current.contains_raw(key) {
			current.set_raw(key, value.clone());
			migration.added.push((key.into(), value.clone()));
		}
	}

	let retired: Vec<Box<str>> =
		current.keys().filter(|key| !defaults.contains_raw(key)).map(Into::into).collect();
	for key in retired {
		current.remove_raw(&key);
		migration.removed.push(key);
	}

	current.set(OptionKey::Version, SCHEMA_VERSION);

	if !multi_tenant || deployment.has_network_admin_privilege() {
		match scanner.scan_upgrade().await {
			Ok(cookie) => {
				current.set(OptionKey::LoginCookie, cookie.clone());
				migration.login_cookie = Some(cookie);
			}
			Err(err) => {
				logger.error(&format!("login cookie rescan failed: {}", err));
			}
		}
	}

	let res = store.update_options(Scope::Tenant(tn_id), OPTION_NAME, current).await;
	migration.persisted = match res {
		Ok(changed) => changed,
		Err(err) => {
			warn!("option migration write failed for tn_id={}: {}", tn_id, err);
			false
		}
	};

	let msg = format!("plugin_upgrade option changed = {}{}", migration.persisted, migration.summary());
	if migration.persisted {
		logger.info(&msg);
	} else {
		logger.error(&msg);
	}

	migration
}

// vim: ts=4

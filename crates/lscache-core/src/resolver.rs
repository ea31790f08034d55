//! Per-request view of the options
//!
//! A `ConfigResolver` is built once per request. It owns the loaded option set
//! with the network overlay applied, the purge triggers parsed from it and the
//! request's diagnostic logger.

use lscache_types::deployment::DeploymentMode;
use lscache_types::option::{EnabledState, OptionKey, OptionSet, OptionValue};
use lscache_types::option_store::OptionStore;
use lscache_types::request::RequestContext;
use lscache_types::rule_scanner::RuleScanner;

use crate::gate;
use crate::logger::{DiagnosticLogger, LogLevel};
use crate::migration::{self, Migration};
use crate::prelude::*;
use crate::purge::PurgeOptions;
use crate::schema;

#[derive(Debug)]
pub struct ConfigResolver {
	tn_id: TnId,
	multi_tenant: bool,
	options: OptionSet,
	purge: PurgeOptions,
	logger: DiagnosticLogger,
}

impl ConfigResolver {
	/// Wraps an option set that already had the network overlay applied
	pub fn from_options(
		options: OptionSet,
		tn_id: TnId,
		multi_tenant: bool,
		logger: DiagnosticLogger,
	) -> Self {
		let mut resolver =
			Self { tn_id, multi_tenant, options, purge: PurgeOptions::default(), logger };
		resolver.refresh();
		resolver
	}

	/// Loads the tenant options and applies the network overlay
	///
	/// A missing tenant record is reported as [`Error::OptionsMissing`].
	pub async fn load(
		store: &dyn OptionStore,
		deployment: &dyn DeploymentMode,
		tn_id: TnId,
		logger: DiagnosticLogger,
	) -> LsResult<Self> {
		let scope = Scope::Tenant(tn_id);
		let mut options =
			store.read_options(scope, OPTION_NAME).await?.ok_or(Error::OptionsMissing(scope))?;

		let multi_tenant = deployment.is_multi_tenant();
		if multi_tenant {
			if let Some(network) = store.read_options(Scope::Network, OPTION_NAME).await? {
				apply_network(&mut options, &network);
			}
		}

		Ok(Self::from_options(options, tn_id, multi_tenant, logger))
	}

	/// Like [`ConfigResolver::load`], but never fails
	///
	/// A missing or unreadable tenant record is replaced by in-memory defaults.
	/// A failed network read keeps the tenant record as stored, without the
	/// overlay. Nothing is persisted here: a missing record is provisioned by
	/// activation, an outdated one by migration.
	pub async fn load_or_default(
		store: &dyn OptionStore,
		deployment: &dyn DeploymentMode,
		tn_id: TnId,
		logger: DiagnosticLogger,
	) -> Self {
		let multi_tenant = deployment.is_multi_tenant();
		let scope = Scope::Tenant(tn_id);

		let (mut options, fallback) = match store.read_options(scope, OPTION_NAME).await {
			Ok(Some(options)) => (options, None),
			Ok(None) => {
				debug!("no options stored for tn_id={}, using defaults", tn_id);
				(schema::defaults(multi_tenant), Some(Error::OptionsMissing(scope)))
			}
			Err(err) => {
				warn!("option load failed for tn_id={}: {}", tn_id, err);
				(schema::defaults(multi_tenant), Some(err))
			}
		};

		let mut network_err = None;
		if multi_tenant {
			match store.read_options(Scope::Network, OPTION_NAME).await {
				Ok(Some(network)) => apply_network(&mut options, &network),
				Ok(None) => {}
				Err(err) => {
					warn!("network option load failed for tn_id={}: {}", tn_id, err);
					network_err = Some(err);
				}
			}
		}

		let resolver = Self::from_options(options, tn_id, multi_tenant, logger);
		if let Some(err) = fallback {
			resolver.logger.notice(&format!("using default options: {}", err));
		}
		if let Some(err) = network_err {
			resolver.logger.error(&format!("network options unavailable: {}", err));
		}
		resolver
	}

	/// Network wide options, provisioning the defaults on first access
	///
	/// Returns `None` for single-tenant deployments. Provisioning uses the
	/// store's insert-if-absent, so concurrent first calls all end up with the
	/// record that was actually persisted.
	pub async fn network_options(
		store: &dyn OptionStore,
		deployment: &dyn DeploymentMode,
		logger: &DiagnosticLogger,
	) -> LsResult<Option<OptionSet>> {
		if !deployment.is_multi_tenant() {
			return Ok(None);
		}

		if let Some(network) = store.read_options(Scope::Network, OPTION_NAME).await? {
			return Ok(Some(network));
		}

		let defaults = schema::network_defaults();
		let added = store.add_options(Scope::Network, OPTION_NAME, &defaults).await?;
		logger.notice(&format!("network options provisioned = {}", added));

		// Another request may have won the race
		let network = store.read_options(Scope::Network, OPTION_NAME).await?.unwrap_or(defaults);
		Ok(Some(network))
	}

	/// Brings the owned option set up to the current schema
	pub async fn migrate(
		&mut self,
		store: &dyn OptionStore,
		deployment: &dyn DeploymentMode,
		scanner: &dyn RuleScanner,
	) -> Migration {
		let res =
			migration::migrate(&mut self.options, store, deployment, scanner, self.tn_id, &self.logger)
				.await;
		if res.performed {
			self.refresh();
		}
		res
	}

	// Recomputes everything derived from the raw options
	fn refresh(&mut self) {
		self.purge = PurgeOptions::parse(self.options.str(OptionKey::PurgeByPost).unwrap_or(""));
		self.logger.set_threshold(LogLevel::from_options(&self.options));

		if !self.multi_tenant && self.options.enabled_state() == Some(EnabledState::DeferToNetwork) {
			self.logger.notice("network setting selected on a single-tenant install");
		}
	}

	pub fn get(&self, key: OptionKey) -> LsResult<&OptionValue> {
		self.options.get(key).ok_or_else(|| {
			let err = Error::UnknownOption(key.as_str().into());
			self.logger.error(&err.to_string());
			err
		})
	}

	/// Loose boolean read, agreeing with [`OptionSet::flag`]
	pub fn get_bool(&self, key: OptionKey) -> LsResult<bool> {
		Ok(self.get(key)?.is_truthy())
	}

	pub fn get_int(&self, key: OptionKey) -> LsResult<i64> {
		self.get(key)?
			.as_int()
			.ok_or_else(|| Error::TypeMismatch { key: key.as_str().into(), expected: "an int" })
	}

	pub fn get_str(&self, key: OptionKey) -> LsResult<&str> {
		self.get(key)?
			.as_str()
			.ok_or_else(|| Error::TypeMismatch { key: key.as_str().into(), expected: "a string" })
	}

	pub fn options(&self) -> &OptionSet {
		&self.options
	}

	pub fn into_options(self) -> OptionSet {
		self.options
	}

	pub fn tn_id(&self) -> TnId {
		self.tn_id
	}

	pub fn is_multi_tenant(&self) -> bool {
		self.multi_tenant
	}

	pub fn logger(&self) -> &DiagnosticLogger {
		&self.logger
	}

	pub fn enabled_state(&self) -> Option<EnabledState> {
		self.options.enabled_state()
	}

	/// Effective enable flag after the network overlay
	pub fn is_enabled(&self) -> bool {
		self.options.flag(OptionKey::Enabled)
	}

	pub fn purge_options(&self) -> &PurgeOptions {
		&self.purge
	}

	pub fn purge_by_post(&self, token: impl AsRef<str>) -> bool {
		self.purge.contains(token)
	}

	pub fn caching_infrastructure_active(&self, ctx: &RequestContext) -> bool {
		gate::caching_infrastructure_active(ctx)
	}

	pub fn plugin_enabled(&self, ctx: &RequestContext) -> bool {
		gate::plugin_enabled(ctx, &self.options)
	}
}

/// Copies the network enable flag into a tenant set
///
/// Tenants deferring to the network get their effective `enabled` from it.
pub fn apply_network(options: &mut OptionSet, network: &OptionSet) {
	let network_enabled = network.flag(OptionKey::NetworkEnabled);
	options.set(OptionKey::NetworkEnabled, network_enabled);
	if options.enabled_state() == Some(EnabledState::DeferToNetwork) {
		options.set(OptionKey::Enabled, network_enabled);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tenant(state: EnabledState, enabled: bool) -> OptionSet {
		let mut options = schema::defaults(true);
		options.set(OptionKey::EnabledRadio, state).set(OptionKey::Enabled, enabled);
		options
	}

	fn network(enabled: bool) -> OptionSet {
		let mut options = schema::network_defaults();
		options.set(OptionKey::NetworkEnabled, enabled);
		options
	}

	#[test]
	fn test_defer_follows_network() {
		let mut options = tenant(EnabledState::DeferToNetwork, false);
		apply_network(&mut options, &network(true));
		assert!(options.flag(OptionKey::Enabled));

		let mut options = tenant(EnabledState::DeferToNetwork, true);
		apply_network(&mut options, &network(false));
		assert!(!options.flag(OptionKey::Enabled));
	}

	#[test]
	fn test_explicit_state_ignores_network() {
		let mut options = tenant(EnabledState::Enabled, true);
		apply_network(&mut options, &network(false));
		assert!(options.flag(OptionKey::Enabled));
		assert!(!options.flag(OptionKey::NetworkEnabled));

		let mut options = tenant(EnabledState::Disabled, false);
		apply_network(&mut options, &network(true));
		assert!(!options.flag(OptionKey::Enabled));
	}

	#[test]
	fn test_unknown_option_is_an_error() {
		let resolver = ConfigResolver::from_options(
			schema::defaults(false),
			TnId(1),
			false,
			DiagnosticLogger::disabled(),
		);
		assert!(matches!(
			resolver.get(OptionKey::NetworkEnabled),
			Err(Error::UnknownOption(key)) if &*key == "network_enabled"
		));
		assert_eq!(resolver.get_int(OptionKey::PublicTtl).ok(), Some(28800));
		assert_eq!(resolver.get_str(OptionKey::AdminIps).ok(), Some("127.0.0.1"));
		assert!(matches!(
			resolver.get_str(OptionKey::PublicTtl),
			Err(Error::TypeMismatch { .. })
		));
	}

	#[test]
	fn test_get_bool_reads_legacy_values() {
		let mut options = schema::defaults(false);
		options.set(OptionKey::Enabled, "1").set(OptionKey::CacheLogin, "0");
		options.set(OptionKey::CacheFavicon, 1);
		let resolver =
			ConfigResolver::from_options(options, TnId(1), false, DiagnosticLogger::disabled());

		assert_eq!(resolver.get_bool(OptionKey::Enabled).ok(), Some(true));
		assert!(resolver.is_enabled());
		assert_eq!(resolver.get_bool(OptionKey::CacheLogin).ok(), Some(false));
		assert_eq!(resolver.get_bool(OptionKey::CacheFavicon).ok(), Some(true));
		assert_eq!(resolver.get_bool(OptionKey::LoginCookie).ok(), Some(false));
	}

	#[test]
	fn test_purge_options_derived_from_raw() {
		let mut options = schema::defaults(false);
		options.set(OptionKey::PurgeByPost, "F.A.M");
		let resolver =
			ConfigResolver::from_options(options, TnId(1), false, DiagnosticLogger::disabled());

		assert_eq!(resolver.purge_options().len(), 3);
		assert!(resolver.purge_by_post("F"));
		assert!(!resolver.purge_by_post("T"));
	}

	#[test]
	fn test_threshold_taken_from_options() {
		let mut options = schema::defaults(false);
		options.set(OptionKey::Debug, LogLevel::Notice.as_int());
		let logger = DiagnosticLogger::new(true, LogLevel::None, &RequestContext::new());
		let resolver = ConfigResolver::from_options(options, TnId(1), false, logger);

		assert_eq!(resolver.logger().threshold(), LogLevel::Notice);
		assert!(resolver.logger().notice("shown"));
		assert!(!resolver.logger().info("hidden"));
	}
}

// vim: ts=4

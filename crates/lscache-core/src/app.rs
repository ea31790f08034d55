//! App facade - bundles the injected collaborators
//!
//! Request handlers call [`LsCache::resolver`] once per request; install hooks
//! call [`LsCache::activate`].

use std::sync::Arc;

use lscache_types::deployment::{Deployment, DeploymentMode};
use lscache_types::option::OptionSet;
use lscache_types::option_store::OptionStore;
use lscache_types::request::RequestContext;
use lscache_types::rule_scanner::RuleScanner;

use crate::activation::{self, Activation};
use crate::logger::{DiagnosticLogger, LogLevel};
use crate::prelude::*;
use crate::resolver::ConfigResolver;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone)]
pub struct LsCacheOpts {
	pub deployment: Deployment,
	/// Global debug switch; the diagnostic logger is silent without it
	pub debug_mode: bool,
	/// Run migration when a request loads outdated options
	pub migrate_on_load: bool,
}

pub struct LsCache {
	pub opts: LsCacheOpts,
	pub store: Arc<dyn OptionStore>,
	pub scanner: Arc<dyn RuleScanner>,
}

impl LsCache {
	/// Diagnostic logger for one request
	pub fn logger(&self, ctx: &RequestContext, threshold: LogLevel) -> DiagnosticLogger {
		DiagnosticLogger::new(self.opts.debug_mode, threshold, ctx)
	}

	/// Resolved options for one request
	///
	/// Falls back to defaults when nothing can be loaded and migrates outdated
	/// records, so the request always sees a complete option set.
	pub async fn resolver(&self, tn_id: TnId, ctx: &RequestContext) -> ConfigResolver {
		let logger = self.logger(ctx, LogLevel::None);
		let deployment = &self.opts.deployment;
		let mut resolver =
			ConfigResolver::load_or_default(self.store.as_ref(), deployment, tn_id, logger).await;

		if self.opts.migrate_on_load {
			let migration =
				resolver.migrate(self.store.as_ref(), deployment, self.scanner.as_ref()).await;
			if migration.performed {
				debug!("options migrated for tn_id={}:{}", tn_id, migration.summary());
			}
		}
		resolver
	}

	pub async fn activate(&self, tn_id: TnId) -> Activation {
		let logger = self.logger(&RequestContext::new(), LogLevel::Debug);
		activation::activate(
			self.store.as_ref(),
			self.scanner.as_ref(),
			&self.opts.deployment,
			tn_id,
			&logger,
		)
		.await
	}

	pub async fn network_options(&self) -> LsResult<Option<OptionSet>> {
		let logger = self.logger(&RequestContext::new(), LogLevel::Debug);
		ConfigResolver::network_options(self.store.as_ref(), &self.opts.deployment, &logger).await
	}

	pub fn is_multi_tenant(&self) -> bool {
		self.opts.deployment.is_multi_tenant()
	}
}

pub struct LsCacheBuilder {
	opts: LsCacheOpts,
	store: Option<Arc<dyn OptionStore>>,
	scanner: Option<Arc<dyn RuleScanner>>,
}

impl LsCacheBuilder {
	pub fn new() -> Self {
		LsCacheBuilder {
			opts: LsCacheOpts {
				deployment: Deployment::single_tenant(),
				debug_mode: false,
				migrate_on_load: true,
			},
			store: None,
			scanner: None,
		}
	}

	// Opts
	pub fn deployment(&mut self, deployment: Deployment) -> &mut Self {
		self.opts.deployment = deployment;
		self
	}
	pub fn multi_tenant(&mut self, multi_tenant: bool) -> &mut Self {
		self.opts.deployment.multi_tenant = multi_tenant;
		self
	}
	pub fn network_admin(&mut self, network_admin: bool) -> &mut Self {
		self.opts.deployment.network_admin = network_admin;
		self
	}
	pub fn debug_mode(&mut self, debug_mode: bool) -> &mut Self {
		self.opts.debug_mode = debug_mode;
		self
	}
	pub fn migrate_on_load(&mut self, migrate: bool) -> &mut Self {
		self.opts.migrate_on_load = migrate;
		self
	}

	// Adapters
	pub fn store(&mut self, store: Arc<dyn OptionStore>) -> &mut Self {
		self.store = Some(store);
		self
	}
	pub fn scanner(&mut self, scanner: Arc<dyn RuleScanner>) -> &mut Self {
		self.scanner = Some(scanner);
		self
	}

	pub fn build(&mut self) -> LsResult<LsCache> {
		let Some(store) = self.store.take() else {
			error!("FATAL: No option store configured");
			return Err(Error::ConfigError("No option store configured".to_string()));
		};
		let Some(scanner) = self.scanner.take() else {
			error!("FATAL: No rule scanner configured");
			return Err(Error::ConfigError("No rule scanner configured".to_string()));
		};
		info!("lscache V{} ({:?})", VERSION, self.opts.deployment);
		Ok(LsCache { opts: self.opts.clone(), store, scanner })
	}
}

impl Default for LsCacheBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4

//! First activation: default provisioning and rewrite rule setup

use lscache_types::deployment::DeploymentMode;
use lscache_types::option::{OptionKey, OptionSet, OptionValue};
use lscache_types::option_store::OptionStore;
use lscache_types::rule_scanner::{RewriteInput, RuleScanner, REWRITE_MARKER_PREFIX};

use crate::logger::DiagnosticLogger;
use crate::prelude::*;
use crate::resolver::ConfigResolver;
use crate::schema;

/// Options forwarded to the rule scanner as they are
const REWRITE_INPUT_KEYS: [OptionKey; 5] = [
	OptionKey::MobileviewEnabled,
	OptionKey::NocacheCookies,
	OptionKey::NocacheUseragents,
	OptionKey::LoginCookie,
	OptionKey::CacheLogin,
];

/// Cache flags that need request matching rules
const MARKER_KEYS: [OptionKey; 2] = [OptionKey::CacheFavicon, OptionKey::CacheResources];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
	/// Multi-tenant activation by a site admin, left to the network admin
	NotNetworkAdmin,
	/// Options already existed and caching is switched off
	Disabled,
	/// Neither favicon nor resource caching is on
	NothingToProvision,
}

#[derive(Debug)]
pub enum Activation {
	Skipped {
		added: bool,
		reason: SkipReason,
	},
	Provisioned {
		added: bool,
		input: RewriteInput,
		context: OptionSet,
		errors: Vec<Error>,
	},
}

impl Activation {
	/// Whether this activation stored the tenant defaults
	pub fn added(&self) -> bool {
		match self {
			Activation::Skipped { added, .. } | Activation::Provisioned { added, .. } => *added,
		}
	}
}

/// Rule scanner request for the given options
///
/// Values missing from `options` (the network record has no login cookie)
/// are taken from `defaults`.
pub fn rewrite_input(options: &OptionSet, defaults: &OptionSet) -> RewriteInput {
	let mut input = RewriteInput::new();
	for key in REWRITE_INPUT_KEYS {
		if let Some(value) = options.get(key).or_else(|| defaults.get(key)) {
			input.insert(key.as_str().into(), value.clone());
		}
	}
	for key in MARKER_KEYS {
		if options.flag(key) {
			input.insert(
				format!("{}{}", REWRITE_MARKER_PREFIX, key).into(),
				OptionValue::from(key.as_str()),
			);
		}
	}
	input
}

pub async fn activate(
	store: &dyn OptionStore,
	scanner: &dyn RuleScanner,
	deployment: &dyn DeploymentMode,
	tn_id: TnId,
	logger: &DiagnosticLogger,
) -> Activation {
	let multi_tenant = deployment.is_multi_tenant();
	let mut defaults = schema::defaults(multi_tenant);
	let scope = Scope::Tenant(tn_id);

	let added = match store.add_options(scope, OPTION_NAME, &defaults).await {
		Ok(added) => added,
		Err(err) => {
			warn!("default option provisioning failed for tn_id={}: {}", tn_id, err);
			false
		}
	};
	let msg = format!("plugin_activation update option = {}", added);
	if added {
		logger.notice(&msg);
	} else {
		logger.error(&msg);
	}

	let options = if multi_tenant {
		if !deployment.has_network_admin_privilege() {
			return Activation::Skipped { added, reason: SkipReason::NotNetworkAdmin };
		}
		let network = match ConfigResolver::network_options(store, deployment, logger).await {
			Ok(Some(network)) => network,
			Ok(None) => schema::network_defaults(),
			Err(err) => {
				logger.error(&format!("network options unavailable: {}", err));
				schema::network_defaults()
			}
		};
		let network_enabled = network.flag(OptionKey::NetworkEnabled);
		if !added && !network_enabled {
			return Activation::Skipped { added, reason: SkipReason::Disabled };
		}
		defaults.set(OptionKey::NetworkEnabled, network_enabled);
		network
	} else if added {
		defaults.clone()
	} else {
		let current = match store.read_options(scope, OPTION_NAME).await {
			Ok(Some(current)) => current,
			Ok(None) => defaults.clone(),
			Err(err) => {
				logger.error(&format!("tenant options unavailable: {}", err));
				defaults.clone()
			}
		};
		if !current.flag(OptionKey::Enabled) {
			return Activation::Skipped { added, reason: SkipReason::Disabled };
		}
		current
	};

	if !options.flag(OptionKey::CacheFavicon) && !options.flag(OptionKey::CacheResources) {
		return Activation::Skipped { added, reason: SkipReason::NothingToProvision };
	}

	let input = rewrite_input(&options, &defaults);

	// The rule scanner must not see the flags as set, it would match its own rules
	let mut context = defaults;
	context.set(OptionKey::CacheFavicon, false).set(OptionKey::CacheResources, false);

	let mut errors = Vec::new();
	scanner.validate_common_rewrites(&input, &context, &mut errors).await;
	for err in &errors {
		logger.error(&format!("rewrite provisioning: {}", err));
	}
	info!("rewrite rules provisioned for tn_id={} ({} errors)", tn_id, errors.len());

	Activation::Provisioned { added, input, context, errors }
}


// vim: ts=4

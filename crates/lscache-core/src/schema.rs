//! Default option sets for the current schema

use lscache_types::option::{EnabledState, OptionKey, OptionSet};

use crate::logger::LogLevel;
use crate::purge::{self, PurgeTrigger};

/// Schema version written into every option set this build produces
pub const SCHEMA_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_PURGE_TRIGGERS: [PurgeTrigger; 6] = [
	PurgeTrigger::FrontPage,
	PurgeTrigger::HomePage,
	PurgeTrigger::Author,
	PurgeTrigger::Month,
	PurgeTrigger::Term,
	PurgeTrigger::PostType,
];

/// Default tenant options
///
/// Multi-tenant installs start out deferring to the network setting, single
/// installs start out enabled. `network_enabled` is only part of the schema in
/// multi-tenant mode.
pub fn defaults(multi_tenant: bool) -> OptionSet {
	let (enabled, radio) = if multi_tenant {
		(false, EnabledState::DeferToNetwork)
	} else {
		(true, EnabledState::Enabled)
	};

	let mut options = OptionSet::new();
	options
		.set(OptionKey::Version, SCHEMA_VERSION)
		.set(OptionKey::Enabled, enabled)
		.set(OptionKey::EnabledRadio, radio)
		.set(OptionKey::CacheCommenters, true)
		.set(OptionKey::CacheLogin, true)
		.set(OptionKey::CacheFavicon, true)
		.set(OptionKey::CacheResources, true)
		.set(OptionKey::MobileviewEnabled, false)
		.set(OptionKey::LoginCookie, "")
		.set(OptionKey::Debug, LogLevel::None.as_int())
		.set(OptionKey::AdminIps, "127.0.0.1")
		.set(OptionKey::TestIps, "")
		.set(OptionKey::PublicTtl, 28800)
		.set(OptionKey::FrontPageTtl, 1800)
		.set(OptionKey::NocacheVars, "")
		.set(OptionKey::NocachePath, "")
		.set(OptionKey::PurgeByPost, purge::join(&DEFAULT_PURGE_TRIGGERS))
		.set(OptionKey::ExcludesUri, "")
		.set(OptionKey::ExcludesCat, "")
		.set(OptionKey::ExcludesTag, "")
		.set(OptionKey::NocacheCookies, "")
		.set(OptionKey::NocacheUseragents, "");

	if multi_tenant {
		options.set(OptionKey::NetworkEnabled, false);
	}

	options
}

/// Default network wide options, provisioned on first access
pub fn network_defaults() -> OptionSet {
	let mut options = OptionSet::new();
	options
		.set(OptionKey::NetworkEnabled, false)
		.set(OptionKey::CacheFavicon, true)
		.set(OptionKey::CacheResources, true)
		.set(OptionKey::MobileviewEnabled, false)
		.set(OptionKey::NocacheCookies, "")
		.set(OptionKey::NocacheUseragents, "");
	options
}


// vim: ts=4

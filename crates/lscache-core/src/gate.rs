//! Checks every request handler runs before touching cache headers

use lscache_types::option::{OptionKey, OptionSet};
use lscache_types::request::RequestContext;

/// The upstream cache server announced itself on this request
///
/// Being configured is not enough: without the server in front of us nothing
/// we emit would be cached.
pub fn caching_infrastructure_active(ctx: &RequestContext) -> bool {
	ctx.has_cache_marker()
}

/// Caching is possible and switched on for the resolved options
pub fn plugin_enabled(ctx: &RequestContext, options: &OptionSet) -> bool {
	caching_infrastructure_active(ctx) && options.flag(OptionKey::Enabled)
}


// vim: ts=4

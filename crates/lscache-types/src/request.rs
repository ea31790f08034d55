//! Per-request information consumed by the core

use std::net::SocketAddr;

/// Header set by the upstream cache server when it is in front of us
pub const CACHE_MARKER_HEADER: &str = "X-LSCACHE";

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
	/// Raw value of the upstream cache marker, if the request carried one
	pub cache_marker: Option<Box<str>>,
	/// Origin address, used only to correlate log lines
	pub remote_addr: Option<SocketAddr>,
}

impl RequestContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_cache_marker(mut self, value: impl Into<Box<str>>) -> Self {
		self.cache_marker = Some(value.into());
		self
	}

	pub fn with_remote_addr(mut self, addr: SocketAddr) -> Self {
		self.remote_addr = Some(addr);
		self
	}

	/// The marker is present and not empty or `"0"`
	pub fn has_cache_marker(&self) -> bool {
		self.cache_marker.as_deref().is_some_and(|v| !v.is_empty() && v != "0")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_cache_marker_truthiness() {
		assert!(!RequestContext::new().has_cache_marker());
		assert!(!RequestContext::new().with_cache_marker("").has_cache_marker());
		assert!(!RequestContext::new().with_cache_marker("0").has_cache_marker());
		assert!(RequestContext::new().with_cache_marker("on").has_cache_marker());
	}
}

// vim: ts=4

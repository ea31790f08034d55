//! Tenant ids and option scopes

use serde::{Deserialize, Serialize};

/// Name of the persisted option record, identical in every scope
pub const OPTION_NAME: &str = "litespeed-cache-conf";

// TnId //
//******//
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TnId(pub u32);

impl std::fmt::Display for TnId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for TnId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_u32(self.0)
	}
}

impl<'de> Deserialize<'de> for TnId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(TnId(u32::deserialize(deserializer)?))
	}
}

// Scope //
//*******//
/// Where an option record lives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
	/// Per-tenant options
	Tenant(TnId),
	/// Shared by all tenants (multi-tenant deployments only)
	Network,
}

impl Scope {
	/// Single character tag used by storage adapters
	pub fn tag(&self) -> &'static str {
		match self {
			Scope::Tenant(_) => "T",
			Scope::Network => "N",
		}
	}

	/// Tenant id column value; the network scope uses 0
	pub fn tn_id(&self) -> TnId {
		match self {
			Scope::Tenant(tn_id) => *tn_id,
			Scope::Network => TnId(0),
		}
	}
}

impl std::fmt::Display for Scope {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Scope::Tenant(tn_id) => write!(f, "tenant {}", tn_id),
			Scope::Network => write!(f, "network"),
		}
	}
}

// vim: ts=4

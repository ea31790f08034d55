//! Deployment mode provider

/// Answers questions about the hosting deployment
pub trait DeploymentMode: Send + Sync {
	fn is_multi_tenant(&self) -> bool;

	/// Whether the current caller acts as network administrator
	fn has_network_admin_privilege(&self) -> bool;
}

/// Fixed deployment description, usually built from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deployment {
	pub multi_tenant: bool,
	pub network_admin: bool,
}

impl Deployment {
	pub fn single_tenant() -> Self {
		Self { multi_tenant: false, network_admin: false }
	}

	pub fn multi_tenant(network_admin: bool) -> Self {
		Self { multi_tenant: true, network_admin }
	}
}

impl DeploymentMode for Deployment {
	fn is_multi_tenant(&self) -> bool {
		self.multi_tenant
	}

	fn has_network_admin_privilege(&self) -> bool {
		self.network_admin
	}
}

// vim: ts=4

//! Runtime configuration from the environment

use std::{env, path};

use lscache_types::deployment::Deployment;

pub struct Config {
	pub db_dir: path::PathBuf,
	pub deployment: Deployment,
	pub debug_mode: bool,
	/// Value of the upstream cache marker the web server would set
	pub cache_marker: Option<Box<str>>,
	/// Login cookie reported by the rule scanner
	pub login_cookie: Option<Box<str>>,
}

fn env_flag(name: &str) -> bool {
	env::var(name).is_ok_and(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "yes" | "on"))
}

fn env_str(name: &str) -> Option<Box<str>> {
	env::var(name).ok().map(String::into_boxed_str)
}

impl Config {
	pub fn from_env() -> Self {
		Config {
			db_dir: path::PathBuf::from(env::var("DB_DIR").unwrap_or_else(|_| "./data".to_string())),
			deployment: Deployment {
				multi_tenant: env_flag("LSCACHE_MULTI_TENANT"),
				network_admin: env_flag("LSCACHE_NETWORK_ADMIN"),
			},
			debug_mode: env_flag("LSCACHE_DEBUG"),
			cache_marker: env_str("LSCACHE_CACHE_MARKER"),
			login_cookie: env_str("LSCACHE_LOGIN_COOKIE"),
		}
	}
}

// vim: ts=4

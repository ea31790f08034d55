//! Option keys, values and option sets
//!
//! The set of option keys is closed: every identifier the schema knows about is
//! a variant of [`OptionKey`]. The backing map of an [`OptionSet`] is keyed by
//! the wire name so that records written by older schema versions (which may
//! carry keys that no longer exist) still load and can be cleaned up.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Error;

// OptionKey //
//***********//
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
	Version,
	Enabled,
	EnabledRadio,
	CacheCommenters,
	CacheLogin,
	CacheFavicon,
	CacheResources,
	MobileviewEnabled,
	LoginCookie,
	Debug,
	AdminIps,
	TestIps,
	PublicTtl,
	FrontPageTtl,
	NocacheVars,
	NocachePath,
	PurgeByPost,
	ExcludesUri,
	ExcludesCat,
	ExcludesTag,
	NocacheCookies,
	NocacheUseragents,
	NetworkEnabled,
}

impl OptionKey {
	pub const ALL: [OptionKey; 23] = [
		OptionKey::Version,
		OptionKey::Enabled,
		OptionKey::EnabledRadio,
		OptionKey::CacheCommenters,
		OptionKey::CacheLogin,
		OptionKey::CacheFavicon,
		OptionKey::CacheResources,
		OptionKey::MobileviewEnabled,
		OptionKey::LoginCookie,
		OptionKey::Debug,
		OptionKey::AdminIps,
		OptionKey::TestIps,
		OptionKey::PublicTtl,
		OptionKey::FrontPageTtl,
		OptionKey::NocacheVars,
		OptionKey::NocachePath,
		OptionKey::PurgeByPost,
		OptionKey::ExcludesUri,
		OptionKey::ExcludesCat,
		OptionKey::ExcludesTag,
		OptionKey::NocacheCookies,
		OptionKey::NocacheUseragents,
		OptionKey::NetworkEnabled,
	];

	/// Persisted name of the option
	pub fn as_str(&self) -> &'static str {
		match self {
			OptionKey::Version => "version",
			OptionKey::Enabled => "enabled",
			OptionKey::EnabledRadio => "radio_select",
			OptionKey::CacheCommenters => "cache_commenters",
			OptionKey::CacheLogin => "cache_login",
			OptionKey::CacheFavicon => "cache_favicon",
			OptionKey::CacheResources => "cache_resources",
			OptionKey::MobileviewEnabled => "mobileview_enabled",
			OptionKey::LoginCookie => "login_cookie",
			OptionKey::Debug => "debug",
			OptionKey::AdminIps => "admin_ips",
			OptionKey::TestIps => "test_ips",
			OptionKey::PublicTtl => "public_ttl",
			OptionKey::FrontPageTtl => "front_page_ttl",
			OptionKey::NocacheVars => "nocache_vars",
			OptionKey::NocachePath => "nocache_path",
			OptionKey::PurgeByPost => "purge_by_post",
			OptionKey::ExcludesUri => "excludes_uri",
			OptionKey::ExcludesCat => "excludes_cat",
			OptionKey::ExcludesTag => "excludes_tag",
			OptionKey::NocacheCookies => "nocache_cookies",
			OptionKey::NocacheUseragents => "nocache_useragents",
			OptionKey::NetworkEnabled => "network_enabled",
		}
	}
}

impl std::fmt::Display for OptionKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::str::FromStr for OptionKey {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		OptionKey::ALL
			.iter()
			.find(|key| key.as_str() == s)
			.copied()
			.ok_or_else(|| Error::UnknownOption(s.into()))
	}
}

// EnabledState //
//**************//
/// Tenant level enable switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnabledState {
	Disabled,
	Enabled,
	/// Use the network administrator's setting (multi-tenant only)
	DeferToNetwork,
}

impl EnabledState {
	pub fn as_int(&self) -> i64 {
		match self {
			EnabledState::Disabled => 0,
			EnabledState::Enabled => 1,
			EnabledState::DeferToNetwork => 2,
		}
	}

	pub fn from_int(value: i64) -> Option<Self> {
		match value {
			0 => Some(EnabledState::Disabled),
			1 => Some(EnabledState::Enabled),
			2 => Some(EnabledState::DeferToNetwork),
			_ => None,
		}
	}
}

// OptionValue //
//*************//
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	String(Box<str>),
}

impl OptionValue {
	/// Loose boolean reading of the stored value
	///
	/// Older records store flags as integers or strings, so `1`, `"1"` and
	/// `true` all count as set.
	pub fn is_truthy(&self) -> bool {
		match self {
			OptionValue::Bool(b) => *b,
			OptionValue::Int(i) => *i != 0,
			OptionValue::String(s) => !s.is_empty() && &**s != "0",
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			OptionValue::Int(i) => Some(*i),
			OptionValue::Bool(b) => Some(i64::from(*b)),
			OptionValue::String(s) => s.trim().parse().ok(),
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			OptionValue::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			OptionValue::Bool(_) => "bool",
			OptionValue::Int(_) => "int",
			OptionValue::String(_) => "string",
		}
	}
}

impl std::fmt::Display for OptionValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			OptionValue::Bool(b) => write!(f, "{}", b),
			OptionValue::Int(i) => write!(f, "{}", i),
			OptionValue::String(s) => write!(f, "{}", s),
		}
	}
}

impl From<bool> for OptionValue {
	fn from(value: bool) -> Self {
		OptionValue::Bool(value)
	}
}

impl From<i64> for OptionValue {
	fn from(value: i64) -> Self {
		OptionValue::Int(value)
	}
}

impl From<i32> for OptionValue {
	fn from(value: i32) -> Self {
		OptionValue::Int(i64::from(value))
	}
}

impl From<&str> for OptionValue {
	fn from(value: &str) -> Self {
		OptionValue::String(value.into())
	}
}

impl From<String> for OptionValue {
	fn from(value: String) -> Self {
		OptionValue::String(value.into())
	}
}

impl From<Box<str>> for OptionValue {
	fn from(value: Box<str>) -> Self {
		OptionValue::String(value)
	}
}

impl From<EnabledState> for OptionValue {
	fn from(value: EnabledState) -> Self {
		OptionValue::Int(value.as_int())
	}
}

// OptionSet //
//***********//
/// Mapping of option names to values, as persisted in one scope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(BTreeMap<Box<str>, OptionValue>);

impl OptionSet {
	pub fn new() -> Self {
		Self(BTreeMap::new())
	}

	pub fn get(&self, key: OptionKey) -> Option<&OptionValue> {
		self.0.get(key.as_str())
	}

	pub fn get_raw(&self, name: &str) -> Option<&OptionValue> {
		self.0.get(name)
	}

	pub fn set(&mut self, key: OptionKey, value: impl Into<OptionValue>) -> &mut Self {
		self.0.insert(key.as_str().into(), value.into());
		self
	}

	pub fn set_raw(&mut self, name: impl Into<Box<str>>, value: OptionValue) -> &mut Self {
		self.0.insert(name.into(), value);
		self
	}

	pub fn remove_raw(&mut self, name: &str) -> Option<OptionValue> {
		self.0.remove(name)
	}

	pub fn contains(&self, key: OptionKey) -> bool {
		self.0.contains_key(key.as_str())
	}

	pub fn contains_raw(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(|k| &**k)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
		self.0.iter().map(|(k, v)| (&**k, v))
	}

	/// Truthiness of a flag; a missing option reads as unset
	pub fn flag(&self, key: OptionKey) -> bool {
		self.get(key).is_some_and(OptionValue::is_truthy)
	}

	pub fn int(&self, key: OptionKey) -> Option<i64> {
		self.get(key).and_then(OptionValue::as_int)
	}

	pub fn str(&self, key: OptionKey) -> Option<&str> {
		self.get(key).and_then(OptionValue::as_str)
	}

	/// Schema version that produced this set
	pub fn version(&self) -> Option<&str> {
		self.str(OptionKey::Version)
	}

	pub fn enabled_state(&self) -> Option<EnabledState> {
		self.int(OptionKey::EnabledRadio).and_then(EnabledState::from_int)
	}
}

impl FromIterator<(OptionKey, OptionValue)> for OptionSet {
	fn from_iter<I: IntoIterator<Item = (OptionKey, OptionValue)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(k, v)| (k.as_str().into(), v)).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_option_key_names_round_trip() {
		for key in OptionKey::ALL {
			assert_eq!(key.as_str().parse::<OptionKey>().ok(), Some(key));
		}
		assert!(matches!("widget_ttl".parse::<OptionKey>(), Err(Error::UnknownOption(_))));
	}

	#[test]
	fn test_truthiness_of_legacy_values() {
		assert!(OptionValue::Int(1).is_truthy());
		assert!(!OptionValue::Int(0).is_truthy());
		assert!(OptionValue::from("1").is_truthy());
		assert!(!OptionValue::from("0").is_truthy());
		assert!(!OptionValue::from("").is_truthy());
	}

	#[test]
	fn test_untagged_json_shape() {
		let mut set = OptionSet::new();
		set.set(OptionKey::Enabled, true)
			.set(OptionKey::PublicTtl, 28800)
			.set(OptionKey::LoginCookie, "_lscache_vary");

		let json = serde_json::to_value(&set).expect("serialize");
		assert_eq!(
			json,
			serde_json::json!({
				"enabled": true,
				"public_ttl": 28800,
				"login_cookie": "_lscache_vary"
			})
		);

		let back: OptionSet = serde_json::from_value(json).expect("deserialize");
		assert_eq!(back, set);
	}

	#[test]
	fn test_enabled_state_from_stored_int() {
		let mut set = OptionSet::new();
		assert_eq!(set.enabled_state(), None);
		set.set(OptionKey::EnabledRadio, EnabledState::DeferToNetwork);
		assert_eq!(set.enabled_state(), Some(EnabledState::DeferToNetwork));
		set.set(OptionKey::EnabledRadio, 7);
		assert_eq!(set.enabled_state(), None);
	}
}

// vim: ts=4

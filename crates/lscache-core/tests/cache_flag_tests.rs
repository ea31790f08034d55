//! WP_CACHE toggling in the host config file

use std::fs;
use std::path::{Path, PathBuf};

use lscache_core::cache_flag::set_external_cache_flag;
use lscache_types::error::Error;
use tempfile::TempDir;

const CONFIG: &str = "<?php\ndefine('DB_NAME', 'wordpress');\n\n$table_prefix = 'wp_';\n";

fn write_config(content: &str) -> (PathBuf, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let path = temp_dir.path().join("wp-config.php");
	fs::write(&path, content).expect("Failed to write config");
	(path, temp_dir)
}

fn read(path: &Path) -> String {
	fs::read_to_string(path).expect("Failed to read config")
}

#[test]
fn test_enable_then_disable() {
	let (path, _temp_dir) = write_config(CONFIG);

	assert!(set_external_cache_flag(&path, true).expect("Failed to enable"));
	let enabled = read(&path);
	assert!(enabled.contains("define('WP_CACHE', true);\n$table_prefix"));
	assert!(enabled.starts_with("<?php\ndefine('DB_NAME'"));

	assert!(set_external_cache_flag(&path, false).expect("Failed to disable"));
	let disabled = read(&path);
	assert!(disabled.contains("define('WP_CACHE', false);"));
	assert!(!disabled.contains("define('WP_CACHE', true);"));
}

#[test]
fn test_enable_is_idempotent() {
	let (path, _temp_dir) = write_config(CONFIG);

	set_external_cache_flag(&path, true).expect("Failed to enable");
	let once = read(&path);
	set_external_cache_flag(&path, true).expect("Failed to enable");
	assert_eq!(read(&path), once);
	assert_eq!(once.matches("WP_CACHE").count(), 1);
}

#[test]
fn test_disable_without_define_leaves_file() {
	let (path, _temp_dir) = write_config(CONFIG);

	assert!(set_external_cache_flag(&path, false).expect("Failed to disable"));
	assert_eq!(read(&path), CONFIG);
}

#[test]
fn test_satisfied_read_only_file_is_not_an_error() {
	let (path, _temp_dir) = write_config("<?php\ndefine('WP_CACHE', true);\n");
	let mut perms = fs::metadata(&path).expect("Failed to stat config").permissions();
	perms.set_readonly(true);
	fs::set_permissions(&path, perms).expect("Failed to chmod config");

	assert!(set_external_cache_flag(&path, true).expect("Should be a no-op"));
}

#[test]
fn test_read_only_file_is_rejected() {
	let (path, _temp_dir) = write_config(CONFIG);
	let mut perms = fs::metadata(&path).expect("Failed to stat config").permissions();
	perms.set_readonly(true);
	fs::set_permissions(&path, perms).expect("Failed to chmod config");

	let res = set_external_cache_flag(&path, true);
	assert!(matches!(res, Err(Error::Io(_))));
	assert_eq!(read(&path), CONFIG);
}

#[test]
fn test_missing_file_is_rejected() {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let path = temp_dir.path().join("wp-config.php");

	assert!(matches!(set_external_cache_flag(&path, true), Err(Error::Io(_))));
}

// vim: ts=4

//! Toggles the `WP_CACHE` define in the host's `wp-config.php`
//!
//! This edits a file owned by the host application and is kept apart from the
//! option set lifecycle.

use regex::Regex;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use crate::prelude::*;

const ENABLE_LINE: &str = "define('WP_CACHE', true);";
const DISABLE_LINE: &str = "define('WP_CACHE', false);";

type CompiledRegex = LazyLock<Result<Regex, regex::Error>>;

/// Active (not commented out) define
static ACTIVE_DEFINE: CompiledRegex = LazyLock::new(|| {
	Regex::new(r#"(?m)^[ \t]*define\(\s*['"]WP_CACHE['"]\s*,\s*([A-Za-z0-9]+)\s*\)\s*;"#)
});
static ANY_DEFINE: CompiledRegex = LazyLock::new(|| Regex::new(r#"define\(.*['"]WP_CACHE['"].+;"#));
/// Also matches a define commented out with `//`
static COMMENTED_DEFINE: CompiledRegex =
	LazyLock::new(|| Regex::new(r#"/*define\(.*['"]WP_CACHE['"].+;"#));
static TABLE_PREFIX: CompiledRegex = LazyLock::new(|| Regex::new(r"\$table_prefix"));

fn regex(re: &'static CompiledRegex) -> LsResult<&'static Regex> {
	re.as_ref().map_err(|e| Error::Internal(format!("regex error: {}", e)))
}

/// Value of the active (not commented out) define, if any
fn active_value(content: &str) -> LsResult<Option<bool>> {
	let re = regex(&ACTIVE_DEFINE)?;
	Ok(re.captures(content).map(|caps| {
		let value = caps.get(1).map_or("", |m| m.as_str());
		value.eq_ignore_ascii_case("true") || value == "1"
	}))
}

fn ensure_writable(path: &Path) -> LsResult<()> {
	let metadata = std::fs::metadata(path)?;
	if metadata.permissions().readonly() {
		return Err(Error::Io(io::Error::new(
			io::ErrorKind::PermissionDenied,
			format!("{} is not writable", path.display()),
		)));
	}
	Ok(())
}

fn rewrite(content: &str, enable: bool) -> LsResult<String> {
	if !enable {
		let re = regex(&ANY_DEFINE)?;
		return Ok(re.replace_all(content, DISABLE_LINE).into_owned());
	}

	let re = regex(&COMMENTED_DEFINE)?;
	if re.is_match(content) {
		return Ok(re.replace_all(content, ENABLE_LINE).into_owned());
	}

	let prefix = regex(&TABLE_PREFIX)?;
	if let Some(m) = prefix.find(content) {
		return Ok(format!("{}{}\n{}", &content[..m.start()], ENABLE_LINE, &content[m.start()..]));
	}

	match content.strip_prefix("<?php\n") {
		Some(rest) => Ok(format!("<?php\n{}\n{}", ENABLE_LINE, rest)),
		None => Ok(format!("{}\n{}", ENABLE_LINE, content)),
	}
}

/// Sets `WP_CACHE` to `enable` in the given config file
///
/// Returns `Ok(true)` when the file holds the requested value afterwards,
/// without touching a file that already does. Fails if the file cannot be
/// read or is not writable.
pub fn set_external_cache_flag(path: &Path, enable: bool) -> LsResult<bool> {
	let content = std::fs::read_to_string(path).inspect_err(|err| {
		error!("config file {} not readable for 'WP_CACHE': {}", path.display(), err);
	})?;

	match (enable, active_value(&content)?) {
		(true, Some(true)) | (false, None | Some(false)) => return Ok(true),
		_ => {}
	}

	ensure_writable(path).inspect_err(|_| {
		error!("config file {} not writeable for 'WP_CACHE'", path.display());
	})?;

	let new_content = rewrite(&content, enable)?;
	std::fs::write(path, new_content)?;
	info!("WP_CACHE set to {} in {}", enable, path.display());
	Ok(true)
}


// vim: ts=4

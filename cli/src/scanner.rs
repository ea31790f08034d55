//! Rule scanner that only reports what it would do
//!
//! The CLI has no web server rule file to edit. Provisioning requests are
//! logged, and the login cookie comes from the environment.

use async_trait::async_trait;

use lscache_types::option::OptionSet;
use lscache_types::prelude::*;
use lscache_types::rule_scanner::{RewriteInput, RuleScanner};

#[derive(Debug)]
pub struct LoggingRuleScanner {
	login_cookie: Option<Box<str>>,
}

impl LoggingRuleScanner {
	pub fn new(login_cookie: Option<Box<str>>) -> Self {
		Self { login_cookie }
	}
}

#[async_trait]
impl RuleScanner for LoggingRuleScanner {
	async fn scan_upgrade(&self) -> LsResult<Box<str>> {
		self.login_cookie
			.clone()
			.ok_or_else(|| Error::ScannerError("LSCACHE_LOGIN_COOKIE not set".into()))
	}

	async fn validate_common_rewrites(
		&self,
		input: &RewriteInput,
		context: &OptionSet,
		_errors: &mut Vec<Error>,
	) {
		for (name, value) in input {
			info!("rewrite: {} = {}", name, value);
		}
		debug!("rewrite context: {} options", context.len());
	}
}

// vim: ts=4

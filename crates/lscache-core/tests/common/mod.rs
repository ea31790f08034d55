//! Common test utilities and helpers
//!
//! In-memory collaborators for the core: an option store that can be told to
//! fail writes, and a rule scanner that records what it was asked to do.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use lscache_types::error::{Error, LsResult};
use lscache_types::option::OptionSet;
use lscache_types::option_store::OptionStore;
use lscache_types::rule_scanner::{RewriteInput, RuleScanner};
use lscache_types::types::{Scope, OPTION_NAME};

/// Common test setup helper
pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

/// Buffer collecting formatted log output
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogCapture {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.lock().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

/// Runs `f` with a subscriber that records everything it logs
pub fn capture_logs(f: impl FnOnce()) -> String {
	let capture = LogCapture::default();
	let writer = capture.clone();
	let subscriber = tracing_subscriber::fmt()
		.with_writer(move || writer.clone())
		.with_ansi(false)
		.with_max_level(tracing::Level::DEBUG)
		.finish();
	tracing::subscriber::with_default(subscriber, f);
	String::from_utf8_lossy(&capture.0.lock()).into_owned()
}

#[derive(Debug, Default)]
pub struct MemoryStore {
	records: Mutex<HashMap<(Scope, Box<str>), OptionSet>>,
	writes: AtomicUsize,
	fail_writes: AtomicBool,
	fail_reads: AtomicBool,
	fail_network_reads: AtomicBool,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(scope: Scope, options: OptionSet) -> Self {
		let store = Self::new();
		store.put(scope, options);
		store
	}

	/// Seeds a record without counting it as a write
	pub fn put(&self, scope: Scope, options: OptionSet) {
		self.records.lock().insert((scope, OPTION_NAME.into()), options);
	}

	pub fn record(&self, scope: Scope) -> Option<OptionSet> {
		self.records.lock().get(&(scope, OPTION_NAME.into())).cloned()
	}

	pub fn writes(&self) -> usize {
		self.writes.load(Ordering::SeqCst)
	}

	pub fn fail_writes(&self, fail: bool) {
		self.fail_writes.store(fail, Ordering::SeqCst);
	}

	pub fn fail_reads(&self, fail: bool) {
		self.fail_reads.store(fail, Ordering::SeqCst);
	}

	pub fn fail_network_reads(&self, fail: bool) {
		self.fail_network_reads.store(fail, Ordering::SeqCst);
	}

	fn check_write(&self) -> LsResult<()> {
		if self.fail_writes.load(Ordering::SeqCst) {
			return Err(Error::PersistenceError("store is read-only".into()));
		}
		self.writes.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}
}

#[async_trait]
impl OptionStore for MemoryStore {
	async fn read_options(&self, scope: Scope, name: &str) -> LsResult<Option<OptionSet>> {
		if self.fail_reads.load(Ordering::SeqCst)
			|| (scope == Scope::Network && self.fail_network_reads.load(Ordering::SeqCst))
		{
			return Err(Error::DbError);
		}
		Ok(self.records.lock().get(&(scope, name.into())).cloned())
	}

	async fn add_options(&self, scope: Scope, name: &str, options: &OptionSet) -> LsResult<bool> {
		let mut records = self.records.lock();
		if records.contains_key(&(scope, name.into())) {
			return Ok(false);
		}
		self.check_write()?;
		records.insert((scope, name.into()), options.clone());
		Ok(true)
	}

	async fn update_options(&self, scope: Scope, name: &str, options: &OptionSet) -> LsResult<bool> {
		self.check_write()?;
		self.records.lock().insert((scope, name.into()), options.clone());
		Ok(true)
	}
}

#[derive(Debug, Default)]
pub struct RecordingScanner {
	login_cookie: Mutex<Option<Box<str>>>,
	rewrite_errors: Mutex<Vec<String>>,
	requests: Mutex<Vec<(RewriteInput, OptionSet)>>,
	scans: AtomicUsize,
}

impl RecordingScanner {
	pub fn new() -> Self {
		Self::default()
	}

	/// Cookie returned by `scan_upgrade`; without one the scan fails
	pub fn with_login_cookie(cookie: &str) -> Self {
		let scanner = Self::new();
		*scanner.login_cookie.lock() = Some(cookie.into());
		scanner
	}

	pub fn report_errors(&self, errors: &[&str]) {
		*self.rewrite_errors.lock() = errors.iter().map(|e| e.to_string()).collect();
	}

	pub fn requests(&self) -> Vec<(RewriteInput, OptionSet)> {
		self.requests.lock().clone()
	}

	pub fn scans(&self) -> usize {
		self.scans.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl RuleScanner for RecordingScanner {
	async fn scan_upgrade(&self) -> LsResult<Box<str>> {
		self.scans.fetch_add(1, Ordering::SeqCst);
		self.login_cookie
			.lock()
			.clone()
			.ok_or_else(|| Error::ScannerError("rule file not readable".into()))
	}

	async fn validate_common_rewrites(
		&self,
		input: &RewriteInput,
		context: &OptionSet,
		errors: &mut Vec<Error>,
	) {
		self.requests.lock().push((input.clone(), context.clone()));
		for msg in self.rewrite_errors.lock().iter() {
			errors.push(Error::ScannerError(msg.clone()));
		}
	}
}

// vim: ts=4

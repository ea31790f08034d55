//! Diagnostic logger gated by the `debug` option
//!
//! Lines are only written when the process runs in debug mode and the level is
//! within the configured threshold. Every line carries a tag that includes the
//! request origin and a sub-second stamp taken when the logger was created, so
//! all lines of one request can be correlated.

use lscache_types::option::{OptionKey, OptionSet};
use lscache_types::request::RequestContext;

use crate::prelude::*;

pub const LOG_TAG: &str = "LiteSpeed_Cache";
pub const LOG_TARGET: &str = "lscache";

/// Log levels, lower value means more severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
	None = 0,
	Error = 1,
	Notice = 2,
	Info = 3,
	Debug = 4,
}

impl LogLevel {
	pub fn as_int(self) -> i64 {
		self as i64
	}

	/// Converts a stored threshold; out of range values are clamped
	pub fn from_int(value: i64) -> Self {
		match value {
			i64::MIN..=0 => LogLevel::None,
			1 => LogLevel::Error,
			2 => LogLevel::Notice,
			3 => LogLevel::Info,
			_ => LogLevel::Debug,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			LogLevel::None => "NONE",
			LogLevel::Error => "ERROR",
			LogLevel::Notice => "NOTICE",
			LogLevel::Info => "INFO",
			LogLevel::Debug => "DEBUG",
		}
	}

	/// Threshold configured in an option set
	pub fn from_options(options: &OptionSet) -> Self {
		options.int(OptionKey::Debug).map_or(LogLevel::None, LogLevel::from_int)
	}
}

impl std::fmt::Display for LogLevel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

#[derive(Debug, Clone)]
pub struct DiagnosticLogger {
	debug_mode: bool,
	threshold: LogLevel,
	tag: Box<str>,
}

impl DiagnosticLogger {
	pub fn new(debug_mode: bool, threshold: LogLevel, ctx: &RequestContext) -> Self {
		let tag = match ctx.remote_addr {
			Some(addr) if debug_mode => {
				let micros = chrono::Utc::now().timestamp_subsec_micros();
				format!("{} [{}:{}:{:06}]", LOG_TAG, addr.ip(), addr.port(), micros)
			}
			_ => LOG_TAG.to_string(),
		};
		Self { debug_mode, threshold, tag: tag.into() }
	}

	/// Logger that never emits
	pub fn disabled() -> Self {
		Self { debug_mode: false, threshold: LogLevel::None, tag: LOG_TAG.into() }
	}

	pub fn debug_mode(&self) -> bool {
		self.debug_mode
	}

	pub fn threshold(&self) -> LogLevel {
		self.threshold
	}

	pub fn set_threshold(&mut self, threshold: LogLevel) {
		self.threshold = threshold;
	}

	pub fn tag(&self) -> &str {
		&self.tag
	}

	pub fn enabled_for(&self, level: LogLevel) -> bool {
		self.debug_mode && level != LogLevel::None && level <= self.threshold
	}

	pub fn format_line(&self, level: LogLevel, message: &str) -> String {
		format!("[{}] {} {}", level, self.tag, message)
	}

	/// Writes the message if the level passes; returns whether it did
	pub fn log(&self, level: LogLevel, message: &str) -> bool {
		if !self.enabled_for(level) {
			return false;
		}
		let line = self.format_line(level, message);
		match level {
			LogLevel::Error => error!(target: LOG_TARGET, "{}", line),
			LogLevel::Notice => warn!(target: LOG_TARGET, "{}", line),
			LogLevel::Info => info!(target: LOG_TARGET, "{}", line),
			LogLevel::Debug | LogLevel::None => debug!(target: LOG_TARGET, "{}", line),
		}
		true
	}

	pub fn error(&self, message: &str) -> bool {
		self.log(LogLevel::Error, message)
	}

	pub fn notice(&self, message: &str) -> bool {
		self.log(LogLevel::Notice, message)
	}

	pub fn info(&self, message: &str) -> bool {
		self.log(LogLevel::Info, message)
	}

	pub fn debug(&self, message: &str) -> bool {
		self.log(LogLevel::Debug, message)
	}
}

impl Default for DiagnosticLogger {
	fn default() -> Self {
		Self::disabled()
	}
}


// vim: ts=4

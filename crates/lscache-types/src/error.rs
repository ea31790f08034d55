//! Error type shared by the core and all adapters

use crate::types::Scope;

pub type LsResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// Option key is not part of the loaded option set
	UnknownOption(Box<str>),
	/// No option record persisted for the scope
	OptionsMissing(Scope),
	/// Option exists but holds a value of another type
	TypeMismatch { key: Box<str>, expected: &'static str },
	/// Store write or read failed (adapter specific detail)
	PersistenceError(String),
	DbError,
	/// Rule scanner reported a problem
	ScannerError(String),
	ConfigError(String),
	Serialization(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Serialization(err.to_string())
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::UnknownOption(key) => write!(f, "Invalid option ID {}", key),
			Error::OptionsMissing(scope) => write!(f, "No options stored for {}", scope),
			Error::TypeMismatch { key, expected } => {
				write!(f, "Option '{}' is not {}", key, expected)
			}
			Error::PersistenceError(msg) => write!(f, "Persistence error: {}", msg),
			Error::DbError => write!(f, "Database error"),
			Error::ScannerError(msg) => write!(f, "Rule scanner error: {}", msg),
			Error::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
			Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
			Error::Internal(msg) => write!(f, "Internal error: {}", msg),
			Error::Io(err) => write!(f, "I/O error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

// vim: ts=4

pub use lscache_types::error::{Error, LsResult};
pub use lscache_types::types::{Scope, TnId, OPTION_NAME};

pub use tracing::{debug, error, info, warn};

// vim: ts=4

pub use crate::error::{Error, LsResult};
pub use crate::types::{Scope, TnId};

pub use tracing::{debug, error, info, warn};

// vim: ts=4

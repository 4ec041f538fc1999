pub use crate::core::app::App;
pub use learnhub_types::error::{Error, LhResult};
pub use learnhub_types::types::{now, Patch, Timestamp, UserId};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4

pub use crate::app::App;
pub use bmf_types::error::{ClResult, Error};
pub use bmf_types::types::{ModelId, Pk, Timestamp, UserId};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4

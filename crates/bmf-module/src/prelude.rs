pub use bmf_core::prelude::*;
pub use bmf_core::{App, Ctx};

// vim: ts=4

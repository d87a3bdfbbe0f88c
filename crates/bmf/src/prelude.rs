pub use bmf_core::prelude::*;

// vim: ts=4

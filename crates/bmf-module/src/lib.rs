//! Generic module views. Every registered module gets a list and a detail
//! view plus the ajax create, update, delete and clone forms.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod form;
pub mod handler;
pub mod routes;
pub mod view;

mod prelude;

pub use routes::{init, register_urls};
pub use view::{ModuleView, QuerySet};

// vim: ts=4

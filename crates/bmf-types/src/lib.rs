//! Shared types, adapter traits, and core utilities for the BMF web layer.
//!
//! This crate contains the foundational types that are shared between the
//! feature crates and all adapter implementations. Extracting these into a
//! separate crate allows adapter crates to compile in parallel with the
//! request handling code.

pub mod blob_adapter;
pub mod cache_adapter;
pub mod error;
pub mod meta_adapter;
pub mod prelude;
pub mod session_adapter;
pub mod types;

// vim: ts=4

//! Prelude module for the calendars crate.
//!
//! Re-exports the derive macros shared across modules.

pub use derive_more::Display;

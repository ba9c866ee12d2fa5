//! Shared types for the rres Zig binding generator
//!
//! This crate holds the error type used at every fallible boundary and the
//! report that accumulates soft extraction misses during a run.

pub mod error;
pub mod report;

pub use error::*;
pub use report::*;

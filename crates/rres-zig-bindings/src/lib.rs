//! Zig binding generator for the rres C headers
//!
//! This crate reads `rres.h` (and optionally `rres-raylib.h`) and produces a
//! Zig module that:
//! - re-exports every struct and plain function from the C API
//! - defines a `c_uint`-backed Zig enum for each rres C enum
//! - wraps every function that takes or returns one of those enums so callers
//!   work with Zig enums instead of raw integers

pub mod config;
pub mod naming;
pub mod header;
pub mod extract;
pub mod classifier;
pub mod emitter;
pub mod generator;
pub mod locator;

// Re-export core types
pub use rres_zig_core::*;

// Re-export commonly used types for convenience
pub use config::{BindgenConfig, ConfigError};
pub use generator::{BindingGenerator, GeneratedBindings};
pub use header::{EnumDefinition, EnumNameMap, FunctionSignature, HeaderInfo, ParameterInfo};
pub use locator::{HeaderLocator, HeaderSources};

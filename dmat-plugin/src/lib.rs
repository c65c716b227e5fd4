//! dmat Function Registry
//!
//! Provides the trait for exposing matrix operations as named functions
//! and the registry that dispatches calls to them.

mod traits;
mod registry;

pub use traits::{FunctionPlugin, FunctionMeta, ArgMeta};
pub use registry::PluginRegistry;

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{FunctionPlugin, FunctionMeta, ArgMeta, PluginRegistry};
    pub use dmat_core::prelude::*;
}

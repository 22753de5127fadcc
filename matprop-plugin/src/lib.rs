//! Matprop Plugin System
//!
//! Exposes matrix operations as named, self-describing functions over
//! dynamic `Value`s so an evaluator or UI can dispatch them by name.

mod traits;
mod registry;
mod context;

pub use traits::{FunctionPlugin, FunctionMeta, ArgMeta};
pub use registry::PluginRegistry;
pub use context::{EvalContext, DEFAULT_COFACTOR_LIMIT};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{
        FunctionPlugin, FunctionMeta, ArgMeta,
        PluginRegistry, EvalContext,
    };
    pub use matprop_core::prelude::*;
}

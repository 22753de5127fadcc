//! Matprop Core - Fundamental types
//!
//! This crate provides the core types shared by the matprop crates:
//! - `Value`: Runtime values passed across the plugin boundary
//! - `MatrixError`: Typed failures of the numeric core
//! - `MatpropError`: Structured, serializable errors

mod error;
mod value;

pub use error::{codes, MatpropError, MatrixError, Severity};
pub use value::Value;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{MatpropError, MatrixError, Severity, Value};
}

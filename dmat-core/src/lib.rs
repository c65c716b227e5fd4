//! dmat Core - Fundamental types
//!
//! This crate provides the core types used throughout dmat:
//! - `MatrixError`: one variant per failure kind, plus the `Result` alias
//! - `guard`: finiteness checks and epsilon-tolerant comparison
//! - `Value`: dynamic values at the function-call boundary
//! - `ErrorReport`: structured, serializable errors

mod error;
pub mod guard;
mod value;

pub use error::{codes, ErrorReport, MatrixError, Result};
pub use guard::EPSILON;
pub use value::Value;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{ErrorReport, MatrixError, Result, Value};
    pub use crate::error::codes;
    pub use crate::guard::{approx_eq, check_finite, complex_eq, EPSILON};
}

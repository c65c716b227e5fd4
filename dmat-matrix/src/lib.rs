//! dmat Matrix - Dense f64 matrices
//!
//! An owned, resizable, row-major matrix of finite `f64` values:
//! - Storage (allocate, clear, grow-only resize, adopt another matrix's buffer)
//! - Element access (bounds-checked get/set, cell handles, fill)
//! - Arithmetic (add, sub, scale, matmul, tolerance equality)
//! - Cofactor engine (transpose, minor, determinant, complements, inverse)
//!
//! Every operation either succeeds or returns a [`dmat_core::MatrixError`];
//! non-finite values are rejected on the way in and detected on the way out.
//! The same operations are exposed as named functions through
//! [`load_matrix_library`].

mod types;
mod storage;
mod access;
mod arith;
mod cofactor;
mod helpers;
mod construct;
mod ops;
mod props;

pub use types::Matrix;
pub use access::CellMut;
pub use helpers::extract_matrix;

use dmat_plugin::PluginRegistry;

/// Load matrix functions into registry
pub fn load_matrix_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        // Construction
        .with_function(construct::MatrixFn)
        .with_function(construct::ZerosFn)
        .with_function(construct::IdentityFn)

        // Access
        .with_function(ops::GetFn)
        .with_function(ops::SetFn)
        .with_function(ops::FlattenFn)
        .with_function(ops::ResizeFn)

        // Properties
        .with_function(props::RowsFn)
        .with_function(props::ColsFn)
        .with_function(props::ShapeFn)
        .with_function(props::EqualFn)

        // Arithmetic
        .with_function(ops::AddFn)
        .with_function(ops::SubFn)
        .with_function(ops::ScaleFn)
        .with_function(ops::MatmulFn)

        // Cofactor
        .with_function(ops::TransposeFn)
        .with_function(ops::MinorFn)
        .with_function(ops::DeterminantFn)
        .with_function(ops::ComplementsFn)
        .with_function(ops::InverseFn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmat_core::Value;

    #[test]
    fn test_load_matrix_library() {
        let registry = load_matrix_library(PluginRegistry::new());
        assert_eq!(registry.len(), 20);

        for name in ["matrix", "identity", "get", "resize", "equal", "matmul", "inverse"] {
            assert!(registry.get_function(name).is_some(), "{} missing", name);
        }
    }

    #[test]
    fn test_call_through_registry() {
        let registry = load_matrix_library(PluginRegistry::new());
        let m = registry.call_function("identity", &[Value::Number(2.0)]);
        let det = registry.call_function("DETERMINANT", &[m]);
        assert_eq!(det, Value::Number(1.0));
    }

    #[test]
    fn test_serde_round_trip_through_json() {
        let m = Matrix::from_slice(2, 2, &[1.5, -2.0, 0.0, 4.25]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"rows":2,"cols":2,"data":[1.5,-2.0,0.0,4.25]}"#);
        let back: Matrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back.equals(&m), Ok(true));

        let bad: Result<Matrix, _> = serde_json::from_str(r#"{"rows":2,"cols":2,"data":[1.0]}"#);
        assert!(bad.is_err());
    }
}

//! Matrix construction functions

use dmat_plugin::prelude::*;

use crate::helpers::*;
use crate::Matrix;

// ============ matrix ============

pub struct MatrixFn;

static MATRIX_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("rows", "Number", "Number of rows (positive integer)"),
    ArgMeta::required("cols", "Number", "Number of columns (positive integer)"),
    ArgMeta::optional("values", "Number...", "Cells in row-major order, or one list of them; the rest are zero"),
];

static MATRIX_EXAMPLES: [&str; 3] = [
    "matrix(2, 3, 1, 2, 3, 4, 5, 6) → 2×3 matrix",
    "matrix(2, 2, [1, 2, 3]) → [[1, 2], [3, 0]]",
    "matrix(3, 3) → 3×3 zeros",
];

static MATRIX_RELATED: [&str; 3] = ["zeros", "identity", "set"];

impl FunctionPlugin for MatrixFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "matrix",
            description: "Create a matrix of the given size, filled row-major",
            usage: "matrix(rows, cols, values...)",
            args: &MATRIX_ARGS,
            returns: "Matrix",
            examples: &MATRIX_EXAMPLES,
            category: "matrix/construct",
            related: &MATRIX_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if args.len() < 2 {
            return Value::Error(ErrorReport::arg_count("matrix", 2, args.len()));
        }

        let rows = match extract_usize(&args[0], "matrix", "rows") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        let cols = match extract_usize(&args[1], "matrix", "cols") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };

        let rest = &args[2..];
        let values = match rest {
            [Value::List(items)] => extract_number_list(items, "matrix", "values"),
            _ => extract_number_list(rest, "matrix", "values"),
        };
        let values = match values {
            Ok(v) => v,
            Err(e) => return Value::Error(e),
        };

        matrix_value(Matrix::from_slice(rows, cols, &values))
    }
}

// ============ zeros ============

pub struct ZerosFn;

static ZEROS_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("rows", "Number", "Number of rows"),
    ArgMeta::required("cols", "Number", "Number of columns"),
];

static ZEROS_EXAMPLES: [&str; 1] = ["zeros(2, 3) → 2×3 zero matrix"];

static ZEROS_RELATED: [&str; 2] = ["matrix", "identity"];

impl FunctionPlugin for ZerosFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "zeros",
            description: "Create a zero matrix",
            usage: "zeros(rows, cols)",
            args: &ZEROS_ARGS,
            returns: "Matrix",
            examples: &ZEROS_EXAMPLES,
            category: "matrix/construct",
            related: &ZEROS_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 2, "zeros") {
            return Value::Error(e);
        }

        let rows = match extract_usize(&args[0], "zeros", "rows") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        let cols = match extract_usize(&args[1], "zeros", "cols") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };

        matrix_value(Matrix::new(rows, cols))
    }
}

// ============ identity ============

pub struct IdentityFn;

static IDENTITY_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("n", "Number", "Size of the square matrix"),
];

static IDENTITY_EXAMPLES: [&str; 1] = ["identity(3) → 3×3 identity matrix"];

static IDENTITY_RELATED: [&str; 2] = ["zeros", "inverse"];

impl FunctionPlugin for IdentityFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "identity",
            description: "Create an identity matrix",
            usage: "identity(n)",
            args: &IDENTITY_ARGS,
            returns: "Matrix",
            examples: &IDENTITY_EXAMPLES,
            category: "matrix/construct",
            related: &IDENTITY_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 1, "identity") {
            return Value::Error(e);
        }

        match extract_usize(&args[0], "identity", "n") {
            Ok(n) => matrix_value(Matrix::identity(n)),
            Err(e) => Value::Error(e),
        }
    }
}

//! Matrix property functions

use dmat_plugin::prelude::*;

use crate::helpers::*;

// ============ rows ============

pub struct RowsFn;

static ROWS_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("m", "Matrix", "Input matrix"),
];

static ROWS_EXAMPLES: [&str; 1] = ["rows([[1, 2], [3, 4], [5, 6]]) → 3"];

static ROWS_RELATED: [&str; 2] = ["cols", "shape"];

impl FunctionPlugin for RowsFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "rows",
            description: "Number of rows (0 for the empty matrix)",
            usage: "rows(m)",
            args: &ROWS_ARGS,
            returns: "Number",
            examples: &ROWS_EXAMPLES,
            category: "matrix/props",
            related: &ROWS_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 1, "rows") {
            return Value::Error(e);
        }

        match extract_matrix(&args[0], "rows", "m") {
            Ok(m) => Value::Number(m.rows() as f64),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ cols ============

pub struct ColsFn;

static COLS_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("m", "Matrix", "Input matrix"),
];

static COLS_EXAMPLES: [&str; 1] = ["cols([[1, 2], [3, 4], [5, 6]]) → 2"];

static COLS_RELATED: [&str; 2] = ["rows", "shape"];

impl FunctionPlugin for ColsFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "cols",
            description: "Number of columns (0 for the empty matrix)",
            usage: "cols(m)",
            args: &COLS_ARGS,
            returns: "Number",
            examples: &COLS_EXAMPLES,
            category: "matrix/props",
            related: &COLS_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 1, "cols") {
            return Value::Error(e);
        }

        match extract_matrix(&args[0], "cols", "m") {
            Ok(m) => Value::Number(m.cols() as f64),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ shape ============

pub struct ShapeFn;

static SHAPE_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("m", "Matrix", "Input matrix"),
];

static SHAPE_EXAMPLES: [&str; 1] = ["shape([[1, 2, 3], [4, 5, 6]]) → [2, 3]"];

static SHAPE_RELATED: [&str; 3] = ["rows", "cols", "resize"];

impl FunctionPlugin for ShapeFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "shape",
            description: "Dimensions as [rows, cols]",
            usage: "shape(m)",
            args: &SHAPE_ARGS,
            returns: "List",
            examples: &SHAPE_EXAMPLES,
            category: "matrix/props",
            related: &SHAPE_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 1, "shape") {
            return Value::Error(e);
        }

        match extract_matrix(&args[0], "shape", "m") {
            Ok(m) => {
                let (rows, cols) = m.dimensions();
                Value::List(vec![Value::Number(rows as f64), Value::Number(cols as f64)])
            }
            Err(e) => Value::Error(e),
        }
    }
}

// ============ equal ============

pub struct EqualFn;

static EQUAL_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Matrix", "First matrix"),
    ArgMeta::required("b", "Matrix", "Second matrix"),
];

static EQUAL_EXAMPLES: [&str; 2] = [
    "equal([[1, 2]], [[1, 2.00000001]]) → true",
    "equal([[1, 2]], [[1], [2]]) → false",
];

static EQUAL_RELATED: [&str; 1] = ["shape"];

impl FunctionPlugin for EqualFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "equal",
            description: "Same shape and every cell within 1e-7",
            usage: "equal(a, b)",
            args: &EQUAL_ARGS,
            returns: "Bool",
            examples: &EQUAL_EXAMPLES,
            category: "matrix/props",
            related: &EQUAL_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 2, "equal") {
            return Value::Error(e);
        }

        let a = match extract_matrix(&args[0], "equal", "a") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };
        let b = match extract_matrix(&args[1], "equal", "b") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        match a.equals(&b) {
            Ok(eq) => Value::Bool(eq),
            Err(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Matrix;

    fn mat(rows: usize, cols: usize, values: &[f64]) -> Value {
        Matrix::from_slice(rows, cols, values).unwrap().into()
    }

    #[test]
    fn test_dimensions() {
        let m = mat(3, 2, &[1.0]);
        assert_eq!(RowsFn.call(&[m.clone()]), Value::Number(3.0));
        assert_eq!(ColsFn.call(&[m.clone()]), Value::Number(2.0));
        assert_eq!(
            ShapeFn.call(&[m]),
            Value::List(vec![Value::Number(3.0), Value::Number(2.0)])
        );
    }

    #[test]
    fn test_empty_dimensions() {
        let empty = Value::List(vec![]);
        assert_eq!(RowsFn.call(&[empty.clone()]), Value::Number(0.0));
        assert_eq!(ColsFn.call(&[empty]), Value::Number(0.0));
    }

    #[test]
    fn test_equal() {
        let a = mat(1, 2, &[1.0, 2.0]);
        assert_eq!(EqualFn.call(&[a.clone(), mat(1, 2, &[1.0, 2.00000001])]), Value::Bool(true));
        assert_eq!(EqualFn.call(&[a.clone(), mat(1, 2, &[1.0, 2.1])]), Value::Bool(false));
        assert_eq!(EqualFn.call(&[a.clone(), mat(2, 1, &[1.0, 2.0])]), Value::Bool(false));

        let unset = EqualFn.call(&[a, Value::List(vec![])]);
        assert_eq!(unset.as_error().unwrap().code, codes::UNSET_ERROR);
    }

    #[test]
    fn test_arg_errors() {
        assert_eq!(RowsFn.call(&[]).as_error().unwrap().code, codes::ARG_COUNT);
        assert_eq!(
            ShapeFn.call(&[Value::Number(1.0)]).as_error().unwrap().code,
            codes::ARG_TYPE
        );
    }
}

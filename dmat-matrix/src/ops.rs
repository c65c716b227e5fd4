//! Matrix operations: access, arithmetic, cofactor

use dmat_plugin::prelude::*;

use crate::helpers::*;

// ============ get ============

pub struct GetFn;

static GET_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("m", "Matrix", "Input matrix"),
    ArgMeta::required("row", "Number", "Zero-based row index"),
    ArgMeta::required("col", "Number", "Zero-based column index"),
];

static GET_EXAMPLES: [&str; 1] = ["get([[1, 2], [3, 4]], 1, 0) → 3"];

static GET_RELATED: [&str; 2] = ["set", "flatten"];

impl FunctionPlugin for GetFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "get",
            description: "Read one cell",
            usage: "get(m, row, col)",
            args: &GET_ARGS,
            returns: "Number",
            examples: &GET_EXAMPLES,
            category: "matrix/access",
            related: &GET_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 3, "get") {
            return Value::Error(e);
        }

        let m = match extract_matrix(&args[0], "get", "m") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };
        let row = match extract_usize(&args[1], "get", "row") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        let col = match extract_usize(&args[2], "get", "col") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };

        number_value(m.get(row, col))
    }
}

// ============ set ============

pub struct SetFn;

static SET_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("m", "Matrix", "Input matrix"),
    ArgMeta::required("row", "Number", "Zero-based row index"),
    ArgMeta::required("col", "Number", "Zero-based column index"),
    ArgMeta::required("value", "Number", "Finite value to store"),
];

static SET_EXAMPLES: [&str; 1] = ["set([[1, 2], [3, 4]], 0, 1, 9) → [[1, 9], [3, 4]]"];

static SET_RELATED: [&str; 2] = ["get", "matrix"];

impl FunctionPlugin for SetFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "set",
            description: "Copy of the matrix with one cell replaced",
            usage: "set(m, row, col, value)",
            args: &SET_ARGS,
            returns: "Matrix",
            examples: &SET_EXAMPLES,
            category: "matrix/access",
            related: &SET_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 4, "set") {
            return Value::Error(e);
        }

        let mut m = match extract_matrix(&args[0], "set", "m") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };
        let row = match extract_usize(&args[1], "set", "row") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        let col = match extract_usize(&args[2], "set", "col") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        let value = match extract_number(&args[3], "set", "value") {
            Ok(x) => x,
            Err(e) => return Value::Error(e),
        };

        match m.set(row, col, value) {
            Ok(()) => m.into(),
            Err(e) => e.into(),
        }
    }
}

// ============ flatten ============

pub struct FlattenFn;

static FLATTEN_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("m", "Matrix", "Input matrix"),
];

static FLATTEN_EXAMPLES: [&str; 1] = ["flatten([[1, 2], [3, 4]]) → [1, 2, 3, 4]"];

static FLATTEN_RELATED: [&str; 2] = ["matrix", "get"];

impl FunctionPlugin for FlattenFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "flatten",
            description: "Cells in row-major order",
            usage: "flatten(m)",
            args: &FLATTEN_ARGS,
            returns: "List",
            examples: &FLATTEN_EXAMPLES,
            category: "matrix/access",
            related: &FLATTEN_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 1, "flatten") {
            return Value::Error(e);
        }

        let m = match extract_matrix(&args[0], "flatten", "m") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        match m.to_vec() {
            Ok(values) => Value::List(values.into_iter().map(Value::Number).collect()),
            Err(e) => e.into(),
        }
    }
}

// ============ resize ============

pub struct ResizeFn;

static RESIZE_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("m", "Matrix", "Input matrix (may be empty)"),
    ArgMeta::required("rows", "Number", "New row count, not smaller than the current one"),
    ArgMeta::required("cols", "Number", "New column count, not smaller than the current one"),
];

static RESIZE_EXAMPLES: [&str; 1] = ["resize([[5]], 2, 2) → [[5, 0], [0, 0]]"];

static RESIZE_RELATED: [&str; 2] = ["shape", "zeros"];

impl FunctionPlugin for ResizeFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "resize",
            description: "Grow a matrix, keeping existing cells and zero-filling new ones",
            usage: "resize(m, rows, cols)",
            args: &RESIZE_ARGS,
            returns: "Matrix",
            examples: &RESIZE_EXAMPLES,
            category: "matrix/access",
            related: &RESIZE_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 3, "resize") {
            return Value::Error(e);
        }

        let mut m = match extract_matrix(&args[0], "resize", "m") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };
        let rows = match extract_usize(&args[1], "resize", "rows") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        let cols = match extract_usize(&args[2], "resize", "cols") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };

        match m.set_dimensions(rows, cols) {
            Ok(()) => m.into(),
            Err(e) => e.into(),
        }
    }
}

// ============ add ============

pub struct AddFn;

static ADD_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Matrix", "Left operand"),
    ArgMeta::required("b", "Matrix", "Right operand, same shape"),
];

static ADD_EXAMPLES: [&str; 1] = ["add([[1, 2]], [[3, 4]]) → [[4, 6]]"];

static ADD_RELATED: [&str; 2] = ["sub", "scale"];

impl FunctionPlugin for AddFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "add",
            description: "Element-wise sum",
            usage: "add(a, b)",
            args: &ADD_ARGS,
            returns: "Matrix",
            examples: &ADD_EXAMPLES,
            category: "matrix/arith",
            related: &ADD_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 2, "add") {
            return Value::Error(e);
        }

        let a = match extract_matrix(&args[0], "add", "a") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };
        let b = match extract_matrix(&args[1], "add", "b") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        matrix_value(a.add_matrix(&b))
    }
}

// ============ sub ============

pub struct SubFn;

static SUB_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Matrix", "Left operand"),
    ArgMeta::required("b", "Matrix", "Right operand, same shape"),
];

static SUB_EXAMPLES: [&str; 1] = ["sub([[3, 4]], [[1, 2]]) → [[2, 2]]"];

static SUB_RELATED: [&str; 2] = ["add", "scale"];

impl FunctionPlugin for SubFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "sub",
            description: "Element-wise difference",
            usage: "sub(a, b)",
            args: &SUB_ARGS,
            returns: "Matrix",
            examples: &SUB_EXAMPLES,
            category: "matrix/arith",
            related: &SUB_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 2, "sub") {
            return Value::Error(e);
        }

        let a = match extract_matrix(&args[0], "sub", "a") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };
        let b = match extract_matrix(&args[1], "sub", "b") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        matrix_value(a.sub_matrix(&b))
    }
}

// ============ scale ============

pub struct ScaleFn;

static SCALE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("m", "Matrix", "Input matrix"),
    ArgMeta::required("k", "Number", "Finite scalar"),
];

static SCALE_EXAMPLES: [&str; 1] = ["scale([[1, 2], [3, 4]], 2) → [[2, 4], [6, 8]]"];

static SCALE_RELATED: [&str; 2] = ["matmul", "add"];

impl FunctionPlugin for ScaleFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "scale",
            description: "Multiply every cell by a scalar",
            usage: "scale(m, k)",
            args: &SCALE_ARGS,
            returns: "Matrix",
            examples: &SCALE_EXAMPLES,
            category: "matrix/arith",
            related: &SCALE_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 2, "scale") {
            return Value::Error(e);
        }

        let m = match extract_matrix(&args[0], "scale", "m") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };
        let k = match extract_number(&args[1], "scale", "k") {
            Ok(k) => k,
            Err(e) => return Value::Error(e),
        };

        matrix_value(m.scale(k))
    }
}

// ============ matmul ============

pub struct MatmulFn;

static MATMUL_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Matrix", "Left matrix (m×n)"),
    ArgMeta::required("b", "Matrix", "Right matrix (n×p)"),
];

static MATMUL_EXAMPLES: [&str; 1] = ["matmul([[1, 2], [3, 4]], [[5], [6]]) → [[17], [39]]"];

static MATMUL_RELATED: [&str; 2] = ["scale", "transpose"];

impl FunctionPlugin for MatmulFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "matmul",
            description: "Matrix product",
            usage: "matmul(a, b)",
            args: &MATMUL_ARGS,
            returns: "Matrix",
            examples: &MATMUL_EXAMPLES,
            category: "matrix/arith",
            related: &MATMUL_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 2, "matmul") {
            return Value::Error(e);
        }

        let a = match extract_matrix(&args[0], "matmul", "a") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };
        let b = match extract_matrix(&args[1], "matmul", "b") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        matrix_value(a.matmul(&b))
    }
}

// ============ transpose ============

pub struct TransposeFn;

static TRANSPOSE_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("m", "Matrix", "Input matrix"),
];

static TRANSPOSE_EXAMPLES: [&str; 1] = ["transpose([[1, 2, 3]]) → [[1], [2], [3]]"];

static TRANSPOSE_RELATED: [&str; 2] = ["complements", "inverse"];

impl FunctionPlugin for TransposeFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "transpose",
            description: "Swap rows and columns",
            usage: "transpose(m)",
            args: &TRANSPOSE_ARGS,
            returns: "Matrix",
            examples: &TRANSPOSE_EXAMPLES,
            category: "matrix/cofactor",
            related: &TRANSPOSE_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 1, "transpose") {
            return Value::Error(e);
        }

        match extract_matrix(&args[0], "transpose", "m") {
            Ok(m) => matrix_value(m.transpose()),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ minor ============

pub struct MinorFn;

static MINOR_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("m", "Matrix", "Input matrix, at least 2×2"),
    ArgMeta::required("row", "Number", "Row to remove"),
    ArgMeta::required("col", "Number", "Column to remove"),
];

static MINOR_EXAMPLES: [&str; 1] = ["minor([[1, 2], [3, 4]], 0, 0) → [[4]]"];

static MINOR_RELATED: [&str; 2] = ["determinant", "complements"];

impl FunctionPlugin for MinorFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "minor",
            description: "Submatrix with one row and one column removed",
            usage: "minor(m, row, col)",
            args: &MINOR_ARGS,
            returns: "Matrix",
            examples: &MINOR_EXAMPLES,
            category: "matrix/cofactor",
            related: &MINOR_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 3, "minor") {
            return Value::Error(e);
        }

        let m = match extract_matrix(&args[0], "minor", "m") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };
        let row = match extract_usize(&args[1], "minor", "row") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        let col = match extract_usize(&args[2], "minor", "col") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };

        matrix_value(m.minor(row, col))
    }
}

// ============ determinant ============

pub struct DeterminantFn;

static DETERMINANT_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("m", "Matrix", "Square matrix"),
];

static DETERMINANT_EXAMPLES: [&str; 1] = ["determinant([[1, 2], [3, 4]]) → -2"];

static DETERMINANT_RELATED: [&str; 2] = ["inverse", "minor"];

impl FunctionPlugin for DeterminantFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "determinant",
            description: "Determinant by cofactor expansion",
            usage: "determinant(m)",
            args: &DETERMINANT_ARGS,
            returns: "Number",
            examples: &DETERMINANT_EXAMPLES,
            category: "matrix/cofactor",
            related: &DETERMINANT_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 1, "determinant") {
            return Value::Error(e);
        }

        match extract_matrix(&args[0], "determinant", "m") {
            Ok(m) => number_value(m.determinant()),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ complements ============

pub struct ComplementsFn;

static COMPLEMENTS_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("m", "Matrix", "Square matrix"),
];

static COMPLEMENTS_EXAMPLES: [&str; 1] = ["complements([[1, 2], [3, 4]]) → [[4, -3], [-2, 1]]"];

static COMPLEMENTS_RELATED: [&str; 2] = ["minor", "inverse"];

impl FunctionPlugin for ComplementsFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "complements",
            description: "Matrix of algebraic complements (cofactors)",
            usage: "complements(m)",
            args: &COMPLEMENTS_ARGS,
            returns: "Matrix",
            examples: &COMPLEMENTS_EXAMPLES,
            category: "matrix/cofactor",
            related: &COMPLEMENTS_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 1, "complements") {
            return Value::Error(e);
        }

        match extract_matrix(&args[0], "complements", "m") {
            Ok(m) => matrix_value(m.complements()),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ inverse ============

pub struct InverseFn;

static INVERSE_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("m", "Matrix", "Square matrix with non-zero determinant"),
];

static INVERSE_EXAMPLES: [&str; 1] = ["inverse([[4, 7], [2, 6]]) → [[0.6, -0.7], [-0.2, 0.4]]"];

static INVERSE_RELATED: [&str; 3] = ["determinant", "complements", "identity"];

impl FunctionPlugin for InverseFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "inverse",
            description: "Matrix inverse via the adjugate",
            usage: "inverse(m)",
            args: &INVERSE_ARGS,
            returns: "Matrix",
            examples: &INVERSE_EXAMPLES,
            category: "matrix/cofactor",
            related: &INVERSE_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = check_arity(args, 1, "inverse") {
            return Value::Error(e);
        }

        match extract_matrix(&args[0], "inverse", "m") {
            Ok(m) => matrix_value(m.inverse()),
            Err(e) => Value::Error(e),
        }
    }
}

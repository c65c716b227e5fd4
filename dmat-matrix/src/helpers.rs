//! Helper functions for turning call arguments into matrices and back

use dmat_core::{ErrorReport, MatrixError, Result, Value};

use crate::Matrix;

/// Extract a Number from a Value
pub fn extract_number(value: &Value, func: &str, arg: &str) -> std::result::Result<f64, ErrorReport> {
    match value {
        Value::Number(n) => Ok(*n),
        _ => Err(ErrorReport::arg_type(func, arg, "Number", value.type_name())),
    }
}

/// Extract a non-negative integer (index, count, dimension) from a Value.
///
/// Values past `usize::MAX` saturate, so an oversized index still reaches the
/// matrix and fails there as out of range.
pub fn extract_usize(value: &Value, func: &str, arg: &str) -> std::result::Result<usize, ErrorReport> {
    let n = extract_number(value, func, arg)?;
    if !n.is_finite() || n.fract() != 0.0 || n < 0.0 {
        return Err(MatrixError::input(format!(
            "{}: {} must be a non-negative integer, got {}", func, arg, n
        )).into());
    }
    Ok(n as usize)
}

/// Extract a list of Numbers from a slice of Values
pub fn extract_number_list(values: &[Value], func: &str, arg: &str) -> std::result::Result<Vec<f64>, ErrorReport> {
    values.iter()
        .map(|v| extract_number(v, func, arg))
        .collect()
}

/// Extract a matrix from a Value (either a Matrix object or nested list).
///
/// An empty list, or a Matrix object with no data, is the empty matrix.
pub fn extract_matrix(value: &Value, func: &str, arg: &str) -> std::result::Result<Matrix, ErrorReport> {
    match value {
        Value::Object(obj) => {
            if let Some(Value::Text(t)) = obj.get("type") {
                if t == "Matrix" {
                    if let Some(Value::List(data)) = obj.get("data") {
                        return matrix_from_nested_list(data, func, arg);
                    }
                }
            }
            Err(ErrorReport::arg_type(func, arg, "Matrix", "Object"))
        }
        Value::List(rows) => matrix_from_nested_list(rows, func, arg),
        _ => Err(ErrorReport::arg_type(func, arg, "Matrix", value.type_name())),
    }
}

fn matrix_from_nested_list(rows: &[Value], func: &str, arg: &str) -> std::result::Result<Matrix, ErrorReport> {
    if rows.is_empty() {
        return Ok(Matrix::default());
    }

    let mut data = Vec::with_capacity(rows.len());
    for (i, row_val) in rows.iter().enumerate() {
        match row_val {
            Value::List(cols) => data.push(extract_number_list(cols, func, arg)?),
            _ => {
                return Err(MatrixError::input(format!(
                    "{}: {} row {} must be a list", func, arg, i
                )).into())
            }
        }
    }

    Ok(Matrix::from_rows(&data)?)
}

/// Fail unless exactly `expected` arguments were passed
pub fn check_arity(args: &[Value], expected: usize, func: &str) -> std::result::Result<(), ErrorReport> {
    if args.len() != expected {
        return Err(ErrorReport::arg_count(func, expected, args.len()));
    }
    Ok(())
}

/// Matrix result as a Value
pub fn matrix_value(result: Result<Matrix>) -> Value {
    match result {
        Ok(m) => m.into(),
        Err(e) => e.into(),
    }
}

/// Number result as a Value
pub fn number_value(result: Result<f64>) -> Value {
    match result {
        Ok(n) => Value::Number(n),
        Err(e) => e.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmat_core::codes;

    fn nested(rows: &[&[f64]]) -> Value {
        Value::List(rows.iter()
            .map(|r| Value::List(r.iter().map(|&x| Value::Number(x)).collect()))
            .collect())
    }

    #[test]
    fn test_extract_usize() {
        assert_eq!(extract_usize(&Value::Number(3.0), "t", "n"), Ok(3));
        assert_eq!(extract_usize(&Value::Number(5e9), "t", "n"), Ok(5_000_000_000));
        assert_eq!(extract_usize(&Value::Number(1e300), "t", "n"), Ok(usize::MAX));
        let err = extract_usize(&Value::Number(-1.0), "t", "n").unwrap_err();
        assert_eq!(err.code, codes::INPUT_ERROR);
        let err = extract_usize(&Value::Number(1.5), "t", "n").unwrap_err();
        assert_eq!(err.code, codes::INPUT_ERROR);
        let err = extract_usize(&Value::Text("x".into()), "t", "n").unwrap_err();
        assert_eq!(err.code, codes::ARG_TYPE);
    }

    #[test]
    fn test_extract_matrix_from_list() {
        let m = extract_matrix(&nested(&[&[1.0, 2.0], &[3.0, 4.0]]), "t", "m").unwrap();
        assert_eq!(m.dimensions(), (2, 2));
        assert_eq!(m.get(1, 0).unwrap(), 3.0);
    }

    #[test]
    fn test_extract_matrix_round_trips_value() {
        let original = Matrix::from_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let back = extract_matrix(&Value::from(&original), "t", "m").unwrap();
        assert_eq!(back.equals(&original), Ok(true));

        let empty = extract_matrix(&Value::from(Matrix::default()), "t", "m").unwrap();
        assert!(!empty.is_set());
    }

    #[test]
    fn test_extract_matrix_errors() {
        let ragged = extract_matrix(&nested(&[&[1.0, 2.0], &[3.0]]), "t", "m").unwrap_err();
        assert_eq!(ragged.code, codes::INPUT_ERROR);

        let bad_row = Value::List(vec![Value::Number(1.0)]);
        assert_eq!(extract_matrix(&bad_row, "t", "m").unwrap_err().code, codes::INPUT_ERROR);

        let not_matrix = extract_matrix(&Value::Bool(true), "t", "m").unwrap_err();
        assert_eq!(not_matrix.code, codes::ARG_TYPE);
    }
}

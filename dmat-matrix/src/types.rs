//! Core matrix type

use std::collections::HashMap;
use std::fmt;

use dmat_core::{guard, MatrixError, Result, Value};
use serde::{Deserialize, Serialize};

/// Owned, resizable, row-major matrix of finite `f64` values.
///
/// The default value is the empty matrix: zero rows, zero columns and no
/// storage. Storage exists if and only if both dimensions are positive.
/// Cloning is a deep copy; moving out with [`std::mem::take`] or
/// [`Matrix::replace_with`] leaves the empty matrix behind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr", into = "MatrixRepr")]
pub struct Matrix {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) data: Vec<f64>,
}

impl Matrix {
    /// Zero-filled `rows × cols` matrix
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let data = Self::allocate(rows, cols)?;
        Ok(Self { rows, cols, data })
    }

    /// `rows × cols` matrix filled row-major from `values`, zero-padded.
    ///
    /// Fails with `RangeError` if `values` holds more than `rows × cols`
    /// entries and with `DataError` on any non-finite value.
    pub fn from_slice(rows: usize, cols: usize, values: &[f64]) -> Result<Self> {
        let mut m = Self::new(rows, cols)?;
        m.fill(values)?;
        Ok(m)
    }

    /// Build from rows of equal length
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let r = rows.len();
        let c = rows.first().map_or(0, Vec::len);
        if let Some(i) = rows.iter().position(|row| row.len() != c) {
            return Err(MatrixError::input(format!(
                "row {} has {} columns, expected {}", i, rows[i].len(), c
            )));
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        Self::from_slice(r, c, &flat)
    }

    /// `n × n` identity
    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::new(n, n)?;
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        Ok(m)
    }

    /// Assemble from an already validated buffer
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(rows * cols, data.len());
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether storage is allocated
    pub fn is_set(&self) -> bool {
        !self.data.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row slices in order; empty for the empty matrix
    pub fn as_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.cols.max(1))
    }

    pub(crate) fn ensure_set(&self) -> Result<()> {
        if self.is_set() {
            Ok(())
        } else {
            Err(MatrixError::Unset)
        }
    }

    pub(crate) fn ensure_square(&self) -> Result<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(MatrixError::Squareness { rows: self.rows, cols: self.cols })
        }
    }

    #[inline]
    pub(crate) fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_set() {
            return writeln!(f, "null");
        }
        for row in self.as_rows() {
            for (j, val) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Wire shape: `{rows, cols, data}` with `data` row-major
#[derive(Serialize, Deserialize)]
struct MatrixRepr {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<MatrixRepr> for Matrix {
    type Error = MatrixError;

    fn try_from(repr: MatrixRepr) -> Result<Self> {
        let MatrixRepr { rows, cols, data } = repr;
        if rows == 0 && cols == 0 && data.is_empty() {
            return Ok(Matrix::default());
        }
        if rows == 0 || cols == 0 {
            return Err(MatrixError::Dimension { rows, cols });
        }
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(MatrixError::input(format!(
                "{} values supplied for a {}×{} matrix", data.len(), rows, cols
            )));
        }
        for &x in &data {
            guard::check_finite(x)?;
        }
        Ok(Matrix::from_parts(rows, cols, data))
    }
}

impl From<Matrix> for MatrixRepr {
    fn from(m: Matrix) -> Self {
        MatrixRepr { rows: m.rows, cols: m.cols, data: m.data }
    }
}

/// Convert Matrix to Value
impl From<&Matrix> for Value {
    fn from(m: &Matrix) -> Value {
        let mut obj = HashMap::new();
        obj.insert("type".to_string(), Value::Text("Matrix".to_string()));
        obj.insert("rows".to_string(), Value::Number(m.rows as f64));
        obj.insert("cols".to_string(), Value::Number(m.cols as f64));

        let data: Vec<Value> = m.as_rows()
            .map(|row| Value::List(row.iter().map(|&x| Value::Number(x)).collect()))
            .collect();
        obj.insert("data".to_string(), Value::List(data));

        Value::Object(obj)
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Value {
        Value::from(&m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let m = Matrix::default();
        assert_eq!(m.dimensions(), (0, 0));
        assert!(!m.is_set());
        assert_eq!(m.as_rows().count(), 0);
    }

    #[test]
    fn test_new_is_zero_filled() {
        for (r, c) in [(1, 1), (4, 5), (3, 2)] {
            let m = Matrix::new(r, c).unwrap();
            assert_eq!(m.dimensions(), (r, c));
            assert!(m.is_set());
            assert!(m.data.iter().all(|&x| x == 0.0));
        }
    }

    #[test]
    fn test_new_rejects_zero_dimension() {
        assert_eq!(Matrix::new(0, 5).unwrap_err(), MatrixError::Dimension { rows: 0, cols: 5 });
        assert!(matches!(Matrix::new(3, 0), Err(MatrixError::Dimension { .. })));
    }

    #[test]
    fn test_from_slice_zero_pads() {
        let m = Matrix::from_slice(2, 2, &[7.0]).unwrap();
        assert_eq!(m.data, vec![7.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_from_slice_rejects_overflowing_source() {
        let values = [1.0; 17];
        assert!(matches!(Matrix::from_slice(4, 4, &values), Err(MatrixError::Range { .. })));
    }

    #[test]
    fn test_from_rows() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(m.dimensions(), (3, 2));
        assert_eq!(m.data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let ragged = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(ragged, Err(MatrixError::Input { .. })));
    }

    #[test]
    fn test_identity() {
        let m = Matrix::identity(3).unwrap();
        let rows: Vec<&[f64]> = m.as_rows().collect();
        assert_eq!(rows[0], &[1.0, 0.0, 0.0]);
        assert_eq!(rows[1], &[0.0, 1.0, 0.0]);
        assert_eq!(rows[2], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_clone_is_deep() {
        let a = Matrix::from_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let mut b = a.clone();
        b.data[0] = 100.0;
        assert_eq!(a.data[0], 1.0);
    }

    #[test]
    fn test_take_leaves_empty() {
        let mut a = Matrix::from_slice(3, 4, &[1.0, 2.0, 3.0]).unwrap();
        let b = std::mem::take(&mut a);
        assert_eq!(a.dimensions(), (0, 0));
        assert!(!a.is_set());
        assert_eq!(b.dimensions(), (3, 4));
        assert_eq!(b.data[2], 3.0);
    }

    #[test]
    fn test_display() {
        let m = Matrix::from_slice(2, 3, &[1.1, 2.0, 3.0, -5.0, 7.5, 999.0]).unwrap();
        assert_eq!(m.to_string(), "1.1 2 3\n-5 7.5 999\n");
        assert_eq!(Matrix::default().to_string(), "null\n");
    }

    #[test]
    fn test_serde_round_trip_and_validation() {
        let m = Matrix::from_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"rows":2,"cols":2,"data":[1.0,2.0,3.0,4.0]}"#);

        let back: Matrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back.data, m.data);

        let empty: Matrix = serde_json::from_str(r#"{"rows":0,"cols":0,"data":[]}"#).unwrap();
        assert!(!empty.is_set());

        assert!(serde_json::from_str::<Matrix>(r#"{"rows":2,"cols":2,"data":[1.0]}"#).is_err());
        assert!(serde_json::from_str::<Matrix>(r#"{"rows":0,"cols":2,"data":[]}"#).is_err());
    }

    #[test]
    fn test_to_value() {
        let m = Matrix::from_slice(1, 2, &[1.0, 2.0]).unwrap();
        let v = Value::from(&m);
        let obj = v.as_object().unwrap();
        assert_eq!(obj.get("rows"), Some(&Value::Number(1.0)));
        assert_eq!(obj.get("cols"), Some(&Value::Number(2.0)));
        assert_eq!(
            obj.get("data"),
            Some(&Value::List(vec![Value::List(vec![Value::Number(1.0), Value::Number(2.0)])]))
        );
    }
}

//! Storage manager: allocation, release, grow-only resize and adoption

use dmat_core::{MatrixError, Result};
use tracing::debug;

use crate::Matrix;

impl Matrix {
    /// Zeroed row-major buffer for `rows × cols` cells.
    ///
    /// A single reservation either succeeds or fails as a whole, so there is
    /// nothing to unwind on `AllocationError`.
    pub(crate) fn allocate(rows: usize, cols: usize) -> Result<Vec<f64>> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::Dimension { rows, cols });
        }
        let len = rows
            .checked_mul(cols)
            .ok_or(MatrixError::Allocation { rows, cols })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| MatrixError::Allocation { rows, cols })?;
        data.resize(len, 0.0);
        Ok(data)
    }

    /// Release storage and return to the empty state. No-op when already empty.
    pub fn clear(&mut self) {
        *self = Matrix::default();
    }

    /// Drop current storage and adopt `donor`'s; `donor` is left empty.
    pub fn replace_with(&mut self, donor: &mut Matrix) {
        debug!(
            from_rows = self.rows, from_cols = self.cols,
            to_rows = donor.rows, to_cols = donor.cols,
            "adopting matrix storage"
        );
        *self = std::mem::take(donor);
    }

    /// Grow to `rows × cols`, keeping existing cells and zero-filling new ones.
    ///
    /// Shrinking either dimension is a `RangeError`. Growing the empty matrix
    /// allocates fresh storage, which needs both dimensions positive.
    pub fn set_dimensions(&mut self, rows: usize, cols: usize) -> Result<()> {
        if rows < self.rows || cols < self.cols {
            return Err(MatrixError::shrink(self.dimensions(), (rows, cols)));
        }
        if rows == self.rows && cols == self.cols {
            return Ok(());
        }

        let mut grown = Matrix::new(rows, cols)?;
        for (i, row) in self.as_rows().enumerate() {
            let start = grown.offset(i, 0);
            grown.data[start..start + row.len()].copy_from_slice(row);
        }
        debug!(rows, cols, "grew matrix");
        self.replace_with(&mut grown);
        Ok(())
    }

    pub fn set_rows(&mut self, rows: usize) -> Result<()> {
        self.set_dimensions(rows, self.cols)
    }

    pub fn set_cols(&mut self, cols: usize) -> Result<()> {
        self.set_dimensions(self.rows, cols)
    }

    /// Grow to `rows × cols`, then overwrite every cell from the first `n`
    /// of `values`.
    ///
    /// Either both steps succeed or the matrix is left untouched.
    pub fn set_full(&mut self, rows: usize, cols: usize, n: usize, values: &[f64]) -> Result<()> {
        let mut next = self.clone();
        next.set_dimensions(rows, cols)?;
        next.fill_from(n, values)?;
        self.replace_with(&mut next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::from_slice(3, 4, &[1.0, 2.0, 3.0, 8.0, 4.0, 5.0, 6.0, -5.0, 7.0, 8.0, 9.0, 999.0]).unwrap()
    }

    #[test]
    fn test_allocate_rejects_zero() {
        assert!(matches!(Matrix::allocate(0, 0), Err(MatrixError::Dimension { .. })));
        assert!(matches!(Matrix::allocate(2, 0), Err(MatrixError::Dimension { .. })));
    }

    #[test]
    fn test_allocate_reports_capacity_overflow() {
        assert_eq!(
            Matrix::allocate(usize::MAX, 2),
            Err(MatrixError::Allocation { rows: usize::MAX, cols: 2 })
        );
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut m = sample();
        m.clear();
        assert_eq!(m.dimensions(), (0, 0));
        assert!(!m.is_set());
        m.clear();
        assert_eq!(m.dimensions(), (0, 0));
    }

    #[test]
    fn test_replace_with_empties_donor() {
        let mut m = sample();
        let mut donor = Matrix::new(4, 4).unwrap();
        m.replace_with(&mut donor);
        assert_eq!(m.dimensions(), (4, 4));
        assert_eq!(donor.dimensions(), (0, 0));
        assert!(!donor.is_set());
    }

    #[test]
    fn test_grow_keeps_values() {
        let mut m = Matrix::from_slice(1, 1, &[5.0]).unwrap();
        m.set_dimensions(2, 2).unwrap();
        assert_eq!(m.to_vec().unwrap(), vec![5.0, 0.0, 0.0, 0.0]);

        let mut m = sample();
        m.set_dimensions(5, 5).unwrap();
        assert_eq!(m.dimensions(), (5, 5));
        assert_eq!(m.get(0, 3).unwrap(), 8.0);
        assert_eq!(m.get(2, 3).unwrap(), 999.0);
        assert_eq!(m.get(2, 4).unwrap(), 0.0);
        assert_eq!(m.get(4, 4).unwrap(), 0.0);
    }

    #[test]
    fn test_shrink_fails_and_preserves() {
        let mut m = Matrix::from_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!(matches!(m.set_dimensions(1, 1), Err(MatrixError::Range { .. })));
        assert!(matches!(m.set_dimensions(2, 1), Err(MatrixError::Range { .. })));
        assert_eq!(m.to_vec().unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_same_size_is_noop() {
        let mut m = sample();
        m.set_dimensions(3, 4).unwrap();
        assert_eq!(m.dimensions(), (3, 4));
        assert_eq!(m.get(2, 3).unwrap(), 999.0);
    }

    #[test]
    fn test_set_rows_and_cols() {
        let mut m = sample();
        m.set_rows(5).unwrap();
        assert_eq!(m.dimensions(), (5, 4));
        m.set_cols(6).unwrap();
        assert_eq!(m.dimensions(), (5, 6));
        assert_eq!(m.get(1, 3).unwrap(), -5.0);
        assert!(m.set_rows(2).is_err());
    }

    #[test]
    fn test_grow_from_empty() {
        let mut m = Matrix::default();
        m.set_dimensions(2, 3).unwrap();
        assert_eq!(m.dimensions(), (2, 3));
        assert!(m.is_set());

        let mut m = Matrix::default();
        assert!(matches!(m.set_rows(3), Err(MatrixError::Dimension { .. })));
        assert!(!m.is_set());
    }

    #[test]
    fn test_set_full() {
        let values = [1.0, 2.0, 3.0, 8.0, 4.0, 5.0, 6.0, -5.0, 7.0, 8.0, 9.0, 999.0];
        let mut m = Matrix::default();
        m.set_full(3, 4, values.len(), &values).unwrap();
        assert_eq!(m.dimensions(), (3, 4));
        assert_eq!(m.to_vec().unwrap(), values.to_vec());

        // Refill a grown matrix; unfilled cells are zeroed
        m.set_full(4, 4, 12, &values).unwrap();
        assert_eq!(m.get(3, 0).unwrap(), 0.0);
        assert_eq!(m.get(2, 3).unwrap(), 999.0);
    }

    #[test]
    fn test_set_full_is_all_or_nothing() {
        let mut m = Matrix::from_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let result = m.set_full(3, 3, 2, &[1.0, f64::NAN]);
        assert!(matches!(result, Err(MatrixError::Data { .. })));
        assert_eq!(m.dimensions(), (2, 2));
        assert_eq!(m.to_vec().unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
    }
}

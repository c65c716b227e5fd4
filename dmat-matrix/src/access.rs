//! Element access

use dmat_core::guard::check_finite;
use dmat_core::{MatrixError, Result};

use crate::Matrix;

/// Writable handle to one cell, obtained through [`Matrix::cell_mut`]
#[derive(Debug)]
pub struct CellMut<'a> {
    slot: &'a mut f64,
}

impl CellMut<'_> {
    pub fn get(&self) -> f64 {
        *self.slot
    }

    /// Store a finite value and return it
    pub fn set(&mut self, value: f64) -> Result<f64> {
        *self.slot = check_finite(value)?;
        Ok(value)
    }
}

impl From<CellMut<'_>> for f64 {
    fn from(cell: CellMut<'_>) -> f64 {
        cell.get()
    }
}

impl Matrix {
    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::index_out_of_range(row, col, self.rows, self.cols));
        }
        Ok(())
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.check_bounds(row, col)?;
        Ok(self.data[self.offset(row, col)])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.check_bounds(row, col)?;
        self.ensure_set()?;
        let at = self.offset(row, col);
        self.data[at] = check_finite(value)?;
        Ok(())
    }

    /// Bounds-checked handle for reading or writing a single cell
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Result<CellMut<'_>> {
        self.ensure_set()?;
        self.check_bounds(row, col)?;
        let at = self.offset(row, col);
        Ok(CellMut { slot: &mut self.data[at] })
    }

    /// Overwrite every cell row-major from `values`, zero-filling the rest
    pub fn fill(&mut self, values: &[f64]) -> Result<()> {
        self.fill_from(values.len(), values)
    }

    /// Overwrite every cell row-major from the first `n` of `values`,
    /// zero-filling the rest.
    ///
    /// `n` larger than `values.len()` is an `InputError`; `n` larger than
    /// the matrix capacity is a `RangeError`. All `n` values are checked
    /// before anything is written.
    pub fn fill_from(&mut self, n: usize, values: &[f64]) -> Result<()> {
        self.ensure_set()?;
        if n > values.len() {
            return Err(MatrixError::input(format!(
                "count {} exceeds the {} values supplied", n, values.len()
            )));
        }
        if n > self.data.len() {
            return Err(MatrixError::count_out_of_range(n, self.data.len()));
        }

        let source = &values[..n];
        for &x in source {
            check_finite(x)?;
        }
        self.data[..n].copy_from_slice(source);
        self.data[n..].fill(0.0);
        Ok(())
    }

    /// Row-major snapshot of every cell
    pub fn to_vec(&self) -> Result<Vec<f64>> {
        self.ensure_set()?;
        Ok(self.data.clone())
    }
}

//! Cofactor engine: transpose, minors, determinant, complements, inverse
//!
//! The determinant is a recursive cofactor expansion along the first row and
//! costs O(n!). It is meant for the small matrices this crate targets; very
//! large square inputs will be slow and recurse n levels deep.

use dmat_core::guard::check_finite;
use dmat_core::{MatrixError, Result};
use tracing::trace;

use crate::Matrix;

/// `(-1)^(i)`
#[inline]
fn sign(i: usize) -> f64 {
    if i % 2 == 0 { 1.0 } else { -1.0 }
}

impl Matrix {
    /// `cols × rows` matrix with `result[j][i] = self[i][j]`
    pub fn transpose(&self) -> Result<Matrix> {
        self.ensure_set()?;
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                data.push(self.data[self.offset(i, j)]);
            }
        }
        Ok(Matrix::from_parts(self.cols, self.rows, data))
    }

    /// Submatrix without `row` and `col`.
    ///
    /// Undefined (`RangeError`) for matrices with a single row or column.
    pub fn minor(&self, row: usize, col: usize) -> Result<Matrix> {
        self.ensure_set()?;
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::index_out_of_range(row, col, self.rows, self.cols));
        }
        if self.rows == 1 || self.cols == 1 {
            return Err(MatrixError::minor_undefined(self.rows, self.cols));
        }

        let data: Vec<f64> = self.as_rows()
            .enumerate()
            .filter(|&(i, _)| i != row)
            .flat_map(|(_, r)| {
                r.iter().enumerate().filter(move |&(j, _)| j != col).map(|(_, &x)| x)
            })
            .collect();
        Ok(Matrix::from_parts(self.rows - 1, self.cols - 1, data))
    }

    /// Determinant by cofactor expansion along the first row
    pub fn determinant(&self) -> Result<f64> {
        self.ensure_set()?;
        self.ensure_square()?;
        if self.rows == 1 {
            return Ok(self.data[0]);
        }

        trace!(size = self.rows, "expanding determinant");
        let mut det = 0.0;
        for j in 0..self.cols {
            let a = check_finite(self.data[j])?;
            det += sign(j) * a * self.minor(0, j)?.determinant()?;
        }
        Ok(det)
    }

    /// Matrix of algebraic complements: `(-1)^(i+j) · det(minor(i, j))`.
    /// A 1×1 matrix has the single complement 1.
    pub fn complements(&self) -> Result<Matrix> {
        self.ensure_set()?;
        self.ensure_square()?;
        if self.rows == 1 {
            return Ok(Matrix::from_parts(1, 1, vec![1.0]));
        }

        trace!(size = self.rows, "computing complements");
        let mut result = Matrix::new(self.rows, self.cols)?;
        for i in 0..self.rows {
            for j in 0..self.cols {
                let at = result.offset(i, j);
                result.data[at] = sign(i + j) * self.minor(i, j)?.determinant()?;
            }
        }
        Ok(result)
    }

    /// Adjugate divided by the determinant.
    ///
    /// Only an exactly-zero determinant is `NonInvertibleError`.
    pub fn inverse(&self) -> Result<Matrix> {
        let det = self.determinant()?;
        if det == 0.0 {
            return Err(MatrixError::NonInvertible);
        }
        self.complements()?.transpose()?.scale(1.0 / det)
    }
}

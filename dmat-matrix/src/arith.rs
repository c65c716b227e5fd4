//! Arithmetic engine and equality

use std::ops::{Add, Mul, Sub};

use dmat_core::guard::{check_finite, complex_eq};
use dmat_core::{MatrixError, Result};

use crate::Matrix;

impl Matrix {
    /// Same shape. Both operands must hold storage.
    pub fn dimensions_eq(&self, other: &Matrix) -> Result<bool> {
        self.ensure_set()?;
        other.ensure_set()?;
        Ok(self.dimensions() == other.dimensions())
    }

    fn zip_with(&self, other: &Matrix, op: impl Fn(f64, f64) -> f64) -> Result<Matrix> {
        if !self.dimensions_eq(other)? {
            return Err(MatrixError::DimensionMismatch {
                left: self.dimensions(),
                right: other.dimensions(),
            });
        }
        let data = self.data.iter().zip(&other.data)
            .map(|(&a, &b)| Ok(op(check_finite(a)?, check_finite(b)?)))
            .collect::<Result<Vec<f64>>>()?;
        Ok(Matrix::from_parts(self.rows, self.cols, data))
    }

    /// Element-wise sum
    pub fn add_matrix(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Element-wise difference
    pub fn sub_matrix(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Every element times `k`
    pub fn scale(&self, k: f64) -> Result<Matrix> {
        self.ensure_set()?;
        check_finite(k)?;
        let data = self.data.iter()
            .map(|&x| Ok(check_finite(x)? * k))
            .collect::<Result<Vec<f64>>>()?;
        Ok(Matrix::from_parts(self.rows, self.cols, data))
    }

    /// Matrix product `self × other`
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        self.ensure_set()?;
        other.ensure_set()?;
        if self.cols != other.rows {
            return Err(MatrixError::Alignment {
                left_cols: self.cols,
                right_rows: other.rows,
            });
        }

        let mut result = Matrix::new(self.rows, other.cols)?;
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    let a = check_finite(self.data[self.offset(i, k)])?;
                    let b = check_finite(other.data[other.offset(k, j)])?;
                    sum += a * b;
                }
                let at = result.offset(i, j);
                result.data[at] = sum;
            }
        }
        Ok(result)
    }

    // ========== Compound forms ==========
    // Each builds the full result first, then adopts it.

    pub fn add_in_place(&mut self, other: &Matrix) -> Result<()> {
        let mut result = self.add_matrix(other)?;
        self.replace_with(&mut result);
        Ok(())
    }

    pub fn sub_in_place(&mut self, other: &Matrix) -> Result<()> {
        let mut result = self.sub_matrix(other)?;
        self.replace_with(&mut result);
        Ok(())
    }

    pub fn scale_in_place(&mut self, k: f64) -> Result<()> {
        let mut result = self.scale(k)?;
        self.replace_with(&mut result);
        Ok(())
    }

    pub fn matmul_in_place(&mut self, other: &Matrix) -> Result<()> {
        let mut result = self.matmul(other)?;
        self.replace_with(&mut result);
        Ok(())
    }

    /// Epsilon-tolerant equality.
    ///
    /// Different shapes compare unequal. A NaN cell, or a pair of
    /// same-signed infinities, anywhere in the compared cells is a
    /// `DataError` rather than `false`.
    pub fn equals(&self, other: &Matrix) -> Result<bool> {
        if !self.dimensions_eq(other)? {
            return Ok(false);
        }
        let mut equal = true;
        for (&a, &b) in self.data.iter().zip(&other.data) {
            if !complex_eq(a, b)? {
                equal = false;
            }
        }
        Ok(equal)
    }
}

impl Add for &Matrix {
    type Output = Result<Matrix>;

    fn add(self, rhs: &Matrix) -> Result<Matrix> {
        self.add_matrix(rhs)
    }
}

impl Sub for &Matrix {
    type Output = Result<Matrix>;

    fn sub(self, rhs: &Matrix) -> Result<Matrix> {
        self.sub_matrix(rhs)
    }
}

impl Mul for &Matrix {
    type Output = Result<Matrix>;

    fn mul(self, rhs: &Matrix) -> Result<Matrix> {
        self.matmul(rhs)
    }
}

impl Mul<f64> for &Matrix {
    type Output = Result<Matrix>;

    fn mul(self, k: f64) -> Result<Matrix> {
        self.scale(k)
    }
}

//! Dense matrices and the naive triple-loop multiplication being benchmarked.
//!
//! Storage is a row-major [`ndarray::Array2`], which keeps every row the same
//! length by construction. The multiply is the textbook i-j-k loop with no
//! blocking, packing or vectorization: it is the thing under measurement, so
//! it stays deliberately slow.

use ndarray::Array2;
use num::Float;

use crate::error::{dimension_error, validation_error, Result};
use crate::utils::{element_count, try_filled_vec};

/// A dense `rows x cols` matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Array2<T>,
}

impl<T: Clone> Matrix<T> {
    /// Creates a `rows x cols` matrix with every cell set to `value`.
    ///
    /// Zero rows or zero columns produce an empty matrix.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), value),
        }
    }

    /// Fallible twin of [`Matrix::filled`].
    ///
    /// # Errors
    ///
    /// Returns `AllocationError` when the buffer cannot be reserved.
    pub fn try_filled(rows: usize, cols: usize, value: T) -> Result<Self> {
        let len = element_count(rows, cols)?;
        let buffer = try_filled_vec(len, value)?;
        Self::from_shape_vec(rows, cols, buffer)
    }

    /// Builds a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the rows do not all have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);

        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
            return Err(validation_error(format!(
                "row {index} has {} columns, expected {n_cols}",
                row.len()
            )));
        }

        let flat: Vec<T> = rows.into_iter().flatten().collect();
        Self::from_shape_vec(n_rows, n_cols, flat)
    }

    fn from_shape_vec(rows: usize, cols: usize, buffer: Vec<T>) -> Result<Self> {
        let data = Array2::from_shape_vec((rows, cols), buffer)
            .map_err(|e| validation_error(e.to_string()))?;
        Ok(Self { data })
    }
}

impl<T> Matrix<T> {
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// True when the matrix has no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.data.get((row, col))
    }

    /// Iterates over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn as_array(&self) -> &Array2<T> {
        &self.data
    }

    pub fn into_array(self) -> Array2<T> {
        self.data
    }
}

impl<T> From<Array2<T>> for Matrix<T> {
    fn from(data: Array2<T>) -> Self {
        Self { data }
    }
}

/// Creates a matrix filled with a specific value.
///
/// # Arguments
///
/// * `rows` - Number of rows
/// * `cols` - Number of columns
/// * `value` - Value of every cell
pub fn create_matrix<T: Clone>(rows: usize, cols: usize, value: T) -> Matrix<T> {
    Matrix::filled(rows, cols, value)
}

/// Naive matrix multiplication using i-j-k loop order.
///
/// Computes `C = A * B` where A is `n x p` and B is `p x m`, accumulating
/// `C[i][j] += A[i][k] * B[k][j]` with k innermost. The inner loop walks B
/// column-wise, which is exactly the cache-unfriendly access pattern the
/// benchmark is meant to expose.
///
/// # Errors
///
/// * `DimensionMismatch` if `A.cols() != B.rows()`
/// * `AllocationError` if the `n x m` product cannot be allocated
pub fn multiply<T: Float>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    let (n, p) = a.shape();
    let (b_rows, m) = b.shape();

    if p != b_rows {
        return Err(dimension_error(a.shape(), b.shape()));
    }

    let mut c = Matrix::try_filled(n, m, T::zero())?;
    let (a, b, out) = (&a.data, &b.data, &mut c.data);

    for i in 0..n {
        for j in 0..m {
            for k in 0..p {
                out[[i, j]] = out[[i, j]] + a[[i, k]] * b[[k, j]];
            }
        }
    }

    Ok(c)
}

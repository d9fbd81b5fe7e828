//! Matrix/vector algebra over F64 arrays
//!
//! A matrix is a rank-2 F64 array; a vector is a 1 x N matrix (not a
//! rank-1 array). Every operation validates its operand shapes up front
//! and fails with a shape error before allocating a result, leaving the
//! inputs unmodified.

use crate::error::{NdbinError, Result};
use crate::types::{Array, DType};

/// Number of classes produced by [`one_hot`]
pub const ONE_HOT_CLASSES: u32 = 10;

/// Multiplication combinator for the elementwise operations
pub fn mul(x: f64, y: f64) -> f64 {
    x * y
}

/// Addition combinator for the elementwise operations
pub fn add(x: f64, y: f64) -> f64 {
    x + y
}

/// Subtraction combinator for the elementwise operations
pub fn sub(x: f64, y: f64) -> f64 {
    x - y
}

fn require_matrix(arr: &Array, role: &str) -> Result<(u32, u32)> {
    if !arr.is_matrix() {
        return Err(NdbinError::shape(format!(
            "{role} is not a matrix (rank {}, {:?})",
            arr.rank(),
            arr.dtype()
        )));
    }
    Ok((arr.dims()[0], arr.dims()[1]))
}

fn require_vector(arr: &Array, role: &str) -> Result<u32> {
    if !arr.is_vector() {
        return Err(NdbinError::shape(format!(
            "{role} is not a 1xN vector (dims {:?}, {:?})",
            arr.dims(),
            arr.dtype()
        )));
    }
    Ok(arr.dims()[1])
}

/// Matrix product of an M x K and a K x N matrix, shape M x N
pub fn cross(a: &Array, b: &Array) -> Result<Array> {
    let (a_rows, a_cols) = require_matrix(a, "multiplier")?;
    let (b_rows, b_cols) = require_matrix(b, "multiplicand")?;
    if a_cols != b_rows {
        return Err(NdbinError::shape(format!(
            "cannot multiply {a_rows}x{a_cols} by {b_rows}x{b_cols}"
        )));
    }

    let lhs = a.to_f64_vec()?;
    let rhs = b.to_f64_vec()?;
    let (m, k, n) = (a_rows as usize, a_cols as usize, b_cols as usize);

    let mut out = vec![0.0; m * n];
    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0;
            for x in 0..k {
                sum += lhs[i * k + x] * rhs[x * n + j];
            }
            out[i * n + j] = sum;
        }
    }
    Array::matrix(a_rows, b_cols, &out)
}

/// Combine two identically shaped matrices elementwise
pub fn combine<F>(a: &Array, b: &Array, f: F) -> Result<Array>
where
    F: Fn(f64, f64) -> f64,
{
    let (a_rows, a_cols) = require_matrix(a, "left operand")?;
    let (b_rows, b_cols) = require_matrix(b, "right operand")?;
    if (a_rows, a_cols) != (b_rows, b_cols) {
        return Err(NdbinError::shape(format!(
            "mismatched shapes {a_rows}x{a_cols} and {b_rows}x{b_cols}"
        )));
    }

    let lhs = a.to_f64_vec()?;
    let rhs = b.to_f64_vec()?;
    let out: Vec<f64> = lhs.iter().zip(&rhs).map(|(&x, &y)| f(x, y)).collect();
    Array::matrix(a_rows, a_cols, &out)
}

/// Combine a matrix with a vector broadcast across every row
///
/// `v` must be 1 x N with N equal to the matrix column count; the result
/// has the matrix's shape with `c[i][j] = f(a[i][j], v[j])`.
pub fn combine_vector<F>(a: &Array, v: &Array, f: F) -> Result<Array>
where
    F: Fn(f64, f64) -> f64,
{
    let (rows, cols) = require_matrix(a, "matrix operand")?;
    let len = require_vector(v, "vector operand")?;
    if len != cols {
        return Err(NdbinError::shape(format!(
            "vector of length {len} against {rows}x{cols} matrix"
        )));
    }

    let lhs = a.to_f64_vec()?;
    let vec = v.to_f64_vec()?;
    let (m, n) = (rows as usize, cols as usize);

    let mut out = vec![0.0; m * n];
    for i in 0..m {
        for j in 0..n {
            out[i * n + j] = f(lhs[i * n + j], vec[j]);
        }
    }
    Array::matrix(rows, cols, &out)
}

/// Combine a scalar with every element of a matrix
pub fn combine_scalar<F>(scalar: f64, a: &Array, f: F) -> Result<Array>
where
    F: Fn(f64, f64) -> f64,
{
    let (rows, cols) = require_matrix(a, "matrix operand")?;
    let values = a.to_f64_vec()?;
    let out: Vec<f64> = values.iter().map(|&x| f(scalar, x)).collect();
    Array::matrix(rows, cols, &out)
}

/// Transpose of a matrix
pub fn transpose(a: &Array) -> Result<Array> {
    let (rows, cols) = require_matrix(a, "operand")?;
    let values = a.to_f64_vec()?;
    let (m, n) = (rows as usize, cols as usize);

    let mut out = vec![0.0; m * n];
    for i in 0..m {
        for j in 0..n {
            out[j * m + i] = values[i * n + j];
        }
    }
    Array::matrix(cols, rows, &out)
}

/// Sum of all elements of a matrix
pub fn sum(a: &Array) -> Result<f64> {
    require_matrix(a, "operand")?;
    Ok(a.to_f64_vec()?.iter().sum())
}

/// Column sums of a matrix, as a 1 x cols vector
pub fn sum_columns(a: &Array) -> Result<Array> {
    let (rows, cols) = require_matrix(a, "operand")?;
    let values = a.to_f64_vec()?;
    let (m, n) = (rows as usize, cols as usize);

    let mut out = vec![0.0; n];
    for i in 0..m {
        for j in 0..n {
            out[j] += values[i * n + j];
        }
    }
    Array::matrix(1, cols, &out)
}

/// One-hot encode a 1 x N U8 class vector into an N x ONE_HOT_CLASSES matrix
///
/// Row i is all zeros except a single 1.0 at the column named by the i-th
/// class value; class values must be below [`ONE_HOT_CLASSES`].
pub fn one_hot(v: &Array) -> Result<Array> {
    if v.rank() != 2 || v.dims()[0] != 1 || v.dtype() != DType::U8 {
        return Err(NdbinError::shape(format!(
            "one-hot input is not a 1xN U8 vector (dims {:?}, {:?})",
            v.dims(),
            v.dtype()
        )));
    }

    let classes = v.as_bytes();
    if let Some(&bad) = classes.iter().find(|&&c| c as u32 >= ONE_HOT_CLASSES) {
        return Err(NdbinError::shape(format!(
            "class value {bad} outside 0..{ONE_HOT_CLASSES}"
        )));
    }

    let n = classes.len();
    let width = ONE_HOT_CLASSES as usize;
    let mut out = vec![0.0; n * width];
    for (i, &class) in classes.iter().enumerate() {
        out[i * width + class as usize] = 1.0;
    }
    Array::matrix(n as u32, ONE_HOT_CLASSES, &out)
}

/// Copy the rank-2 slice at leading index `i` out of a rank-3 array
pub fn extract_slice(arr: &Array, i: u32) -> Result<Array> {
    if arr.rank() != 3 {
        return Err(NdbinError::dimension(format!(
            "slice extraction from a rank-{} array",
            arr.rank()
        )));
    }
    let [d0, d1, d2] = [arr.dims()[0], arr.dims()[1], arr.dims()[2]];
    if i >= d0 {
        return Err(NdbinError::dimension(format!(
            "slice index {i} out of bounds for leading extent {d0}"
        )));
    }

    let slice_bytes = d1 as usize * d2 as usize * arr.dtype().element_size();
    let start = i as usize * slice_bytes;
    let data = arr.as_bytes()[start..start + slice_bytes].to_vec();
    Array::from_parts(arr.dtype(), vec![d1, d2], data)
}

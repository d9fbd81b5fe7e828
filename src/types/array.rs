//! The owning N-dimensional array container

use crate::error::{NdbinError, Result};
use crate::types::header::MAX_DIMS;
use crate::types::DType;

/// Owned N-dimensional numeric array
///
/// An `Array` exclusively owns a contiguous byte buffer holding
/// `num_elements()` values of its element type in row-major order. The
/// shape invariants (`1 <= rank <= MAX_DIMS`, element count equal to the
/// product of the extents, buffer length consistent with count and type)
/// hold at all times; every mutating operation either preserves them or
/// fails without touching the array.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    dtype: DType,
    dims: Vec<u32>,
    data: Vec<u8>,
}

impl Array {
    /// Allocate a rank-1 array of `dim0` zeroed elements
    pub fn alloc(dim0: u32, dtype: DType) -> Result<Array> {
        let bytes = (dim0 as usize)
            .checked_mul(dtype.element_size())
            .ok_or_else(|| NdbinError::dimension(format!("extent {dim0} overflows buffer size")))?;

        let mut data = Vec::new();
        data.try_reserve_exact(bytes)
            .map_err(|_| NdbinError::OutOfMemory { requested: bytes })?;
        data.resize(bytes, 0);

        Ok(Array {
            dtype,
            dims: vec![dim0],
            data,
        })
    }

    /// Build an array from its raw parts, validating the shape invariants
    pub fn from_parts(dtype: DType, dims: Vec<u32>, data: Vec<u8>) -> Result<Array> {
        if dims.is_empty() || dims.len() > MAX_DIMS {
            return Err(NdbinError::dimension(format!(
                "rank {} outside 1..={MAX_DIMS}",
                dims.len()
            )));
        }
        let count = dims
            .iter()
            .try_fold(1u64, |acc, &d| acc.checked_mul(d as u64))
            .filter(|&c| c <= u32::MAX as u64)
            .ok_or_else(|| NdbinError::dimension(format!("element count of {dims:?} overflows")))?;
        let expected = (count as usize)
            .checked_mul(dtype.element_size())
            .ok_or_else(|| NdbinError::dimension("element count overflows buffer size"))?;
        if data.len() != expected {
            return Err(NdbinError::dimension(format!(
                "buffer of {} bytes does not match dims {dims:?} of {dtype:?} ({expected} bytes)",
                data.len()
            )));
        }
        Ok(Array { dtype, dims, data })
    }

    /// Build a rows x cols F64 matrix from row-major values
    pub fn matrix(rows: u32, cols: u32, values: &[f64]) -> Result<Array> {
        if values.len() != rows as usize * cols as usize {
            return Err(NdbinError::shape(format!(
                "{} values do not fill a {rows}x{cols} matrix",
                values.len()
            )));
        }
        let data = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
        Array::from_parts(DType::F64, vec![rows, cols], data)
    }

    /// Build a 1 x N F64 vector
    pub fn vector(values: &[f64]) -> Result<Array> {
        Array::matrix(1, values.len() as u32, values)
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Extents, one per dimension
    pub fn dims(&self) -> &[u32] {
        &self.dims
    }

    /// Number of dimensions
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements
    pub fn num_elements(&self) -> usize {
        self.dims.iter().map(|&d| d as usize).product()
    }

    /// Raw buffer, elements in host byte order
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Split the trailing dimension into `extent` followed by
    /// `trailing / extent`, increasing rank by one
    ///
    /// The element count is unchanged; `extent` must divide the current
    /// trailing extent and the rank must be below `MAX_DIMS`. On failure the
    /// array is left untouched.
    pub fn inflate(&mut self, extent: u32) -> Result<()> {
        if self.rank() == MAX_DIMS {
            return Err(NdbinError::dimension(format!(
                "inflate past MAX_DIMS ({MAX_DIMS})"
            )));
        }
        let trailing = self.dims[self.rank() - 1];
        if extent == 0 || trailing % extent != 0 {
            return Err(NdbinError::dimension(format!(
                "extent {extent} does not divide trailing extent {trailing}"
            )));
        }

        let last = self.rank() - 1;
        self.dims[last] = extent;
        self.dims.push(trailing / extent);
        Ok(())
    }

    /// Collapse all dimensions into one
    pub fn flatten(&mut self) {
        if self.rank() == 1 {
            return;
        }
        let count = self.num_elements() as u32;
        self.dims.clear();
        self.dims.push(count);
    }

    /// True iff this is a rank-2 F64 array
    pub fn is_matrix(&self) -> bool {
        self.rank() == 2 && self.dtype == DType::F64
    }

    /// True iff this is a 1 x N rank-2 F64 array
    ///
    /// Vectors are 1 x N matrices by convention, not rank-1 arrays.
    pub fn is_vector(&self) -> bool {
        self.is_matrix() && self.dims[0] == 1
    }

    /// Row-major byte offset of `index`, validated against rank and extents
    fn offset(&self, index: &[u32]) -> Result<usize> {
        if index.len() != self.rank() {
            return Err(NdbinError::dimension(format!(
                "index of length {} into rank-{} array",
                index.len(),
                self.rank()
            )));
        }
        let mut element = 0usize;
        for (axis, (&i, &extent)) in index.iter().zip(&self.dims).enumerate() {
            if i >= extent {
                return Err(NdbinError::dimension(format!(
                    "index {i} out of bounds for axis {axis} with extent {extent}"
                )));
            }
            element = element * extent as usize + i as usize;
        }
        Ok(element * self.dtype.element_size())
    }

    /// Read the F64 element at `index`
    pub fn get_f64(&self, index: &[u32]) -> Result<f64> {
        self.want_dtype(DType::F64)?;
        let off = self.offset(index)?;
        let bytes: [u8; 8] = self.data[off..off + 8].try_into().unwrap();
        Ok(f64::from_ne_bytes(bytes))
    }

    /// Write the F64 element at `index`
    pub fn set_f64(&mut self, index: &[u32], value: f64) -> Result<()> {
        self.want_dtype(DType::F64)?;
        let off = self.offset(index)?;
        self.data[off..off + 8].copy_from_slice(&value.to_ne_bytes());
        Ok(())
    }

    /// Read the U8 element at `index`
    pub fn get_u8(&self, index: &[u32]) -> Result<u8> {
        self.want_dtype(DType::U8)?;
        let off = self.offset(index)?;
        Ok(self.data[off])
    }

    /// Write the U8 element at `index`
    pub fn set_u8(&mut self, index: &[u32], value: u8) -> Result<()> {
        self.want_dtype(DType::U8)?;
        let off = self.offset(index)?;
        self.data[off] = value;
        Ok(())
    }

    fn want_dtype(&self, dtype: DType) -> Result<()> {
        if self.dtype != dtype {
            return Err(NdbinError::shape(format!(
                "element access as {dtype:?} on a {:?} array",
                self.dtype
            )));
        }
        Ok(())
    }

    /// Apply a unary transform to every F64 element in index order
    ///
    /// The transform sees each element through a mutable reference and the
    /// result is written back in place. Fails with a shape error on any
    /// other element type.
    pub fn apply<F>(&mut self, mut f: F) -> Result<&mut Array>
    where
        F: FnMut(&mut f64),
    {
        self.want_dtype(DType::F64)?;
        for chunk in self.data.chunks_exact_mut(8) {
            let mut value = f64::from_ne_bytes(chunk.try_into().unwrap());
            f(&mut value);
            chunk.copy_from_slice(&value.to_ne_bytes());
        }
        Ok(self)
    }

    /// All F64 elements, in index order
    pub fn to_f64_vec(&self) -> Result<Vec<f64>> {
        self.want_dtype(DType::F64)?;
        Ok(self
            .data
            .chunks_exact(8)
            .map(|chunk| f64::from_ne_bytes(chunk.try_into().unwrap()))
            .collect())
    }
}

/// Sample elementwise transforms for [`Array::apply`]
///
/// These are ordinary function values; the core gives them no special
/// treatment over a caller-supplied closure.
pub mod transforms {
    /// Logistic squashing: x -> 1 / (1 + e^-x)
    pub fn logistic(x: &mut f64) {
        *x = 1.0 / (1.0 + (-*x).exp());
    }

    /// Squaring: x -> x^2
    pub fn square(x: &mut f64) {
        *x = *x * *x;
    }

    /// Uniform-random fill in [0, 3), discarding the previous value
    pub fn random03(x: &mut f64) {
        *x = rand::random::<f64>() * 3.0;
    }
}

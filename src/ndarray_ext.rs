//! ndarray integration for ndbin arrays
//!
//! Conversions between [`Array`] and `ndarray::ArrayD`. Elements are
//! copied through their native-endian byte form, so no alignment or
//! layout tricks are involved.
//!
//! Enable with the `ndarray` feature flag.

use crate::error::NdbinError;
use crate::types::{Array, DType, MAX_DIMS};
use ndarray::{ArrayD, IxDyn};
use thiserror::Error;

/// Error type for ndarray conversions
#[derive(Debug, Error)]
pub enum NdarrayError {
    /// DType mismatch between expected and actual
    #[error("dtype mismatch: expected {expected:?}, got {actual:?}")]
    DTypeMismatch { expected: DType, actual: DType },
    /// Rank outside the supported 1..=MAX_DIMS range
    #[error("rank {rank} outside 1..={MAX_DIMS}")]
    RankUnsupported { rank: usize },
    /// An extent or the element count does not fit the u32 shape model
    #[error("extent {extent} does not fit in u32")]
    ExtentOverflow { extent: usize },
    /// Array is not in standard (contiguous row-major) layout
    #[error("array is not contiguous; call .as_standard_layout().into_owned() first")]
    NotContiguous,
    /// Invariant violation reported by the core
    #[error(transparent)]
    Core(#[from] NdbinError),
}

/// Trait for element types that can be stored in an ndbin array
pub trait ArrayType: Copy + 'static {
    const DTYPE: DType;

    fn push_bytes(self, out: &mut Vec<u8>);
    fn from_bytes(bytes: &[u8]) -> Self;
}

impl ArrayType for u8 {
    const DTYPE: DType = DType::U8;

    fn push_bytes(self, out: &mut Vec<u8>) {
        out.push(self);
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl ArrayType for i32 {
    const DTYPE: DType = DType::I32;

    fn push_bytes(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_ne_bytes());
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        i32::from_ne_bytes(bytes.try_into().unwrap())
    }
}

impl ArrayType for f32 {
    const DTYPE: DType = DType::F32;

    fn push_bytes(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_ne_bytes());
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        f32::from_ne_bytes(bytes.try_into().unwrap())
    }
}

impl ArrayType for f64 {
    const DTYPE: DType = DType::F64;

    fn push_bytes(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_ne_bytes());
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        f64::from_ne_bytes(bytes.try_into().unwrap())
    }
}

impl Array {
    /// Create an ndbin Array from an ndarray ArrayD
    ///
    /// The array must be contiguous row-major with a supported rank and
    /// extents representable as u32.
    pub fn from_ndarray<T: ArrayType>(arr: &ArrayD<T>) -> Result<Self, NdarrayError> {
        if arr.ndim() == 0 || arr.ndim() > MAX_DIMS {
            return Err(NdarrayError::RankUnsupported { rank: arr.ndim() });
        }
        let mut dims = Vec::with_capacity(arr.ndim());
        for &extent in arr.shape() {
            let extent32 =
                u32::try_from(extent).map_err(|_| NdarrayError::ExtentOverflow { extent })?;
            dims.push(extent32);
        }

        let slice = arr.as_slice().ok_or(NdarrayError::NotContiguous)?;
        let mut data = Vec::with_capacity(slice.len() * T::DTYPE.element_size());
        for &value in slice {
            value.push_bytes(&mut data);
        }

        Ok(Array::from_parts(T::DTYPE, dims, data)?)
    }

    /// Convert to an ndarray ArrayD
    pub fn to_ndarray<T: ArrayType>(&self) -> Result<ArrayD<T>, NdarrayError> {
        if T::DTYPE != self.dtype() {
            return Err(NdarrayError::DTypeMismatch {
                expected: T::DTYPE,
                actual: self.dtype(),
            });
        }

        let shape: Vec<usize> = self.dims().iter().map(|&d| d as usize).collect();
        let values: Vec<T> = self
            .as_bytes()
            .chunks_exact(T::DTYPE.element_size())
            .map(T::from_bytes)
            .collect();

        // Shape and buffer length are consistent by the Array invariants.
        Ok(ArrayD::from_shape_vec(IxDyn(&shape), values)
            .expect("array invariants guarantee shape/length consistency"))
    }
}

//! Deserialization of ndbin arrays
//!
//! The wire layout is a 4-byte self-describing header, `rank` u32 extents
//! in stream byte order, then the raw element payload. Multi-byte elements
//! are converted to host byte order on read.

pub(crate) mod primitives;

pub use primitives::swap_in_place;

use std::io::Read;

use log::debug;

use crate::error::{NdbinError, Result};
use crate::types::{Array, Endianness, Header};

/// Read an array from a stream
pub fn read<R: Read>(reader: &mut R) -> Result<Array> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    let header = Header::decode(magic)?;
    debug!(
        "array header: {:?} {:?} rank {}",
        header.endianness, header.dtype, header.rank
    );

    let mut dims = Vec::with_capacity(header.rank);
    for _ in 0..header.rank {
        dims.push(primitives::read_u32(reader, header.endianness)?);
    }

    let total = dims
        .iter()
        .try_fold(1u64, |acc, &d| acc.checked_mul(d as u64))
        .filter(|&t| t <= u32::MAX as u64)
        .ok_or_else(|| NdbinError::dimension(format!("element count of {dims:?} overflows")))?;

    // Reproduce the dimension vector through the reshape path: one flat
    // allocation, then a trailing split per leading extent.
    let mut arr = Array::alloc(total as u32, header.dtype)?;
    for &extent in &dims[..dims.len() - 1] {
        arr.inflate(extent)?;
    }
    if arr.dims() != dims.as_slice() {
        // Only reachable with a zero extent somewhere before the last
        // axis, where the trailing splits cannot recover the vector.
        return Err(NdbinError::dimension(format!(
            "dimension vector {dims:?} is not reachable by reshape"
        )));
    }

    reader.read_exact(arr.as_bytes_mut())?;

    if header.endianness != Endianness::native() && header.dtype.is_multibyte() {
        debug!("payload swap from {:?} order", header.endianness);
        swap_in_place(header.dtype.element_size(), arr.as_bytes_mut());
    }

    Ok(arr)
}

/// Read an array from a byte slice
pub fn from_bytes(bytes: &[u8]) -> Result<Array> {
    read(&mut &bytes[..])
}

//! Endian-aware primitives shared by the reader and writer

use std::io::Read;

use crate::error::Result;
use crate::types::Endianness;

/// Reverse each `width`-byte element of `buf` in place
///
/// `buf.len()` must be a multiple of `width`. Single-byte widths are a
/// no-op by construction.
pub fn swap_in_place(width: usize, buf: &mut [u8]) {
    debug_assert_eq!(buf.len() % width, 0);
    for element in buf.chunks_exact_mut(width) {
        element.reverse();
    }
}

/// Read one u32 in the given stream byte order
pub fn read_u32<R: Read>(reader: &mut R, endianness: Endianness) -> Result<u32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(match endianness {
        Endianness::Little => u32::from_le_bytes(bytes),
        Endianness::Big => u32::from_be_bytes(bytes),
    })
}

/// Encode one u32 in the given stream byte order
pub fn u32_bytes(value: u32, endianness: Endianness) -> [u8; 4] {
    match endianness {
        Endianness::Little => value.to_le_bytes(),
        Endianness::Big => value.to_be_bytes(),
    }
}

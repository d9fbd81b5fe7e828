//! Serialization of ndbin arrays

use std::io::Write;

use log::debug;

use crate::error::Result;
use crate::parser::primitives::{swap_in_place, u32_bytes};
use crate::types::{Array, Endianness, Header};

/// Write an array to a stream in the requested byte order
///
/// The payload is emitted in the header's declared order, so a round-trip
/// through either endianness reproduces the array exactly.
pub fn write<W: Write>(writer: &mut W, endianness: Endianness, arr: &Array) -> Result<()> {
    let header = Header {
        endianness,
        dtype: arr.dtype(),
        rank: arr.rank(),
    };
    writer.write_all(&header.encode())?;

    for &extent in arr.dims() {
        writer.write_all(&u32_bytes(extent, endianness))?;
    }

    if endianness != Endianness::native() && arr.dtype().is_multibyte() {
        debug!("payload swap to {endianness:?} order");
        let mut payload = arr.as_bytes().to_vec();
        swap_in_place(arr.dtype().element_size(), &mut payload);
        writer.write_all(&payload)?;
    } else {
        writer.write_all(arr.as_bytes())?;
    }

    Ok(())
}

/// Write an array to bytes in the requested byte order
pub fn to_bytes(endianness: Endianness, arr: &Array) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write(&mut buf, endianness, arr)?;
    Ok(buf)
}

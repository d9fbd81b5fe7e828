//! Binary header: a 4-byte magic encoding byte order, element type, and rank

use crate::error::{NdbinError, Result};
use crate::types::DType;

/// Maximum number of dimensions an array may have
pub const MAX_DIMS: usize = 4;

/// Header size in bytes
pub const HEADER_SIZE: usize = 4;

/// Byte order of a serialized array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// Byte order of the host
    pub fn native() -> Self {
        if cfg!(target_endian = "little") {
            Endianness::Little
        } else {
            Endianness::Big
        }
    }
}

/// Decoded array header
///
/// The magic is self-describing: a little-endian stream stores
/// `[rank, dtype, 0, 0]`, a big-endian stream `[0, 0, dtype, rank]`.
/// Whichever half is zero identifies the byte order; neither half zero
/// means the stream is not an ndbin array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub endianness: Endianness,
    pub dtype: DType,
    pub rank: usize,
}

impl Header {
    /// Decode a 4-byte magic
    pub fn decode(magic: [u8; 4]) -> Result<Header> {
        let (endianness, tag, rank) = if magic[0] == 0 && magic[1] == 0 {
            (Endianness::Big, magic[2], magic[3])
        } else if magic[2] == 0 && magic[3] == 0 {
            (Endianness::Little, magic[1], magic[0])
        } else {
            return Err(NdbinError::format(format!(
                "unrecognized magic {magic:02X?}"
            )));
        };

        let dtype = DType::from_u8(tag)
            .ok_or_else(|| NdbinError::format(format!("unknown element type tag 0x{tag:02X}")))?;

        if rank == 0 || rank as usize > MAX_DIMS {
            return Err(NdbinError::dimension(format!(
                "rank {rank} outside 1..={MAX_DIMS}"
            )));
        }

        Ok(Header {
            endianness,
            dtype,
            rank: rank as usize,
        })
    }

    /// Encode to the 4-byte magic
    pub fn encode(&self) -> [u8; 4] {
        match self.endianness {
            Endianness::Little => [self.rank as u8, self.dtype as u8, 0, 0],
            Endianness::Big => [0, 0, self.dtype as u8, self.rank as u8],
        }
    }
}

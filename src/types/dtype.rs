//! Element types for arrays

/// Element type of an array
///
/// The discriminant doubles as the wire tag in the binary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DType {
    U8 = 0x01,
    I32 = 0x02,
    F32 = 0x03,
    F64 = 0x04,
}

impl DType {
    /// Size in bytes of a single element
    pub fn element_size(self) -> usize {
        match self {
            DType::U8 => 1,
            DType::I32 | DType::F32 => 4,
            DType::F64 => 8,
        }
    }

    /// Try to convert from u8 tag
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(DType::U8),
            0x02 => Some(DType::I32),
            0x03 => Some(DType::F32),
            0x04 => Some(DType::F64),
            _ => None,
        }
    }

    /// True for element types whose payload bytes are byte-swapped when a
    /// stream's byte order differs from the host's
    pub fn is_multibyte(self) -> bool {
        self.element_size() > 1
    }
}

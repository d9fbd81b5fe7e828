//! Core types for ndbin arrays

mod array;
mod dtype;
mod header;

pub use array::{transforms, Array};
pub use dtype::DType;
pub use header::{Endianness, Header, HEADER_SIZE, MAX_DIMS};

//! ndbin - N-dimensional numeric arrays with a binary container format
//!
//! A minimal array library: typed, reshapeable buffers serialized to a
//! compact binary format with explicit endianness handling, plus a small
//! 2-D matrix/vector algebra layer on top.
//!
//! # Features
//!
//! - Owned contiguous buffers with dynamic dimensionality (up to
//!   [`MAX_DIMS`]) and reshape via [`Array::inflate`]/[`Array::flatten`]
//! - Self-describing 4-byte header: byte order, element type, and rank in
//!   one magic word
//! - Byte-order conversion on both read and write; a stream written in
//!   either endianness round-trips exactly
//! - Shape-checked matrix algebra ([`matrix`]) and in-place elementwise
//!   transforms ([`Array::apply`])
//! - Per-call error values ([`NdbinError`]); no global error state
//!
//! # Example
//!
//! ```rust
//! use ndbin::{matrix, parser, writer, Array, Endianness};
//!
//! // Build a 2x3 matrix and push it through the binary format.
//! let m = Array::matrix(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! let bytes = writer::to_bytes(Endianness::Little, &m).unwrap();
//! let back = parser::from_bytes(&bytes).unwrap();
//! assert_eq!(back, m);
//!
//! // Algebra on top of the container.
//! let t = matrix::transpose(&m).unwrap();
//! let p = matrix::cross(&m, &t).unwrap();
//! assert_eq!(p.dims(), &[2, 2]);
//! ```

pub mod error;
pub mod matrix;
pub mod parser;
pub mod types;
pub mod writer;

#[cfg(feature = "ndarray")]
pub mod ndarray_ext;

// Re-export common types at crate root
pub use error::{NdbinError, Result};
pub use types::{transforms, Array, DType, Endianness, Header, HEADER_SIZE, MAX_DIMS};

#[cfg(feature = "ndarray")]
pub use ndarray_ext::{ArrayType, NdarrayError};

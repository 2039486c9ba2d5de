// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

//! # randaccess
//!
//! Endianness-aware, bounds-checked random access decoding over arbitrary byte sources.
//!
//! `randaccess` is the positional reading layer underneath binary and metadata format parsers
//! such as EXIF, TIFF or ICC profile decoders. It decodes integers, floats, S15.16 fixed-point
//! values and strings at arbitrary offsets, in big-endian (Motorola) or little-endian (Intel)
//! order, from any backing store implementing [`ByteSource`].
//!
//! ## Features
//!
//! - **Uniform bounds checking** - Every decode validates its whole byte range before the first
//!   byte is fetched
//! - **Structured failures** - [`Error::OutOfBounds`] carries the requested index, the byte count
//!   and, when known, the source length
//! - **Any backing store** - In-memory blocks, files and forward-only streams all fit behind
//!   the same small trait
//! - **Per-reader byte order** - Several readers with different orders can share one source
//!
//! ## Quick Start
//!
//! ```rust
//! use randaccess::prelude::*;
//!
//! struct Block(Vec<u8>);
//!
//! impl ByteSource for Block {
//!     fn fetch_byte(&self, index: u64) -> Result<u8> {
//!         Ok(self.0[index as usize])
//!     }
//!
//!     fn fetch_bytes(&self, index: u64, count: usize) -> Result<Vec<u8>> {
//!         Ok(self.0[index as usize..index as usize + count].to_vec())
//!     }
//!
//!     fn is_range_valid(&self, index: i64, count: usize) -> Result<bool> {
//!         Ok(checked_range(index, count).is_some_and(|(_, end)| end <= self.0.len() as u64))
//!     }
//!
//!     fn len(&self) -> Result<u64> {
//!         Ok(self.0.len() as u64)
//!     }
//! }
//!
//! let mut reader = Reader::new(Block(vec![0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00]));
//!
//! // A TIFF header announces its own byte order
//! if reader.get_string(0, 2)? == "II" {
//!     reader.set_byte_order(ByteOrder::INTEL);
//! }
//!
//! assert_eq!(reader.get_u16(2)?, 42);
//! assert_eq!(reader.get_u32(4)?, 8);
//! assert!(matches!(reader.get_u32(6), Err(Error::OutOfBounds { index: 6, count: 4, .. })));
//! # Ok::<(), randaccess::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`]. Nothing a reader does falls back to a zero or
//! sentinel value; the single exception to strictness is text decoding with an unknown encoding
//! name, which decodes with the default encoding (UTF-8) instead of failing.
//!
//! ## Logging
//!
//! Diagnostics are emitted through the [`log`](https://docs.rs/log) facade at `debug` and
//! `trace` level. The library never installs a logger.

#![doc(html_no_source)]
#![deny(missing_docs)]

#[macro_use]
pub(crate) mod error;
pub(crate) mod reader;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// ```rust
/// use randaccess::prelude::*;
///
/// fn header_magic<S: ByteSource>(reader: &Reader<S>) -> Result<u32> {
///     reader.get_u32(0)
/// }
/// ```
pub mod prelude;

/// Endian-aware assembly of primitive values from bytes.
///
/// Exposes the [`io::Primitive`] trait and the [`io::decode`] helpers the [`Reader`] is built on,
/// for format parsers that already hold a validated byte slice.
pub mod io {
    pub use crate::reader::io::{decode, decode_slice, Primitive};
}

/// `randaccess` Error type
///
/// The main error type for all operations in this crate.
///
/// # Examples
///
/// ```rust
/// use randaccess::Error;
///
/// let error = Error::OutOfBounds { index: 12, count: 4, length: Some(14) };
/// assert!(error.is_out_of_bounds());
/// ```
pub use error::Error;

/// `randaccess` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

pub use reader::{
    source::{checked_range, ByteSource},
    text::Encoding,
    ByteOrder, Reader,
};

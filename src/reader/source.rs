//! Access layer contract for backing stores.
//!
//! This module provides the [`crate::ByteSource`] trait, the capability set every backing store
//! has to offer so that a [`crate::Reader`] can decode values from it. Backing stores are
//! collaborators owned by the caller: an in-memory block, a seekable file, or a forward-only stream
//! that caches what it has consumed so far.
//!
//! # Contract
//!
//! - [`crate::ByteSource::fetch_byte`] / [`crate::ByteSource::fetch_bytes`] - Raw fetches which
//!   perform **no** bounds checking. The reader validates every range before calling them.
//! - [`crate::ByteSource::is_range_valid`] - Whether a range can be supplied. Streaming sources
//!   may read ahead and cache to answer this.
//! - [`crate::ByteSource::validate_range`] - The same check, failing with
//!   [`crate::Error::OutOfBounds`].
//! - [`crate::ByteSource::len`] - Total length. Streaming sources have to consume everything to
//!   answer this, so callers who only need a prefix should avoid it.
//!
//! # Implementing a backing store
//!
//! ```rust
//! use randaccess::{checked_range, ByteSource, Reader, Result};
//!
//! struct Block(Vec<u8>);
//!
//! impl ByteSource for Block {
//!     fn fetch_byte(&self, index: u64) -> Result<u8> {
//!         Ok(self.0[index as usize])
//!     }
//!
//!     fn fetch_bytes(&self, index: u64, count: usize) -> Result<Vec<u8>> {
//!         let start = index as usize;
//!         Ok(self.0[start..start + count].to_vec())
//!     }
//!
//!     fn is_range_valid(&self, index: i64, count: usize) -> Result<bool> {
//!         Ok(checked_range(index, count).is_some_and(|(_, end)| end <= self.0.len() as u64))
//!     }
//!
//!     fn len(&self) -> Result<u64> {
//!         Ok(self.0.len() as u64)
//!     }
//!
//!     fn known_len(&self) -> Option<u64> {
//!         Some(self.0.len() as u64)
//!     }
//! }
//!
//! let reader = Reader::new(Block(vec![0x12, 0x34]));
//! assert_eq!(reader.get_u16(0)?, 0x1234);
//! assert!(reader.get_u16(1).is_err());
//! # Ok::<(), randaccess::Error>(())
//! ```

use std::{rc::Rc, sync::Arc};

use crate::Result;

/// Capability set that a backing store provides to a [`crate::Reader`].
///
/// Indices handed to [`ByteSource::is_range_valid`] and [`ByteSource::validate_range`] are
/// signed: callers computing offsets from untrusted data may end up with a negative value,
/// and that has to be reported as [`crate::Error::OutOfBounds`] rather than wrap around.
/// Once a range has been validated the fetch primitives receive the start as `u64`.
///
/// Methods take `&self`. Stores that need to buffer on demand (a forward-only stream) keep
/// their cache behind interior mutability, and should memoize everything they have read so
/// repeated decodes over the same range never re-consume the underlying stream.
pub trait ByteSource {
    /// Fetch the byte at `index`.
    ///
    /// No bounds checking is performed here; that is the job of
    /// [`ByteSource::validate_range`]. Calling this with an index that was not validated may
    /// panic.
    ///
    /// # Errors
    /// Returns an error if the backing store fails to read (e.g. an I/O error).
    fn fetch_byte(&self, index: u64) -> Result<u8>;

    /// Fetch exactly `count` bytes starting at `index`.
    ///
    /// Same precondition as [`ByteSource::fetch_byte`].
    ///
    /// # Errors
    /// Returns an error if the backing store fails to read.
    fn fetch_bytes(&self, index: u64, count: usize) -> Result<Vec<u8>>;

    /// Returns `true` if `index >= 0` and `count` bytes can be supplied starting at `index`.
    ///
    /// # Errors
    /// Returns an error if the store failed while reading ahead to answer the question.
    fn is_range_valid(&self, index: i64, count: usize) -> Result<bool>;

    /// Total length of the source in bytes.
    ///
    /// For a streaming source this consumes and buffers the entire stream.
    ///
    /// # Errors
    /// Returns an error if the store failed while determining its length.
    fn len(&self) -> Result<u64>;

    /// Returns `true` if the source holds no bytes at all.
    ///
    /// # Errors
    /// Same as [`ByteSource::len`].
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// The total length, if it is known without consuming anything further.
    ///
    /// Only used to enrich [`crate::Error::OutOfBounds`]; the default is `None`.
    fn known_len(&self) -> Option<u64> {
        None
    }

    /// Ensure `count` bytes starting at `index` are available.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range is invalid, or whatever error the
    /// store raised while checking.
    fn validate_range(&self, index: i64, count: usize) -> Result<()> {
        if checked_range(index, count).is_some() && self.is_range_valid(index, count)? {
            return Ok(());
        }

        log::trace!("rejected range: index {index}, count {count}");
        Err(out_of_bounds_error!(index, count, self.known_len()))
    }
}

/// Computes the `(start, end)` offsets of a byte range.
///
/// Returns `None` if `index` is negative or if the end offset is not representable as an
/// `i64`, both of which mean the range can never be valid.
///
/// ```rust
/// use randaccess::checked_range;
///
/// assert_eq!(checked_range(4, 2), Some((4, 6)));
/// assert_eq!(checked_range(-1, 2), None);
/// assert_eq!(checked_range(i64::MAX, 1), None);
/// ```
#[must_use]
pub fn checked_range(index: i64, count: usize) -> Option<(u64, u64)> {
    if index < 0 {
        return None;
    }

    let count = i64::try_from(count).ok()?;
    let end = index.checked_add(count)?;

    // Both are non-negative here
    Some((index.unsigned_abs(), end.unsigned_abs()))
}

macro_rules! forward_source {
    ($($pointer:ident)::+) => {
        impl<S: ByteSource + ?Sized> ByteSource for $($pointer)::+<S> {
            fn fetch_byte(&self, index: u64) -> Result<u8> {
                (**self).fetch_byte(index)
            }

            fn fetch_bytes(&self, index: u64, count: usize) -> Result<Vec<u8>> {
                (**self).fetch_bytes(index, count)
            }

            fn is_range_valid(&self, index: i64, count: usize) -> Result<bool> {
                (**self).is_range_valid(index, count)
            }

            fn len(&self) -> Result<u64> {
                (**self).len()
            }

            fn is_empty(&self) -> Result<bool> {
                (**self).is_empty()
            }

            fn known_len(&self) -> Option<u64> {
                (**self).known_len()
            }

            fn validate_range(&self, index: i64, count: usize) -> Result<()> {
                (**self).validate_range(index, count)
            }
        }
    };
}

forward_source!(Box);
forward_source!(Rc);
forward_source!(Arc);

impl<S: ByteSource + ?Sized> ByteSource for &S {
    fn fetch_byte(&self, index: u64) -> Result<u8> {
        (**self).fetch_byte(index)
    }

    fn fetch_bytes(&self, index: u64, count: usize) -> Result<Vec<u8>> {
        (**self).fetch_bytes(index, count)
    }

    fn is_range_valid(&self, index: i64, count: usize) -> Result<bool> {
        (**self).is_range_valid(index, count)
    }

    fn len(&self) -> Result<u64> {
        (**self).len()
    }

    fn is_empty(&self) -> Result<bool> {
        (**self).is_empty()
    }

    fn known_len(&self) -> Option<u64> {
        (**self).known_len()
    }

    fn validate_range(&self, index: i64, count: usize) -> Result<()> {
        (**self).validate_range(index, count)
    }
}

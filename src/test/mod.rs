//! Backing stores used by the unit tests.
//!
//! - [`SliceSource`] - an in-memory block that counts fetches
//! - [`StreamSource`] - a forward-only stream buffered on demand
//! - [`FailingSource`] - a source whose fetches always fail with an I/O error
//! - [`UnsignedCheckSource`] - a source whose range check ignores the sign of the index
//! - [`ClosedSource`] - a source that fails every call with a generic error
use std::{
    cell::{Cell, RefCell},
    io::{self, Cursor, Read},
};

use crate::{checked_range, ByteSource, Error, Result};

/// In-memory block with a fetch counter
pub struct SliceSource {
    data: Vec<u8>,
    fetches: Cell<usize>,
}

impl SliceSource {
    pub fn new(data: Vec<u8>) -> Self {
        SliceSource {
            data,
            fetches: Cell::new(0),
        }
    }

    /// Number of `fetch_byte` / `fetch_bytes` calls so far
    pub fn fetches(&self) -> usize {
        self.fetches.get()
    }

    fn len_u64(&self) -> u64 {
        self.data.len() as u64
    }
}

impl ByteSource for SliceSource {
    fn fetch_byte(&self, index: u64) -> Result<u8> {
        self.fetches.set(self.fetches.get() + 1);
        Ok(self.data[index as usize])
    }

    fn fetch_bytes(&self, index: u64, count: usize) -> Result<Vec<u8>> {
        self.fetches.set(self.fetches.get() + 1);
        let start = index as usize;
        Ok(self.data[start..start + count].to_vec())
    }

    fn is_range_valid(&self, index: i64, count: usize) -> Result<bool> {
        Ok(checked_range(index, count).is_some_and(|(_, end)| end <= self.len_u64()))
    }

    fn len(&self) -> Result<u64> {
        Ok(self.len_u64())
    }

    fn known_len(&self) -> Option<u64> {
        Some(self.len_u64())
    }
}

struct StreamState {
    stream: Cursor<Vec<u8>>,
    cache: Vec<u8>,
    consumed: bool,
    pulls: usize,
}

/// Forward-only stream that caches everything it has read.
///
/// Data is pulled from the stream `chunk` bytes at a time, only as far as a range check
/// requires. Once a pull yields nothing the stream is marked consumed and its length is known.
pub struct StreamSource {
    chunk: usize,
    state: RefCell<StreamState>,
}

impl StreamSource {
    pub fn new(data: Vec<u8>, chunk: usize) -> Self {
        StreamSource {
            chunk,
            state: RefCell::new(StreamState {
                stream: Cursor::new(data),
                cache: Vec::new(),
                consumed: false,
                pulls: 0,
            }),
        }
    }

    /// Bytes buffered so far
    pub fn buffered(&self) -> usize {
        self.state.borrow().cache.len()
    }

    /// Pulls that returned data
    pub fn pulls(&self) -> usize {
        self.state.borrow().pulls
    }

    pub fn is_consumed(&self) -> bool {
        self.state.borrow().consumed
    }

    /// Buffer until at least `end` bytes are cached or the stream runs dry.
    fn fill_to(&self, end: u64) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let mut chunk = vec![0u8; self.chunk];

        while !state.consumed && (state.cache.len() as u64) < end {
            let read = state.stream.read(&mut chunk)?;
            if read == 0 {
                state.consumed = true;
            } else {
                state.pulls += 1;
                state.cache.extend_from_slice(&chunk[..read]);
            }
        }

        Ok(())
    }
}

impl ByteSource for StreamSource {
    fn fetch_byte(&self, index: u64) -> Result<u8> {
        Ok(self.state.borrow().cache[index as usize])
    }

    fn fetch_bytes(&self, index: u64, count: usize) -> Result<Vec<u8>> {
        let start = index as usize;
        Ok(self.state.borrow().cache[start..start + count].to_vec())
    }

    fn is_range_valid(&self, index: i64, count: usize) -> Result<bool> {
        let Some((_, end)) = checked_range(index, count) else {
            return Ok(false);
        };

        self.fill_to(end)?;
        Ok(self.buffered() as u64 >= end)
    }

    fn len(&self) -> Result<u64> {
        self.fill_to(u64::MAX)?;
        Ok(self.buffered() as u64)
    }

    fn known_len(&self) -> Option<u64> {
        let state = self.state.borrow();
        state.consumed.then_some(state.cache.len() as u64)
    }
}

/// Source of a fixed length whose fetches fail
pub struct FailingSource {
    len: u64,
}

impl FailingSource {
    pub fn new(len: u64) -> Self {
        FailingSource { len }
    }

    fn failure() -> Error {
        Error::Io(io::Error::other("device not ready"))
    }
}

impl ByteSource for FailingSource {
    fn fetch_byte(&self, _index: u64) -> Result<u8> {
        Err(Self::failure())
    }

    fn fetch_bytes(&self, _index: u64, _count: usize) -> Result<Vec<u8>> {
        Err(Self::failure())
    }

    fn is_range_valid(&self, index: i64, count: usize) -> Result<bool> {
        Ok(checked_range(index, count).is_some_and(|(_, end)| end <= self.len))
    }

    fn len(&self) -> Result<u64> {
        Ok(self.len)
    }

    fn known_len(&self) -> Option<u64> {
        Some(self.len)
    }
}

/// Zero-filled source whose range check only looks at the end offset
pub struct UnsignedCheckSource {
    len: i64,
}

impl UnsignedCheckSource {
    pub fn new(len: i64) -> Self {
        UnsignedCheckSource { len }
    }
}

impl ByteSource for UnsignedCheckSource {
    fn fetch_byte(&self, _index: u64) -> Result<u8> {
        Ok(0)
    }

    fn fetch_bytes(&self, _index: u64, count: usize) -> Result<Vec<u8>> {
        Ok(vec![0; count])
    }

    fn is_range_valid(&self, index: i64, count: usize) -> Result<bool> {
        let Ok(count) = i64::try_from(count) else {
            return Ok(false);
        };
        Ok(index.checked_add(count).is_some_and(|end| end <= self.len))
    }

    fn len(&self) -> Result<u64> {
        Ok(self.len.unsigned_abs())
    }
}

/// Source that has been shut down by its owner
pub struct ClosedSource;

impl ClosedSource {
    fn failure() -> Error {
        Error::Error("source closed".to_string())
    }
}

impl ByteSource for ClosedSource {
    fn fetch_byte(&self, _index: u64) -> Result<u8> {
        Err(Self::failure())
    }

    fn fetch_bytes(&self, _index: u64, _count: usize) -> Result<Vec<u8>> {
        Err(Self::failure())
    }

    fn is_range_valid(&self, _index: i64, _count: usize) -> Result<bool> {
        Err(Self::failure())
    }

    fn len(&self) -> Result<u64> {
        Err(Self::failure())
    }
}

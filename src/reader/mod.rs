//! Endianness-aware random access decoding.
//!
//! This module provides the [`crate::Reader`] type, which decodes fixed-width integers, floating
//! point values, S15.16 fixed-point values and text at arbitrary positions of a
//! [`crate::ByteSource`]. Every decode validates its full byte range against the source before
//! a single byte is fetched, so a caller either receives a fully decoded value or an
//! [`crate::Error::OutOfBounds`] describing the range that could not be served.
//!
//! # Architecture
//!
//! - **Access layer** - [`crate::ByteSource`], implemented by backing stores
//! - **Decoding layer** - [`crate::Reader`], generic over any [`crate::ByteSource`]
//!
//! The reader's only state is its [`crate::ByteOrder`]. It defaults to big-endian (Motorola) and
//! stays whatever the caller last set it to.
//!
//! # Key Components
//!
//! - [`crate::io`] - Endian-aware assembly of primitives from bytes
//! - `source` - The backing store contract, [`crate::ByteSource`]
//! - `text` - String decoding and [`crate::Encoding`] resolution
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use randaccess::{ByteOrder, Reader};
//!
//! // `block` is any type implementing `ByteSource` holding [0x12, 0x34]
//! let mut reader = Reader::new(block);
//! assert_eq!(reader.get_u16(0)?, 0x1234);
//!
//! reader.set_byte_order(ByteOrder::LittleEndian);
//! assert_eq!(reader.get_u16(0)?, 0x3412);
//! ```
//!
//! # Thread Safety
//!
//! [`crate::Reader`] has no internal synchronization. Changing the byte order requires `&mut`
//! access; decoding only needs `&self`. To decode the same data from several threads, give each
//! thread its own reader over a shared source such as `Arc<S>` or `&S`.

pub mod io;
pub mod source;
pub mod text;

use crate::{ByteSource, Result};

/// Order in which the bytes of a multi-byte value are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Most significant byte at the lowest index ("Motorola" order)
    #[default]
    BigEndian,
    /// Least significant byte at the lowest index ("Intel" order)
    LittleEndian,
}

impl ByteOrder {
    /// Motorola byte order, an alias for [`ByteOrder::BigEndian`]
    pub const MOTOROLA: ByteOrder = ByteOrder::BigEndian;
    /// Intel byte order, an alias for [`ByteOrder::LittleEndian`]
    pub const INTEL: ByteOrder = ByteOrder::LittleEndian;

    /// Returns `true` for [`ByteOrder::BigEndian`].
    #[must_use]
    pub fn is_big_endian(self) -> bool {
        self == ByteOrder::BigEndian
    }

    /// Returns `true` for [`ByteOrder::LittleEndian`].
    #[must_use]
    pub fn is_little_endian(self) -> bool {
        self == ByteOrder::LittleEndian
    }
}

/// Random access decoder over a [`crate::ByteSource`].
///
/// All `get_*` methods take an absolute `index` into the source. An index is signed so
/// that offsets computed from corrupt data can be rejected instead of wrapping; any
/// negative index fails with [`crate::Error::OutOfBounds`].
///
/// # Examples
///
/// ```rust,ignore
/// use randaccess::{ByteOrder, Reader};
///
/// let reader = Reader::new(source).with_byte_order(ByteOrder::INTEL);
///
/// let magic = reader.get_u16(0)?;
/// let offset = reader.get_u32(4)?;
/// let name = reader.get_null_terminated_string(offset.into(), 32)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Reader<S> {
    /// The backing store values are decoded from
    source: S,
    /// Applied to every multi-byte decode
    byte_order: ByteOrder,
}

impl<S: ByteSource> Reader<S> {
    /// Create a new [`crate::Reader`] over `source`, using big-endian byte order.
    ///
    /// # Arguments
    /// * `source` - The backing store to decode from
    #[must_use]
    pub fn new(source: S) -> Self {
        Reader {
            source,
            byte_order: ByteOrder::default(),
        }
    }

    /// Use `byte_order` for all subsequent decodes.
    #[must_use]
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// The byte order used for multi-byte decodes.
    #[must_use]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Change the byte order used for multi-byte decodes.
    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        self.byte_order = byte_order;
    }

    /// Returns `true` if the reader decodes in Motorola (big-endian) order.
    #[must_use]
    pub fn is_motorola_byte_order(&self) -> bool {
        self.byte_order.is_big_endian()
    }

    /// Select Motorola (big-endian) order with `true`, Intel (little-endian) order with `false`.
    pub fn set_motorola_byte_order(&mut self, motorola: bool) {
        self.byte_order = if motorola {
            ByteOrder::MOTOROLA
        } else {
            ByteOrder::INTEL
        };
    }

    /// The backing store.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Consume the reader, handing back the backing store.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Total length of the backing store.
    ///
    /// For streaming sources this consumes the whole stream; avoid it when only a prefix of
    /// the data is needed.
    ///
    /// # Errors
    /// Returns whatever error the backing store raised while determining its length.
    pub fn len(&self) -> Result<u64> {
        self.source.len()
    }

    /// Returns `true` if the backing store is empty.
    ///
    /// # Errors
    /// Same as [`Reader::len`].
    pub fn is_empty(&self) -> Result<bool> {
        self.source.is_empty()
    }

    /// Returns `true` if `count` bytes starting at `index` can be decoded.
    ///
    /// # Errors
    /// Returns an error if the backing store failed while checking.
    pub fn is_range_valid(&self, index: i64, count: usize) -> Result<bool> {
        Ok(source::checked_range(index, count).is_some()
            && self.source.is_range_valid(index, count)?)
    }

    /// Fetch `count` raw bytes starting at `index`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range is not available.
    pub fn get_bytes(&self, index: i64, count: usize) -> Result<Vec<u8>> {
        let start = self.validate(index, count)?;
        self.source.fetch_bytes(start, count)
    }

    /// Decode an unsigned 8-bit value.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `index` is not a valid position.
    pub fn get_u8(&self, index: i64) -> Result<u8> {
        let start = self.validate(index, 1)?;
        self.source.fetch_byte(start)
    }

    /// Decode a signed 8-bit value.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `index` is not a valid position.
    pub fn get_i8(&self, index: i64) -> Result<i8> {
        Ok(i8::from_ne_bytes([self.get_u8(index)?]))
    }

    /// Decode an unsigned 16-bit value.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `[index, index + 2)` is not available.
    pub fn get_u16(&self, index: i64) -> Result<u16> {
        self.read(index)
    }

    /// Decode a signed 16-bit value.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `[index, index + 2)` is not available.
    pub fn get_i16(&self, index: i64) -> Result<i16> {
        self.read(index)
    }

    /// Decode an unsigned 32-bit value.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `[index, index + 4)` is not available.
    pub fn get_u32(&self, index: i64) -> Result<u32> {
        self.read(index)
    }

    /// Decode a signed 32-bit value.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `[index, index + 4)` is not available.
    pub fn get_i32(&self, index: i64) -> Result<i32> {
        self.read(index)
    }

    /// Decode an unsigned 64-bit value.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `[index, index + 8)` is not available.
    pub fn get_u64(&self, index: i64) -> Result<u64> {
        self.read(index)
    }

    /// Decode a signed 64-bit value.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `[index, index + 8)` is not available.
    pub fn get_i64(&self, index: i64) -> Result<i64> {
        self.read(index)
    }

    /// Decode an IEEE-754 single precision value from the bit pattern of a 32-bit integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `[index, index + 4)` is not available.
    pub fn get_f32(&self, index: i64) -> Result<f32> {
        self.read(index)
    }

    /// Decode an IEEE-754 double precision value from the bit pattern of a 64-bit integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `[index, index + 8)` is not available.
    pub fn get_f64(&self, index: i64) -> Result<f64> {
        self.read(index)
    }

    /// Decode a signed 16.16 fixed-point value as used by ICC profiles.
    ///
    /// In big-endian order the first two bytes are the integer part and the last two the
    /// fraction, both most significant byte first. The integer part is read as an unsigned
    /// value, so it is never negative.
    ///
    /// The little-endian grouping takes the integer part from bytes 3 and 2 and the fraction
    /// from bytes 1 and 0. It has never been checked against real little-endian data.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `[index, index + 4)` is not available.
    pub fn get_s15_fixed16(&self, index: i64) -> Result<f32> {
        let start = self.validate(index, 4)?;
        let bytes = self.fetch_array::<4>(index, start)?;

        let (integer, fraction) = match self.byte_order {
            ByteOrder::BigEndian => (
                u16::from_be_bytes([bytes[0], bytes[1]]),
                u16::from_be_bytes([bytes[2], bytes[3]]),
            ),
            // TODO: verify this grouping against little-endian sample files
            ByteOrder::LittleEndian => (
                u16::from_be_bytes([bytes[3], bytes[2]]),
                u16::from_be_bytes([bytes[1], bytes[0]]),
            ),
        };

        Ok((f64::from(integer) + f64::from(fraction) / 65536.0) as f32)
    }

    /// Decode a [`crate::io::Primitive`] at `index` in the current byte order.
    fn read<T: io::Primitive>(&self, index: i64) -> Result<T> {
        let width = std::mem::size_of::<T>();
        let start = self.validate(index, width)?;
        let fetched = self.source.fetch_bytes(start, width)?;

        let Ok(bytes) = T::Bytes::try_from(fetched.as_slice()) else {
            return Err(out_of_bounds_error!(index, width, self.source.known_len()));
        };

        Ok(io::decode(bytes, self.byte_order))
    }

    fn fetch_array<const N: usize>(&self, index: i64, start: u64) -> Result<[u8; N]> {
        let fetched = self.source.fetch_bytes(start, N)?;

        <[u8; N]>::try_from(fetched.as_slice())
            .map_err(|_| out_of_bounds_error!(index, N, self.source.known_len()))
    }

    /// Validate `[index, index + count)` and return the start as an unsigned offset.
    fn validate(&self, index: i64, count: usize) -> Result<u64> {
        self.source.validate_range(index, count)?;

        match source::checked_range(index, count) {
            Some((start, _)) => Ok(start),
            None => Err(out_of_bounds_error!(index, count, self.source.known_len())),
        }
    }
}

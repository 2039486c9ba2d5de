//! Endian-aware assembly of primitive values from raw bytes.
//!
//! [`Primitive`] describes how a fixed-width value is put together from its bytes in either
//! byte order. The [`crate::Reader`] fetches exactly `size_of::<T>()` validated bytes from its
//! source and hands them to [`decode`] together with its current [`ByteOrder`].
//!
//! Floating point types reinterpret the bit pattern of the same-width integer, they never
//! convert arithmetically.

use crate::ByteOrder;

/// A fixed-width value that can be assembled from bytes in either byte order.
///
/// Implemented for `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64`, `i64`, `f32` and `f64`.
pub trait Primitive: Sized {
    /// The byte array holding one encoded value
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Assemble from bytes where the least significant byte comes first
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
    /// Assemble from bytes where the most significant byte comes first
    fn from_be_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_primitive {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Primitive for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }
            }
        )+
    };
}

impl_primitive!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

/// Assemble a value of type `T` from `bytes` according to `order`.
pub fn decode<T: Primitive>(bytes: T::Bytes, order: ByteOrder) -> T {
    match order {
        ByteOrder::BigEndian => T::from_be_bytes(bytes),
        ByteOrder::LittleEndian => T::from_le_bytes(bytes),
    }
}

/// Assemble a value of type `T` from the start of `data`.
///
/// Returns `None` if `data` is not exactly `size_of::<T>()` bytes long.
pub fn decode_slice<T: Primitive>(data: &[u8], order: ByteOrder) -> Option<T> {
    let bytes = T::Bytes::try_from(data).ok()?;
    Some(decode(bytes, order))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_BUFFER: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    #[test]
    fn decode_le() {
        assert_eq!(decode_slice::<u8>(&TEST_BUFFER[..1], ByteOrder::LittleEndian), Some(0x01));
        assert_eq!(
            decode_slice::<u16>(&TEST_BUFFER[..2], ByteOrder::LittleEndian),
            Some(0x0201)
        );
        assert_eq!(
            decode_slice::<u32>(&TEST_BUFFER[..4], ByteOrder::LittleEndian),
            Some(0x0403_0201)
        );
        assert_eq!(
            decode_slice::<u64>(&TEST_BUFFER, ByteOrder::LittleEndian),
            Some(0x0807_0605_0403_0201)
        );
    }

    #[test]
    fn decode_be() {
        assert_eq!(decode_slice::<i8>(&TEST_BUFFER[..1], ByteOrder::BigEndian), Some(0x01));
        assert_eq!(
            decode_slice::<i16>(&TEST_BUFFER[..2], ByteOrder::BigEndian),
            Some(0x0102)
        );
        assert_eq!(
            decode_slice::<i32>(&TEST_BUFFER[..4], ByteOrder::BigEndian),
            Some(0x0102_0304)
        );
        assert_eq!(
            decode_slice::<i64>(&TEST_BUFFER, ByteOrder::BigEndian),
            Some(0x0102_0304_0506_0708)
        );
    }

    #[test]
    fn decode_float() {
        assert_eq!(
            decode_slice::<f32>(&TEST_BUFFER[..4], ByteOrder::BigEndian),
            Some(2.387_939_3e-38)
        );
        assert_eq!(
            decode_slice::<f32>(&TEST_BUFFER[..4], ByteOrder::LittleEndian),
            Some(1.539_989_6e-36)
        );
        assert_eq!(
            decode_slice::<f64>(&TEST_BUFFER, ByteOrder::BigEndian),
            Some(8.20788039913184e-304)
        );
        assert_eq!(
            decode_slice::<f64>(&TEST_BUFFER, ByteOrder::LittleEndian),
            Some(5.447603722011605e-270)
        );
    }

    #[test]
    fn decode_wrong_length() {
        assert_eq!(decode_slice::<u32>(&TEST_BUFFER[..3], ByteOrder::BigEndian), None);
        assert_eq!(decode_slice::<u16>(&TEST_BUFFER[..4], ByteOrder::BigEndian), None);
        assert_eq!(decode_slice::<u8>(&[], ByteOrder::BigEndian), None);
    }

    #[test]
    fn decode_sign() {
        let ones = [0xFF; 8];

        assert_eq!(decode_slice::<i8>(&ones[..1], ByteOrder::BigEndian), Some(-1));
        assert_eq!(decode_slice::<u8>(&ones[..1], ByteOrder::BigEndian), Some(u8::MAX));
        assert_eq!(decode_slice::<i16>(&ones[..2], ByteOrder::LittleEndian), Some(-1));
        assert_eq!(decode_slice::<u16>(&ones[..2], ByteOrder::LittleEndian), Some(u16::MAX));
        assert_eq!(decode_slice::<i64>(&ones, ByteOrder::BigEndian), Some(-1));
        assert_eq!(decode_slice::<u64>(&ones, ByteOrder::BigEndian), Some(u64::MAX));
    }
}

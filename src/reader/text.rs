//! Text decoding on top of validated byte fetches.
//!
//! Strings are always fetched as a whole validated range and then decoded. The default encoding
//! is UTF-8 with invalid sequences replaced by `U+FFFD`. Named encodings are resolved through
//! [`Encoding`]'s [`std::str::FromStr`] implementation; a name that does not resolve is not an
//! error, the bytes are decoded with the default encoding instead.

use std::str::FromStr;

use strum::{Display, EnumIter, EnumString};
use widestring::U16Str;

use crate::{ByteSource, Reader, Result};

/// Text encodings understood by [`crate::Reader::get_string_in`].
///
/// Names parse case-insensitively and accept the usual aliases:
///
/// ```rust
/// use randaccess::Encoding;
///
/// assert_eq!("utf-16le".parse::<Encoding>(), Ok(Encoding::Utf16Le));
/// assert_eq!("latin1".parse::<Encoding>(), Ok(Encoding::Latin1));
/// assert_eq!(Encoding::Ascii.to_string(), "US-ASCII");
/// assert!(Encoding::from_name("EBCDIC-37").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Encoding {
    /// UTF-8, the default encoding
    #[default]
    #[strum(to_string = "UTF-8", serialize = "UTF8")]
    Utf8,
    /// 7-bit ASCII; bytes above `0x7F` decode to `U+FFFD`
    #[strum(
        to_string = "US-ASCII",
        serialize = "ASCII",
        serialize = "ISO646-US",
        serialize = "ANSI_X3.4-1968"
    )]
    Ascii,
    /// ISO-8859-1, every byte maps to the code point of the same value
    #[strum(
        to_string = "ISO-8859-1",
        serialize = "ISO8859-1",
        serialize = "ISO8859_1",
        serialize = "ISO_8859_1",
        serialize = "latin1",
        serialize = "l1"
    )]
    Latin1,
    /// UTF-16 with an optional byte order mark, big-endian when there is none
    #[strum(to_string = "UTF-16", serialize = "UTF16")]
    Utf16,
    /// UTF-16, big-endian, no byte order mark handling
    #[strum(to_string = "UTF-16BE", serialize = "UTF16BE", serialize = "UnicodeBigUnmarked")]
    Utf16Be,
    /// UTF-16, little-endian, no byte order mark handling
    #[strum(
        to_string = "UTF-16LE",
        serialize = "UTF16LE",
        serialize = "UnicodeLittleUnmarked"
    )]
    Utf16Le,
}

impl Encoding {
    /// Resolve an encoding by name, `None` if the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Encoding> {
        Encoding::from_str(name.trim()).ok()
    }

    /// Decode `bytes` into a `String`, replacing malformed input with `U+FFFD`.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Encoding::Ascii => bytes
                .iter()
                .map(|&byte| {
                    if byte.is_ascii() {
                        char::from(byte)
                    } else {
                        char::REPLACEMENT_CHARACTER
                    }
                })
                .collect(),
            Encoding::Latin1 => bytes.iter().map(|&byte| char::from(byte)).collect(),
            Encoding::Utf16 => match bytes {
                [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
                [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
                _ => decode_utf16(bytes, u16::from_be_bytes),
            },
            Encoding::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            Encoding::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let pairs = bytes.chunks_exact(2);
    let dangling = !pairs.remainder().is_empty();

    let units: Vec<u16> = pairs.map(|pair| unit([pair[0], pair[1]])).collect();
    let mut text = U16Str::from_slice(&units).to_string_lossy();

    // A lone trailing byte is a truncated code unit
    if dangling {
        text.push(char::REPLACEMENT_CHARACTER);
    }

    text
}

impl<S: ByteSource> Reader<S> {
    /// Decode `byte_count` bytes at `index` as text in the default encoding (UTF-8).
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range is not available.
    pub fn get_string(&self, index: i64, byte_count: usize) -> Result<String> {
        self.get_string_in(index, byte_count, Encoding::default())
    }

    /// Decode `byte_count` bytes at `index` using the encoding called `encoding_name`.
    ///
    /// If `encoding_name` does not name a supported encoding, the bytes are decoded with the
    /// default encoding instead; this never fails because of the name.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range is not available.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let text = reader.get_string_with_encoding(0, 4, "UTF-16LE")?;
    /// ```
    pub fn get_string_with_encoding(
        &self,
        index: i64,
        byte_count: usize,
        encoding_name: &str,
    ) -> Result<String> {
        let encoding = Encoding::from_name(encoding_name).unwrap_or_else(|| {
            log::debug!(
                "unsupported encoding '{encoding_name}', decoding as {}",
                Encoding::default()
            );
            Encoding::default()
        });

        self.get_string_in(index, byte_count, encoding)
    }

    /// Decode `byte_count` bytes at `index` with `encoding`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range is not available.
    pub fn get_string_in(&self, index: i64, byte_count: usize, encoding: Encoding) -> Result<String> {
        let bytes = self.get_bytes(index, byte_count)?;
        Ok(encoding.decode(&bytes))
    }

    /// Decode text that ends at the first zero byte within `max_length_bytes` bytes at `index`.
    ///
    /// The whole `max_length_bytes` range is validated and fetched, even when the terminator
    /// comes early. Without a terminator all `max_length_bytes` bytes are decoded. Scanning for
    /// a single zero byte is only correct for single-byte-per-character encodings.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range is not available.
    pub fn get_null_terminated_string(&self, index: i64, max_length_bytes: usize) -> Result<String> {
        let bytes = self.get_bytes(index, max_length_bytes)?;
        let length = bytes
            .iter()
            .position(|&byte| byte == 0)
            .unwrap_or(bytes.len());

        Ok(Encoding::default().decode(&bytes[..length]))
    }
}

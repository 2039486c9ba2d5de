use thiserror::Error;

/// Builds an [`crate::Error::OutOfBounds`] for the requested range.
///
/// ```rust, ignore
/// return Err(out_of_bounds_error!(index, count, self.known_len()));
/// ```
macro_rules! out_of_bounds_error {
    ($index:expr, $count:expr) => {
        crate::Error::OutOfBounds {
            index: $index,
            count: $count,
            length: None,
        }
    };

    ($index:expr, $count:expr, $length:expr) => {
        crate::Error::OutOfBounds {
            index: $index,
            count: $count,
            length: $length,
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Decoding never recovers internally: whatever a [`crate::ByteSource`] reports, or whatever
/// range validation rejects, reaches the caller unchanged.
///
/// # Error Categories
///
/// - [`Error::OutOfBounds`] - A requested byte range could not be satisfied by the source
/// - [`Error::Io`] - The backing store failed while reading
/// - [`Error::Error`] - Any other failure reported by a backing store
///
/// # Examples
///
/// ```rust
/// use randaccess::Error;
///
/// fn describe(error: &Error) -> String {
///     match error {
///         Error::OutOfBounds { index, .. } if *index < 0 => "negative index".to_string(),
///         Error::OutOfBounds { length: Some(len), .. } => format!("ran past end ({len} bytes)"),
///         Error::OutOfBounds { .. } => "range unavailable".to_string(),
///         other => other.to_string(),
///     }
/// }
///
/// let error = Error::OutOfBounds { index: -1, count: 2, length: None };
/// assert_eq!(describe(&error), "negative index");
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A requested byte range lies outside the data the source can supply.
    ///
    /// Raised by range validation before any byte is fetched. This covers a
    /// negative `index`, an `index + count` past the end of the source, and an
    /// end offset that cannot be represented at all.
    ///
    /// # Fields
    ///
    /// * `index` - The first byte requested
    /// * `count` - The number of bytes requested
    /// * `length` - The total length of the source, when it was known
    #[error("Out of Bound read would have occurred! (index {index}, count {count}, length {})", display_length(.length))]
    OutOfBounds {
        /// The first byte requested
        index: i64,
        /// The number of bytes requested
        count: usize,
        /// The total length of the source, if known at the time of the check
        length: Option<u64>,
    },

    /// I/O error raised by a backing store.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Generic error for miscellaneous backing store failures.
    #[error("{0}")]
    Error(String),
}

impl Error {
    /// Returns `true` if this error is a failed range validation.
    #[must_use]
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Error::OutOfBounds { .. })
    }
}

fn display_length(length: &Option<u64>) -> String {
    match length {
        Some(length) => length.to_string(),
        None => "unknown".to_string(),
    }
}

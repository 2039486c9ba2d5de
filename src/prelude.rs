//! # randaccess Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the randaccess library. Import this module to get quick access to the reader, the
//! backing store contract and the error types.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all randaccess operations
pub use crate::Error;

/// The result type used throughout randaccess
pub use crate::Result;

// ================================================================================================
// Reading
// ================================================================================================

/// Random access decoder and its byte order
pub use crate::{ByteOrder, Reader};

/// Text encodings supported by the string decoders
pub use crate::Encoding;

// ================================================================================================
// Backing Store Contract
// ================================================================================================

/// The access layer implemented by backing stores, and its range helper
pub use crate::{checked_range, ByteSource};

//! Error types shared by the scalar codec and the structure marshal.

use std::fmt;

/// Errors reported by every fallible operation in this crate.
///
/// All argument and bounds checks run before a buffer is touched, so an
/// `Err` always means the target buffer is unchanged.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Missing or malformed input: offsets past the end of a buffer,
    /// out-of-range bit-field parameters, invalid text or hex, or a record
    /// whose fields disagree with its declared layout.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Integer division with a zero divisor.
    #[error("attempted to divide by zero")]
    DivideByZero,

    /// Text that cannot be converted into the requested primitive.
    #[error("cannot convert {value:?} to {target}: {cause}")]
    FormatConversion {
        /// Source text.
        value: String,
        /// Name of the requested type.
        target: &'static str,
        /// Parser message.
        cause: String,
    },

    /// Configuration file could not be parsed or failed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error while reading a configuration file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(message: impl fmt::Display) -> Self {
        Error::InvalidArgument(message.to_string())
    }

    pub(crate) fn conversion(
        value: impl Into<String>,
        target: &'static str,
        cause: impl fmt::Display,
    ) -> Self {
        Error::FormatConversion {
            value: value.into(),
            target,
            cause: cause.to_string(),
        }
    }

    /// `true` for [`Error::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

/// Checks that `width` bytes starting at `offset` fit inside a buffer of
/// `len` bytes.
#[inline(always)]
pub(crate) fn check_range(len: usize, offset: usize, width: usize) -> Result<()> {
    match offset.checked_add(width) {
        Some(end) if end <= len => Ok(()),
        _ => Err(Error::invalid(format_args!(
            "offset {offset} + width {width} exceeds buffer length {len}"
        ))),
    }
}

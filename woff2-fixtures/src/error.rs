//! Errors that occur while assembling a container

use woff2_brotli::CompressError;

/// An error that aborted building a WOFF2 file.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The payload compressor failed.
    Compression(CompressError),
    /// A count or length is too large for the field that records it.
    LengthOverflow { field: &'static str, len: usize },
}

impl From<CompressError> for Error {
    fn from(src: CompressError) -> Error {
        Error::Compression(src)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Compression(_) => write!(f, "failed to compress table data"),
            Error::LengthOverflow { field, len } => {
                write!(f, "{field} cannot record a value of {len}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Compression(inner) => Some(inner),
            Error::LengthOverflow { .. } => None,
        }
    }
}

use std::io;

/// An error returned when decoding a brotli stream.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    InitFailure,
    InvalidStream,
    MaxSizeExceeded,
    ExcessInputData,
}

/// An error returned when encoding a brotli stream.
#[derive(Debug, Clone, PartialEq)]
pub enum CompressError {
    /// The encoder rejected the requested quality or window size.
    InvalidParameters { quality: u8, window: u8 },
    /// Writing input into the encoder failed.
    Io(io::ErrorKind),
    /// The encoder could not flush the final meta-block.
    Finish,
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::InitFailure => write!(f, "Failed to initialize the brotli decoder."),
            DecodeError::InvalidStream => {
                write!(f, "Brotli compressed stream is invalid, decoding failed.")
            }
            DecodeError::MaxSizeExceeded => write!(f, "Decompressed size greater than maximum."),
            DecodeError::ExcessInputData => write!(
                f,
                "There is unconsumed data in the input stream after decoding."
            ),
        }
    }
}

impl std::fmt::Display for CompressError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CompressError::InvalidParameters { quality, window } => write!(
                f,
                "Invalid brotli encoder parameters (quality {quality}, window {window})."
            ),
            CompressError::Io(kind) => write!(f, "Writing to the brotli encoder failed: {kind}"),
            CompressError::Finish => write!(f, "Failed to finish the brotli stream."),
        }
    }
}

impl std::error::Error for DecodeError {}
impl std::error::Error for CompressError {}

//! Brotli encoding and bounded decoding of WOFF2 payloads.
//!
//! WOFF2 compresses every table of a font as one brotli stream. This crate
//! wraps the encoder used to produce such a stream, and a decoder that refuses
//! to inflate more than the caller says the payload should contain.
//!
//! Decoding uses the C brotli library by default (`c-brotli` feature). The
//! pure rust decoder is used when only the `rust-brotli` feature is enabled;
//! [`BACKEND`] names the decoder that was compiled in.

mod error;

#[cfg(feature = "c-brotli")]
mod c_brotli;
// always built for tests, so both decoders are checked against the same cases
#[cfg(any(test, all(feature = "rust-brotli", not(feature = "c-brotli"))))]
mod rust_brotli;

use std::io::Write;

use brotlic::{BrotliEncoderOptions, CompressorWriter, Quality, WindowSize};

pub use error::{CompressError, DecodeError};

cfg_if::cfg_if! {
    if #[cfg(feature = "c-brotli")] {
        use c_brotli::decompress_c as decompress_impl;
        /// The brotli decoder behind [`decompress`].
        pub const BACKEND: &str = "c-brotli";
    } else if #[cfg(feature = "rust-brotli")] {
        use rust_brotli::decompress_rust as decompress_impl;
        /// The brotli decoder behind [`decompress`].
        pub const BACKEND: &str = "rust-brotli";
    } else {
        compile_error!("one of the 'c-brotli' or 'rust-brotli' features must be enabled");
    }
}

/// The highest brotli quality level, used unless the caller asks otherwise.
pub const DEFAULT_QUALITY: u8 = 11;

/// log2 of the sliding window size used by the reference WOFF2 encoder.
pub const DEFAULT_WINDOW: u8 = 22;

/// Compress `data` into a single brotli stream.
pub fn compress(data: &[u8], quality: u8, window: u8) -> Result<Vec<u8>, CompressError> {
    let invalid = || CompressError::InvalidParameters { quality, window };
    let encoder = BrotliEncoderOptions::new()
        .quality(Quality::new(quality).map_err(|_| invalid())?)
        .window_size(WindowSize::new(window).map_err(|_| invalid())?)
        .build()
        .map_err(|_| invalid())?;

    let mut writer = CompressorWriter::with_encoder(encoder, Vec::new());
    writer
        .write_all(data)
        .map_err(|e| CompressError::Io(e.kind()))?;
    let compressed = writer.into_inner().map_err(|_| CompressError::Finish)?;
    log::trace!(
        "brotli q{quality} w{window}: {} -> {} bytes",
        data.len(),
        compressed.len()
    );
    Ok(compressed)
}

/// Decodes a brotli stream.
///
/// Will fail if the decoded result would be larger than
/// `max_uncompressed_length`. Any data left in `encoded` after the stream
/// finishes is also considered an error.
pub fn decompress(
    encoded: &[u8],
    max_uncompressed_length: usize,
) -> Result<Vec<u8>, DecodeError> {
    decompress_impl(encoded, max_uncompressed_length)
}

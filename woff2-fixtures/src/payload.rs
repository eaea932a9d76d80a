//! Compressing table data into a single payload
//!
//! WOFF2 does not compress tables individually: the bytes of every table are
//! concatenated in directory order and compressed as one stream.

use woff2_brotli::{CompressError, DEFAULT_QUALITY, DEFAULT_WINDOW};

use crate::tables::SfntTable;

/// A lossless compressor whose output a WOFF2 decoder can invert.
pub trait Compress {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressError>;
}

/// The brotli compressor required by WOFF2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Brotli {
    /// Compression quality, 0..=11.
    pub quality: u8,
    /// log2 of the sliding window size, 10..=24.
    pub window: u8,
}

impl Default for Brotli {
    fn default() -> Self {
        Brotli {
            quality: DEFAULT_QUALITY,
            window: DEFAULT_WINDOW,
        }
    }
}

impl Compress for Brotli {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressError> {
        woff2_brotli::compress(data, self.quality, self.window)
    }
}

/// The concatenated bytes of `tables`, in order.
pub fn concatenate(tables: &[SfntTable]) -> Vec<u8> {
    let total = tables.iter().map(|table| table.data().len()).sum();
    let mut data = Vec::with_capacity(total);
    for table in tables {
        data.extend_from_slice(table.data());
    }
    data
}

/// Concatenate `tables` and compress the result as one stream.
pub fn compress_tables(
    tables: &[SfntTable],
    compressor: &impl Compress,
) -> Result<Vec<u8>, CompressError> {
    let data = concatenate(tables);
    let compressed = compressor.compress(&data)?;
    log::debug!(
        "compressed {} tables: {} -> {} bytes",
        tables.len(),
        data.len(),
        compressed.len()
    );
    Ok(compressed)
}

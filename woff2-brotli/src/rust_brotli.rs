use crate::error::DecodeError;
use brotli_decompressor::{BrotliDecompressStream, BrotliResult, BrotliState, StandardAlloc};

pub fn decompress_rust(
    encoded: &[u8],
    max_uncompressed_length: usize,
) -> Result<Vec<u8>, DecodeError> {
    let mut state = BrotliState::new(
        StandardAlloc::default(),
        StandardAlloc::default(),
        StandardAlloc::default(),
    );

    let mut sink = vec![0u8; max_uncompressed_length];

    let mut available_in = encoded.len();
    let mut input_offset = 0;
    let mut available_out = sink.len();
    let mut output_offset = 0;
    let mut total_out = 0;

    // all input is supplied up front, so one call runs the stream to completion
    let result = BrotliDecompressStream(
        &mut available_in,
        &mut input_offset,
        encoded,
        &mut available_out,
        &mut output_offset,
        &mut sink,
        &mut total_out,
        &mut state,
    );

    match result {
        BrotliResult::ResultSuccess => (),
        BrotliResult::NeedsMoreOutput => return Err(DecodeError::MaxSizeExceeded),
        // a stream that wants more input after consuming all of it is truncated
        BrotliResult::NeedsMoreInput | BrotliResult::ResultFailure => {
            return Err(DecodeError::InvalidStream)
        }
    }

    if available_in > 0 {
        return Err(DecodeError::ExcessInputData);
    }

    if total_out > sink.len() {
        return Err(DecodeError::MaxSizeExceeded);
    }

    sink.truncate(total_out);
    Ok(sink)
}

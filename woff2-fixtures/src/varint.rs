//! The [UIntBase128] variable-length integer used in the WOFF2 table directory.
//!
//! [UIntBase128]: https://www.w3.org/TR/WOFF2/#DataTypes

use crate::write::{FontWrite, TableWriter};

/// An unsigned 32-bit value, encoded as one to five base-128 digits.
///
/// Digits are stored most significant first; every byte but the last has
/// its high bit set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UIntBase128(pub u32);

/// A malformed [`UIntBase128`] sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Base128Error {
    /// The data ended before the final digit.
    Truncated,
    /// The first byte was `0x80`, a leading zero digit.
    LeadingZero,
    /// The value does not fit in 32 bits.
    Overflow,
    /// No terminating digit within five bytes.
    TooLong,
}

impl UIntBase128 {
    /// The longest valid encoding, in bytes.
    pub const MAX_LEN: usize = 5;

    /// The number of bytes needed to encode this value.
    pub fn encoded_len(self) -> usize {
        let bits = u32::BITS - self.0.leading_zeros();
        (bits as usize).div_ceil(7).max(1)
    }

    /// Decode a value from the start of `data`.
    ///
    /// Returns the value and the number of bytes it occupied.
    pub fn read(data: &[u8]) -> Result<(Self, usize), Base128Error> {
        let mut accum = 0u32;
        for i in 0..Self::MAX_LEN {
            let byte = *data.get(i).ok_or(Base128Error::Truncated)?;
            if i == 0 && byte == 0x80 {
                return Err(Base128Error::LeadingZero);
            }
            // shifting by seven would drop bits
            if accum & 0xFE00_0000 != 0 {
                return Err(Base128Error::Overflow);
            }
            accum = (accum << 7) | (byte & 0x7F) as u32;
            if byte & 0x80 == 0 {
                return Ok((UIntBase128(accum), i + 1));
            }
        }
        Err(Base128Error::TooLong)
    }
}

impl FontWrite for UIntBase128 {
    fn write_into(&self, writer: &mut TableWriter) {
        let len = self.encoded_len();
        for i in (0..len).rev() {
            let digit = ((self.0 >> (7 * i)) & 0x7F) as u8;
            let continuation = if i == 0 { 0 } else { 0x80 };
            writer.write_slice(&[digit | continuation]);
        }
    }
}

impl std::fmt::Display for Base128Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Base128Error::Truncated => write!(f, "UIntBase128 is truncated"),
            Base128Error::LeadingZero => write!(f, "UIntBase128 has a leading zero digit"),
            Base128Error::Overflow => write!(f, "UIntBase128 overflows 32 bits"),
            Base128Error::TooLong => write!(f, "UIntBase128 is longer than five bytes"),
        }
    }
}

impl std::error::Error for Base128Error {}

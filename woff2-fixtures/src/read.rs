//! Reading back the containers this crate writes
//!
//! This is enough of a WOFF2 reader to check that a fixture says what it was
//! built to say: the header, the table directory, and the decompressed table
//! data. It does not reverse the glyf transform, and it only recognizes the
//! table kinds this crate can build.

use font_types::Tag;
use read_fonts::FontData;
use woff2_brotli::DecodeError;

use crate::{
    container::{TableDirectoryEntry, Woff2Header, HEADER_LEN, LENGTH_OFFSET, SIGNATURE},
    tables::{SfntTable, TableKind},
    varint::{Base128Error, UIntBase128},
};

/// An error encountered while reading a WOFF2 file.
#[derive(Clone, Debug, PartialEq)]
pub enum ReadError {
    OutOfBounds,
    InvalidSignature(Tag),
    InvalidBase128(Base128Error),
    UnknownTableIndex(u8),
    /// A length recorded in the file disagrees with the data present.
    LengthMismatch {
        field: &'static str,
        declared: u32,
        actual: usize,
    },
    Decompression(DecodeError),
}

/// A parsed WOFF2 file.
#[derive(Clone, Debug)]
pub struct Woff2File<'a> {
    header: Woff2Header,
    entries: Vec<TableDirectoryEntry>,
    payload: &'a [u8],
}

impl<'a> Woff2File<'a> {
    /// Parse `data`, checking that the header's lengths describe it exactly.
    pub fn read(data: &'a [u8]) -> Result<Self, ReadError> {
        let font_data = FontData::new(data);
        let header = read_header(font_data)?;
        if header.length as usize != data.len() {
            return Err(ReadError::LengthMismatch {
                field: "length",
                declared: header.length,
                actual: data.len(),
            });
        }

        let mut pos = HEADER_LEN;
        let mut entries = Vec::with_capacity(header.num_tables as usize);
        for _ in 0..header.num_tables {
            let remaining = font_data.split_off(pos).ok_or(ReadError::OutOfBounds)?;
            let (entry, len) = read_directory_entry(remaining)?;
            entries.push(entry);
            pos += len;
        }

        let payload = data.get(pos..).ok_or(ReadError::OutOfBounds)?;
        if header.total_compressed_size as usize != payload.len() {
            return Err(ReadError::LengthMismatch {
                field: "totalCompressedSize",
                declared: header.total_compressed_size,
                actual: payload.len(),
            });
        }

        Ok(Woff2File {
            header,
            entries,
            payload,
        })
    }

    pub fn header(&self) -> &Woff2Header {
        &self.header
    }

    pub fn entries(&self) -> &[TableDirectoryEntry] {
        &self.entries
    }

    /// The compressed table data.
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Decompress the payload and split it into tables, in directory order.
    pub fn decompress_tables(&self) -> Result<Vec<SfntTable>, ReadError> {
        let expected: usize = self
            .entries
            .iter()
            .map(|entry| entry.stored_length() as usize)
            .sum();
        let data =
            woff2_brotli::decompress(self.payload, expected).map_err(ReadError::Decompression)?;
        if data.len() != expected {
            return Err(ReadError::LengthMismatch {
                field: "origLength",
                declared: expected as u32,
                actual: data.len(),
            });
        }

        let data = FontData::new(&data);
        let mut start = 0;
        self.entries
            .iter()
            .map(|entry| {
                let kind = entry
                    .table_kind()
                    .ok_or(ReadError::UnknownTableIndex(entry.tag_index()))?;
                let end = start + entry.stored_length() as usize;
                let table = data.slice(start..end).ok_or(ReadError::OutOfBounds)?;
                start = end;
                Ok(SfntTable::from_raw(kind, table.as_ref().to_vec()))
            })
            .collect()
    }
}

fn read_header(data: FontData) -> Result<Woff2Header, ReadError> {
    if data.len() < HEADER_LEN {
        return Err(ReadError::OutOfBounds);
    }
    let signature = Tag::from_u32(data.read_at(0)?);
    if signature != SIGNATURE {
        return Err(ReadError::InvalidSignature(signature));
    }
    // reserved u16 at 14
    Ok(Woff2Header {
        flavor: data.read_at(4)?,
        length: data.read_at(LENGTH_OFFSET)?,
        num_tables: data.read_at(12)?,
        total_sfnt_size: data.read_at(16)?,
        total_compressed_size: data.read_at(20)?,
        major_version: data.read_at(24)?,
        minor_version: data.read_at(26)?,
        meta_offset: data.read_at(28)?,
        meta_length: data.read_at(32)?,
        meta_orig_length: data.read_at(36)?,
        priv_offset: data.read_at(40)?,
        priv_length: data.read_at(44)?,
    })
}

/// Read one entry from the start of `data`, returning it and its encoded length.
fn read_directory_entry(data: FontData) -> Result<(TableDirectoryEntry, usize), ReadError> {
    let flags: u8 = data.read_at(0)?;
    let tag_index = flags & TableDirectoryEntry::TAG_INDEX_MASK;
    let Some(kind) = TableKind::from_directory_index(tag_index) else {
        return Err(ReadError::UnknownTableIndex(tag_index));
    };
    let (orig_length, mut len) = read_base128(data, 1)?;
    let transform_version = flags >> TableDirectoryEntry::TRANSFORM_VERSION_SHIFT;
    let transformed = if kind.transformed_by_default() {
        transform_version == 0
    } else {
        transform_version != 0
    };
    let transform_length = if transformed {
        let (value, value_len) = read_base128(data, 1 + len)?;
        len += value_len;
        Some(value)
    } else {
        None
    };
    let entry = TableDirectoryEntry {
        flags,
        orig_length,
        transform_length,
    };
    Ok((entry, 1 + len))
}

fn read_base128(data: FontData, offset: usize) -> Result<(UIntBase128, usize), ReadError> {
    let bytes = data.split_off(offset).ok_or(ReadError::OutOfBounds)?;
    UIntBase128::read(bytes.as_ref()).map_err(ReadError::InvalidBase128)
}

impl From<read_fonts::ReadError> for ReadError {
    // scalar reads from FontData only fail with OutOfBounds
    fn from(_: read_fonts::ReadError) -> ReadError {
        ReadError::OutOfBounds
    }
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "Unexpected end of data"),
            ReadError::InvalidSignature(tag) => write!(f, "Invalid WOFF2 signature '{tag}'"),
            ReadError::InvalidBase128(err) => write!(f, "Invalid table directory: {err}"),
            ReadError::UnknownTableIndex(ix) => write!(f, "Unknown table index {ix}"),
            ReadError::LengthMismatch {
                field,
                declared,
                actual,
            } => write!(f, "{field} is {declared}, but found {actual} bytes"),
            ReadError::Decompression(err) => write!(f, "Payload decompression failed: {err}"),
        }
    }
}

impl std::error::Error for ReadError {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        container::Woff2Builder,
        payload::{test_compressors::Identity, Brotli},
    };

    fn tables() -> Vec<SfntTable> {
        vec![
            SfntTable::from_raw(TableKind::Head, (0..54).collect()),
            SfntTable::from_raw(TableKind::Maxp, vec![0, 0, 0x50, 0, 0, 2]),
            SfntTable::from_raw(TableKind::Glyf, vec![7; 200]),
        ]
    }

    fn build(compressor: &impl crate::payload::Compress) -> Vec<u8> {
        let mut builder = Woff2Builder::new();
        for table in tables() {
            builder.add_raw(table);
        }
        builder.build(compressor).unwrap()
    }

    #[test]
    fn read_header_and_directory() {
        let data = build(&Identity);
        let file = Woff2File::read(&data).unwrap();
        assert_eq!(file.header().num_tables, 3);
        assert_eq!(file.header().length as usize, data.len());
        assert_eq!(file.header().total_compressed_size, 54 + 6 + 200);

        let lengths = file
            .entries()
            .iter()
            .map(|entry| (entry.table_kind(), entry.orig_length(), entry.transform_length()))
            .collect::<Vec<_>>();
        assert_eq!(
            lengths,
            [
                (Some(TableKind::Head), 54, None),
                (Some(TableKind::Maxp), 6, None),
                (Some(TableKind::Glyf), 200, Some(200)),
            ]
        );
    }

    #[test]
    fn tables_round_trip() {
        let data = build(&Brotli::default());
        let file = Woff2File::read(&data).unwrap();
        assert_eq!(file.decompress_tables().unwrap(), tables());
    }

    #[test]
    fn bad_signature() {
        let mut data = build(&Identity);
        data[..4].copy_from_slice(b"wOFF");
        assert_eq!(
            Woff2File::read(&data).unwrap_err(),
            ReadError::InvalidSignature(Tag::new(b"wOFF"))
        );
    }

    #[test]
    fn truncated_header() {
        let data = build(&Identity);
        assert_eq!(
            Woff2File::read(&data[..20]).unwrap_err(),
            ReadError::OutOfBounds
        );
    }

    #[test]
    fn truncated_directory() {
        let mut data = build(&Identity);
        // keep the head entry, lose the rest, and make the header agree
        let len = HEADER_LEN + 2;
        data.truncate(len);
        data[LENGTH_OFFSET..LENGTH_OFFSET + 4].copy_from_slice(&(len as u32).to_be_bytes());
        assert_eq!(Woff2File::read(&data).unwrap_err(), ReadError::OutOfBounds);
    }

    #[test]
    fn truncated_base128_length() {
        let mut data = build(&Identity);
        let len = HEADER_LEN + 3;
        data.truncate(len);
        data[LENGTH_OFFSET..LENGTH_OFFSET + 4].copy_from_slice(&(len as u32).to_be_bytes());
        assert_eq!(
            Woff2File::read(&data).unwrap_err(),
            ReadError::InvalidBase128(Base128Error::Truncated)
        );
    }

    #[test]
    fn stale_length_field() {
        let mut data = build(&Identity);
        data.push(0);
        assert_eq!(
            Woff2File::read(&data).unwrap_err(),
            ReadError::LengthMismatch {
                field: "length",
                declared: data.len() as u32 - 1,
                actual: data.len(),
            }
        );
    }

    #[test]
    fn wrong_compressed_size() {
        let mut data = build(&Identity);
        // totalCompressedSize lives at offset 20
        data[20..24].copy_from_slice(&100u32.to_be_bytes());
        assert_eq!(
            Woff2File::read(&data).unwrap_err(),
            ReadError::LengthMismatch {
                field: "totalCompressedSize",
                declared: 100,
                actual: 260,
            }
        );
    }

    #[test]
    fn unknown_table_index() {
        let mut data = build(&Identity);
        data[HEADER_LEN] = 0x0A;
        assert_eq!(
            Woff2File::read(&data).unwrap_err(),
            ReadError::UnknownTableIndex(10)
        );
    }

    #[test]
    fn payload_must_be_brotli() {
        let data = build(&Identity);
        let file = Woff2File::read(&data).unwrap();
        assert!(file.decompress_tables().is_err());
    }
}

//! Assembling tables into a [WOFF2] container
//!
//! [WOFF2]: https://www.w3.org/TR/WOFF2/#FileStructure

use font_types::{Tag, TT_SFNT_VERSION};

use crate::{
    error::Error,
    payload::{self, Compress},
    tables::{SfntTable, TableKind, TopLevelTable},
    varint::UIntBase128,
    write::{FontWrite, TableWriter},
};

/// The first four bytes of every WOFF2 file.
pub const SIGNATURE: Tag = Tag::new(b"wOF2");

/// Length of the fixed [`Woff2Header`].
pub const HEADER_LEN: usize = 48;

/// Position of the header's `length` field.
pub const LENGTH_OFFSET: usize = 8;

const LENGTH_FIELD: &str = "length";

/// The fixed-size header at the start of a WOFF2 file.
///
/// The signature and reserved fields are implied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Woff2Header {
    /// The sfnt version of the wrapped font.
    pub flavor: u32,
    /// Total length of the file.
    pub length: u32,
    pub num_tables: u16,
    /// Size of the uncompressed font; zero when not computed.
    pub total_sfnt_size: u32,
    /// Length of the compressed payload.
    pub total_compressed_size: u32,
    pub major_version: u16,
    pub minor_version: u16,
    pub meta_offset: u32,
    pub meta_length: u32,
    pub meta_orig_length: u32,
    pub priv_offset: u32,
    pub priv_length: u32,
}

/// One packed entry of the WOFF2 table directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableDirectoryEntry {
    pub(crate) flags: u8,
    pub(crate) orig_length: UIntBase128,
    pub(crate) transform_length: Option<UIntBase128>,
}

/// Build a WOFF2 file from an ordered list of tables.
///
/// Tables are written to the directory, and to the payload, in the order they
/// were added.
#[derive(Clone, Debug)]
pub struct Woff2Builder {
    flavor: u32,
    tables: Vec<SfntTable>,
}

impl TableDirectoryEntry {
    pub const TAG_INDEX_MASK: u8 = 0x3F;
    pub(crate) const TRANSFORM_VERSION_SHIFT: u8 = 6;

    /// The entry describing `table`, stored with transform version 0.
    ///
    /// Fails if the table is too long for a 32-bit length.
    pub fn for_table(table: &SfntTable) -> Result<Self, Error> {
        let kind = table.kind();
        let transform_version = 0u8;
        let orig_length = UIntBase128(checked_len("origLength", table.orig_length())?);
        Ok(TableDirectoryEntry {
            flags: kind.directory_index() | (transform_version << Self::TRANSFORM_VERSION_SHIFT),
            orig_length,
            transform_length: kind.transformed_by_default().then_some(orig_length),
        })
    }

    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// The index into the known-tag table.
    pub fn tag_index(&self) -> u8 {
        self.flags & Self::TAG_INDEX_MASK
    }

    pub fn transform_version(&self) -> u8 {
        self.flags >> Self::TRANSFORM_VERSION_SHIFT
    }

    pub fn table_kind(&self) -> Option<TableKind> {
        TableKind::from_directory_index(self.tag_index())
    }

    pub fn orig_length(&self) -> u32 {
        self.orig_length.0
    }

    pub fn transform_length(&self) -> Option<u32> {
        self.transform_length.map(|len| len.0)
    }

    /// The number of bytes this table occupies in the decompressed payload.
    pub fn stored_length(&self) -> u32 {
        self.transform_length().unwrap_or(self.orig_length())
    }
}

impl Woff2Builder {
    /// A builder for a TrueType-flavored font.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flavor(flavor: u32) -> Self {
        Woff2Builder {
            flavor,
            tables: Vec::new(),
        }
    }

    /// Compile `table` and append it.
    pub fn add_table<T: FontWrite + TopLevelTable>(&mut self, table: &T) -> &mut Self {
        self.add_raw(SfntTable::compile(table))
    }

    /// Append an already compiled table.
    pub fn add_raw(&mut self, table: SfntTable) -> &mut Self {
        self.tables.push(table);
        self
    }

    pub fn tables(&self) -> &[SfntTable] {
        &self.tables
    }

    /// Compress the tables and assemble the final file.
    ///
    /// This fails if `compressor` fails, or if a count or length does not fit
    /// in the field that records it.
    pub fn build(&self, compressor: &impl Compress) -> Result<Vec<u8>, Error> {
        let num_tables = checked_len("numTables", self.tables.len())?;
        let entries = self
            .tables
            .iter()
            .map(TableDirectoryEntry::for_table)
            .collect::<Result<Vec<_>, _>>()?;
        let compressed = payload::compress_tables(&self.tables, compressor)?;

        let header = Woff2Header {
            flavor: self.flavor,
            num_tables,
            total_compressed_size: checked_len("totalCompressedSize", compressed.len())?,
            ..Default::default()
        };

        let mut writer = TableWriter::new();
        header.write_into(&mut writer);
        for (table, entry) in self.tables.iter().zip(&entries) {
            log::trace!(
                "'{}': flags 0x{:02X} length {} transformed {:?}",
                table.tag(),
                entry.flags(),
                entry.orig_length(),
                entry.transform_length(),
            );
            entry.write_into(&mut writer);
        }
        writer.write_slice(&compressed);

        let length: u32 = checked_len("length", writer.len())?;
        writer.patch(LENGTH_FIELD, &length);
        debug_assert_eq!(writer.offset_for(LENGTH_FIELD), Some(LENGTH_OFFSET));

        log::debug!(
            "assembled WOFF2 with {} tables: {} bytes, {} byte payload",
            self.tables.len(),
            length,
            compressed.len()
        );
        Ok(writer.into_data())
    }
}

/// Convert a byte or item count to the width of the field that records it.
pub(crate) fn checked_len<T>(field: &'static str, len: usize) -> Result<T, Error>
where
    T: TryFrom<usize>,
{
    T::try_from(len).map_err(|_| Error::LengthOverflow { field, len })
}

impl Default for Woff2Builder {
    fn default() -> Self {
        Woff2Builder::with_flavor(TT_SFNT_VERSION)
    }
}

impl FontWrite for Woff2Header {
    fn write_into(&self, writer: &mut TableWriter) {
        SIGNATURE.write_into(writer);
        self.flavor.write_into(writer);
        writer.write_tagged(LENGTH_FIELD, &self.length);
        self.num_tables.write_into(writer);
        0u16.write_into(writer); // reserved
        self.total_sfnt_size.write_into(writer);
        self.total_compressed_size.write_into(writer);
        self.major_version.write_into(writer);
        self.minor_version.write_into(writer);
        self.meta_offset.write_into(writer);
        self.meta_length.write_into(writer);
        self.meta_orig_length.write_into(writer);
        self.priv_offset.write_into(writer);
        self.priv_length.write_into(writer);
    }
}

impl FontWrite for TableDirectoryEntry {
    fn write_into(&self, writer: &mut TableWriter) {
        self.flags.write_into(writer);
        self.orig_length.write_into(writer);
        if let Some(transform_length) = self.transform_length {
            transform_length.write_into(writer);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::payload::{
        test_compressors::{Broken, Identity},
        Brotli,
    };
    use woff2_brotli::CompressError;

    fn small_builder() -> Woff2Builder {
        let mut builder = Woff2Builder::new();
        builder
            .add_raw(SfntTable::from_raw(TableKind::Head, vec![1, 2, 3]))
            .add_raw(SfntTable::from_raw(TableKind::Maxp, vec![4, 5]))
            .add_raw(SfntTable::from_raw(TableKind::Glyf, vec![6, 7, 8, 9]));
        builder
    }

    #[test]
    fn header_is_48_bytes() {
        let mut writer = TableWriter::new();
        Woff2Header::default().write_into(&mut writer);
        assert_eq!(writer.len(), HEADER_LEN);
        assert_eq!(writer.offset_for(LENGTH_FIELD), Some(LENGTH_OFFSET));
    }

    #[test]
    #[rustfmt::skip]
    fn byte_layout() {
        let data = small_builder().build(&Identity).unwrap();
        let expected: &[u8] = &[
            b'w', b'O', b'F', b'2', // signature
            0x00, 0x01, 0x00, 0x00, // flavor
            0x00, 0x00, 0x00, 0x40, // length (64)
            0x00, 0x03,             // numTables
            0x00, 0x00,             // reserved
            0x00, 0x00, 0x00, 0x00, // totalSfntSize
            0x00, 0x00, 0x00, 0x09, // totalCompressedSize
            0x00, 0x00,             // majorVersion
            0x00, 0x00,             // minorVersion
            0x00, 0x00, 0x00, 0x00, // metaOffset
            0x00, 0x00, 0x00, 0x00, // metaLength
            0x00, 0x00, 0x00, 0x00, // metaOrigLength
            0x00, 0x00, 0x00, 0x00, // privOffset
            0x00, 0x00, 0x00, 0x00, // privLength
            0x01, 0x03,             // head: flags, origLength
            0x04, 0x02,             // maxp: flags, origLength
            0x14, 0x04, 0x04,       // glyf: flags, origLength, transformLength
            1, 2, 3, 4, 5, 6, 7, 8, 9, // payload
        ];
        assert_eq!(data.as_slice(), expected);
    }

    #[test]
    fn length_field_matches_buffer() {
        for compressor in [Brotli::default(), Brotli { quality: 1, window: 10 }] {
            let data = small_builder().build(&compressor).unwrap();
            let length = u32::from_be_bytes(data[8..12].try_into().unwrap());
            assert_eq!(length as usize, data.len());
        }
    }

    #[test]
    fn large_tables_use_multibyte_lengths() {
        let mut builder = Woff2Builder::new();
        builder.add_raw(SfntTable::from_raw(TableKind::Glyf, vec![0; 300]));
        let data = builder.build(&Identity).unwrap();
        // 300 = 2 * 128 + 44
        assert_eq!(&data[HEADER_LEN..HEADER_LEN + 5], &[0x14, 0x82, 0x2C, 0x82, 0x2C]);
        assert_eq!(data.len(), HEADER_LEN + 5 + 300);
    }

    #[test]
    fn directory_entry_fields() {
        let glyf = SfntTable::from_raw(TableKind::Glyf, vec![0; 40]);
        let glyf = TableDirectoryEntry::for_table(&glyf).unwrap();
        assert_eq!(glyf.flags(), 0x14);
        assert_eq!(glyf.tag_index(), 20);
        assert_eq!(glyf.transform_version(), 0);
        assert_eq!(glyf.table_kind(), Some(TableKind::Glyf));
        assert_eq!(glyf.transform_length(), Some(40));
        assert_eq!(glyf.stored_length(), 40);

        let head = SfntTable::from_raw(TableKind::Head, vec![0; 54]);
        let head = TableDirectoryEntry::for_table(&head).unwrap();
        assert_eq!(head.flags(), 0x01);
        assert_eq!(head.transform_length(), None);
        assert_eq!(head.stored_length(), 54);
    }

    #[test]
    fn custom_flavor() {
        let data = Woff2Builder::with_flavor(0x4F54544F).build(&Identity).unwrap();
        assert_eq!(&data[4..8], b"OTTO");
        assert_eq!(data.len(), HEADER_LEN);
        assert_eq!(&data[8..12], &[0, 0, 0, 48]);
    }

    #[test]
    fn too_many_tables() {
        let mut builder = Woff2Builder::new();
        for _ in 0..=u16::MAX as usize {
            builder.add_raw(SfntTable::from_raw(TableKind::Maxp, Vec::new()));
        }
        assert_eq!(
            builder.build(&Identity),
            Err(Error::LengthOverflow {
                field: "numTables",
                len: 65536
            })
        );
    }

    #[test]
    fn lengths_must_fit_their_fields() {
        assert_eq!(checked_len::<u32>("length", 48), Ok(48));
        assert_eq!(
            checked_len::<u16>("numTables", 70_000),
            Err(Error::LengthOverflow {
                field: "numTables",
                len: 70_000
            })
        );
        #[cfg(target_pointer_width = "64")]
        assert_eq!(
            checked_len::<u32>("origLength", u32::MAX as usize + 1),
            Err(Error::LengthOverflow {
                field: "origLength",
                len: u32::MAX as usize + 1
            })
        );
    }

    #[test]
    fn compression_failure() {
        assert_eq!(
            small_builder().build(&Broken),
            Err(Error::Compression(CompressError::Finish))
        );
    }
}

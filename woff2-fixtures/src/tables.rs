//! The font tables carried by a fixture.

pub mod glyf;
pub mod head;
pub mod maxp;

use font_types::Tag;

use crate::write::{FontWrite, TableWriter};

/// The tables this crate knows how to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    Head,
    Maxp,
    Glyf,
}

/// A table that stands on its own in a font.
pub trait TopLevelTable {
    /// The kind of table, which determines its tag and directory flags.
    const KIND: TableKind;
}

/// The compiled bytes of a single table, ready to be added to a container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SfntTable {
    kind: TableKind,
    data: Vec<u8>,
}

/// Whether glyph locations are stored as 16-bit or 32-bit offsets.
///
/// This is both the 'head' table's [indexToLocFormat][locformat] and the
/// transformed glyf table's `indexFormat`.
///
/// [locformat]: https://learn.microsoft.com/en-us/typography/opentype/spec/head
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocaFormat {
    #[default]
    Short = 0,
    Long = 1,
}

impl TableKind {
    /// The table's tag.
    pub fn tag(self) -> Tag {
        match self {
            TableKind::Head => Tag::new(b"head"),
            TableKind::Maxp => Tag::new(b"maxp"),
            TableKind::Glyf => Tag::new(b"glyf"),
        }
    }

    /// The known-tag index stored in the low six bits of a directory entry's flags.
    ///
    /// The transformed glyf table is announced with index 20 (`0x14`), which is
    /// what the parsers these fixtures target look for.
    pub fn directory_index(self) -> u8 {
        match self {
            TableKind::Head => 1,
            TableKind::Maxp => 4,
            TableKind::Glyf => 0x14,
        }
    }

    /// The inverse of [`TableKind::directory_index`].
    pub fn from_directory_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(TableKind::Head),
            4 => Some(TableKind::Maxp),
            0x14 => Some(TableKind::Glyf),
            _ => None,
        }
    }

    /// `true` if transform version 0 means "transformed" for this table.
    ///
    /// For every other table, version 0 is the null transform.
    pub fn transformed_by_default(self) -> bool {
        matches!(self, TableKind::Glyf)
    }
}

impl SfntTable {
    /// Compile a table into its bytes.
    pub fn compile<T: FontWrite + TopLevelTable>(table: &T) -> Self {
        let mut writer = TableWriter::new();
        table.write_into(&mut writer);
        SfntTable::from_raw(T::KIND, writer.into_data())
    }

    /// Wrap already-encoded bytes.
    pub fn from_raw(kind: TableKind, data: Vec<u8>) -> Self {
        SfntTable { kind, data }
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn tag(&self) -> Tag {
        self.kind.tag()
    }

    /// The length of the table as it is stored in the payload.
    pub fn orig_length(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

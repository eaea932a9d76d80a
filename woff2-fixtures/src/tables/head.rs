//! The [head (Header)][head] table
//!
//! [head]: https://docs.microsoft.com/en-us/typography/opentype/spec/head

use font_types::MajorMinor;

use super::{LocaFormat, TableKind, TopLevelTable};
use crate::write::{FontWrite, TableWriter};

/// A 'head' table with everything but the fields a parser branches on zeroed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Head {
    pub units_per_em: u16,
    pub index_to_loc_format: LocaFormat,
}

impl Head {
    /// Length of a version 1.0 'head' table.
    pub const LEN: usize = 54;

    pub const MAGIC_NUMBER: u32 = 0x5F0F3CF5;

    pub fn new(units_per_em: u16, index_to_loc_format: LocaFormat) -> Self {
        Head {
            units_per_em,
            index_to_loc_format,
        }
    }
}

impl TopLevelTable for Head {
    const KIND: TableKind = TableKind::Head;
}

impl FontWrite for Head {
    fn write_into(&self, writer: &mut TableWriter) {
        MajorMinor::VERSION_1_0.write_into(writer);
        0u32.write_into(writer); // fontRevision
        0u32.write_into(writer); // checksumAdjustment
        Head::MAGIC_NUMBER.write_into(writer);
        0u16.write_into(writer); // flags
        self.units_per_em.write_into(writer);
        0i64.write_into(writer); // created
        0i64.write_into(writer); // modified
        [0i16; 4].write_into(writer); // xMin, yMin, xMax, yMax
        0u16.write_into(writer); // macStyle
        0u16.write_into(writer); // lowestRecPPEM
        0i16.write_into(writer); // fontDirectionHint
        (self.index_to_loc_format as i16).write_into(writer);
        0i16.write_into(writer); // glyphDataFormat
    }
}

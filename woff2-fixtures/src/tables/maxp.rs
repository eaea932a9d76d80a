//! The [maxp (Maximum Profile)][maxp] table
//!
//! [maxp]: https://docs.microsoft.com/en-us/typography/opentype/spec/maxp

use font_types::Version16Dot16;

use super::{TableKind, TopLevelTable};
use crate::write::{FontWrite, TableWriter};

/// A version 0.5 'maxp' table, which records only the glyph count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Maxp {
    pub num_glyphs: u16,
}

impl Maxp {
    pub const LEN: usize = 6;

    pub fn new(num_glyphs: u16) -> Self {
        Maxp { num_glyphs }
    }
}

impl TopLevelTable for Maxp {
    const KIND: TableKind = TableKind::Maxp;
}

impl FontWrite for Maxp {
    fn write_into(&self, writer: &mut TableWriter) {
        Version16Dot16::VERSION_0_5.write_into(writer);
        self.num_glyphs.write_into(writer);
    }
}

#[cfg(test)]
mod tests {
    use read_fonts::{tables::maxp::Maxp as ReadMaxp, FontData, FontRead};

    use super::*;
    use crate::tables::SfntTable;

    #[test]
    fn maxp_05() {
        let table = SfntTable::compile(&Maxp::new(2));
        assert_eq!(table.data(), [0x00, 0x00, 0x50, 0x00, 0x00, 0x02]);
        assert_eq!(table.orig_length(), Maxp::LEN);

        let loaded = ReadMaxp::read(FontData::new(table.data())).unwrap();
        assert_eq!(loaded.num_glyphs(), 2);
        assert_eq!(loaded.max_points(), None);
    }
}

//! The WOFF2 [transformed glyf][transform] table
//!
//! Rather than storing each glyph contiguously, the transformed table splits
//! glyph data into seven parallel streams, preceded by their sizes. Only empty
//! glyphs are supported here: every glyph has a contour count of zero, and
//! every stream other than the contour-count stream is empty.
//!
//! [transform]: https://www.w3.org/TR/WOFF2/#glyf_table_format

use super::{LocaFormat, TableKind, TopLevelTable};
use crate::write::{FontWrite, TableWriter};

/// Length of the fixed part of the table, up to the first stream.
pub const HEADER_LEN: usize = 36;

/// A transformed glyf table made entirely of empty glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransformedGlyf {
    /// Must be [`TransformedGlyf::VERSION`] for a decoder to accept the table.
    pub version: u16,
    pub option_flags: u16,
    pub num_glyphs: u16,
    pub index_format: LocaFormat,
}

/// The byte lengths of the seven glyph streams, in the order they are stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamSizes {
    pub n_contour: u32,
    pub n_points: u32,
    pub flag: u32,
    pub glyph: u32,
    pub composite: u32,
    pub bbox: u32,
    pub instruction: u32,
}

impl TransformedGlyf {
    /// The only version a conforming decoder accepts.
    pub const VERSION: u16 = 0;

    pub fn new(num_glyphs: u16, index_format: LocaFormat) -> Self {
        TransformedGlyf {
            version: Self::VERSION,
            option_flags: 0,
            num_glyphs,
            index_format,
        }
    }

    /// The same table, with a different version field.
    pub fn with_version(self, version: u16) -> Self {
        TransformedGlyf { version, ..self }
    }

    /// One contour count per glyph, each zero.
    fn n_contour_stream(&self) -> Vec<i16> {
        vec![0; self.num_glyphs as usize]
    }

    pub fn stream_sizes(&self) -> StreamSizes {
        StreamSizes {
            n_contour: (self.num_glyphs as u32) * 2,
            ..Default::default()
        }
    }

    /// The total length of the encoded table.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.num_glyphs as usize * 2
    }
}

impl TopLevelTable for TransformedGlyf {
    const KIND: TableKind = TableKind::Glyf;
}

impl FontWrite for StreamSizes {
    fn write_into(&self, writer: &mut TableWriter) {
        [
            self.n_contour,
            self.n_points,
            self.flag,
            self.glyph,
            self.composite,
            self.bbox,
            self.instruction,
        ]
        .write_into(writer)
    }
}

impl FontWrite for TransformedGlyf {
    fn write_into(&self, writer: &mut TableWriter) {
        self.version.write_into(writer);
        self.option_flags.write_into(writer);
        self.num_glyphs.write_into(writer);
        (self.index_format as u16).write_into(writer);
        self.stream_sizes().write_into(writer);
        self.n_contour_stream().write_into(writer);
    }
}

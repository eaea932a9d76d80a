//! The catalogue of fixtures
//!
//! Each [`FixtureKind`] names a decoder code path to exercise, and maps to a
//! [`FixtureSpec`]: the handful of literal values that differ between
//! fixtures. Everything else about the file is derived from those literals.

use crate::{
    container::Woff2Builder,
    error::Error,
    payload::{Brotli, Compress},
    tables::{glyf::TransformedGlyf, head::Head, maxp::Maxp, LocaFormat, SfntTable},
};

/// A transformed glyf version no decoder should accept.
pub const INVALID_GLYF_VERSION: u16 = 999;

/// The fixtures this crate can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FixtureKind {
    /// A transformed glyf table with a non-zero version.
    ///
    /// A conforming decoder must reject the file before looking at any
    /// glyph data.
    InvalidGlyfVersion,
    /// Two empty glyphs, with 16-bit glyph locations in both 'head' and the
    /// transformed glyf table.
    ShortLoca,
    /// Two empty glyphs, with 32-bit glyph locations in both 'head' and the
    /// transformed glyf table.
    LongLoca,
}

/// The literal values that define a fixture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixtureSpec {
    pub units_per_em: u16,
    /// 'head' indexToLocFormat
    pub index_to_loc_format: LocaFormat,
    /// Written to both 'maxp' and the transformed glyf table.
    pub num_glyphs: u16,
    pub glyf_version: u16,
    pub glyf_option_flags: u16,
    /// The transformed glyf table's indexFormat
    pub glyf_index_format: LocaFormat,
}

impl FixtureKind {
    pub const ALL: [FixtureKind; 3] = [
        FixtureKind::InvalidGlyfVersion,
        FixtureKind::ShortLoca,
        FixtureKind::LongLoca,
    ];

    /// The conventional file name for this fixture.
    pub fn file_name(self) -> &'static str {
        match self {
            FixtureKind::InvalidGlyfVersion => "woff2-invalid-version.woff2",
            FixtureKind::ShortLoca => "woff2-short-loca.woff2",
            FixtureKind::LongLoca => "woff2-long-loca.woff2",
        }
    }

    pub fn spec(self) -> FixtureSpec {
        let base = FixtureSpec::default();
        match self {
            FixtureKind::InvalidGlyfVersion => FixtureSpec {
                index_to_loc_format: LocaFormat::Long,
                glyf_version: INVALID_GLYF_VERSION,
                glyf_index_format: LocaFormat::Long,
                ..base
            },
            FixtureKind::ShortLoca => base,
            FixtureKind::LongLoca => FixtureSpec {
                index_to_loc_format: LocaFormat::Long,
                glyf_index_format: LocaFormat::Long,
                ..base
            },
        }
    }

    /// `true` if a conforming decoder should accept this fixture.
    pub fn is_conforming(self) -> bool {
        self.spec().glyf_version == TransformedGlyf::VERSION
    }

    /// Build the fixture, compressing with brotli.
    pub fn build(self) -> Result<Vec<u8>, Error> {
        self.build_with(&Brotli::default())
    }

    pub fn build_with(self, compressor: &impl Compress) -> Result<Vec<u8>, Error> {
        log::debug!("building {self:?} fixture");
        self.spec().build_with(compressor)
    }
}

impl FixtureSpec {
    pub fn head(&self) -> Head {
        Head::new(self.units_per_em, self.index_to_loc_format)
    }

    pub fn maxp(&self) -> Maxp {
        Maxp::new(self.num_glyphs)
    }

    pub fn glyf(&self) -> TransformedGlyf {
        TransformedGlyf {
            option_flags: self.glyf_option_flags,
            ..TransformedGlyf::new(self.num_glyphs, self.glyf_index_format)
        }
        .with_version(self.glyf_version)
    }

    /// The compiled tables, in the order they are stored.
    pub fn tables(&self) -> Vec<SfntTable> {
        vec![
            SfntTable::compile(&self.head()),
            SfntTable::compile(&self.maxp()),
            SfntTable::compile(&self.glyf()),
        ]
    }

    pub fn build_with(&self, compressor: &impl Compress) -> Result<Vec<u8>, Error> {
        if self.glyf_version != TransformedGlyf::VERSION {
            log::debug!("writing non-conforming glyf version {}", self.glyf_version);
        }
        if self.index_to_loc_format != self.glyf_index_format {
            log::info!(
                "'head' uses {:?} glyph locations but glyf declares {:?}",
                self.index_to_loc_format,
                self.glyf_index_format
            );
        }
        let mut builder = Woff2Builder::new();
        for table in self.tables() {
            builder.add_raw(table);
        }
        builder.build(compressor)
    }
}

impl Default for FixtureSpec {
    /// The well-formed short-loca font: two empty glyphs at 1024 units per em.
    fn default() -> Self {
        FixtureSpec {
            units_per_em: 1024,
            index_to_loc_format: LocaFormat::Short,
            num_glyphs: 2,
            glyf_version: TransformedGlyf::VERSION,
            glyf_option_flags: 0,
            glyf_index_format: LocaFormat::Short,
        }
    }
}

impl std::fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{
        container::{HEADER_LEN, LENGTH_OFFSET},
        payload::test_compressors::Identity,
    };

    #[rstest]
    #[case(FixtureKind::InvalidGlyfVersion)]
    #[case(FixtureKind::ShortLoca)]
    #[case(FixtureKind::LongLoca)]
    fn table_lengths(#[case] kind: FixtureKind) {
        let lengths = kind
            .spec()
            .tables()
            .iter()
            .map(SfntTable::orig_length)
            .collect::<Vec<_>>();
        assert_eq!(lengths, [54, 6, 40]);
    }

    #[test]
    fn invalid_version_literals() {
        let spec = FixtureKind::InvalidGlyfVersion.spec();
        assert_eq!(spec.glyf().version, 999);
        assert_eq!(spec.head().index_to_loc_format, LocaFormat::Long);
        assert!(!FixtureKind::InvalidGlyfVersion.is_conforming());
    }

    #[test]
    fn short_loca_literals() {
        let spec = FixtureKind::ShortLoca.spec();
        assert_eq!(spec.head().index_to_loc_format, LocaFormat::Short);
        assert_eq!(spec.glyf().index_format, LocaFormat::Short);
        assert_eq!(spec.glyf().version, 0);
        assert_eq!(spec.maxp().num_glyphs, 2);
        assert!(FixtureKind::ShortLoca.is_conforming());
    }

    #[test]
    #[rustfmt::skip]
    fn short_loca_uncompressed_layout() {
        let data = FixtureKind::ShortLoca.build_with(&Identity).unwrap();
        assert_eq!(data.len(), HEADER_LEN + 7 + 100);
        assert_eq!(&data[LENGTH_OFFSET..LENGTH_OFFSET + 4], &155u32.to_be_bytes());
        assert_eq!(&data[20..24], &100u32.to_be_bytes());
        assert_eq!(
            &data[HEADER_LEN..HEADER_LEN + 7],
            &[
                0x01, 54,       // head
                0x04, 6,        // maxp
                0x14, 40, 40,   // glyf
            ]
        );
        let payload = &data[HEADER_LEN + 7..];
        // head.indexToLocFormat
        assert_eq!(&payload[50..52], &[0, 0]);
        // glyf.indexFormat
        assert_eq!(&payload[60 + 6..60 + 8], &[0, 0]);
    }

    #[test]
    fn distinct_file_names() {
        let mut names = FixtureKind::ALL.map(FixtureKind::file_name).to_vec();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), FixtureKind::ALL.len());
        assert!(names.iter().all(|name| name.ends_with(".woff2")));
    }

    #[test]
    fn glyf_option_flags_are_written() {
        let spec = FixtureSpec {
            glyf_option_flags: 1,
            ..Default::default()
        };
        let tables = spec.tables();
        assert_eq!(&tables[2].data()[2..4], &[0, 1]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn spec_from_json() {
        let json = r#"{
            "units_per_em": 2048,
            "index_to_loc_format": "Long",
            "num_glyphs": 3,
            "glyf_version": 999,
            "glyf_option_flags": 0,
            "glyf_index_format": "Short"
        }"#;
        let spec: FixtureSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.glyf().version, INVALID_GLYF_VERSION);
        assert_eq!(spec.tables()[2].orig_length(), 36 + 6);
        let back = serde_json::to_string(&spec).unwrap();
        assert_eq!(serde_json::from_str::<FixtureSpec>(&back).unwrap(), spec);
    }
}

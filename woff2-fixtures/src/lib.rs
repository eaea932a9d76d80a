//! Building small, deliberately shaped [WOFF2] files.
//!
//! This crate produces fixtures for testing WOFF2 decoders. Each fixture is a
//! complete, byte-exact container wrapping a tiny TrueType font ('head',
//! 'maxp' and a transformed 'glyf' table holding only empty glyphs), shaped
//! so that a decoder has to take one particular code path: rejecting an
//! unknown glyf transform version, or reconstructing short or long glyph
//! locations.
//!
//! ```no_run
//! use woff2_fixtures::FixtureKind;
//!
//! for kind in FixtureKind::ALL {
//!     let bytes = kind.build().unwrap();
//!     std::fs::write(kind.file_name(), bytes).unwrap();
//! }
//! ```
//!
//! Lower-level pieces are public as well: individual tables implement
//! [`FontWrite`], and [`Woff2Builder`] assembles any list of them into a
//! container. [`read::Woff2File`] parses a container back, which is mostly
//! useful for checking what was written.
//!
//! [WOFF2]: https://www.w3.org/TR/WOFF2/

#![forbid(unsafe_code)]

pub mod container;
mod error;
pub mod fixtures;
pub mod payload;
pub mod read;
pub mod tables;
pub mod varint;
mod write;

pub use container::{TableDirectoryEntry, Woff2Builder, Woff2Header};
pub use error::Error;
pub use fixtures::{FixtureKind, FixtureSpec};
pub use payload::{Brotli, Compress};
pub use tables::{LocaFormat, SfntTable, TableKind};
pub use varint::UIntBase128;
pub use write::{FontWrite, TableWriter};

/// Public re-export of the font-types crate.
pub extern crate font_types as types;

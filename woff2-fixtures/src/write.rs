//! Serializing big-endian data

use std::collections::HashMap;

use font_types::{MajorMinor, Tag, Version16Dot16};

/// A type that can be written out as part of a WOFF2 file.
pub trait FontWrite {
    /// Write our big-endian bytes into this [TableWriter].
    fn write_into(&self, writer: &mut TableWriter);
}

/// A growable buffer of big-endian bytes.
///
/// Positions can be tagged while writing, so that a field whose value is
/// only known later (such as the total file length) can be written as a
/// placeholder and patched in place once the rest of the data exists.
#[derive(Debug, Default, Clone)]
pub struct TableWriter {
    data: Vec<u8>,
    tagged_locations: HashMap<&'static str, usize>,
}

impl TableWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write raw bytes.
    ///
    /// The caller is responsible for ensuring bytes are in big-endian order.
    #[inline]
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes)
    }

    /// Write `item`, remembering where it starts under the name `tag`.
    pub fn write_tagged(&mut self, tag: &'static str, item: &dyn FontWrite) {
        self.tagged_locations.insert(tag, self.data.len());
        item.write_into(self);
    }

    /// The position of the value written under `tag`, if any.
    pub fn offset_for(&self, tag: &str) -> Option<usize> {
        self.tagged_locations.get(tag).copied()
    }

    /// Overwrite the bytes at the position tagged `tag` with `item`.
    ///
    /// # Panics
    ///
    /// Panics if `tag` was never written, or if `item` does not fit in the
    /// data that follows it.
    pub fn patch(&mut self, tag: &str, item: &dyn FontWrite) {
        let Some(offset) = self.offset_for(tag) else {
            panic!("no location tagged '{tag}'");
        };
        let mut scratch = TableWriter::new();
        item.write_into(&mut scratch);
        let end = offset + scratch.len();
        assert!(
            end <= self.data.len(),
            "patching '{tag}' would write past the end of the buffer"
        );
        self.data[offset..end].copy_from_slice(&scratch.data);
    }

    /// Return the written data.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

macro_rules! write_be_bytes {
    ($ty:ty) => {
        impl FontWrite for $ty {
            #[inline]
            fn write_into(&self, writer: &mut TableWriter) {
                writer.write_slice(&self.to_be_bytes())
            }
        }
    };
}

write_be_bytes!(u8);
write_be_bytes!(i16);
write_be_bytes!(u16);
write_be_bytes!(u32);
write_be_bytes!(i64);
write_be_bytes!(Tag);
write_be_bytes!(MajorMinor);
write_be_bytes!(Version16Dot16);

impl<T: FontWrite> FontWrite for [T] {
    fn write_into(&self, writer: &mut TableWriter) {
        self.iter().for_each(|item| item.write_into(writer))
    }
}

impl<T: FontWrite, const N: usize> FontWrite for [T; N] {
    fn write_into(&self, writer: &mut TableWriter) {
        self.as_slice().write_into(writer)
    }
}

//! Read/write contract shared by every container entity.
//!
//! Fixed-size values use [`Record`](crate::cursor::Record); variable-size
//! entities (meshes, bones, clips, materials, extensions) implement
//! [`BinarySerializable`] and are stored as count-prefixed lists.

use std::io::{Read, Seek, Write};

use crate::cursor::{BinaryReader, BinaryWriter};
use crate::error::Result;

/// A variable-size entity with a binary encoding built from cursor primitives.
pub trait BinarySerializable: Sized {
    fn write_to<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()>;

    fn read_from<R: Read + Seek>(r: &mut BinaryReader<R>) -> Result<Self>;
}

impl BinarySerializable for String {
    fn write_to<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
        w.write_string(self)
    }

    fn read_from<R: Read + Seek>(r: &mut BinaryReader<R>) -> Result<Self> {
        r.read_string()
    }
}

/// Write `count:i32` followed by each entry.
pub fn write_list<T: BinarySerializable, W: Write + Seek>(
    w: &mut BinaryWriter<W>,
    items: &[T],
) -> Result<()> {
    w.write_len(items.len())?;
    for item in items {
        item.write_to(w)?;
    }
    Ok(())
}

/// Write an optional list; absent lists are written as `count = 0`.
pub fn write_optional_list<T: BinarySerializable, W: Write + Seek>(
    w: &mut BinaryWriter<W>,
    items: Option<&[T]>,
) -> Result<()> {
    write_list(w, items.unwrap_or(&[]))
}

/// Read a count-prefixed list.
pub fn read_list<T: BinarySerializable, R: Read + Seek>(
    r: &mut BinaryReader<R>,
) -> Result<Vec<T>> {
    let count = r.read_len("list count")?;
    // Entries are variable-size, so grow as they decode.
    let mut items = Vec::new();
    for _ in 0..count {
        items.push(T::read_from(r)?);
    }
    Ok(items)
}

/// Read a count-prefixed list, mapping `count = 0` to `None`.
pub fn read_optional_list<T: BinarySerializable, R: Read + Seek>(
    r: &mut BinaryReader<R>,
) -> Result<Option<Vec<T>>> {
    let items = read_list(r)?;
    Ok(if items.is_empty() { None } else { Some(items) })
}

/// Mapping used by record arrays that may be absent.
pub(crate) fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

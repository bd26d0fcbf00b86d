//! Table-driven decoding of optional message fields.
//!
//! A layout is an ordered slice of [`FieldSpec`] entries. Each entry names the
//! flag bit gating its field and a typed receiver, [`Store`], whose variant
//! fixes the field width. Several entries may share a bit when one flag gates
//! consecutive fields.

use super::{
    datetime::DATE_TIME_LEN,
    flags::{Flags, MassUnit},
};

/// A field stored into a receiver of type `O`.
pub enum Store<O> {
    /// A one-byte field.
    U8(fn(&mut O, u8)),
    /// A two-byte little-endian field, with the unit of the message.
    U16(fn(&mut O, u16, MassUnit)),
    /// A seven-byte date-time field.
    DateTime(fn(&mut O, [u8; DATE_TIME_LEN])),
}

impl<O> Store<O> {
    /// Number of bytes consumed by this field.
    pub const fn width(&self) -> usize {
        match self {
            Store::U8(_) => 1,
            Store::U16(_) => 2,
            Store::DateTime(_) => DATE_TIME_LEN,
        }
    }
}

/// An optional field, present when its flag bit is set.
pub struct FieldSpec<O> {
    pub bit: u8,
    pub store: Store<O>,
}

/// Compute the number of bytes the fields of a layout occupy under `flags`,
/// excluding the header.
pub fn fields_len<O>(layout: &[FieldSpec<O>], flags: &impl Flags) -> usize {
    layout
        .iter()
        .filter(|f| flags.is_set(f.bit))
        .map(|f| f.store.width())
        .sum()
}

/// Compute the minimum payload length for a message with a header of
/// `header_len` bytes.
pub fn required_len<O>(header_len: usize, layout: &[FieldSpec<O>], flags: &impl Flags) -> usize {
    header_len + fields_len(layout, flags)
}

/// An error walking a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfSlice;

/// Walk the fields of a layout present under `flags`, starting at offset `i`
/// of `r` and publishing each to a receiver.
///
/// Returns the offset following the last present field. On error, some fields
/// may already have been stored; check [`required_len`] first to avoid this.
pub fn walk<O>(
    layout: &[FieldSpec<O>],
    flags: &impl Flags,
    r: &[u8],
    mut i: usize,
    o: &mut O,
) -> Result<usize, EndOfSlice> {
    let unit = flags.unit();

    for field in layout.iter().filter(|f| flags.is_set(f.bit)) {
        match field.store {
            Store::U8(add) => add(o, u8::from_le_bytes(take(r, &mut i)?)),
            Store::U16(add) => add(o, u16::from_le_bytes(take(r, &mut i)?), unit),
            Store::DateTime(add) => add(o, take(r, &mut i)?),
        }
    }

    Ok(i)
}

/// Take an exact number of bytes from an offset in a slice, advancing the offset.
pub fn take<const N: usize>(r: &[u8], i: &mut usize) -> Result<[u8; N], EndOfSlice> {
    let s = *i;
    let e = s.checked_add(N).ok_or(EndOfSlice)?;

    let bytes = r
        .get(s..e)
        .and_then(|b| b.try_into().ok())
        .ok_or(EndOfSlice)?;
    *i = e;

    Ok(bytes)
}

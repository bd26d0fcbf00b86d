//! Pure primitives for decoding scale messages and sequencing setup.
//!
//! Nothing in this module allocates, blocks, or holds state between calls.
//! See [`crate::avec`] for implementations covering common usage.
//!
//! # Architecture
//!
//! A message is a fixed header followed by a run of optional fields. The
//! header is reinterpreted in one step (see [`header`]), and yields the flag
//! word (see [`flags`]) and a successor cursor offset. The optional fields are
//! described by a table of [`layout::FieldSpec`] entries, each naming the flag
//! bit gating it and a typed receiver whose variant fixes the field width.
//! [`layout::walk`] consumes present fields strictly in table order.
//!
//! Because the table alone determines the byte budget of a flag word,
//! [`layout::required_len`] can reject short payloads before any field is
//! stored, so a record is never built from bytes that ran off the end of the
//! buffer.
//!
//! Connection setup is modelled separately by the state tokens in
//! [`sequence`].

pub mod channel;
pub mod datetime;
pub mod flags;
pub mod header;
pub mod layout;
pub mod sequence;

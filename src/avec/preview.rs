//! Vendor preview of long notifications.
//!
//! Notifications of at least [`PREVIEW_LEN`] bytes carry, on this scale, a
//! date-time at byte 2 and a big-endian weight in tenths of a kilogram at
//! byte 9, independent of the flags of either measurement layout. The preview
//! is reported for diagnostics only and never feeds a measurement.

use crate::sans::{
    datetime::{DateTime, TimestampError},
    layout::take,
};

/// Minimum payload length carrying a preview.
pub const PREVIEW_LEN: usize = 14;

/// A preview of a notification, in the vendor layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VendorPreview {
    /// Weight, in kilograms.
    pub weight: f32,
    pub timestamp: Result<DateTime, TimestampError>,
}

/// Peek the vendor preview of a payload, if it is long enough to carry one.
pub fn peek(r: &[u8]) -> Option<VendorPreview> {
    if r.len() < PREVIEW_LEN {
        return None;
    }

    let i = &mut 2;
    let timestamp = DateTime::decode(take(r, i).ok()?);
    let weight = u16::from_be_bytes(take(r, i).ok()?) as f32 / 10.0;

    Some(VendorPreview { weight, timestamp })
}

//! Fixed headers leading each message.

use zerocopy::FromBytes;

use super::flags::{CompositionFlags, WeightFlags};

/// Length of a weight measurement header: flags and weight.
pub const WEIGHT_HEADER_LEN: usize = 3;

/// Length of a body-composition measurement header: flags and body fat.
pub const COMPOSITION_HEADER_LEN: usize = 4;

/// Decode the header of a weight measurement.
///
/// Returns the flags, and the raw weight.
pub fn weight(r: [u8; WEIGHT_HEADER_LEN]) -> (WeightFlags, u16) {
    #[repr(C, packed)]
    #[derive(FromBytes)]
    struct WeightHeader {
        flags: u8,
        weight: [u8; 2],
    }

    let WeightHeader { flags, weight } = zerocopy::transmute!(r);

    (WeightFlags::read(flags), u16::from_le_bytes(weight))
}

/// Decode the header of a body-composition measurement.
///
/// Returns the flags, and the raw body fat percentage.
pub fn composition(r: [u8; COMPOSITION_HEADER_LEN]) -> (CompositionFlags, u16) {
    #[repr(C, packed)]
    #[derive(FromBytes)]
    struct CompositionHeader {
        flags: [u8; 2],
        body_fat: [u8; 2],
    }

    let CompositionHeader { flags, body_fat } = zerocopy::transmute!(r);

    (
        CompositionFlags::read(u16::from_le_bytes(flags)),
        u16::from_le_bytes(body_fat),
    )
}

//! Body-composition measurement decoder.

use crate::sans::{
    flags::{CompositionFlags, MassUnit},
    header::{self, COMPOSITION_HEADER_LEN},
    layout::{self, FieldSpec, Store},
};

use super::{Decoded, Error, Height, add_timestamp, skip_user_id};

/// Optional fields following the header, in wire order.
///
/// Bit 12, marking a multi-packet measurement, gates no bytes.
pub const LAYOUT: [FieldSpec<Decoded>; 11] = [
    FieldSpec {
        bit: CompositionFlags::TIMESTAMP,
        store: Store::DateTime(add_timestamp),
    },
    FieldSpec {
        bit: CompositionFlags::USER_ID,
        store: Store::U8(skip_user_id),
    },
    FieldSpec {
        bit: CompositionFlags::BASAL_METABOLISM,
        store: Store::U16(|o: &mut Decoded, v, _| {
            o.measurement.basal_metabolism = Some(joules_to_kcal(v))
        }),
    },
    FieldSpec {
        bit: CompositionFlags::MUSCLE_PERCENTAGE,
        store: Store::U16(|o: &mut Decoded, v, _| {
            o.measurement.muscle_percentage = Some(v as f32 / 10.0)
        }),
    },
    FieldSpec {
        bit: CompositionFlags::MUSCLE_MASS,
        store: Store::U16(|o: &mut Decoded, v, u| o.measurement.muscle_mass = Some(u.scale(v))),
    },
    FieldSpec {
        bit: CompositionFlags::FAT_FREE_MASS,
        store: Store::U16(|o: &mut Decoded, v, u| o.measurement.fat_free_mass = Some(u.scale(v))),
    },
    FieldSpec {
        bit: CompositionFlags::SOFT_LEAN_MASS,
        store: Store::U16(|o: &mut Decoded, v, u| o.measurement.soft_lean_mass = Some(u.scale(v))),
    },
    FieldSpec {
        bit: CompositionFlags::BODY_WATER_MASS,
        store: Store::U16(|o: &mut Decoded, v, u| o.measurement.body_water_mass = Some(u.scale(v))),
    },
    FieldSpec {
        bit: CompositionFlags::IMPEDANCE,
        store: Store::U16(|o: &mut Decoded, v, _| o.measurement.impedance = Some(v as f32 / 10.0)),
    },
    FieldSpec {
        bit: CompositionFlags::WEIGHT,
        store: Store::U16(|o: &mut Decoded, v, u| o.measurement.weight = Some(u.scale(v))),
    },
    FieldSpec {
        bit: CompositionFlags::HEIGHT,
        store: Store::U16(add_height),
    },
];

/// Decode a body-composition measurement payload.
///
/// The body fat percentage is always present. If the payload is shorter than
/// its flags declare, no partial record is returned.
pub fn decode(r: &[u8]) -> Result<Decoded, Error> {
    let truncated = |required| Error::TruncatedPayload {
        required,
        found: r.len(),
    };

    let i = &mut 0;
    let (flags, body_fat) =
        header::composition(layout::take(r, i).map_err(|_| truncated(COMPOSITION_HEADER_LEN))?);

    let required = layout::required_len(COMPOSITION_HEADER_LEN, &LAYOUT, &flags);
    if r.len() < required {
        Err(truncated(required))?;
    }

    let mut o = Decoded {
        continues: flags.is_multi_packet(),
        ..Decoded::default()
    };
    o.measurement.body_fat = Some(body_fat as f32 / 10.0);

    layout::walk(&LAYOUT, &flags, r, *i, &mut o).map_err(|_| truncated(required))?;

    Ok(o)
}

/// Convert an energy in joules to whole kilocalories, rounding half up.
pub fn joules_to_kcal(joules: u16) -> u16 {
    // round(joules / 4.1868), in integers.
    ((joules as u32 * 10_000 + 20_934) / 41_868) as u16
}

fn add_height(o: &mut Decoded, v: u16, _: MassUnit) {
    o.measurement.height = Some(Height::Raw(v));
}

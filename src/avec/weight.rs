//! Weight measurement decoder.

use crate::sans::{
    flags::{Flags, MassUnit, WeightFlags},
    header::{self, WEIGHT_HEADER_LEN},
    layout::{self, FieldSpec, Store},
};

use super::{Decoded, Error, Height, add_timestamp, skip_user_id};

/// Optional fields following the header, in wire order.
const LAYOUT: [FieldSpec<Decoded>; 4] = [
    FieldSpec {
        bit: WeightFlags::TIMESTAMP,
        store: Store::DateTime(add_timestamp),
    },
    FieldSpec {
        bit: WeightFlags::USER_ID,
        store: Store::U8(skip_user_id),
    },
    FieldSpec {
        bit: WeightFlags::BMI_AND_HEIGHT,
        store: Store::U16(add_bmi),
    },
    FieldSpec {
        bit: WeightFlags::BMI_AND_HEIGHT,
        store: Store::U16(add_height),
    },
];

/// Decode a weight measurement payload.
///
/// The weight is always present. A malformed timestamp is recovered from, and
/// reported on the returned [`Decoded`].
pub fn decode(r: &[u8]) -> Result<Decoded, Error> {
    let truncated = |required| Error::TruncatedPayload {
        required,
        found: r.len(),
    };

    let i = &mut 0;
    let (flags, weight) =
        header::weight(layout::take(r, i).map_err(|_| truncated(WEIGHT_HEADER_LEN))?);

    let required = layout::required_len(WEIGHT_HEADER_LEN, &LAYOUT, &flags);
    if r.len() < required {
        Err(truncated(required))?;
    }

    let mut o = Decoded::default();
    o.measurement.weight = Some(flags.unit().scale(weight));

    layout::walk(&LAYOUT, &flags, r, *i, &mut o).map_err(|_| truncated(required))?;

    Ok(o)
}

fn add_bmi(o: &mut Decoded, v: u16, _: MassUnit) {
    o.measurement.bmi = Some(v as f32 / 10.0);
}

fn add_height(o: &mut Decoded, v: u16, _: MassUnit) {
    o.measurement.height = Some(Height::Meters(v as f32 / 1000.0));
}

//! Flag words gating optional message fields.

use tartan_bitfield::bitfield;

/// Access to the presence and unit bits of a message's flag word.
pub trait Flags {
    /// Whether bit number `bit` is set.
    fn is_set(&self, bit: u8) -> bool;

    /// The unit selected by bit 0, applied to every mass in the message.
    fn unit(&self) -> MassUnit;
}

bitfield! {
    /// Flag byte leading a weight measurement.
    pub struct WeightFlags(u8) {
        [0] pub is_imperial,
    }
}

impl WeightFlags {
    pub const TIMESTAMP: u8 = 1;
    pub const USER_ID: u8 = 2;
    /// Gates the BMI and the height, in that order.
    pub const BMI_AND_HEIGHT: u8 = 3;

    pub(crate) fn read(r: u8) -> Self {
        WeightFlags(r)
    }
}

impl Flags for WeightFlags {
    fn is_set(&self, bit: u8) -> bool {
        bit < 8 && self.0 & (1 << bit) != 0
    }

    fn unit(&self) -> MassUnit {
        MassUnit::from_flag(self.is_imperial())
    }
}

bitfield! {
    /// Flag word leading a body-composition measurement.
    pub struct CompositionFlags(u16) {
        [0] pub is_imperial,
        // The measurement continues in a follow-up notification.
        [12] pub is_multi_packet,
    }
}

impl CompositionFlags {
    pub const TIMESTAMP: u8 = 1;
    pub const USER_ID: u8 = 2;
    pub const BASAL_METABOLISM: u8 = 3;
    pub const MUSCLE_PERCENTAGE: u8 = 4;
    pub const MUSCLE_MASS: u8 = 5;
    pub const FAT_FREE_MASS: u8 = 6;
    pub const SOFT_LEAN_MASS: u8 = 7;
    pub const BODY_WATER_MASS: u8 = 8;
    pub const IMPEDANCE: u8 = 9;
    pub const WEIGHT: u8 = 10;
    pub const HEIGHT: u8 = 11;

    pub(crate) fn read(r: u16) -> Self {
        CompositionFlags(r)
    }
}

impl Flags for CompositionFlags {
    fn is_set(&self, bit: u8) -> bool {
        bit < 16 && self.0 & (1 << bit) != 0
    }

    fn unit(&self) -> MassUnit {
        MassUnit::from_flag(self.is_imperial())
    }
}

/// Unit system of the mass fields in a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MassUnit {
    /// Resolution of 0.005 kg.
    Kilogram,
    /// Resolution of 0.01, pound-derived.
    Pound,
}

impl MassUnit {
    fn from_flag(is_imperial: bool) -> Self {
        if is_imperial {
            Self::Pound
        } else {
            Self::Kilogram
        }
    }

    /// Scale a raw mass value into kilograms.
    ///
    /// Equivalent to multiplying by 0.005 (kilogram) or 0.01 (pound). The
    /// multiplier already encodes the kilogram-equivalent scale, so no further
    /// conversion is applied.
    pub fn scale(self, raw: u16) -> f32 {
        let divisor = match self {
            Self::Kilogram => 200.0,
            Self::Pound => 100.0,
        };

        raw as f32 / divisor
    }
}

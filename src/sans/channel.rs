//! Notification channels published by the scale.

use core::fmt;

use thiserror::Error;

/// Mask selecting the 16-bit assigned number within a Bluetooth base UUID.
const ASSIGNED_NUMBER_MASK: u128 = 0x0000_FFFF_0000_0000_0000_0000_0000_0000;

/// The Bluetooth base UUID, `00000000-0000-1000-8000-00805F9B34FB`.
const BASE_UUID: u128 = 0x0000_0000_0000_1000_8000_0080_5F9B_34FB;

/// Expand a 16-bit assigned number onto the Bluetooth base UUID.
pub const fn from_assigned_number(n: u16) -> u128 {
    BASE_UUID | ((n as u128) << 96)
}

/// A notification channel, selecting the binary layout of its payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationChannel {
    /// The weight measurement characteristic of the weight scale service.
    WeightMeasurement,
    /// The body composition measurement characteristic of the body
    /// composition service.
    BodyCompositionMeasurement,
}

impl NotificationChannel {
    /// Assigned number of the characteristic carrying this channel.
    pub const fn characteristic(self) -> u16 {
        match self {
            Self::WeightMeasurement => 0x2A9D,
            Self::BodyCompositionMeasurement => 0x2A9C,
        }
    }

    /// Assigned number of the service containing this channel.
    pub const fn service(self) -> u16 {
        match self {
            Self::WeightMeasurement => 0x181D,
            Self::BodyCompositionMeasurement => 0x181B,
        }
    }

    /// Full 128-bit UUID of the characteristic carrying this channel.
    pub const fn characteristic_uuid(self) -> u128 {
        from_assigned_number(self.characteristic())
    }

    /// Full 128-bit UUID of the service containing this channel.
    pub const fn service_uuid(self) -> u128 {
        from_assigned_number(self.service())
    }
}

impl fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WeightMeasurement => "weight-measurement",
            Self::BodyCompositionMeasurement => "body-composition-measurement",
        })
    }
}

/// A characteristic not carrying any known notification channel.
///
/// Holds the full 128-bit UUID of the characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unknown notification channel ({0:032X}).")]
pub struct UnknownChannel(pub u128);

impl TryFrom<u128> for NotificationChannel {
    type Error = UnknownChannel;

    fn try_from(uuid: u128) -> Result<Self, Self::Error> {
        if uuid & !ASSIGNED_NUMBER_MASK != BASE_UUID {
            Err(UnknownChannel(uuid))?;
        }

        Self::try_from((uuid >> 96) as u16).map_err(|_| UnknownChannel(uuid))
    }
}

impl TryFrom<u16> for NotificationChannel {
    type Error = UnknownChannel;

    fn try_from(n: u16) -> Result<Self, Self::Error> {
        match n {
            0x2A9D => Ok(Self::WeightMeasurement),
            0x2A9C => Ok(Self::BodyCompositionMeasurement),
            _ => Err(UnknownChannel(from_assigned_number(n))),
        }
    }
}

#[cfg(feature = "uuid")]
impl TryFrom<uuid::Uuid> for NotificationChannel {
    type Error = UnknownChannel;

    fn try_from(uuid: uuid::Uuid) -> Result<Self, Self::Error> {
        Self::try_from(uuid.as_u128())
    }
}

#[cfg(feature = "uuid")]
impl From<NotificationChannel> for uuid::Uuid {
    fn from(channel: NotificationChannel) -> Self {
        uuid::Uuid::from_u128(channel.characteristic_uuid())
    }
}

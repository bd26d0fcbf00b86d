//! Convenience interfaces for decoding measurements and driving a session.
//!
//! The functions in this module decode a single notification payload into a
//! [`ScaleMeasurement`]. They are pure, and may be called concurrently for
//! unrelated payloads. [`decode`] dispatches on the notification channel;
//! [`weight::decode`] and [`composition::decode`] handle one layout each.
//!
//! A [`Session`] wraps these for a single connection, sequencing setup,
//! reassembling multi-packet body-composition measurements, and reporting to
//! an injected [`Diagnostics`] sink.

pub mod composition;
pub mod diagnostics;
pub mod preview;
pub mod sequencer;
pub mod session;
pub mod weight;

pub use diagnostics::Diagnostics;
#[cfg(feature = "tracing")]
pub use diagnostics::TracingDiagnostics;
pub use sequencer::{Advance, Sequencer, advance};
pub use session::{Config, Session};

use thiserror::Error;

use crate::sans::{
    channel::{NotificationChannel, UnknownChannel},
    datetime::{DATE_TIME_LEN, DateTime, TimestampError},
};

/// Errors occurring while handling a notification.
///
/// Every error is local to a single notification, and none end a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The payload is shorter than its own flags declare.
    #[error("Payload of {found} bytes is shorter than the {required} bytes its flags declare.")]
    TruncatedPayload { required: usize, found: usize },
    /// A date-time field holds an invalid calendar date.
    ///
    /// Decoding recovers from this error; see [`Decoded::timestamp_error`].
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(#[from] TimestampError),
    /// The notification arrived on an unrecognized channel.
    #[error(transparent)]
    UnknownChannel(#[from] UnknownChannel),
    /// A multi-packet measurement expired before it was completed.
    #[error("Multi-packet measurement expired before its continuation arrived.")]
    IncompleteMultiPacketMeasurement,
}

/// Decode a notification payload received on a channel.
pub fn decode(channel: NotificationChannel, r: &[u8]) -> Result<Decoded, Error> {
    match channel {
        NotificationChannel::WeightMeasurement => weight::decode(r),
        NotificationChannel::BodyCompositionMeasurement => composition::decode(r),
    }
}

/// The outcome of decoding a single payload.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Decoded {
    /// The decoded measurement.
    pub measurement: ScaleMeasurement,
    /// The error validating the timestamp, if one was present but malformed.
    ///
    /// The timestamp of the measurement is then unknown.
    pub timestamp_error: Option<TimestampError>,
    /// Whether the measurement continues in a follow-up notification.
    pub continues: bool,
}

/// A height, in the scale of the message it was decoded from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Height {
    /// From a weight measurement, in meters.
    Meters(f32),
    /// From a body-composition measurement, unscaled.
    Raw(u16),
}

/// A measurement taken by the scale.
///
/// Fields absent from the decoded payload are `None`. Masses are in
/// kilograms, percentages in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScaleMeasurement {
    weight: Option<f32>,
    timestamp: Option<DateTime>,
    bmi: Option<f32>,
    height: Option<Height>,
    body_fat: Option<f32>,
    basal_metabolism: Option<u16>,
    muscle_percentage: Option<f32>,
    muscle_mass: Option<f32>,
    fat_free_mass: Option<f32>,
    soft_lean_mass: Option<f32>,
    body_water_mass: Option<f32>,
    impedance: Option<f32>,
}

impl ScaleMeasurement {
    pub fn weight(&self) -> Option<f32> {
        self.weight
    }

    pub fn timestamp(&self) -> Option<DateTime> {
        self.timestamp
    }

    /// Body mass index, from weight measurements only.
    pub fn bmi(&self) -> Option<f32> {
        self.bmi
    }

    pub fn height(&self) -> Option<Height> {
        self.height
    }

    pub fn body_fat(&self) -> Option<f32> {
        self.body_fat
    }

    /// Basal metabolic rate, in kilocalories.
    pub fn basal_metabolism(&self) -> Option<u16> {
        self.basal_metabolism
    }

    pub fn muscle_percentage(&self) -> Option<f32> {
        self.muscle_percentage
    }

    pub fn muscle_mass(&self) -> Option<f32> {
        self.muscle_mass
    }

    pub fn fat_free_mass(&self) -> Option<f32> {
        self.fat_free_mass
    }

    pub fn soft_lean_mass(&self) -> Option<f32> {
        self.soft_lean_mass
    }

    pub fn body_water_mass(&self) -> Option<f32> {
        self.body_water_mass
    }

    /// Impedance, in ohms.
    pub fn impedance(&self) -> Option<f32> {
        self.impedance
    }

    /// Combine this measurement with a continuation of it.
    ///
    /// Fields known to this measurement take precedence.
    pub fn merge(self, other: Self) -> Self {
        Self {
            weight: self.weight.or(other.weight),
            timestamp: self.timestamp.or(other.timestamp),
            bmi: self.bmi.or(other.bmi),
            height: self.height.or(other.height),
            body_fat: self.body_fat.or(other.body_fat),
            basal_metabolism: self.basal_metabolism.or(other.basal_metabolism),
            muscle_percentage: self.muscle_percentage.or(other.muscle_percentage),
            muscle_mass: self.muscle_mass.or(other.muscle_mass),
            fat_free_mass: self.fat_free_mass.or(other.fat_free_mass),
            soft_lean_mass: self.soft_lean_mass.or(other.soft_lean_mass),
            body_water_mass: self.body_water_mass.or(other.body_water_mass),
            impedance: self.impedance.or(other.impedance),
        }
    }
}

// Receivers shared by both layouts.

fn add_timestamp(o: &mut Decoded, r: [u8; DATE_TIME_LEN]) {
    match DateTime::decode(r) {
        Ok(timestamp) => o.measurement.timestamp = Some(timestamp),
        Err(err) => o.timestamp_error = Some(err),
    }
}

/// The user id is consumed but not kept.
fn skip_user_id(_: &mut Decoded, _: u8) {}

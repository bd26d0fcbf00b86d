//! Diagnostics sinks for session events.

use crate::sans::channel::NotificationChannel;

use super::{Error, ScaleMeasurement, preview::VendorPreview};

/// Receive events from a [`super::Session`].
///
/// The host supplies a sink when creating a session; nothing in this crate logs
/// globally. The default implementation of each method ignores the event, and
/// `()` is a sink ignoring every event.
#[allow(unused_variables)]
pub trait Diagnostics {
    /// A subscription to a channel was requested.
    fn subscribe(&mut self, channel: NotificationChannel) {}
    /// A notification was received, before decoding.
    fn notification(&mut self, channel: NotificationChannel, payload: &[u8]) {}
    /// A notification was received on a characteristic that is not a known
    /// channel, identified by its 128-bit UUID.
    fn unknown_notification(&mut self, uuid: u128, payload: &[u8]) {}
    /// A notification carried a vendor preview.
    fn preview(&mut self, preview: &VendorPreview) {}
    /// A fragment of a multi-packet measurement was buffered.
    fn pending(&mut self, measurement: &ScaleMeasurement) {}
    /// A complete measurement was decoded.
    fn decoded(&mut self, measurement: &ScaleMeasurement) {}
    /// An error was recovered from, and decoding continued.
    fn recovered(&mut self, err: &Error) {}
    /// A message, or a partial measurement, was dropped.
    fn dropped(&mut self, err: &Error) {}
}

impl Diagnostics for () {}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn subscribe(&mut self, channel: NotificationChannel) {
        (**self).subscribe(channel)
    }
    fn notification(&mut self, channel: NotificationChannel, payload: &[u8]) {
        (**self).notification(channel, payload)
    }
    fn unknown_notification(&mut self, uuid: u128, payload: &[u8]) {
        (**self).unknown_notification(uuid, payload)
    }
    fn preview(&mut self, preview: &VendorPreview) {
        (**self).preview(preview)
    }
    fn pending(&mut self, measurement: &ScaleMeasurement) {
        (**self).pending(measurement)
    }
    fn decoded(&mut self, measurement: &ScaleMeasurement) {
        (**self).decoded(measurement)
    }
    fn recovered(&mut self, err: &Error) {
        (**self).recovered(err)
    }
    fn dropped(&mut self, err: &Error) {
        (**self).dropped(err)
    }
}

/// A sink emitting `tracing` events.
///
/// Traffic is emitted at debug level, and recovered or dropped messages at warn
/// level.
///
/// _Requires Cargo feature `tracing`._
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

#[cfg(feature = "tracing")]
impl Diagnostics for TracingDiagnostics {
    fn subscribe(&mut self, channel: NotificationChannel) {
        tracing::debug!(%channel, "subscribing to notifications");
    }

    fn notification(&mut self, channel: NotificationChannel, payload: &[u8]) {
        tracing::debug!(%channel, payload = %Hex(payload), "notification received");
    }

    fn unknown_notification(&mut self, uuid: u128, payload: &[u8]) {
        tracing::debug!(
            uuid = format_args!("{uuid:032x}"),
            payload = %Hex(payload),
            "notification received on unknown characteristic"
        );
    }

    fn preview(&mut self, preview: &VendorPreview) {
        match &preview.timestamp {
            Ok(timestamp) => {
                tracing::debug!(weight = preview.weight, %timestamp, "vendor preview")
            }
            Err(err) => tracing::debug!(weight = preview.weight, %err, "vendor preview"),
        }
    }

    fn pending(&mut self, measurement: &ScaleMeasurement) {
        tracing::debug!(?measurement, "awaiting continuation of measurement");
    }

    fn decoded(&mut self, measurement: &ScaleMeasurement) {
        tracing::debug!(?measurement, "measurement decoded");
    }

    fn recovered(&mut self, err: &Error) {
        tracing::warn!(%err, "recovered from decode error");
    }

    fn dropped(&mut self, err: &Error) {
        tracing::warn!(%err, "dropped message");
    }
}

/// Formats bytes as contiguous uppercase hexadecimal.
#[cfg(feature = "tracing")]
struct Hex<'a>(&'a [u8]);

#[cfg(feature = "tracing")]
impl core::fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{b:02X}"))
    }
}

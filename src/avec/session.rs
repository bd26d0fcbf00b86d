//! Per-connection session state.
//!
//! A [`Session`] owns the only mutable state of a connection: its setup step,
//! and a body-composition measurement awaiting continuation. It must not be
//! shared between connections.
//!
//! A measurement with the multi-packet flag set continues in later
//! notifications. Each fragment is a complete body-composition message, and
//! fragments are merged, earliest first, until one arrives without the flag.
//! The pending measurement expires [`Config::reassembly_timeout`] after its
//! latest fragment and is then discarded with
//! [`Error::IncompleteMultiPacketMeasurement`].
//!
//! Sessions never read a clock. The host supplies the current time as a
//! monotonic [`Duration`] from an epoch of its choosing, and calls
//! [`Session::poll_expired`] to learn of discarded measurements. A measurement
//! found expired while handling a later notification is held back until that
//! call, so no expiry goes unreported.

use core::time::Duration;

use crate::sans::channel::NotificationChannel;

use super::{
    Advance, Decoded, Diagnostics, Error, ScaleMeasurement, Sequencer, decode, preview,
};

/// Runtime configuration of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    reassembly_timeout: Duration,
    reassemble: bool,
}

impl Config {
    /// Default lifetime of a pending multi-packet measurement.
    pub const DEFAULT_REASSEMBLY_TIMEOUT: Duration = Duration::from_secs(5);

    /// Set the lifetime of a pending multi-packet measurement.
    pub fn with_reassembly_timeout(mut self, timeout: Duration) -> Self {
        self.reassembly_timeout = timeout;
        self
    }

    /// Enable or disable multi-packet reassembly.
    ///
    /// When disabled, the first fragment of a multi-packet measurement is
    /// immediately dropped with [`Error::IncompleteMultiPacketMeasurement`].
    pub fn with_reassembly(mut self, reassemble: bool) -> Self {
        self.reassemble = reassemble;
        self
    }

    pub fn reassembly_timeout(&self) -> Duration {
        self.reassembly_timeout
    }

    pub fn reassemble(&self) -> bool {
        self.reassemble
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reassembly_timeout: Self::DEFAULT_REASSEMBLY_TIMEOUT,
            reassemble: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    measurement: ScaleMeasurement,
    deadline: Duration,
}

/// Setup, decoding and reassembly for a single connection.
#[derive(Debug)]
pub struct Session<D = ()> {
    config: Config,
    sequencer: Sequencer,
    pending: Option<Pending>,
    expired: bool,
    diagnostics: D,
}

impl Session {
    /// Create a session reporting to no diagnostics sink.
    pub fn new(config: Config) -> Self {
        Self::with_diagnostics(config, ())
    }
}

impl<D: Diagnostics> Session<D> {
    /// Create a session reporting to a diagnostics sink.
    pub fn with_diagnostics(config: Config, diagnostics: D) -> Self {
        Self {
            config,
            sequencer: Sequencer::new(),
            pending: None,
            expired: false,
            diagnostics,
        }
    }

    /// Issue the next setup action.
    ///
    /// See [`Sequencer::advance`].
    pub fn advance(&mut self) -> Advance {
        let advance = self.sequencer.advance();

        if let Advance::Continue(channel) = advance {
            self.diagnostics.subscribe(channel);
        }

        advance
    }

    /// Handle a notification received at time `now`.
    ///
    /// Returns a measurement if one was completed by this notification, or
    /// `None` if it was buffered awaiting continuation. Errors are reported to
    /// the diagnostics sink before being returned, and leave the session
    /// usable.
    pub fn on_notify(
        &mut self,
        channel: NotificationChannel,
        r: &[u8],
        now: Duration,
    ) -> Result<Option<ScaleMeasurement>, Error> {
        self.diagnostics.notification(channel, r);

        if let Some(preview) = preview::peek(r) {
            self.diagnostics.preview(&preview);
        }

        let result = self.receive(channel, r, now);

        match &result {
            Ok(Some(measurement)) => self.diagnostics.decoded(measurement),
            Ok(None) => {}
            Err(err) => self.diagnostics.dropped(err),
        }

        result
    }

    /// Handle a notification received at time `now` on a characteristic
    /// identified by its 128-bit UUID.
    ///
    /// See [`Session::on_notify`].
    pub fn on_notify_uuid(
        &mut self,
        uuid: u128,
        r: &[u8],
        now: Duration,
    ) -> Result<Option<ScaleMeasurement>, Error> {
        match NotificationChannel::try_from(uuid) {
            Ok(channel) => self.on_notify(channel, r, now),
            Err(err) => {
                self.diagnostics.unknown_notification(uuid, r);
                let err = Error::from(err);
                self.diagnostics.dropped(&err);
                Err(err)
            }
        }
    }

    /// Discard a pending measurement whose deadline has passed at time `now`.
    ///
    /// Also returns [`Error::IncompleteMultiPacketMeasurement`] once for a
    /// measurement that expired while [`Session::on_notify`] was handling a
    /// later notification.
    pub fn poll_expired(&mut self, now: Duration) -> Result<(), Error> {
        if let Some(err) = self.expire(now) {
            self.diagnostics.dropped(&err);
            Err(err)?;
        }

        if core::mem::take(&mut self.expired) {
            Err(Error::IncompleteMultiPacketMeasurement)?;
        }

        Ok(())
    }

    /// The time at which a pending measurement expires, if there is one.
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether an expired measurement awaits [`Session::poll_expired`].
    pub fn has_expired(&self) -> bool {
        self.expired
    }

    pub fn is_setup_finished(&self) -> bool {
        self.sequencer.is_finished()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> D {
        self.diagnostics
    }

    fn receive(
        &mut self,
        channel: NotificationChannel,
        r: &[u8],
        now: Duration,
    ) -> Result<Option<ScaleMeasurement>, Error> {
        if let Some(err) = self.expire(now) {
            self.diagnostics.dropped(&err);
            self.expired = true;
        }

        let Decoded {
            measurement,
            timestamp_error,
            continues,
        } = decode(channel, r)?;

        if let Some(err) = timestamp_error {
            self.diagnostics.recovered(&Error::MalformedTimestamp(err));
        }

        if channel == NotificationChannel::WeightMeasurement {
            return Ok(Some(measurement));
        }

        let measurement = match self.pending.take() {
            Some(pending) => pending.measurement.merge(measurement),
            None => measurement,
        };

        if !continues {
            return Ok(Some(measurement));
        }

        if !self.config.reassemble {
            Err(Error::IncompleteMultiPacketMeasurement)?;
        }

        self.diagnostics.pending(&measurement);
        self.pending = Some(Pending {
            measurement,
            deadline: now.saturating_add(self.config.reassembly_timeout),
        });

        Ok(None)
    }

    fn expire(&mut self, now: Duration) -> Option<Error> {
        match self.pending {
            Some(Pending { deadline, .. }) if now >= deadline => {
                self.pending = None;
                Some(Error::IncompleteMultiPacketMeasurement)
            }
            _ => None,
        }
    }
}

//! States sequencing connection setup.
//!
//! Setup is a fixed, ordered list of one-time actions, each subscribing to a
//! notification channel. [`ConnectionStep`] is the state token for a pending
//! action; advancing it yields the channel to subscribe to, and either the next
//! step or [`Finished`].

use either::Either::{self, Left, Right};

use super::channel::NotificationChannel;

/// Channels subscribed to during setup, in order.
const SUBSCRIPTIONS: [NotificationChannel; 2] = [
    NotificationChannel::WeightMeasurement,
    NotificationChannel::BodyCompositionMeasurement,
];

/// State token for a setup action still to be issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionStep(u8);

impl ConnectionStep {
    /// The first step of a session.
    pub const FIRST: Self = ConnectionStep(0);

    /// Resolve a step index into a state token.
    ///
    /// Indices past the last action resolve to [`Finished`].
    pub fn at(index: usize) -> Either<ConnectionStep, Finished> {
        if index < SUBSCRIPTIONS.len() {
            Left(ConnectionStep(index as u8))
        } else {
            Right(Finished(()))
        }
    }

    /// Index of this step, counting from zero.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Channel subscribed to by this step.
    pub fn channel(self) -> NotificationChannel {
        SUBSCRIPTIONS[self.index()]
    }

    /// Transition to another state by issuing this step's action.
    ///
    /// Returns the channel to subscribe to, and a successor state token.
    pub fn advance(self) -> (NotificationChannel, Either<ConnectionStep, Finished>) {
        (self.channel(), Self::at(self.index() + 1))
    }
}

/// State token for a session whose setup is complete.
///
/// This state is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Finished(pub(super) ());

impl Finished {
    pub fn advance(self) -> Finished {
        self
    }
}

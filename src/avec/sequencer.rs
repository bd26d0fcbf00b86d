//! Connection setup sequencing.

use either::Either::{self, Left, Right};

use crate::sans::{
    channel::NotificationChannel,
    sequence::{ConnectionStep, Finished},
};

/// The outcome of advancing connection setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Subscribe to a channel, then advance again.
    Continue(NotificationChannel),
    /// Setup is complete.
    Done,
}

/// Decide the setup action for a step index, counting from zero.
///
/// Only decides what to subscribe to next; whether an earlier subscription
/// succeeded is reported by the transport and is not considered.
pub fn advance(index: usize) -> Advance {
    match ConnectionStep::at(index) {
        Left(step) => Advance::Continue(step.channel()),
        Right(_) => Advance::Done,
    }
}

/// Connection setup for a single session.
///
/// Each call to [`Sequencer::advance`] issues the next action exactly once.
/// Once setup is complete, every further call returns [`Advance::Done`].
#[derive(Debug, Clone)]
pub struct Sequencer {
    state: Either<ConnectionStep, Finished>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self {
            state: Left(ConnectionStep::FIRST),
        }
    }

    pub fn advance(&mut self) -> Advance {
        let (advance, state) = match self.state {
            Left(step) => {
                let (channel, successor) = step.advance();
                (Advance::Continue(channel), successor)
            }
            Right(finished) => (Advance::Done, Right(finished.advance())),
        };

        self.state = state;
        advance
    }

    /// The step to be issued by the next call to [`Sequencer::advance`], if
    /// setup is not complete.
    pub fn step(&self) -> Option<ConnectionStep> {
        self.state.left()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_right()
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

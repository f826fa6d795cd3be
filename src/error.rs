//! Play engine errors
//!
//! Illegal plays are ordinary outcomes the caller may retry. Inconsistent
//! state and search exhaustion mean the deal's bookkeeping is corrupt and the
//! deal must be aborted.

use crate::cards::Card;
use crate::types::{seat_name, Seat};

pub type Result<T> = std::result::Result<T, PlayError>;

fn name(seat: &Seat) -> &'static str {
    seat_name(*seat)
}

/// Why a card was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    /// The seat to move does not hold the card
    NotHeld,
    /// The seat holds the led suit and tried to play another
    MustFollowSuit,
}

impl std::fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalReason::NotHeld => write!(f, "card not in hand"),
            IllegalReason::MustFollowSuit => write!(f, "must follow suit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    #[error("illegal play of {card} by {}: {reason}", name(.seat))]
    IllegalPlay {
        seat: Seat,
        card: Card,
        reason: IllegalReason,
    },

    #[error("deal is complete, no more cards can be played")]
    DealComplete,

    #[error("inconsistent play state: {0}")]
    InconsistentState(String),

    #[error("no legal card for {} to play", name(.seat))]
    SearchExhausted { seat: Seat },

    #[error("invalid deal: {0}")]
    InvalidDeal(String),

    #[error("invalid contract: {0}")]
    InvalidContract(String),

    #[error("invalid evaluation weights: {0}")]
    InvalidWeights(String),
}

impl PlayError {
    /// Fatal errors mean the deal cannot continue on this state
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PlayError::InconsistentState(_) | PlayError::SearchExhausted { .. }
        )
    }

    pub(crate) fn inconsistent(msg: impl Into<String>) -> Self {
        let err = PlayError::InconsistentState(msg.into());
        tracing::error!(error = %err, "aborting deal");
        err
    }
}

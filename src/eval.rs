//! Static position evaluation for the search
//!
//! Scores are computed for North-South and negated for East-West, so the
//! evaluation is exactly zero-sum.

use crate::error::PlayError;
use crate::hands::Hands;
use crate::position::Position;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Weights for the two evaluation terms.
///
/// A trick already won must be worth more than a winner still to cash, and
/// neither may be negative. [`EvalWeights::check`] enforces this and the
/// search refuses weights that fail it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Value of a trick already won
    pub trick: i32,
    /// Value of a certain future winner
    pub winner: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            trick: 100,
            winner: 40,
        }
    }
}

impl EvalWeights {
    /// Largest accepted trick weight; 13 tricks and 13 winners a side stay
    /// far from overflow
    pub const MAX_TRICK: i32 = 1_000_000;

    /// Why these weights cannot drive a search, if they can't
    pub fn check(&self) -> Result<(), String> {
        if self.winner < 0 || self.trick <= self.winner {
            return Err(format!(
                "eval weights must satisfy trick > winner >= 0, got trick {} winner {}",
                self.trick, self.winner
            ));
        }
        if self.trick > Self::MAX_TRICK {
            return Err(format!("eval.trick {} is too large", self.trick));
        }
        Ok(())
    }
}

/// Score of `pos` for `side`; higher is better for that side
pub fn evaluate(pos: &Position, side: Partnership, weights: &EvalWeights) -> i32 {
    let ns = evaluate_ns(pos, weights);
    match side {
        Partnership::NorthSouth => ns,
        Partnership::EastWest => -ns,
    }
}

fn evaluate_ns(pos: &Position, weights: &EvalWeights) -> i32 {
    if !pos.is_complete() && pos.hands().max_size() <= 1 {
        return trick_difference(&settle_last_trick(pos)) * weights.trick;
    }

    let tricks = trick_difference(pos);
    if pos.is_complete() {
        return tricks * weights.trick;
    }

    let ns_winners = certain_winners(pos.hands(), pos.trump(), Partnership::NorthSouth);
    let ew_winners = certain_winners(pos.hands(), pos.trump(), Partnership::EastWest);
    tricks * weights.trick + (ns_winners as i32 - ew_winners as i32) * weights.winner
}

fn trick_difference(pos: &Position) -> i32 {
    let tricks = pos.tricks();
    tricks.ns as i32 - tricks.ew as i32
}

/// Play out the final trick: every seat still to play has a single card
fn settle_last_trick(pos: &Position) -> Position {
    let mut last = *pos;
    while !last.is_complete() {
        let seat = last.next_to_play();
        let played = match last.legal_cards().top() {
            Some(card) => last.play(card).map(|_| ()),
            None => Err(PlayError::SearchExhausted { seat }),
        };
        // Unequal hands only; the evaluation falls back to tricks so far
        debug_assert!(played.is_ok(), "settling the last trick: {played:?}");
        if let Err(err) = played {
            tracing::error!(error = %err, "last trick cannot be settled");
            break;
        }
    }
    last
}

/// Top tricks `side` can count on: in each suit, the run of highest
/// remaining cards held by the side, no longer than its longest holding.
/// With trumps out against the side, only its trump winners count.
pub fn certain_winners(hands: &Hands, trump: Option<Suit>, side: Partnership) -> usize {
    let ours = hands.partnership_cards(side);
    let opponents_ruff = trump.is_some_and(|t| {
        !hands
            .partnership_cards(side.opponent())
            .suit(t)
            .is_empty()
    });
    let (first, second) = seats_of(side);
    let all = hands.all_cards();

    let mut winners = 0;
    for suit in 0..NUM_SUITS {
        if opponents_ruff && trump != Some(suit) {
            continue;
        }
        let run = all.suit(suit).iter().take_while(|&c| ours.have(c)).count();
        let longest = hands[first].suit(suit).size().max(hands[second].suit(suit).size());
        winners += run.min(longest);
    }
    winners
}

fn seats_of(side: Partnership) -> (Seat, Seat) {
    match side {
        Partnership::NorthSouth => (NORTH, SOUTH),
        Partnership::EastWest => (EAST, WEST),
    }
}

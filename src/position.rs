//! Turn sequencing over a compact, copyable table position
//!
//! `Position` carries only what play needs to continue: the four remaining
//! hands, the trick in progress, whose turn it is and the tricks taken. The
//! search copies it per node; `PlayState` wraps one with the deal's history.

use crate::cards::{Card, Cards};
use crate::error::{PlayError, Result};
use crate::hands::Hands;
use crate::play;
use crate::trick::Trick;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Tricks won by each partnership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrickCounts {
    pub ns: u8,
    pub ew: u8,
}

impl TrickCounts {
    #[inline]
    pub fn get(&self, side: Partnership) -> u8 {
        match side {
            Partnership::NorthSouth => self.ns,
            Partnership::EastWest => self.ew,
        }
    }

    #[inline]
    pub fn total(&self) -> u8 {
        self.ns + self.ew
    }

    #[inline]
    fn credit(&mut self, side: Partnership) {
        match side {
            Partnership::NorthSouth => self.ns += 1,
            Partnership::EastWest => self.ew += 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    hands: Hands,
    trick: Trick,
    trump: Option<Suit>,
    next: Seat,
    tricks: TrickCounts,
    total_tricks: u8,
}

impl Position {
    /// A fresh position before the opening lead
    pub fn new(hands: Hands, trump: Option<Suit>, leader: Seat) -> Self {
        Position {
            hands,
            trick: Trick::new(leader),
            trump,
            next: leader,
            tricks: TrickCounts::default(),
            total_tricks: hands.max_size() as u8,
        }
    }

    #[inline]
    pub fn hands(&self) -> &Hands {
        &self.hands
    }

    /// The trick in progress (empty between tricks)
    #[inline]
    pub fn trick(&self) -> &Trick {
        &self.trick
    }

    #[inline]
    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    #[inline]
    pub fn next_to_play(&self) -> Seat {
        self.next
    }

    #[inline]
    pub fn tricks(&self) -> TrickCounts {
        self.tricks
    }

    #[inline]
    pub fn total_tricks(&self) -> u8 {
        self.total_tricks
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.tricks.total() >= self.total_tricks
    }

    /// Legal cards for the seat to move
    #[inline]
    pub fn legal_cards(&self) -> Cards {
        if self.is_complete() {
            return Cards::new();
        }
        play::playable(self.hands[self.next], &self.trick)
    }

    /// Play a card for the seat to move.
    ///
    /// Returns the completed trick when this card was the fourth. Illegal
    /// cards are rejected before anything changes.
    pub fn play(&mut self, card: Card) -> Result<Option<Trick>> {
        if self.is_complete() {
            return Err(PlayError::DealComplete);
        }
        let seat = self.next;
        play::check(card, self.hands[seat], &self.trick)
            .map_err(|reason| PlayError::IllegalPlay { seat, card, reason })?;

        self.trick.push(card, seat)?;
        self.hands[seat].remove(card);

        if !self.trick.is_complete() {
            self.next = next_seat(seat);
            return Ok(None);
        }

        let winner = self.trick.resolve(self.trump)?;
        self.tricks.credit(Partnership::of(winner));
        let done = std::mem::replace(&mut self.trick, Trick::new(winner));
        self.next = winner;
        Ok(Some(done))
    }
}

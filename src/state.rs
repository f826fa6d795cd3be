//! Per-deal play state exposed to the serving layer
//!
//! A `PlayState` belongs to exactly one deal. Every operation is a method on
//! the caller's value; nothing is shared between deals.

use crate::cards::{Card, Cards};
use crate::contract::Contract;
use crate::error::{PlayError, Result};
use crate::hands::Hands;
use crate::play;
use crate::position::{Position, TrickCounts};
use crate::trick::Trick;
use crate::types::*;
use tracing::{debug, warn};

/// What happened when a card was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    pub seat: Seat,
    pub card: Card,
    /// The trick this card completed, with its winner recorded
    pub completed: Option<Trick>,
}

impl PlayOutcome {
    pub fn trick_completed(&self) -> bool {
        self.completed.is_some()
    }

    pub fn trick_winner(&self) -> Option<Seat> {
        self.completed.and_then(|t| t.winner())
    }
}

#[derive(Debug, Clone)]
pub struct PlayState {
    contract: Contract,
    position: Position,
    history: Vec<Trick>,
    deal: Hands,
}

impl PlayState {
    /// Start a deal. Hands must be pairwise disjoint and of equal size
    /// (13 for a full deal, fewer for an ending).
    pub fn start(contract: Contract, hands: Hands) -> Result<Self> {
        let size = hands[NORTH].size();
        if size == 0 || size > TOTAL_TRICKS {
            return Err(PlayError::InvalidDeal(format!(
                "hands must hold 1-13 cards, North holds {size}"
            )));
        }
        if let Some(seat) = (0..NUM_SEATS).find(|&s| hands[s].size() != size) {
            return Err(PlayError::InvalidDeal(format!(
                "{} holds {} cards, North holds {size}",
                seat_name(seat),
                hands[seat].size()
            )));
        }
        if !hands.is_disjoint() {
            return Err(PlayError::InvalidDeal(
                "a card is dealt to more than one hand".to_string(),
            ));
        }

        debug!(%contract, tricks = size, "starting deal");
        Ok(PlayState {
            contract,
            position: Position::new(hands, contract.trump(), contract.opening_leader()),
            history: Vec::with_capacity(size),
            deal: hands,
        })
    }

    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    /// The compact position the AI searches from
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Cards still held by each seat
    pub fn hands(&self) -> &Hands {
        self.position.hands()
    }

    /// The hands as originally dealt
    pub fn deal(&self) -> &Hands {
        &self.deal
    }

    pub fn current_trick(&self) -> &Trick {
        self.position.trick()
    }

    /// Resolved tricks, oldest first
    pub fn history(&self) -> &[Trick] {
        &self.history
    }

    pub fn next_to_play(&self) -> Seat {
        self.position.next_to_play()
    }

    /// Leader of the trick in progress
    pub fn leader(&self) -> Seat {
        self.position.trick().leader()
    }

    pub fn dummy(&self) -> Seat {
        self.contract.dummy()
    }

    pub fn trump(&self) -> Option<Suit> {
        self.position.trump()
    }

    pub fn is_complete(&self) -> bool {
        self.position.is_complete()
    }

    pub fn trick_counts(&self) -> TrickCounts {
        self.position.tricks()
    }

    pub fn declarer_tricks(&self) -> u8 {
        self.trick_counts().get(self.contract.declaring_side())
    }

    pub fn defender_tricks(&self) -> u8 {
        self.trick_counts().get(self.contract.declaring_side().opponent())
    }

    /// Cards `seat` may legally play against the current trick. Turn is not
    /// enforced here; `apply_play` does that.
    pub fn legal_cards(&self, seat: Seat) -> Cards {
        if self.is_complete() {
            return Cards::new();
        }
        play::playable(self.hands()[seat], self.current_trick())
    }

    /// True if the seat to move may play `card`
    pub fn is_legal(&self, card: Card) -> bool {
        !self.is_complete()
            && play::is_legal(card, self.hands()[self.next_to_play()], self.current_trick())
    }

    /// Play `card` for the seat to move. Illegal cards are rejected before any
    /// state changes; the caller may retry.
    pub fn apply_play(&mut self, card: Card) -> Result<PlayOutcome> {
        let seat = self.next_to_play();
        let completed = match self.position.play(card) {
            Ok(completed) => completed,
            Err(err) => {
                if !err.is_fatal() {
                    warn!(seat = seat_name(seat), %card, error = %err, "play rejected");
                }
                return Err(err);
            }
        };

        if let Some(trick) = completed {
            self.history.push(trick);
            debug!(
                trick = self.history.len(),
                leader = seat_name(trick.leader()),
                winner = trick.winner().map(seat_name),
                ns = self.trick_counts().ns,
                ew = self.trick_counts().ew,
                "trick resolved"
            );
            self.check_invariants()?;
        }

        Ok(PlayOutcome {
            seat,
            card,
            completed,
        })
    }

    /// Every card played so far, including the trick in progress
    pub fn played_cards(&self) -> Cards {
        self.history
            .iter()
            .chain(std::iter::once(self.current_trick()))
            .flat_map(|t| t.plays())
            .map(|p| p.card)
            .collect()
    }

    /// Verify the bookkeeping: every dealt card is either still held or
    /// played, exactly once; trick counts match history; each trick was led
    /// by the previous winner.
    pub fn check_invariants(&self) -> Result<()> {
        let held = self.hands();
        let played = self.played_cards();
        let played_count: usize = self.history.len() * NUM_SEATS + self.current_trick().len();

        if !held.is_disjoint() || played.size() != played_count {
            return Err(PlayError::inconsistent("a card is held or played twice"));
        }
        if held.all_cards().union(played) != self.deal.all_cards()
            || !held.all_cards().intersect(played).is_empty()
        {
            return Err(PlayError::inconsistent(
                "held and played cards do not match the deal",
            ));
        }
        if self.trick_counts().total() as usize != self.history.len() {
            return Err(PlayError::inconsistent(format!(
                "trick counts {:?} disagree with {} resolved tricks",
                self.trick_counts(),
                self.history.len()
            )));
        }

        let mut leader = self.contract.opening_leader();
        for (i, trick) in self.history.iter().enumerate() {
            if trick.leader() != leader {
                return Err(PlayError::inconsistent(format!(
                    "trick {} led by {} instead of {}",
                    i + 1,
                    seat_name(trick.leader()),
                    seat_name(leader)
                )));
            }
            leader = trick
                .winner()
                .ok_or_else(|| PlayError::inconsistent(format!("trick {} has no winner", i + 1)))?;
        }
        if self.current_trick().leader() != leader {
            return Err(PlayError::inconsistent("current trick has the wrong leader"));
        }
        Ok(())
    }
}

//! Tricks and trick resolution

use crate::cards::Card;
use crate::error::{PlayError, Result};
use crate::types::*;
use serde::Serialize;

/// A card played to a trick, with the seat that played it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PlayedCard {
    pub card: Card,
    pub seat: Seat,
}

impl PlayedCard {
    pub fn new(card: Card, seat: Seat) -> Self {
        PlayedCard { card, seat }
    }
}

/// One trick: up to four cards in play order, the leader, and the winner
/// once complete. Fixed-size so search nodes stay `Copy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trick {
    leader: Seat,
    plays: [Option<PlayedCard>; NUM_SEATS],
    len: usize,
    winner: Option<Seat>,
}

impl Trick {
    /// An empty trick to be led by `leader`
    pub fn new(leader: Seat) -> Self {
        Trick {
            leader,
            plays: [None; NUM_SEATS],
            len: 0,
            winner: None,
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_complete(&self) -> bool {
        self.len == NUM_SEATS
    }

    /// Winner, set once the trick has been resolved
    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    /// Suit of the first card played
    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays[0].map(|p| p.card.suit())
    }

    /// Seat due to play next, if the trick is not complete
    pub fn next_to_play(&self) -> Option<Seat> {
        (!self.is_complete()).then(|| (self.leader + self.len) % NUM_SEATS)
    }

    pub fn plays(&self) -> impl Iterator<Item = PlayedCard> + '_ {
        self.plays.iter().flatten().copied()
    }

    /// Append a card. The seat must be the one due to play.
    pub fn push(&mut self, card: Card, seat: Seat) -> Result<()> {
        match self.next_to_play() {
            None => Err(PlayError::inconsistent(format!(
                "fifth card {card} played to a complete trick"
            ))),
            Some(expected) if expected != seat => Err(PlayError::inconsistent(format!(
                "{} played {card} but {} was due",
                seat_name(seat),
                seat_name(expected)
            ))),
            Some(_) => {
                self.plays[self.len] = Some(PlayedCard::new(card, seat));
                self.len += 1;
                Ok(())
            }
        }
    }

    /// Resolve a complete trick and record its winner
    pub fn resolve(&mut self, trump: Option<Suit>) -> Result<Seat> {
        let winner = resolve(self, trump)?;
        self.winner = Some(winner);
        Ok(winner)
    }
}

/// Winner of a complete trick: the highest trump if any was played, else the
/// highest card of the led suit.
pub fn resolve(trick: &Trick, trump: Option<Suit>) -> Result<Seat> {
    if !trick.is_complete() {
        return Err(PlayError::inconsistent(format!(
            "cannot resolve a trick holding {} cards",
            trick.len()
        )));
    }
    current_winner(trick, trump)
        .map(|p| p.seat)
        .ok_or_else(|| PlayError::inconsistent("complete trick without cards"))
}

/// Provisional winner of a (possibly partial) trick
pub fn current_winner(trick: &Trick, trump: Option<Suit>) -> Option<PlayedCard> {
    let mut plays = trick.plays();
    let mut best = plays.next()?;
    for play in plays {
        if wins_over(play.card, best.card, trump) {
            best = play;
        }
    }
    Some(best)
}

/// True if `card` beats `current`, the card currently winning the trick
#[inline]
pub fn wins_over(card: Card, current: Card, trump: Option<Suit>) -> bool {
    if card.suit() == current.suit() {
        card.beats_in_suit(current)
    } else {
        trump == Some(card.suit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trick_of(leader: Seat, cards: &[&str]) -> Trick {
        let mut trick = Trick::new(leader);
        for (i, name) in cards.iter().enumerate() {
            let seat = (leader + i) % NUM_SEATS;
            trick.push(name.parse().unwrap(), seat).unwrap();
        }
        trick
    }

    #[test]
    fn test_highest_of_led_suit_wins_no_trump() {
        let trick = trick_of(WEST, &["S5", "SK", "SA", "H2"]);
        assert_eq!(resolve(&trick, None).unwrap(), EAST);
    }

    #[test]
    fn test_off_suit_cannot_win_regardless_of_rank() {
        let trick = trick_of(NORTH, &["C2", "HA", "DA", "SA"]);
        assert_eq!(resolve(&trick, None).unwrap(), NORTH);
        assert_eq!(resolve(&trick, Some(HEART)).unwrap(), EAST);
    }

    #[test]
    fn test_highest_trump_wins() {
        let trick = trick_of(SOUTH, &["DA", "H2", "DK", "H3"]);
        assert_eq!(resolve(&trick, Some(HEART)).unwrap(), EAST);
        assert_eq!(resolve(&trick, Some(SPADE)).unwrap(), SOUTH);
    }

    #[test]
    fn test_trump_led_is_ordinary_highest() {
        let trick = trick_of(EAST, &["S4", "S9", "D2", "S3"]);
        assert_eq!(resolve(&trick, Some(SPADE)).unwrap(), SOUTH);
    }

    #[test]
    fn test_resolve_incomplete_trick_is_inconsistent() {
        let trick = trick_of(EAST, &["S4", "S9"]);
        let err = resolve(&trick, None).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(current_winner(&trick, None).map(|p| p.seat), Some(SOUTH));
    }

    #[test]
    fn test_push_enforces_order_and_capacity() {
        let mut trick = trick_of(EAST, &["S4", "S9", "S2", "S3"]);
        assert!(trick.is_complete());
        assert!(trick.push("SA".parse().unwrap(), EAST).is_err());

        let mut trick = Trick::new(EAST);
        assert!(trick.push("SA".parse().unwrap(), WEST).is_err());
        assert!(trick.is_empty());
    }

    #[test]
    fn test_trick_bookkeeping() {
        let mut trick = trick_of(SOUTH, &["D5"]);
        assert_eq!(trick.leader(), SOUTH);
        assert_eq!(trick.lead_suit(), Some(DIAMOND));
        assert_eq!(trick.next_to_play(), Some(WEST));
        trick.push("D6".parse().unwrap(), WEST).unwrap();
        trick.push("D7".parse().unwrap(), NORTH).unwrap();
        trick.push("D8".parse().unwrap(), EAST).unwrap();
        assert_eq!(trick.winner(), None);
        assert_eq!(trick.resolve(None).unwrap(), EAST);
        assert_eq!(trick.winner(), Some(EAST));
    }
}

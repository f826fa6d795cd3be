//! Boundary with `bridge_types`
//!
//! Callers holding a `bridge_types::Deal` hand it over once; the engine works
//! on its own bitboards from then on.

use super::cards::*;
use super::hands::Hands;
use super::types::*;
use bridge_types::Direction;

impl Hands {
    pub fn from_deal(deal: &bridge_types::Deal) -> Self {
        let mut hands = Hands::new();
        for seat in 0..NUM_SEATS {
            hands[seat] = deal
                .hand(seat_to_direction(seat))
                .cards()
                .iter()
                .map(convert_card)
                .collect();
        }
        hands
    }
}

pub(crate) fn convert_card(card: &bridge_types::Card) -> Card {
    let suit = match card.suit {
        bridge_types::Suit::Spades => SPADE,
        bridge_types::Suit::Hearts => HEART,
        bridge_types::Suit::Diamonds => DIAMOND,
        bridge_types::Suit::Clubs => CLUB,
    };
    // bridge_types ranks count pips, two is 2
    Card::new(suit, card.rank as usize - 2)
}

pub fn seat_to_direction(seat: Seat) -> Direction {
    [
        Direction::West,
        Direction::North,
        Direction::East,
        Direction::South,
    ][seat % NUM_SEATS]
}

pub fn direction_to_seat(dir: Direction) -> Seat {
    match dir {
        Direction::West => WEST,
        Direction::North => NORTH,
        Direction::East => EAST,
        Direction::South => SOUTH,
    }
}

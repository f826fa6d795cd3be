//! Suits, ranks, seats and partnerships
//!
//! Plain `usize` indices keep per-seat and per-suit tables simple arrays.
//! Suits run S, H, D, C; seats run clockwise from West.

use serde::{Deserialize, Serialize};

pub type Suit = usize;
pub const SPADE: Suit = 0;
pub const HEART: Suit = 1;
pub const DIAMOND: Suit = 2;
pub const CLUB: Suit = 3;
pub const NUM_SUITS: usize = 4;

/// A suit index or `NOTRUMP`
pub type Strain = usize;
pub const NOTRUMP: Strain = NUM_SUITS;

/// Two is 0, ace is 12
pub type Rank = usize;
pub const TWO: Rank = 0;
pub const THREE: Rank = 1;
pub const FOUR: Rank = 2;
pub const FIVE: Rank = 3;
pub const SIX: Rank = 4;
pub const SEVEN: Rank = 5;
pub const EIGHT: Rank = 6;
pub const NINE: Rank = 7;
pub const TEN: Rank = 8;
pub const JACK: Rank = 9;
pub const QUEEN: Rank = 10;
pub const KING: Rank = 11;
pub const ACE: Rank = 12;
pub const NUM_RANKS: usize = 13;

pub type Seat = usize;
pub const WEST: Seat = 0;
pub const NORTH: Seat = 1;
pub const EAST: Seat = 2;
pub const SOUTH: Seat = 3;
pub const NUM_SEATS: usize = 4;

pub const TOTAL_TRICKS: usize = NUM_RANKS;
pub const TOTAL_CARDS: usize = NUM_RANKS * NUM_SUITS;

const STRAIN_LETTERS: [char; NUM_SUITS + 1] = ['S', 'H', 'D', 'C', 'N'];
const RANK_LETTERS: [char; NUM_RANKS] = [
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
];
const SEAT_LETTERS: [char; NUM_SEATS] = ['W', 'N', 'E', 'S'];
const SEAT_NAMES: [&str; NUM_SEATS] = ["West", "North", "East", "South"];

#[inline]
pub fn partner(seat: Seat) -> Seat {
    (seat + 2) % NUM_SEATS
}

/// Next seat clockwise, who also plays next to a trick
#[inline]
pub fn left_hand_opp(seat: Seat) -> Seat {
    (seat + 1) % NUM_SEATS
}

#[inline]
pub fn right_hand_opp(seat: Seat) -> Seat {
    (seat + NUM_SEATS - 1) % NUM_SEATS
}

#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    left_hand_opp(seat)
}

/// The two sides of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partnership {
    NorthSouth,
    EastWest,
}

impl Partnership {
    pub const BOTH: [Partnership; 2] = [Partnership::NorthSouth, Partnership::EastWest];

    #[inline]
    pub fn of(seat: Seat) -> Self {
        match seat {
            NORTH | SOUTH => Partnership::NorthSouth,
            _ => Partnership::EastWest,
        }
    }

    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Partnership::NorthSouth => Partnership::EastWest,
            Partnership::EastWest => Partnership::NorthSouth,
        }
    }

    #[inline]
    pub fn contains(self, seat: Seat) -> bool {
        Partnership::of(seat) == self
    }
}

impl std::fmt::Display for Partnership {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Partnership::NorthSouth => "NS",
            Partnership::EastWest => "EW",
        })
    }
}

pub fn seat_name(seat: Seat) -> &'static str {
    SEAT_NAMES[seat]
}

pub fn seat_letter(seat: Seat) -> char {
    SEAT_LETTERS[seat]
}

/// 'S', 'H', 'D', 'C', or 'N' for no-trump
pub fn suit_letter(strain: Strain) -> char {
    STRAIN_LETTERS[strain]
}

pub fn rank_name(rank: Rank) -> char {
    RANK_LETTERS[rank]
}

fn lookup(table: &[char], c: char) -> Option<usize> {
    let c = c.to_ascii_uppercase();
    table.iter().position(|&letter| letter == c)
}

/// Strain for a letter, case-insensitive; 'N' is no-trump
pub fn char_to_suit(c: char) -> Option<Strain> {
    lookup(&STRAIN_LETTERS, c)
}

/// Rank for a letter; '1' is accepted for ten as in "10"
pub fn char_to_rank(c: char) -> Option<Rank> {
    if c == '1' {
        return Some(TEN);
    }
    lookup(&RANK_LETTERS, c)
}

pub fn char_to_seat(c: char) -> Option<Seat> {
    lookup(&SEAT_LETTERS, c)
}

//! Cards and card sets
//!
//! A card is its bit index in a 52-bit word: bit 0 is the spade ace, bit 12
//! the spade two, bit 13 the heart ace, and so on down to the club two at
//! bit 51. Iterating a `Cards` set walks that order (spades first, ace down),
//! which is the canonical order every tie-break in the engine relies on.

use super::types::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

const SUIT_BITS: u64 = (1 << NUM_RANKS) - 1;

#[inline]
fn mask_of(suit: Suit) -> u64 {
    SUIT_BITS << (suit * NUM_RANKS)
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card(u8);

impl Card {
    #[inline]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Card((suit * NUM_RANKS + (NUM_RANKS - 1 - rank)) as u8)
    }

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < TOTAL_CARDS).then_some(Card(index as u8))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn suit(self) -> Suit {
        self.index() / NUM_RANKS
    }

    #[inline]
    pub fn rank(self) -> Rank {
        NUM_RANKS - 1 - (self.index() % NUM_RANKS)
    }

    #[inline]
    fn bit(self) -> u64 {
        1u64 << self.0
    }

    /// Same suit and higher rank
    #[inline]
    pub fn beats_in_suit(self, other: Card) -> bool {
        self.suit() == other.suit() && self.0 < other.0
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", suit_letter(self.suit()), rank_name(self.rank()))
    }
}

impl std::fmt::Debug for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self)
    }
}

/// A card name other than suit letter then rank letter ("SA", "h7")
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid card name: {0:?}")]
pub struct ParseCardError(pub String);

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(suit_char), Some(rank_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(ParseCardError(s.to_string()));
        };
        let suit = char_to_suit(suit_char)
            .filter(|&suit| suit < NUM_SUITS)
            .ok_or_else(|| ParseCardError(s.to_string()))?;
        let rank = char_to_rank(rank_char).ok_or_else(|| ParseCardError(s.to_string()))?;
        Ok(Card::new(suit, rank))
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A set of cards as a bitboard
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Cards {
    bits: u64,
}

impl Cards {
    #[inline]
    pub const fn new() -> Self {
        Cards { bits: 0 }
    }

    #[inline]
    pub const fn full_deck() -> Self {
        Cards {
            bits: (1u64 << TOTAL_CARDS) - 1,
        }
    }

    #[inline]
    const fn from_bits(bits: u64) -> Self {
        Cards { bits }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.bits.count_ones() as usize
    }

    #[inline]
    pub fn have(&self, card: Card) -> bool {
        self.bits & card.bit() != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    #[inline]
    pub fn suit(&self, suit: Suit) -> Cards {
        Cards::from_bits(self.bits & mask_of(suit))
    }

    /// First card in canonical order: the highest of the first suit held
    #[inline]
    pub fn top(&self) -> Option<Card> {
        (!self.is_empty()).then(|| Card(self.bits.trailing_zeros() as u8))
    }

    /// Last card in canonical order
    #[inline]
    pub fn bottom(&self) -> Option<Card> {
        (!self.is_empty()).then(|| Card((63 - self.bits.leading_zeros()) as u8))
    }

    #[inline]
    pub fn union(&self, other: Cards) -> Cards {
        Cards::from_bits(self.bits | other.bits)
    }

    #[inline]
    pub fn intersect(&self, other: Cards) -> Cards {
        Cards::from_bits(self.bits & other.bits)
    }

    /// Cards in `self` but not in `other`
    #[inline]
    pub fn different(&self, other: Cards) -> Cards {
        Cards::from_bits(self.bits & !other.bits)
    }

    #[inline]
    pub fn add(&mut self, card: Card) -> &mut Self {
        self.bits |= card.bit();
        self
    }

    #[inline]
    pub fn remove(&mut self, card: Card) -> &mut Self {
        self.bits &= !card.bit();
        self
    }

    pub fn iter(&self) -> CardsIterator {
        CardsIterator { bits: self.bits }
    }
}

impl std::fmt::Debug for Cards {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cards({self})")
    }
}

/// Suit by suit, e.g. "S AK H - D T42 C 9"
impl std::fmt::Display for Cards {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for suit in 0..NUM_SUITS {
            if suit > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{} ", suit_letter(suit))?;
            let held = self.suit(suit);
            if held.is_empty() {
                f.write_str("-")?;
            }
            for card in held {
                write!(f, "{}", rank_name(card.rank()))?;
            }
        }
        Ok(())
    }
}

impl FromIterator<Card> for Cards {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut cards = Cards::new();
        for card in iter {
            cards.add(card);
        }
        cards
    }
}

/// Walks a set in canonical order from either end
pub struct CardsIterator {
    bits: u64,
}

impl Iterator for CardsIterator {
    type Item = Card;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            let card = Card(self.bits.trailing_zeros() as u8);
            self.bits &= self.bits - 1;
            Some(card)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for CardsIterator {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            let index = 63 - self.bits.leading_zeros();
            self.bits &= !(1u64 << index);
            Some(Card(index as u8))
        }
    }
}

impl IntoIterator for Cards {
    type Item = Card;
    type IntoIter = CardsIterator;

    fn into_iter(self) -> Self::IntoIter {
        CardsIterator { bits: self.bits }
    }
}

impl IntoIterator for &Cards {
    type Item = Card;
    type IntoIter = CardsIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

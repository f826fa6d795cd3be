//! Card-choosing players
//!
//! `Heuristic` follows a handful of table rules and never looks ahead.
//! `Minimax` searches the double-dummy position to a fixed depth. Whichever
//! picks the card, it is checked against the legality oracle before it is
//! handed back.

use crate::cards::{Card, Cards};
use crate::config::{PlayConfig, TierDepths};
use crate::error::{PlayError, Result};
use crate::position::Position;
use crate::search::{search, SearchStats};
use crate::state::PlayState;
use crate::trick::{current_winner, wins_over};
use crate::types::*;
use std::str::FromStr;
use tracing::trace;

/// Named strength levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Expert,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Expert => "expert",
        }
    }

    /// The player for this tier
    pub fn variant(self, tiers: &TierDepths) -> AiVariant {
        match self {
            Difficulty::Beginner => AiVariant::Heuristic,
            Difficulty::Intermediate => AiVariant::Minimax {
                depth: tiers.intermediate,
            },
            Difficulty::Advanced => AiVariant::Minimax {
                depth: tiers.advanced,
            },
            Difficulty::Expert => AiVariant::Minimax {
                depth: tiers.expert,
            },
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name() == lower)
            .ok_or_else(|| ParseVariantError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown player {0:?}; expected heuristic, minimax:<depth> or a difficulty name")]
pub struct ParseVariantError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AiVariant {
    Heuristic,
    Minimax { depth: u32 },
}

/// A chosen card, with the search's score and counters when there was one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Choice {
    pub card: Card,
    pub score: Option<i32>,
    pub stats: Option<SearchStats>,
}

impl AiVariant {
    /// Parse "heuristic", "minimax:6", or a difficulty name resolved
    /// against `tiers`
    pub fn parse(text: &str, tiers: &TierDepths) -> std::result::Result<Self, ParseVariantError> {
        let lower = text.trim().to_ascii_lowercase();
        if lower == "heuristic" {
            return Ok(AiVariant::Heuristic);
        }
        if let Some(depth) = lower.strip_prefix("minimax:") {
            return match depth.parse::<u32>() {
                Ok(depth) if depth > 0 => Ok(AiVariant::Minimax { depth }),
                _ => Err(ParseVariantError(text.to_string())),
            };
        }
        Ok(lower
            .parse::<Difficulty>()
            .map_err(|_| ParseVariantError(text.to_string()))?
            .variant(tiers))
    }

    /// Card for the seat to move
    pub fn choose_card(&self, state: &PlayState, config: &PlayConfig) -> Result<Card> {
        Ok(self.choose_with_stats(state, config)?.card)
    }

    pub fn choose_with_stats(&self, state: &PlayState, config: &PlayConfig) -> Result<Choice> {
        if state.is_complete() {
            return Err(PlayError::DealComplete);
        }
        let choice = match *self {
            AiVariant::Heuristic => Choice {
                card: heuristic_card(state.position())?,
                score: None,
                stats: None,
            },
            AiVariant::Minimax { depth } => {
                let outcome = search(state.position(), depth, &config.search, &config.eval)?;
                Choice {
                    card: outcome.card,
                    score: Some(outcome.score),
                    stats: Some(outcome.stats),
                }
            }
        };

        if !state.is_legal(choice.card) {
            return Err(PlayError::inconsistent(format!(
                "{self} chose illegal card {} for {}",
                choice.card,
                seat_name(state.next_to_play())
            )));
        }
        trace!(
            player = %self,
            seat = seat_name(state.next_to_play()),
            card = %choice.card,
            "card chosen"
        );
        Ok(choice)
    }
}

impl FromStr for AiVariant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        AiVariant::parse(s, &TierDepths::default())
    }
}

impl std::fmt::Display for AiVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiVariant::Heuristic => write!(f, "heuristic"),
            AiVariant::Minimax { depth } => write!(f, "minimax:{depth}"),
        }
    }
}

/// Lowest-ranked card; ties go to the first in canonical order
fn lowest(cards: Cards) -> Option<Card> {
    cards.iter().fold(None, |low: Option<Card>, card| match low {
        Some(l) if l.rank() <= card.rank() => Some(l),
        _ => Some(card),
    })
}

fn heuristic_card(pos: &Position) -> Result<Card> {
    let seat = pos.next_to_play();
    let legal = pos.legal_cards();
    let trump = pos.trump();
    let trick = pos.trick();
    let exhausted = || {
        let err = PlayError::SearchExhausted { seat };
        tracing::error!(seat = seat_name(seat), "no legal card for heuristic player");
        err
    };

    let Some(winning) = current_winner(trick, trump) else {
        // Leading: cash a top card, else start the longest side suit low
        let remaining = pos.hands().all_cards();
        if let Some(card) = legal.iter().find(|&c| remaining.suit(c.suit()).top() == Some(c)) {
            return Ok(card);
        }
        let longest = (0..NUM_SUITS)
            .filter(|&suit| Some(suit) != trump)
            .map(|suit| legal.suit(suit))
            .filter(|cards| !cards.is_empty())
            .fold(Cards::new(), |best, cards| {
                if cards.size() > best.size() {
                    cards
                } else {
                    best
                }
            });
        return lowest(longest)
            .or_else(|| lowest(legal))
            .ok_or_else(exhausted);
    };

    if winning.seat != partner(seat) {
        let winners: Cards = legal
            .iter()
            .filter(|&c| wins_over(c, winning.card, trump))
            .collect();
        if let Some(card) = lowest(winners) {
            return Ok(card);
        }
    }

    // Losing or letting partner win: play low, keeping trumps
    let side_cards = match trump {
        Some(t) => legal.different(legal.suit(t)),
        None => legal,
    };
    lowest(side_cards)
        .or_else(|| lowest(legal))
        .ok_or_else(exhausted)
}

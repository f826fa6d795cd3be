//! Bridge card play with double-dummy search players
//!
//! The engine plays out a deal once the auction has produced a contract:
//! - Legality checks (follow suit when able) on every card, human or AI
//! - Trick resolution and turn order, with the winner leading next
//! - Per-deal play state with trick history and partnership trick counts
//! - AI players: a rule-based heuristic and a depth-limited alpha-beta search
//!   over the full four-hand position
//!
//! # Example
//!
//! ```
//! use bridge_play::{AiVariant, Contract, Hands, PlayConfig, PlayState, Vulnerability, SOUTH};
//!
//! let hands = Hands::from_pbn(
//!     "N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72",
//! )
//! .unwrap();
//! let contract = Contract::parse("3NT", SOUTH, Vulnerability::None).unwrap();
//! let mut state = PlayState::start(contract, hands).unwrap();
//!
//! let config = PlayConfig::default();
//! let player = AiVariant::Minimax { depth: 4 };
//! while !state.is_complete() {
//!     let card = player.choose_card(&state, &config).unwrap();
//!     state.apply_play(card).unwrap();
//! }
//! assert_eq!(state.trick_counts().total(), 13);
//! ```
//!
//! Hands can also come from `bridge_types`:
//!
//! ```
//! use bridge_play::Hands;
//! use bridge_types::Deal;
//!
//! let deal = Deal::from_pbn("N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72").unwrap();
//! let hands = Hands::from_deal(&deal);
//! assert_eq!(hands.max_size(), 13);
//! ```

pub mod ai;
pub mod cards;
pub mod config;
pub mod contract;
mod convert;
pub mod error;
pub mod eval;
mod hands;
pub mod harness;
mod order;
pub mod pbn;
pub mod play;
pub mod position;
pub mod search;
pub mod state;
pub mod trick;
pub mod types;

pub use ai::{AiVariant, Choice, Difficulty, ParseVariantError};
pub use cards::{Card, Cards, ParseCardError};
pub use config::{ConfigError, PlayConfig, TierDepths};
pub use contract::{Contract, Doubling, Vulnerability};
pub use convert::{direction_to_seat, seat_to_direction};
pub use error::{IllegalReason, PlayError, Result};
pub use eval::{evaluate, EvalWeights};
pub use hands::Hands;
pub use harness::{play_deal, run_boards, DealRecord, Report};
pub use pbn::{parse_boards, Board, PbnError};
pub use play::{is_legal, playable};
pub use position::{Position, TrickCounts};
pub use search::{search, SearchConfig, SearchOutcome, SearchStats, MAX_PLY};
pub use state::{PlayOutcome, PlayState};
pub use trick::{resolve, PlayedCard, Trick};
pub use types::{Partnership, Seat, Strain, Suit, NOTRUMP, NUM_SEATS, NUM_SUITS, TOTAL_TRICKS};
pub use types::{CLUB, DIAMOND, HEART, SPADE};
pub use types::{EAST, NORTH, SOUTH, WEST};

#[cfg(test)]
mod tests_props;

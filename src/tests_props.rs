//! Property tests over random deals and random legal playouts

use proptest::prelude::*;
use proptest::sample::Index;

use crate::cards::{Card, Cards};
use crate::contract::{Contract, Doubling, Vulnerability};
use crate::eval::{evaluate, EvalWeights};
use crate::hands::Hands;
use crate::order::order_cards;
use crate::position::Position;
use crate::search::{search, SearchConfig};
use crate::state::PlayState;
use crate::trick::Trick;
use crate::types::*;
use crate::{AiVariant, PlayConfig};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    }
}

/// Hands of `size` cards each, dealt from a shuffled deck
fn deal(size: usize) -> impl Strategy<Value = Hands> {
    Just((0..TOTAL_CARDS).collect::<Vec<_>>())
        .prop_shuffle()
        .prop_map(move |deck| {
            let mut hands = Hands::new();
            for (i, index) in deck.into_iter().take(size * NUM_SEATS).enumerate() {
                if let Some(card) = Card::from_index(index) {
                    hands[i % NUM_SEATS].add(card);
                }
            }
            hands
        })
}

fn strain() -> impl Strategy<Value = Strain> {
    0..=NOTRUMP
}

fn seat() -> impl Strategy<Value = Seat> {
    0..NUM_SEATS
}

/// A full deal, a contract on it, and the choices for a random playout
fn game() -> impl Strategy<Value = (PlayState, Vec<Index>)> {
    (
        deal(13),
        strain(),
        seat(),
        prop::collection::vec(any::<Index>(), TOTAL_CARDS),
    )
        .prop_map(|(hands, strain, declarer, picks)| {
            let contract =
                Contract::new(1, strain, declarer, Doubling::Undoubled, Vulnerability::None)
                    .unwrap();
            (PlayState::start(contract, hands).unwrap(), picks)
        })
}

fn pick(cards: Cards, index: &Index) -> Card {
    cards.iter().nth(index.index(cards.size())).unwrap()
}

/// Winner by the table rule: highest trump if any, else highest of the
/// suit led
fn oracle_winner(trick: &Trick, trump: Option<Suit>) -> Seat {
    let plays: Vec<_> = trick.plays().collect();
    let lead = plays[0].card.suit();
    let ruffs: Vec<_> = plays
        .iter()
        .filter(|p| Some(p.card.suit()) == trump)
        .collect();
    let candidates: Vec<_> = if ruffs.is_empty() {
        plays.iter().filter(|p| p.card.suit() == lead).collect()
    } else {
        ruffs
    };
    candidates
        .into_iter()
        .max_by_key(|p| p.card.rank())
        .map(|p| p.seat)
        .unwrap()
}

proptest! {
    #![proptest_config(config())]

    /// Legal cards are the led suit when held, otherwise the whole hand
    #[test]
    fn prop_legality_is_follow_suit((mut state, picks) in game()) {
        for index in &picks {
            if state.is_complete() {
                break;
            }
            let seat = state.next_to_play();
            let hand = state.hands()[seat];
            let legal = state.legal_cards(seat);
            let expected = match state.current_trick().lead_suit() {
                Some(suit) if !hand.suit(suit).is_empty() => hand.suit(suit),
                _ => hand,
            };
            prop_assert_eq!(legal, expected);
            for card in hand.different(legal) {
                prop_assert!(!state.is_legal(card));
                prop_assert!(state.apply_play(card).is_err());
            }
            state.apply_play(pick(legal, index)).unwrap();
        }
        prop_assert!(state.is_complete());
    }

    /// Every resolved trick goes to the table-rule winner, who leads next
    #[test]
    fn prop_trick_winner_matches_rule((mut state, picks) in game()) {
        for index in &picks {
            if state.is_complete() {
                break;
            }
            let legal = state.legal_cards(state.next_to_play());
            let outcome = state.apply_play(pick(legal, index)).unwrap();
            if let Some(trick) = outcome.completed {
                let winner = oracle_winner(&trick, state.trump());
                prop_assert_eq!(trick.winner(), Some(winner));
                if !state.is_complete() {
                    prop_assert_eq!(state.next_to_play(), winner);
                }
            }
        }
        let counts = state.trick_counts();
        prop_assert_eq!(counts.total() as usize, TOTAL_TRICKS);
    }

    /// Move ordering is a permutation of the legal cards
    #[test]
    fn prop_order_is_permutation((mut state, picks) in game()) {
        for index in &picks {
            if state.is_complete() {
                break;
            }
            let legal = state.legal_cards(state.next_to_play());
            let ordered = order_cards(state.position(), legal);
            prop_assert_eq!(ordered.iter().count(), legal.size());
            let seen: Cards = ordered.iter().collect();
            prop_assert_eq!(seen, legal);
            state.apply_play(pick(legal, index)).unwrap();
        }
    }

    /// The two sides' scores always cancel
    #[test]
    fn prop_evaluation_is_zero_sum((mut state, picks) in game()) {
        let weights = EvalWeights::default();
        for index in &picks {
            let ns = evaluate(state.position(), Partnership::NorthSouth, &weights);
            let ew = evaluate(state.position(), Partnership::EastWest, &weights);
            prop_assert_eq!(ns, -ew);
            if state.is_complete() {
                break;
            }
            let legal = state.legal_cards(state.next_to_play());
            state.apply_play(pick(legal, index)).unwrap();
        }
    }

    /// A heuristic playout stays consistent and accounts for every card
    #[test]
    fn prop_heuristic_playout_is_consistent((mut state, _picks) in game()) {
        let config = PlayConfig::default();
        while !state.is_complete() {
            let card = AiVariant::Heuristic.choose_card(&state, &config).unwrap();
            prop_assert!(state.is_legal(card));
            state.apply_play(card).unwrap();
            state.check_invariants().unwrap();
        }
        prop_assert_eq!(state.played_cards(), Cards::full_deck());
        prop_assert_eq!(
            state.declarer_tricks() + state.defender_tricks(),
            TOTAL_TRICKS as u8
        );
    }

    /// Pruning and ordering never change the chosen card or its score
    #[test]
    fn prop_pruning_matches_minimax(
        hands in deal(3),
        strain in strain(),
        leader in seat(),
        depth in 1u32..=12,
    ) {
        let trump = (strain < NOTRUMP).then_some(strain);
        let pos = Position::new(hands, trump, leader);
        let weights = EvalWeights::default();
        let plain = SearchConfig {
            pruning: false,
            move_ordering: false,
            ..SearchConfig::default()
        };
        let reference = search(&pos, depth, &plain, &weights).unwrap();
        let outcome = search(&pos, depth, &SearchConfig::default(), &weights).unwrap();
        prop_assert_eq!(outcome.card, reference.card);
        prop_assert_eq!(outcome.score, reference.score);
        prop_assert!(pos.legal_cards().have(outcome.card));
    }
}

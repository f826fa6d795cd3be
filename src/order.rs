//! Move ordering for interior search nodes
//!
//! Ordering only decides which card is tried first. Every legal card appears
//! exactly once, so the search value does not depend on it.

use crate::cards::{Card, Cards};
use crate::hands::Hands;
use crate::position::Position;
use crate::trick::{current_winner, wins_over};
use crate::types::*;

/// Fixed-capacity ordered card list; a card is kept once, at its first slot
#[derive(Clone, Copy)]
pub struct OrderedCards {
    cards: [Card; TOTAL_TRICKS],
    count: usize,
    seen: Cards,
}

impl OrderedCards {
    #[inline]
    pub fn new() -> Self {
        OrderedCards {
            cards: [Card::new(SPADE, ACE); TOTAL_TRICKS],
            count: 0,
            seen: Cards::new(),
        }
    }

    /// Canonical order: spades first, ace down
    pub fn natural(cards: Cards) -> Self {
        let mut ordered = OrderedCards::new();
        ordered.add_cards(cards);
        ordered
    }

    #[inline]
    fn add(&mut self, card: Card) {
        if self.seen.have(card) || self.count == TOTAL_TRICKS {
            return;
        }
        self.seen.add(card);
        self.cards[self.count] = card;
        self.count += 1;
    }

    /// Add cards high to low
    #[inline]
    fn add_cards(&mut self, cards: Cards) {
        for card in cards {
            self.add(card);
        }
    }

    /// Add cards low to high
    #[inline]
    fn add_reversed(&mut self, cards: Cards) {
        for card in cards.iter().rev() {
            self.add(card);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards[..self.count].iter().copied()
    }
}

impl Default for OrderedCards {
    fn default() -> Self {
        OrderedCards::new()
    }
}

/// Order the playable cards of the seat to move
pub fn order_cards(pos: &Position, playable: Cards) -> OrderedCards {
    let trick = pos.trick();
    let mut ordered = match (trick.lead_suit(), current_winner(trick, pos.trump())) {
        (Some(lead_suit), Some(winning)) => order_follows(
            playable,
            pos.hands(),
            pos.next_to_play(),
            pos.trump(),
            lead_suit,
            winning.card,
            winning.seat,
            trick.len(),
        ),
        _ => order_leads(playable, pos.hands(), pos.next_to_play(), pos.trump()),
    };
    // Whatever the heuristics skipped
    ordered.add_cards(playable);
    ordered
}

/// Leads, best first: ruffing leads for partner, suits headed by our side's
/// top card, ordinary suits (top then bottom), suits the opponents can ruff,
/// then trumps.
fn order_leads(playable: Cards, hands: &Hands, seat: Seat, trump: Option<Suit>) -> OrderedCards {
    let mut ordered = OrderedCards::new();

    let pd_hand = hands[partner(seat)];
    let lho_hand = hands[left_hand_opp(seat)];
    let rho_hand = hands[right_hand_opp(seat)];
    let all_cards = hands.all_cards();
    let our_cards = playable.union(pd_hand);

    let mut ruff_leads = Cards::new();
    let mut high_leads = Cards::new();
    let mut normal_leads = Cards::new();
    let mut bad_leads = Cards::new();
    let mut trump_leads = Cards::new();

    for suit in 0..NUM_SUITS {
        let my_suit = playable.suit(suit);
        let (Some(top), Some(bottom)) = (my_suit.top(), my_suit.bottom()) else {
            continue;
        };
        let suit_top = all_cards.suit(suit).top();

        if let Some(t) = trump {
            if suit == t {
                trump_leads.add(top);
                trump_leads.add(bottom);
                continue;
            }
            let can_ruff = |hand: Cards| !hand.suit(t).is_empty() && hand.suit(suit).is_empty();
            if can_ruff(lho_hand) || can_ruff(rho_hand) {
                bad_leads.add(bottom);
                continue;
            }
            if can_ruff(pd_hand) && Some(bottom) != suit_top {
                ruff_leads.add(bottom);
                continue;
            }
        }

        if suit_top.is_some_and(|c| our_cards.have(c)) {
            high_leads.add(top);
            high_leads.add(bottom);
            continue;
        }

        normal_leads.add(top);
        normal_leads.add(bottom);
    }

    ordered.add_cards(ruff_leads);
    ordered.add_cards(high_leads);
    ordered.add_cards(normal_leads);
    ordered.add_cards(bad_leads);
    ordered.add_cards(trump_leads);
    ordered
}

/// Follows, best first. Low when we cannot win or partner already has the
/// trick, cheapest winner when the trick is safe, high winners when the next
/// opponent could still beat a low one.
#[allow(clippy::too_many_arguments)]
fn order_follows(
    playable: Cards,
    hands: &Hands,
    seat: Seat,
    trump: Option<Suit>,
    lead_suit: Suit,
    winning_card: Card,
    winning_seat: Seat,
    cards_played: usize,
) -> OrderedCards {
    let mut ordered = OrderedCards::new();

    let trick_ending = cards_played == NUM_SEATS - 1;
    let partner_winning = winning_seat == partner(seat);
    let lho_suit = hands[left_hand_opp(seat)].suit(lead_suit);
    let lho_can_beat =
        |card: Card| !trick_ending && lho_suit.iter().any(|c| wins_over(c, card, trump));

    let my_suit = playable.suit(lead_suit);
    if let Some(my_top) = my_suit.top() {
        if !wins_over(my_top, winning_card, trump)
            || (partner_winning && !lho_can_beat(winning_card))
        {
            ordered.add_reversed(playable);
            return ordered;
        }

        let higher: Cards = my_suit
            .iter()
            .filter(|&c| wins_over(c, winning_card, trump))
            .collect();
        let lower = my_suit.different(higher);
        match higher.bottom() {
            Some(cheapest) if !lho_can_beat(cheapest) => ordered.add_reversed(higher),
            _ => ordered.add_cards(higher),
        }
        ordered.add_reversed(lower);
        return ordered;
    }

    // Void in the led suit: ruff or discard
    if let Some(t) = trump {
        if !(partner_winning && !lho_can_beat(winning_card)) {
            let ruffs: Cards = playable
                .suit(t)
                .iter()
                .filter(|&c| wins_over(c, winning_card, trump))
                .collect();
            ordered.add_reversed(ruffs);
        }
    }
    add_discards(&mut ordered, playable, trump);
    ordered
}

/// Lowest card of each side suit, longer suits first, then everything else
fn add_discards(ordered: &mut OrderedCards, playable: Cards, trump: Option<Suit>) {
    let mut discards = [(Card::new(SPADE, ACE), 0usize); NUM_SUITS];
    let mut num_discards = 0;
    for suit in (0..NUM_SUITS).filter(|&suit| Some(suit) != trump) {
        let cards = playable.suit(suit);
        if let Some(low) = cards.bottom() {
            discards[num_discards] = (low, cards.size());
            num_discards += 1;
        }
    }
    // Stable: ties keep suit order
    discards[..num_discards].sort_by(|a, b| b.1.cmp(&a.1));
    for &(card, _) in &discards[..num_discards] {
        ordered.add(card);
    }
    ordered.add_reversed(playable);
}

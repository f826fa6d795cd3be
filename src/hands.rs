//! The four hands at the table
//!
//! Four bitboards and nothing else, so a position copies in a few words and
//! search nodes never allocate.

use super::cards::*;
use super::types::*;

#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Hands {
    hands: [Cards; NUM_SEATS],
}

impl Hands {
    pub const fn new() -> Self {
        Hands {
            hands: [Cards::new(); NUM_SEATS],
        }
    }

    /// Every card still held by anyone
    #[inline]
    pub fn all_cards(&self) -> Cards {
        self.hands
            .iter()
            .fold(Cards::new(), |all, &hand| all.union(hand))
    }

    #[inline]
    pub fn partnership_cards(&self, side: Partnership) -> Cards {
        (0..NUM_SEATS)
            .filter(|&seat| side.contains(seat))
            .fold(Cards::new(), |all, seat| all.union(self.hands[seat]))
    }

    /// Size of the longest hand: the tricks left, counting one in progress
    #[inline]
    pub fn max_size(&self) -> usize {
        self.hands.iter().map(Cards::size).max().unwrap_or(0)
    }

    /// No card is held twice
    pub fn is_disjoint(&self) -> bool {
        let held: usize = self.hands.iter().map(Cards::size).sum();
        held == self.all_cards().size()
    }

    /// Read a PBN deal such as
    /// `"N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72"`.
    /// Hands run clockwise from the seat before the colon (North if absent),
    /// suits S.H.D.C within each hand, and `-` may mark a void.
    pub fn from_pbn(s: &str) -> Option<Self> {
        let s = s.trim();
        let (first, body) = match s.split_once(':') {
            Some((seat, body)) if seat.len() == 1 => (char_to_seat(seat.chars().next()?)?, body),
            Some(_) => return None,
            None => (NORTH, s),
        };

        let mut hands = Hands::new();
        let mut count = 0;
        for (offset, text) in body.split_whitespace().enumerate() {
            if offset >= NUM_SEATS {
                return None;
            }
            hands.hands[(first + offset) % NUM_SEATS] = parse_hand(text)?;
            count += 1;
        }
        (count == NUM_SEATS).then_some(hands)
    }

    /// PBN deal string starting from North
    pub fn to_pbn(&self) -> String {
        let hands: Vec<String> = (0..NUM_SEATS)
            .map(|i| format_hand(self.hands[(NORTH + i) % NUM_SEATS]))
            .collect();
        format!("N:{}", hands.join(" "))
    }
}

impl std::ops::Index<Seat> for Hands {
    type Output = Cards;

    #[inline]
    fn index(&self, seat: Seat) -> &Cards {
        &self.hands[seat]
    }
}

impl std::ops::IndexMut<Seat> for Hands {
    #[inline]
    fn index_mut(&mut self, seat: Seat) -> &mut Cards {
        &mut self.hands[seat]
    }
}

impl std::fmt::Debug for Hands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hands({})", self.to_pbn())
    }
}

/// One hand in S.H.D.C dotted form
fn parse_hand(text: &str) -> Option<Cards> {
    let suits: Vec<&str> = text.split('.').collect();
    if suits.len() != NUM_SUITS {
        return None;
    }
    let mut cards = Cards::new();
    for (suit, ranks) in suits.into_iter().enumerate() {
        for c in ranks.chars().filter(|&c| c != '-') {
            cards.add(Card::new(suit, char_to_rank(c)?));
        }
    }
    Some(cards)
}

fn format_hand(cards: Cards) -> String {
    let suits: Vec<String> = (0..NUM_SUITS)
        .map(|suit| cards.suit(suit).iter().map(|c| rank_name(c.rank())).collect())
        .collect();
    suits.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PBN: &str = "N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72";

    #[test]
    fn test_from_pbn() {
        let hands = Hands::from_pbn(PBN).unwrap();
        assert!(hands[NORTH].have(Card::new(SPADE, TEN)));
        assert!(hands[NORTH].have(Card::new(SPADE, THREE)));
        assert!(hands[EAST].have(Card::new(HEART, ACE)));
        assert!(hands[WEST].have(Card::new(CLUB, QUEEN)));
        assert!((0..NUM_SEATS).all(|seat| hands[seat].size() == 13));
        assert!(hands.is_disjoint());
        assert_eq!(hands.max_size(), 13);
        assert_eq!(hands.to_pbn(), PBN);
    }

    #[test]
    fn test_from_pbn_other_start_seat_and_voids() {
        let rotated = "W:98.873.9653.QJ72 AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863";
        assert_eq!(Hands::from_pbn(rotated), Hands::from_pbn(PBN));

        let ending = Hands::from_pbn("N:A.-.-.- K... Q... J...").unwrap();
        assert_eq!(ending.all_cards().size(), 4);
        assert_eq!(ending.to_pbn(), "N:A... K... Q... J...");
    }

    #[test]
    fn test_from_pbn_rejects_malformed() {
        for bad in [
            "N:AKQ.J6.KJ42 652.AK42.AQ87.T4",
            "X:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72",
            "N:AKQZ3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72",
            "N:A... K... Q... J... 2...",
            "NE:A... K... Q... J...",
        ] {
            assert!(Hands::from_pbn(bad).is_none(), "{bad}");
        }
    }

    #[test]
    fn test_partnership_cards_and_overlap() {
        let hands = Hands::from_pbn(PBN).unwrap();
        let ns = hands.partnership_cards(Partnership::NorthSouth);
        assert_eq!(ns.size(), 26);
        assert_eq!(ns.union(hands.partnership_cards(Partnership::EastWest)).size(), 52);

        let mut clash = Hands::new();
        clash[NORTH].add(Card::new(SPADE, ACE));
        clash[SOUTH].add(Card::new(SPADE, ACE));
        assert!(!clash.is_disjoint());
    }
}

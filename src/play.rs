//! Card legality: which held cards may be played next

use super::cards::*;
use super::error::IllegalReason;
use super::trick::Trick;

/// Get playable cards for a hand facing the current trick
pub fn playable(hand: Cards, trick: &Trick) -> Cards {
    if let Some(suit) = trick.lead_suit() {
        // Must follow suit if possible
        let suit_cards = hand.suit(suit);
        if !suit_cards.is_empty() {
            return suit_cards;
        }
    }

    // Opening lead, or void in the led suit: any held card
    hand
}

/// True if `card` may be played from `hand` to `trick`
#[inline]
pub fn is_legal(card: Card, hand: Cards, trick: &Trick) -> bool {
    check(card, hand, trick).is_ok()
}

/// Like `is_legal`, but says why a card is refused
pub fn check(card: Card, hand: Cards, trick: &Trick) -> Result<(), IllegalReason> {
    if !hand.have(card) {
        return Err(IllegalReason::NotHeld);
    }
    if playable(hand, trick).have(card) {
        Ok(())
    } else {
        Err(IllegalReason::MustFollowSuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    fn hand(cards: &[&str]) -> Cards {
        cards.iter().map(|c| c.parse::<Card>().unwrap()).collect()
    }

    fn led(card: &str, leader: Seat) -> Trick {
        let mut trick = Trick::new(leader);
        trick.push(card.parse().unwrap(), leader).unwrap();
        trick
    }

    #[test]
    fn test_opening_lead_any_card() {
        let h = hand(&["SA", "H2", "C7"]);
        let trick = Trick::new(WEST);
        assert_eq!(playable(h, &trick), h);
        for card in h {
            assert!(is_legal(card, h, &trick));
        }
    }

    #[test]
    fn test_must_follow_suit() {
        let h = hand(&["SA", "S3", "H2", "C7"]);
        let trick = led("S9", WEST);
        assert_eq!(playable(h, &trick), hand(&["SA", "S3"]));
        assert!(is_legal("S3".parse().unwrap(), h, &trick));
        assert_eq!(
            check("H2".parse().unwrap(), h, &trick),
            Err(IllegalReason::MustFollowSuit)
        );
    }

    #[test]
    fn test_void_may_discard_or_trump() {
        let h = hand(&["H2", "C7"]);
        let trick = led("S9", WEST);
        assert_eq!(playable(h, &trick), h);
        assert!(is_legal("C7".parse().unwrap(), h, &trick));
    }

    #[test]
    fn test_card_not_held_is_never_legal() {
        let h = hand(&["H2", "C7"]);
        assert_eq!(
            check("SA".parse().unwrap(), h, &Trick::new(WEST)),
            Err(IllegalReason::NotHeld)
        );
        assert!(!is_legal("SA".parse().unwrap(), h, &led("S9", WEST)));
    }
}

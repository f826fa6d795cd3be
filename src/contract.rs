//! The finished contract a deal is played in

use crate::error::{PlayError, Result};
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Doubled/redoubled status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Doubling {
    #[default]
    Undoubled,
    Doubled,
    Redoubled,
}

/// Vulnerability state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Vulnerability {
    #[default]
    None,
    NS,
    EW,
    All,
}

impl Vulnerability {
    /// Parse a PBN [Vulnerable] tag value
    pub fn from_pbn(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "NONE" | "LOVE" | "-" => Some(Vulnerability::None),
            "NS" | "N" => Some(Vulnerability::NS),
            "EW" | "E" => Some(Vulnerability::EW),
            "ALL" | "BOTH" => Some(Vulnerability::All),
            _ => None,
        }
    }

    pub fn is_vulnerable(self, side: Partnership) -> bool {
        match self {
            Vulnerability::None => false,
            Vulnerability::All => true,
            Vulnerability::NS => side == Partnership::NorthSouth,
            Vulnerability::EW => side == Partnership::EastWest,
        }
    }
}

/// A finished contract, immutable for the life of a deal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    level: u8,
    strain: Strain,
    declarer: Seat,
    doubling: Doubling,
    vulnerability: Vulnerability,
}

impl Contract {
    pub fn new(
        level: u8,
        strain: Strain,
        declarer: Seat,
        doubling: Doubling,
        vulnerability: Vulnerability,
    ) -> Result<Self> {
        if !(1..=7).contains(&level) {
            return Err(PlayError::InvalidContract(format!(
                "level {level} outside 1-7"
            )));
        }
        if strain > NOTRUMP {
            return Err(PlayError::InvalidContract(format!("strain {strain}")));
        }
        if declarer >= NUM_SEATS {
            return Err(PlayError::InvalidContract(format!("declarer {declarer}")));
        }
        Ok(Contract {
            level,
            strain,
            declarer,
            doubling,
            vulnerability,
        })
    }

    /// Parse "3NT", "4S", "4SX", "6HXX" (PBN [Contract] tag syntax)
    pub fn parse(text: &str, declarer: Seat, vulnerability: Vulnerability) -> Result<Self> {
        let invalid = || PlayError::InvalidContract(text.to_string());
        let text = text.trim().to_uppercase();
        let mut chars = text.chars();

        let level = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(invalid)? as u8;
        let rest: String = chars.collect();

        let (strain, doubles) = if let Some(doubles) = rest.strip_prefix("NT") {
            (NOTRUMP, doubles)
        } else {
            let mut rest_chars = rest.chars();
            let strain = rest_chars
                .next()
                .and_then(char_to_suit)
                .ok_or_else(invalid)?;
            (strain, rest_chars.as_str())
        };

        let doubling = match doubles {
            "" => Doubling::Undoubled,
            "X" => Doubling::Doubled,
            "XX" => Doubling::Redoubled,
            _ => return Err(invalid()),
        };

        Contract::new(level, strain, declarer, doubling, vulnerability)
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn strain(&self) -> Strain {
        self.strain
    }

    pub fn declarer(&self) -> Seat {
        self.declarer
    }

    pub fn doubling(&self) -> Doubling {
        self.doubling
    }

    pub fn vulnerability(&self) -> Vulnerability {
        self.vulnerability
    }

    /// Trump suit, or None for a no-trump contract
    #[inline]
    pub fn trump(&self) -> Option<Suit> {
        (self.strain < NOTRUMP).then_some(self.strain)
    }

    /// Declarer's partner
    pub fn dummy(&self) -> Seat {
        partner(self.declarer)
    }

    /// The opening leader sits to the left of declarer
    pub fn opening_leader(&self) -> Seat {
        left_hand_opp(self.declarer)
    }

    pub fn declaring_side(&self) -> Partnership {
        Partnership::of(self.declarer)
    }

    pub fn declarer_vulnerable(&self) -> bool {
        self.vulnerability.is_vulnerable(self.declaring_side())
    }

    /// Tricks declarer needs to make the contract
    pub fn tricks_required(&self) -> u8 {
        self.level + 6
    }
}

impl std::fmt::Display for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.level)?;
        if self.strain == NOTRUMP {
            write!(f, "NT")?;
        } else {
            write!(f, "{}", suit_letter(self.strain))?;
        }
        match self.doubling {
            Doubling::Undoubled => {}
            Doubling::Doubled => write!(f, "X")?,
            Doubling::Redoubled => write!(f, "XX")?,
        }
        write!(f, " by {}", seat_letter(self.declarer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_contracts() {
        let c = Contract::parse("3NT", SOUTH, Vulnerability::None).unwrap();
        assert_eq!(c.level(), 3);
        assert_eq!(c.strain(), NOTRUMP);
        assert_eq!(c.trump(), None);
        assert_eq!(c.doubling(), Doubling::Undoubled);

        let c = Contract::parse("4sx", EAST, Vulnerability::EW).unwrap();
        assert_eq!(c.trump(), Some(SPADE));
        assert_eq!(c.doubling(), Doubling::Doubled);
        assert!(c.declarer_vulnerable());

        let c = Contract::parse("6HXX", NORTH, Vulnerability::EW).unwrap();
        assert_eq!(c.trump(), Some(HEART));
        assert_eq!(c.doubling(), Doubling::Redoubled);
        assert!(!c.declarer_vulnerable());
        assert_eq!(c.to_string(), "6HXX by N");
    }

    #[test]
    fn test_parse_rejects_bad_contracts() {
        for bad in ["", "0NT", "8S", "3Z", "3NTXXX", "NT"] {
            assert!(
                Contract::parse(bad, SOUTH, Vulnerability::None).is_err(),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_seating() {
        let c = Contract::parse("3NT", SOUTH, Vulnerability::None).unwrap();
        assert_eq!(c.opening_leader(), WEST);
        assert_eq!(c.dummy(), NORTH);
        assert_eq!(c.declaring_side(), Partnership::NorthSouth);
        assert_eq!(c.tricks_required(), 9);

        let c = Contract::parse("2D", WEST, Vulnerability::None).unwrap();
        assert_eq!(c.opening_leader(), NORTH);
        assert_eq!(c.dummy(), EAST);
    }

    #[test]
    fn test_vulnerability_from_pbn() {
        assert_eq!(Vulnerability::from_pbn("None"), Some(Vulnerability::None));
        assert_eq!(Vulnerability::from_pbn("Both"), Some(Vulnerability::All));
        assert_eq!(Vulnerability::from_pbn("NS"), Some(Vulnerability::NS));
        assert_eq!(Vulnerability::from_pbn("sideways"), None);
    }
}

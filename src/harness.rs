//! Whole-deal driver and corpus benchmark
//!
//! `play_deal` is the serving loop in miniature: ask the player for the seat
//! to move, apply the card, repeat until thirteen tricks (or however many the
//! deal holds) are resolved. `run_boards` does that for a PBN corpus and
//! compares declarer's tricks with the recorded result.

use crate::ai::AiVariant;
use crate::config::PlayConfig;
use crate::contract::Contract;
use crate::error::{PlayError, Result};
use crate::hands::Hands;
use crate::pbn::Board;
use crate::position::TrickCounts;
use crate::search::SearchStats;
use crate::state::PlayState;
use crate::trick::Trick;
use crate::types::*;
use serde::Serialize;
use tracing::{debug, info, warn};

/// One resolved trick, as reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrickRecord {
    pub leader: char,
    pub winner: char,
    /// Cards in play order
    pub cards: Vec<String>,
}

impl TrickRecord {
    fn from_trick(trick: &Trick) -> Result<Self> {
        let winner = trick
            .winner()
            .ok_or_else(|| PlayError::inconsistent("resolved trick without a winner"))?;
        Ok(TrickRecord {
            leader: seat_letter(trick.leader()),
            winner: seat_letter(winner),
            cards: trick.plays().map(|p| p.card.to_string()).collect(),
        })
    }
}

/// Search counters summed over a deal or a corpus
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SearchTotals {
    pub searches: u64,
    pub nodes: u64,
    pub leaves: u64,
    pub pruned: u64,
    pub elapsed_ms: f64,
    pub nodes_per_sec: f64,
}

impl SearchTotals {
    fn add(&mut self, stats: &SearchStats) {
        self.searches += 1;
        self.nodes += stats.nodes;
        self.leaves += stats.leaves;
        self.pruned += stats.pruned;
        self.elapsed_ms += stats.elapsed.as_secs_f64() * 1000.0;
        self.update_rate();
    }

    fn merge(&mut self, other: &SearchTotals) {
        self.searches += other.searches;
        self.nodes += other.nodes;
        self.leaves += other.leaves;
        self.pruned += other.pruned;
        self.elapsed_ms += other.elapsed_ms;
        self.update_rate();
    }

    fn update_rate(&mut self) {
        self.nodes_per_sec = if self.elapsed_ms > 0.0 {
            self.nodes as f64 / (self.elapsed_ms / 1000.0)
        } else {
            0.0
        };
    }
}

/// A deal played to the end
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealRecord {
    pub contract: String,
    /// The deal as dealt, in PBN form
    pub deal: String,
    pub tricks: TrickCounts,
    pub declarer_tricks: u8,
    pub made: bool,
    pub play: Vec<TrickRecord>,
    pub search: SearchTotals,
}

/// Play a deal to completion with `ns` choosing for North and South and `ew`
/// for East and West
pub fn play_deal(
    contract: Contract,
    hands: Hands,
    ns: AiVariant,
    ew: AiVariant,
    config: &PlayConfig,
) -> Result<DealRecord> {
    let deal = hands.to_pbn();
    let mut state = PlayState::start(contract, hands)?;
    let mut search = SearchTotals::default();

    while !state.is_complete() {
        let seat = state.next_to_play();
        let player = match Partnership::of(seat) {
            Partnership::NorthSouth => ns,
            Partnership::EastWest => ew,
        };
        let choice = player.choose_with_stats(&state, config)?;
        if let Some(stats) = &choice.stats {
            search.add(stats);
        }
        state.apply_play(choice.card)?;
    }

    let play = state
        .history()
        .iter()
        .map(TrickRecord::from_trick)
        .collect::<Result<Vec<_>>>()?;
    let declarer_tricks = state.declarer_tricks();
    debug!(
        %contract,
        declarer_tricks,
        nodes = search.nodes,
        "deal complete"
    );

    Ok(DealRecord {
        contract: contract.to_string(),
        deal,
        tricks: state.trick_counts(),
        declarer_tricks,
        made: declarer_tricks >= contract.tricks_required(),
        play,
        search,
    })
}

/// Result of one board in a corpus run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardReport {
    pub board: String,
    pub contract: String,
    pub expected: Option<u8>,
    pub actual: Option<u8>,
    /// Actual minus expected declarer tricks
    pub difference: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal: Option<DealRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Totals {
    pub boards: usize,
    pub played: usize,
    pub errors: usize,
    pub made: usize,
    pub with_expected: usize,
    pub matched_expected: usize,
    /// Mean of actual minus expected, over boards with a [Result]
    pub mean_difference: f64,
    pub search: SearchTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub declarer: String,
    pub defenders: String,
    pub boards: Vec<BoardReport>,
    pub totals: Totals,
}

/// Play every board with `declarer` choosing for the declaring side and
/// `defenders` for the other. A board that fails is reported and skipped.
pub fn run_boards(
    boards: &[Board],
    declarer: AiVariant,
    defenders: AiVariant,
    config: &PlayConfig,
) -> Report {
    let mut reports = Vec::with_capacity(boards.len());
    let mut totals = Totals {
        boards: boards.len(),
        ..Totals::default()
    };
    let mut difference_sum = 0i64;

    for board in boards {
        let (ns, ew) = match board.contract.declaring_side() {
            Partnership::NorthSouth => (declarer, defenders),
            Partnership::EastWest => (defenders, declarer),
        };

        let mut report = BoardReport {
            board: board.name.clone(),
            contract: board.contract.to_string(),
            expected: board.expected_tricks,
            actual: None,
            difference: None,
            error: None,
            deal: None,
        };

        match play_deal(board.contract, board.hands, ns, ew, config) {
            Ok(deal) => {
                totals.played += 1;
                totals.search.merge(&deal.search);
                if deal.made {
                    totals.made += 1;
                }
                report.actual = Some(deal.declarer_tricks);
                if let Some(expected) = board.expected_tricks {
                    let difference = deal.declarer_tricks as i32 - expected as i32;
                    totals.with_expected += 1;
                    if difference == 0 {
                        totals.matched_expected += 1;
                    }
                    difference_sum += difference as i64;
                    report.difference = Some(difference);
                }
                info!(
                    board = %board.name,
                    contract = %board.contract,
                    actual = deal.declarer_tricks,
                    expected = ?board.expected_tricks,
                    "board played"
                );
                report.deal = Some(deal);
            }
            Err(err) => {
                totals.errors += 1;
                warn!(board = %board.name, error = %err, "board failed");
                report.error = Some(err.to_string());
            }
        }
        reports.push(report);
    }

    if totals.with_expected > 0 {
        totals.mean_difference = difference_sum as f64 / totals.with_expected as f64;
    }

    Report {
        declarer: declarer.to_string(),
        defenders: defenders.to_string(),
        boards: reports,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::Vulnerability;
    use crate::pbn::parse_boards;

    const PBN: &str = "N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72";

    #[test]
    fn test_play_deal_heuristic() {
        let contract = Contract::parse("3NT", SOUTH, Vulnerability::None).unwrap();
        let record = play_deal(
            contract,
            Hands::from_pbn(PBN).unwrap(),
            AiVariant::Heuristic,
            AiVariant::Heuristic,
            &PlayConfig::default(),
        )
        .unwrap();
        assert_eq!(record.play.len(), 13);
        assert_eq!(record.tricks.total(), 13);
        assert_eq!(record.declarer_tricks, record.tricks.ns);
        assert_eq!(record.play[0].leader, 'W');
        for pair in record.play.windows(2) {
            assert_eq!(pair[1].leader, pair[0].winner);
        }
        assert_eq!(record.search, SearchTotals::default());
        assert_eq!(record.deal, PBN);
    }

    #[test]
    fn test_run_boards_reports_each_board() {
        let corpus = format!(
            "[Board \"1\"]\n[Deal \"{PBN}\"]\n[Declarer \"S\"]\n[Contract \"3NT\"]\n[Result \"9\"]\n\n\
             [Board \"2\"]\n[Deal \"{PBN}\"]\n[Declarer \"E\"]\n[Contract \"1C\"]\n"
        );
        let boards = parse_boards(&corpus).unwrap();
        let report = run_boards(
            &boards,
            AiVariant::Heuristic,
            AiVariant::Minimax { depth: 2 },
            &PlayConfig::default(),
        );
        assert_eq!(report.declarer, "heuristic");
        assert_eq!(report.defenders, "minimax:2");
        assert_eq!(report.totals.boards, 2);
        assert_eq!(report.totals.played, 2);
        assert_eq!(report.totals.errors, 0);
        assert_eq!(report.totals.with_expected, 1);
        assert!(report.boards[0].difference.is_some());
        assert!(report.boards[1].difference.is_none());
        // Defenders searched on both boards
        assert!(report.totals.search.searches > 0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["boards"][0]["board"], "1");
        assert_eq!(json["boards"][0]["expected"], 9);
    }
}

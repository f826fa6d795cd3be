//! Depth-limited alpha-beta search over card plays
//!
//! Negamax: every value is from the point of view of the partnership on
//! move at that node. A child value is negated (and the window flipped) only
//! when the child's mover sits on the other side; after a trick, the next
//! leader may well be a partner.

use crate::cards::Card;
use crate::error::{PlayError, Result};
use crate::eval::{evaluate, EvalWeights};
use crate::order::{order_cards, OrderedCards};
use crate::position::Position;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Deepest search allowed: one ply per card in a full deal
pub const MAX_PLY: u32 = 52;

const INFINITY: i32 = i32::MAX / 2;

/// Search switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Alpha-beta cutoffs; off means plain minimax
    pub pruning: bool,
    /// Heuristic ordering of interior moves
    pub move_ordering: bool,
    /// Requested depths are clamped to this
    pub max_ply: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            pruning: true,
            move_ordering: true,
            max_ply: MAX_PLY,
        }
    }
}

/// Counters for one search. They never influence the chosen card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SearchStats {
    pub nodes: u64,
    pub leaves: u64,
    pub pruned: u64,
    pub elapsed: Duration,
}

impl SearchStats {
    pub fn nodes_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.nodes as f64 / secs
        } else {
            0.0
        }
    }
}

/// The chosen card and its value for the mover's partnership
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    pub card: Card,
    pub score: i32,
    pub stats: SearchStats,
}

/// Choose a card for the seat to move in `pos`, looking `depth` plies ahead.
///
/// Root candidates are tried in canonical order and the first best is kept,
/// so the answer is the same with or without pruning and ordering.
pub fn search(
    pos: &Position,
    depth: u32,
    config: &SearchConfig,
    weights: &EvalWeights,
) -> Result<SearchOutcome> {
    let start = Instant::now();
    let seat = pos.next_to_play();
    if pos.is_complete() {
        return Err(PlayError::DealComplete);
    }
    weights.check().map_err(PlayError::InvalidWeights)?;

    let ceiling = config.max_ply.clamp(1, MAX_PLY);
    let depth = if depth > ceiling {
        warn!(requested = depth, ceiling, "search depth clamped");
        ceiling
    } else {
        depth.max(1)
    };

    let legal = pos.legal_cards();
    let mut searcher = Searcher {
        config,
        weights,
        stats: SearchStats::default(),
    };

    let Some(first) = legal.top() else {
        let err = PlayError::SearchExhausted { seat };
        tracing::error!(seat = seat_name(seat), error = %err, "no legal card at root");
        return Err(err);
    };

    // Forced
    if legal.size() == 1 {
        let side = Partnership::of(seat);
        searcher.stats.elapsed = start.elapsed();
        return Ok(SearchOutcome {
            card: first,
            score: evaluate(pos, side, weights),
            stats: searcher.stats,
        });
    }

    searcher.stats.nodes += 1;
    let side = Partnership::of(seat);
    let mut best: Option<(Card, i32)> = None;
    for card in legal {
        let alpha = best.map_or(-INFINITY, |(_, score)| score);
        let score = searcher.child_value(pos, card, side, depth - 1, alpha, INFINITY)?;
        trace!(seat = seat_name(seat), %card, score, "root candidate");
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((card, score));
        }
    }

    let (card, score) = best.unwrap_or((first, -INFINITY));
    searcher.stats.elapsed = start.elapsed();
    let stats = searcher.stats;
    debug!(
        seat = seat_name(seat),
        %card,
        score,
        depth,
        nodes = stats.nodes,
        leaves = stats.leaves,
        pruned = stats.pruned,
        nps = stats.nodes_per_sec() as u64,
        "search complete"
    );
    Ok(SearchOutcome { card, score, stats })
}

struct Searcher<'a> {
    config: &'a SearchConfig,
    weights: &'a EvalWeights,
    stats: SearchStats,
}

impl Searcher<'_> {
    /// Value of playing `card` in `pos`, seen from `side`
    fn child_value(
        &mut self,
        pos: &Position,
        card: Card,
        side: Partnership,
        depth: u32,
        alpha: i32,
        beta: i32,
    ) -> Result<i32> {
        let mut child = *pos;
        child.play(card)?;
        if Partnership::of(child.next_to_play()) == side {
            self.negamax(&child, depth, alpha, beta)
        } else {
            Ok(-self.negamax(&child, depth, -beta, -alpha)?)
        }
    }

    fn negamax(&mut self, pos: &Position, depth: u32, mut alpha: i32, beta: i32) -> Result<i32> {
        self.stats.nodes += 1;
        let seat = pos.next_to_play();
        let side = Partnership::of(seat);

        // The last trick plays itself; the evaluator settles it exactly
        if depth == 0 || pos.is_complete() || pos.hands()[seat].size() <= 1 {
            self.stats.leaves += 1;
            return Ok(evaluate(pos, side, self.weights));
        }

        let legal = pos.legal_cards();
        let moves = if self.config.move_ordering {
            order_cards(pos, legal)
        } else {
            OrderedCards::natural(legal)
        };

        let mut best = -INFINITY;
        for card in moves.iter() {
            let score = self.child_value(pos, card, side, depth - 1, alpha, beta)?;
            best = best.max(score);
            alpha = alpha.max(best);
            if self.config.pruning && alpha >= beta {
                self.stats.pruned += 1;
                break;
            }
        }
        Ok(best)
    }
}

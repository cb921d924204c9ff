//! Monte Carlo playouts (game simulation to completion).
//!
//! A playout alternates moves between the two sides until neither can move,
//! then scores the final position for the searching side:
//! 1.0 for a win, 0.5 for a draw, 0.0 for a loss.

use fastrand::Rng;

use crate::heuristic::best_of;
use crate::position::{Color, Location, Position, apply_move, legal_moves, piece_count};

/// How each side picks its moves during a playout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayoutPolicy {
    /// Both sides move uniformly at random.
    Random,
    /// The searching side plays the greedy heuristic move; the opponent
    /// still moves at random.
    Combined,
}

/// Outcome of a finished game for `color`.
pub fn playout_score(pos: &Position, color: Color) -> f64 {
    let own = piece_count(pos, color);
    let opp = piece_count(pos, color.opponent());
    match own.cmp(&opp) {
        std::cmp::Ordering::Greater => 1.0,
        std::cmp::Ordering::Less => 0.0,
        std::cmp::Ordering::Equal => 0.5,
    }
}

/// Move for `side` under `policy`, or `None` if `side` has to pass.
///
/// Under [`PlayoutPolicy::Combined`] only `searcher` plays the heuristic
/// move; the other side picks uniformly at random.
pub fn playout_move(
    pos: &Position,
    side: Color,
    searcher: Color,
    policy: PlayoutPolicy,
    rng: &mut Rng,
) -> Option<Location> {
    let moves = legal_moves(pos, side);
    if moves.is_empty() {
        return None;
    }
    match policy {
        PlayoutPolicy::Combined if side == searcher => best_of(pos, &moves, side, rng),
        _ => Some(moves[rng.usize(..moves.len())]),
    }
}

/// Play the game out from `pos`, with `to_move` moving first.
///
/// Runs until two consecutive turns are skipped and returns the
/// outcome for `searcher`. The position is left in its final state.
pub fn playout(
    pos: &mut Position,
    searcher: Color,
    to_move: Color,
    policy: PlayoutPolicy,
    rng: &mut Rng,
) -> f64 {
    let mut side = to_move;
    let mut skips = 0;

    while skips < 2 {
        match playout_move(pos, side, searcher, policy, rng) {
            Some(mv) => {
                apply_move(pos, mv, side);
                skips = 0;
            }
            None => skips += 1,
        }
        side = side.opponent();
    }

    playout_score(pos, searcher)
}

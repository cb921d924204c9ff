//! Greedy move selection from a weighted combination of heuristics.
//!
//! Every legal move is scored on the position it produces:
//! - positional control, from the weight table
//! - opponent mobility, `100 / (replies + 1)`
//! - discs gained, either avoided (`100 / (gained + 1)`) or sought
//!   (`100 * gained`) depending on the phase of the game
//!
//! The phase flips to late-game once at most [`LATE_GAME_EMPTY`] cells are
//! empty, where the disc count starts to dominate the outcome.

use fastrand::Rng;

use crate::constants::{EARLY_WEIGHTS, HeuristicWeights, LATE_GAME_EMPTY, LATE_WEIGHTS};
use crate::error::GameError;
use crate::position::{
    Color, Location, Position, apply_move, empty_count, flip_count, is_legal, legal_moves,
    move_count, positional_score,
};

/// Weight vector for the phase of the given position.
pub fn phase_weights(pos: &Position) -> HeuristicWeights {
    if empty_count(pos) <= LATE_GAME_EMPTY {
        LATE_WEIGHTS
    } else {
        EARLY_WEIGHTS
    }
}

/// Score a legal move. Higher is better.
fn score_move(pos: &Position, loc: Location, color: Color, w: &HeuristicWeights) -> f64 {
    // Discs gained counts the placed disc as well as the flips.
    let gained = (flip_count(pos, loc, color) + 1) as f64;

    let mut after = pos.clone();
    apply_move(&mut after, loc, color);
    let positional = positional_score(&after, color) as f64;
    let replies = move_count(&after, color.opponent()) as f64;

    w.positional * positional
        + w.mobility * (100.0 / (replies + 1.0))
        + w.flip_avoidance * (100.0 / (gained + 1.0))
        + w.flip_count * 100.0 * gained
}

/// Heuristic score of `color` playing at `loc`.
///
/// # Errors
/// - [`GameError::IllegalMove`] if the move is not legal for `color`
pub fn evaluate_move(pos: &Position, loc: Location, color: Color) -> Result<f64, GameError> {
    if !is_legal(pos, loc, color) {
        return Err(GameError::IllegalMove(loc));
    }
    Ok(score_move(pos, loc, color, &phase_weights(pos)))
}

/// Pick the highest-scoring candidate, breaking exact ties uniformly at random.
///
/// Returns `None` if there are no candidates.
pub fn select_best<T: Copy>(candidates: &[T], scores: &[f64], rng: &mut Rng) -> Option<T> {
    debug_assert_eq!(candidates.len(), scores.len());

    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let tied: Vec<T> = candidates
        .iter()
        .zip(scores)
        .filter(|&(_, &s)| s == max)
        .map(|(&c, _)| c)
        .collect();

    if tied.is_empty() {
        return None;
    }
    Some(tied[rng.usize(..tied.len())])
}

/// Best heuristic move among `moves`, which must all be legal for `color`.
pub(crate) fn best_of(
    pos: &Position,
    moves: &[Location],
    color: Color,
    rng: &mut Rng,
) -> Option<Location> {
    let w = phase_weights(pos);
    let scores: Vec<f64> = moves
        .iter()
        .map(|&loc| score_move(pos, loc, color, &w))
        .collect();
    select_best(moves, &scores, rng)
}

/// Choose the greedy heuristic move for `color`.
///
/// # Errors
/// - [`GameError::NoLegalMoves`] if `color` cannot move
pub fn choose_heuristic_move(
    pos: &Position,
    color: Color,
    rng: &mut Rng,
) -> Result<Location, GameError> {
    let moves = legal_moves(pos, color);
    best_of(pos, &moves, color, rng).ok_or(GameError::NoLegalMoves(color))
}

/// Choose a legal move for `color` uniformly at random.
///
/// # Errors
/// - [`GameError::NoLegalMoves`] if `color` cannot move
pub fn choose_random_move(
    pos: &Position,
    color: Color,
    rng: &mut Rng,
) -> Result<Location, GameError> {
    let moves = legal_moves(pos, color);
    if moves.is_empty() {
        return Err(GameError::NoLegalMoves(color));
    }
    Ok(moves[rng.usize(..moves.len())])
}

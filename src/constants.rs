//! Constants for board geometry, search parameters, and heuristic weights.
//!
//! The board is always 8x8. Everything tunable at runtime lives in
//! [`crate::mcts::SearchConfig`]; the values here are its defaults.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 8;

/// Number of cells on the board.
pub const NUM_CELLS: usize = N * N;

/// The 8 ray directions as (row delta, column delta).
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

// =============================================================================
// Monte Carlo Search Parameters
// =============================================================================

/// Wall-clock budget for one search decision, in milliseconds.
/// Split evenly across the candidate moves.
pub const SEARCH_BUDGET_MS: u64 = 5000;

/// Maximum number of playouts per candidate move.
pub const MAX_PLAYOUTS: u32 = 250;

// =============================================================================
// Heuristic Weights
// =============================================================================

/// A position with this many empty cells or fewer is scored as late-game.
pub const LATE_GAME_EMPTY: usize = 10;

/// Weights applied to the four heuristic signals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicWeights {
    /// Positional control
    pub positional: f64,
    /// Opponent mobility term
    pub mobility: f64,
    /// Flip avoidance term, `100 / (flipped + 1)`
    pub flip_avoidance: f64,
    /// Flip count term, `100 * flipped`
    pub flip_count: f64,
}

/// Weights used while more than [`LATE_GAME_EMPTY`] cells are empty.
pub const EARLY_WEIGHTS: HeuristicWeights = HeuristicWeights {
    positional: 1.0,
    mobility: 0.3,
    flip_avoidance: 0.8,
    flip_count: 0.0,
};

/// Weights used once the board is nearly full.
pub const LATE_WEIGHTS: HeuristicWeights = HeuristicWeights {
    positional: 0.1,
    mobility: 0.6,
    flip_avoidance: 0.0,
    flip_count: 4.0,
};

// =============================================================================
// Positional Weight Table
// =============================================================================

/// Default strategic value of controlling each cell.
///
/// Corners are worth the most, the cells touching a corner are penalized,
/// and rows 5-8 mirror rows 4-1.
pub const POSITIONAL_TABLE: [[i32; N]; N] = [
    [99, -8, 8, 6, 6, 8, -8, 99],
    [-8, -24, -4, -3, -3, -4, -24, -8],
    [8, -4, 7, 4, 4, 7, -4, 8],
    [6, -3, 4, 0, 0, 4, -3, 6],
    [6, -3, 4, 0, 0, 4, -3, 6],
    [8, -4, 7, 4, 4, 7, -4, 8],
    [-8, -24, -4, -3, -3, -4, -24, -8],
    [99, -8, 8, 6, 6, 8, -8, 99],
];

//! Flat Monte Carlo search under a wall-clock budget.
//!
//! Every legal move of the searching side is a candidate. The budget is split
//! evenly across the candidates, and each one gets playouts until either its
//! share of the time runs out or it reaches the playout cap. There is no tree
//! and nothing is reused between decisions.
//!
//! A candidate cut short by the clock has its score rescaled as if it had run
//! the full number of playouts, so slow moves are not penalized for finishing
//! fewer simulations.

use std::time::{Duration, Instant};

use fastrand::Rng;
use log::{debug, trace};

use crate::constants::{MAX_PLAYOUTS, SEARCH_BUDGET_MS};
use crate::error::GameError;
use crate::heuristic::select_best;
use crate::playout::{PlayoutPolicy, playout};
use crate::position::{Color, Location, Position, apply_move, legal_moves, str_coord};

/// Runtime search parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Total wall-clock time for one decision
    pub budget: Duration,
    /// Playout cap per candidate move
    pub max_playouts: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            budget: Duration::from_millis(SEARCH_BUDGET_MS),
            max_playouts: MAX_PLAYOUTS,
        }
    }
}

impl SearchConfig {
    /// Time allotted to each of `candidates` moves.
    pub fn per_move_budget(&self, candidates: usize) -> Duration {
        self.budget / candidates.max(1) as u32
    }
}

/// Search statistics for one candidate move.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateStats {
    pub mv: Location,
    /// Number of completed playouts
    pub playouts: u32,
    /// Sum of playout outcomes (wins + half the draws)
    pub raw_score: f64,
    /// Score after rescaling to the full playout cap
    pub score: f64,
    /// Time spent on this candidate
    pub elapsed: Duration,
}

impl CandidateStats {
    /// Mean outcome per playout, or -0.1 if no playout ran.
    #[inline]
    pub fn winrate(&self) -> f64 {
        if self.playouts > 0 {
            self.raw_score / self.playouts as f64
        } else {
            -0.1
        }
    }
}

/// Result of one search decision.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// The chosen move
    pub best: Location,
    /// Statistics for every candidate, in legal-move order
    pub candidates: Vec<CandidateStats>,
    /// Total time spent searching
    pub elapsed: Duration,
}

impl SearchResult {
    pub fn total_playouts(&self) -> u32 {
        self.candidates.iter().map(|c| c.playouts).sum()
    }
}

/// Run playouts for a single candidate until its time share or the cap runs out.
///
/// The clock is only checked between playouts and never before the first,
/// so every candidate completes at least one playout whenever the cap allows it.
fn evaluate_candidate(
    pos: &Position,
    mv: Location,
    color: Color,
    policy: PlayoutPolicy,
    config: &SearchConfig,
    per_move: Duration,
    rng: &mut Rng,
) -> CandidateStats {
    let start = Instant::now();
    let mut raw_score = 0.0;
    let mut playouts = 0;

    while playouts < config.max_playouts {
        if playouts > 0 && start.elapsed() > per_move {
            break;
        }
        let mut sim = pos.clone();
        apply_move(&mut sim, mv, color);
        raw_score += playout(&mut sim, color, color.opponent(), policy, rng);
        playouts += 1;
    }

    let score = if playouts > 0 && playouts < config.max_playouts {
        raw_score * (config.max_playouts as f64 / playouts as f64)
    } else {
        raw_score
    };

    let stats = CandidateStats {
        mv,
        playouts,
        raw_score,
        score,
        elapsed: start.elapsed(),
    };
    trace!(
        "candidate {} playouts={} raw={:.1} score={:.1} in {:?}",
        str_coord(mv),
        stats.playouts,
        stats.raw_score,
        stats.score,
        stats.elapsed
    );
    stats
}

/// Run a Monte Carlo search for `color` and return full statistics.
///
/// The caller's position is never modified; every playout runs on a clone.
///
/// # Errors
/// - [`GameError::NoLegalMoves`] if `color` cannot move
pub fn search(
    pos: &Position,
    color: Color,
    policy: PlayoutPolicy,
    config: &SearchConfig,
    rng: &mut Rng,
) -> Result<SearchResult, GameError> {
    let moves = legal_moves(pos, color);
    if moves.is_empty() {
        return Err(GameError::NoLegalMoves(color));
    }

    let start = Instant::now();
    let per_move = config.per_move_budget(moves.len());
    debug!(
        "searching {} candidates for {color} ({policy:?}), {per_move:?} each",
        moves.len()
    );

    let candidates: Vec<CandidateStats> = moves
        .iter()
        .map(|&mv| evaluate_candidate(pos, mv, color, policy, config, per_move, rng))
        .collect();

    let scores: Vec<f64> = candidates.iter().map(|c| c.score).collect();
    let best = select_best(&moves, &scores, rng).ok_or(GameError::NoLegalMoves(color))?;

    let result = SearchResult {
        best,
        candidates,
        elapsed: start.elapsed(),
    };
    debug!(
        "chose {} after {} playouts in {:?}",
        str_coord(best),
        result.total_playouts(),
        result.elapsed
    );
    Ok(result)
}

/// Choose a move for `color` by Monte Carlo search with the default budget.
///
/// # Errors
/// - [`GameError::NoLegalMoves`] if `color` cannot move
pub fn choose_mcts_move(
    pos: &Position,
    color: Color,
    policy: PlayoutPolicy,
    rng: &mut Rng,
) -> Result<Location, GameError> {
    search(pos, color, policy, &SearchConfig::default(), rng).map(|r| r.best)
}

/// Print debug information about every candidate.
pub fn dump_candidates(result: &SearchResult) {
    for c in &result.candidates {
        eprintln!(
            "move {} n={} wr={:.3} score={:.1} t={:?}{}",
            str_coord(c.mv),
            c.playouts,
            c.winrate(),
            c.score,
            c.elapsed,
            if c.mv == result.best { " *" } else { "" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{Cell, is_legal, parse_coord};

    fn quick(playouts: u32) -> SearchConfig {
        SearchConfig {
            budget: Duration::from_secs(30),
            max_playouts: playouts,
        }
    }

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.budget, Duration::from_millis(5000));
        assert_eq!(config.max_playouts, 250);
        assert_eq!(config.per_move_budget(4), Duration::from_millis(1250));
    }

    #[test]
    fn test_search_full_playouts_not_rescaled() {
        let pos = Position::new();
        let mut rng = Rng::with_seed(17);
        let result =
            search(&pos, Color::Black, PlayoutPolicy::Random, &quick(10), &mut rng).unwrap();

        assert_eq!(result.candidates.len(), 4);
        for c in &result.candidates {
            assert_eq!(c.playouts, 10);
            assert_eq!(c.score, c.raw_score);
            assert!((0.0..=10.0).contains(&c.raw_score));
        }
        assert!(is_legal(&pos, result.best, Color::Black));
        assert_eq!(result.total_playouts(), 40);
    }

    #[test]
    fn test_best_has_max_score() {
        let pos = Position::new();
        let mut rng = Rng::with_seed(5);
        let result =
            search(&pos, Color::White, PlayoutPolicy::Random, &quick(20), &mut rng).unwrap();
        let max = result
            .candidates
            .iter()
            .map(|c| c.score)
            .fold(f64::NEG_INFINITY, f64::max);
        let best = result
            .candidates
            .iter()
            .find(|c| c.mv == result.best)
            .unwrap();
        assert_eq!(best.score, max);
    }

    #[test]
    fn test_short_budget_rescales() {
        let pos = Position::new();
        let mut rng = Rng::with_seed(8);
        let config = SearchConfig {
            budget: Duration::ZERO,
            max_playouts: 250,
        };
        let result =
            search(&pos, Color::Black, PlayoutPolicy::Random, &config, &mut rng).unwrap();
        for c in &result.candidates {
            // A zero budget still runs exactly one playout per candidate.
            assert_eq!(c.playouts, 1);
            assert_eq!(c.score, c.raw_score * 250.0);
        }
    }

    #[test]
    fn test_zero_playout_cap() {
        let pos = Position::new();
        let mut rng = Rng::with_seed(8);
        let result =
            search(&pos, Color::Black, PlayoutPolicy::Random, &quick(0), &mut rng).unwrap();
        assert!(result.candidates.iter().all(|c| c.playouts == 0 && c.score == 0.0));
        assert!(is_legal(&pos, result.best, Color::Black));
    }

    #[test]
    fn test_search_leaves_position_untouched() {
        let pos = Position::new();
        let before = pos.clone();
        let mut rng = Rng::with_seed(21);
        search(&pos, Color::Black, PlayoutPolicy::Combined, &quick(3), &mut rng).unwrap();
        assert_eq!(pos, before);
    }

    #[test]
    fn test_search_no_moves() {
        let mut pos = Position::new();
        for l in Location::all() {
            pos.set(l, Cell::Black);
        }
        let mut rng = Rng::with_seed(1);
        assert_eq!(
            search(&pos, Color::White, PlayoutPolicy::Random, &quick(5), &mut rng).unwrap_err(),
            GameError::NoLegalMoves(Color::White)
        );
    }

    #[test]
    fn test_search_finds_winning_move() {
        // Only h8 is empty; playing it flips the bottom row and a diagonal.
        let mut pos = Position::new();
        for l in Location::all() {
            pos.set(l, Cell::White);
        }
        for r in 0..7 {
            for c in 0..4 {
                pos.set(Location::new(r, c), Cell::Black);
            }
        }
        pos.set(parse_coord("a8").unwrap(), Cell::Black);
        pos.set(parse_coord("h8").unwrap(), Cell::Empty);

        let mut rng = Rng::with_seed(2);
        let result =
            search(&pos, Color::Black, PlayoutPolicy::Random, &quick(5), &mut rng).unwrap();
        assert_eq!(result.best, parse_coord("h8").unwrap());
        assert_eq!(result.candidates.len(), 1);

        // Every playout ends at once on the filled board, so the default budget is cheap here.
        assert_eq!(
            choose_mcts_move(&pos, Color::Black, PlayoutPolicy::Combined, &mut rng),
            Ok(parse_coord("h8").unwrap())
        );
    }
}

//! Game sessions: turn order, forced passes, and multi-game matches.
//!
//! A game ends when both sides have to pass in a row. [`Game`] keeps the
//! bookkeeping; [`play_computer_game`] and [`run_match`] drive it with
//! computer strategies on both sides.

use std::fmt;

use fastrand::Rng;
use log::info;

use crate::error::GameError;
use crate::mcts::SearchConfig;
use crate::player::Strategy;
use crate::playout::playout_score;
use crate::position::{Color, Location, Position, has_any_move, piece_count, play_move, winner};

/// What a side did on its turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    Moved(Location),
    Skipped,
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::Moved(loc) => write!(f, "{loc}"),
            Turn::Skipped => write!(f, "pass"),
        }
    }
}

/// Final result of a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOutcome {
    /// `None` on a draw
    pub winner: Option<Color>,
    pub black: usize,
    pub white: usize,
}

/// A game in progress.
#[derive(Clone, Debug)]
pub struct Game {
    pos: Position,
    to_move: Color,
    skips: u8,
    history: Vec<(Color, Turn)>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// New game from the opening, Black to move.
    pub fn new() -> Self {
        Self::from_position(Position::new(), Color::Black)
    }

    /// Continue a game from an arbitrary position.
    pub fn from_position(pos: Position, to_move: Color) -> Self {
        Self {
            pos,
            to_move,
            skips: 0,
            history: Vec::new(),
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn history(&self) -> &[(Color, Turn)] {
        &self.history
    }

    /// True once both sides have passed in a row.
    pub fn is_over(&self) -> bool {
        self.skips >= 2
    }

    /// Pass the turn if the side to move has no legal move.
    ///
    /// Returns whether a pass happened.
    pub fn skip_if_stuck(&mut self) -> bool {
        if self.is_over() || has_any_move(&self.pos, self.to_move) {
            return false;
        }
        self.history.push((self.to_move, Turn::Skipped));
        self.skips += 1;
        self.to_move = self.to_move.opponent();
        true
    }

    /// Play a move for the side to move.
    ///
    /// Returns the number of discs flipped.
    ///
    /// # Errors
    /// - [`GameError::IllegalMove`] if the move is not legal; the game is unchanged
    pub fn play(&mut self, loc: Location) -> Result<usize, GameError> {
        let flipped = play_move(&mut self.pos, loc, self.to_move)?;
        self.history.push((self.to_move, Turn::Moved(loc)));
        self.skips = 0;
        self.to_move = self.to_move.opponent();
        Ok(flipped)
    }

    /// Disc counts and winner of the current position.
    pub fn outcome(&self) -> GameOutcome {
        GameOutcome {
            winner: winner(&self.pos),
            black: piece_count(&self.pos, Color::Black),
            white: piece_count(&self.pos, Color::White),
        }
    }
}

/// Play a full game between two computer strategies, Black moving first.
///
/// `on_turn` sees the game after every move or pass.
///
/// # Errors
/// Propagates errors from move selection; none occur for well-behaved strategies.
pub fn play_computer_game(
    black: Strategy,
    white: Strategy,
    config: &SearchConfig,
    rng: &mut Rng,
    mut on_turn: impl FnMut(&Game),
) -> Result<Game, GameError> {
    let mut game = Game::new();

    while !game.is_over() {
        if !game.skip_if_stuck() {
            let strategy = match game.to_move() {
                Color::Black => black,
                Color::White => white,
            };
            let mv = strategy.choose_move(game.position(), game.to_move(), config, rng)?;
            game.play(mv)?;
        }
        on_turn(&game);
    }

    let outcome = game.outcome();
    info!(
        "game over: Black {} - White {} ({:?})",
        outcome.black, outcome.white, outcome.winner
    );
    Ok(game)
}

/// Win/draw/loss tally from one side's perspective.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchTally {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl MatchTally {
    /// Record a finished position for `color`.
    pub fn record(&mut self, pos: &Position, color: Color) {
        let score = playout_score(pos, color);
        if score == 1.0 {
            self.wins += 1;
        } else if score == 0.0 {
            self.losses += 1;
        } else {
            self.draws += 1;
        }
    }

    pub fn games(&self) -> u32 {
        self.wins + self.draws + self.losses
    }
}

/// Play `games` computer games and tally the results for White, the second player.
///
/// `on_game` is called with the game number (from 1) and each finished game.
///
/// # Errors
/// Propagates errors from [`play_computer_game`].
pub fn run_match(
    black: Strategy,
    white: Strategy,
    games: u32,
    config: &SearchConfig,
    rng: &mut Rng,
    mut on_game: impl FnMut(u32, &Game),
) -> Result<MatchTally, GameError> {
    let mut tally = MatchTally::default();
    for n in 1..=games {
        let game = play_computer_game(black, white, config, rng, |_| {})?;
        tally.record(game.position(), Color::White);
        on_game(n, &game);
    }
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{Cell, is_terminal, parse_coord};

    #[test]
    fn test_game_play_alternates() {
        let mut game = Game::new();
        assert_eq!(game.to_move(), Color::Black);
        assert_eq!(game.play(parse_coord("d3").unwrap()), Ok(1));
        assert_eq!(game.to_move(), Color::White);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_illegal_play_keeps_turn() {
        let mut game = Game::new();
        assert!(game.play(parse_coord("a1").unwrap()).is_err());
        assert_eq!(game.to_move(), Color::Black);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_skip_bookkeeping() {
        // A lone Black disc: neither side can capture anything.
        let mut pos = Position::new();
        for l in Location::all() {
            pos.set(l, Cell::Empty);
        }
        pos.set(Location::new(0, 0), Cell::Black);
        let mut game = Game::from_position(pos, Color::White);

        assert!(!game.is_over());
        assert!(game.skip_if_stuck());
        assert!(!game.is_over());
        assert!(game.skip_if_stuck());
        assert!(game.is_over());
        assert!(!game.skip_if_stuck());
        assert_eq!(
            game.history(),
            &[(Color::White, Turn::Skipped), (Color::Black, Turn::Skipped)]
        );
        assert_eq!(
            game.outcome(),
            GameOutcome {
                winner: Some(Color::Black),
                black: 1,
                white: 0
            }
        );
    }

    #[test]
    fn test_skip_when_moves_exist() {
        let mut game = Game::new();
        assert!(!game.skip_if_stuck());
        assert_eq!(game.to_move(), Color::Black);
    }

    #[test]
    fn test_random_game_completes() {
        let mut rng = Rng::with_seed(2024);
        let mut turns = 0;
        let game = play_computer_game(
            Strategy::Random,
            Strategy::Greedy,
            &SearchConfig::default(),
            &mut rng,
            |_| turns += 1,
        )
        .unwrap();
        assert!(game.is_over());
        assert!(is_terminal(game.position()));
        assert_eq!(turns, game.history().len());
        let outcome = game.outcome();
        assert!(outcome.black + outcome.white <= 64);
    }

    #[test]
    fn test_match_tally() {
        let mut rng = Rng::with_seed(77);
        let mut seen = Vec::new();
        let tally = run_match(
            Strategy::Random,
            Strategy::Random,
            5,
            &SearchConfig::default(),
            &mut rng,
            |n, _| seen.push(n),
        )
        .unwrap();
        assert_eq!(tally.games(), 5);
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_tally_record() {
        let mut tally = MatchTally::default();
        let pos = Position::new();
        tally.record(&pos, Color::White);
        assert_eq!(tally.draws, 1);

        let mut won = Position::new();
        won.set(Location::new(0, 0), Cell::White);
        tally.record(&won, Color::White);
        tally.record(&won, Color::Black);
        assert_eq!(
            tally,
            MatchTally {
                wins: 1,
                draws: 1,
                losses: 1
            }
        );
    }
}

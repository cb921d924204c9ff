//! Players and their move-selection strategies.
//!
//! A [`Player`] pairs a side with whoever controls it. Computer players pick
//! moves through a [`Strategy`]; human moves come from the caller.

use std::fmt;
use std::str::FromStr;

use fastrand::Rng;

use crate::error::GameError;
use crate::heuristic::{choose_heuristic_move, choose_random_move};
use crate::mcts::{SearchConfig, search};
use crate::playout::PlayoutPolicy;
use crate::position::{Color, Location, Position};

/// How a computer player picks its moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Uniformly random legal move
    Random,
    /// Greedy weighted heuristic
    Greedy,
    /// Monte Carlo search with random playouts
    PureMcts,
    /// Monte Carlo search with heuristic playouts for the searching side
    HeuristicMcts,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Random,
        Strategy::Greedy,
        Strategy::PureMcts,
        Strategy::HeuristicMcts,
    ];

    /// Choose a move for `color`.
    ///
    /// # Errors
    /// - [`GameError::NoLegalMoves`] if `color` cannot move
    pub fn choose_move(
        self,
        pos: &Position,
        color: Color,
        config: &SearchConfig,
        rng: &mut Rng,
    ) -> Result<Location, GameError> {
        match self {
            Strategy::Random => choose_random_move(pos, color, rng),
            Strategy::Greedy => choose_heuristic_move(pos, color, rng),
            Strategy::PureMcts => {
                search(pos, color, PlayoutPolicy::Random, config, rng).map(|r| r.best)
            }
            Strategy::HeuristicMcts => {
                search(pos, color, PlayoutPolicy::Combined, config, rng).map(|r| r.best)
            }
        }
    }

    /// Short description for end-of-game summaries.
    pub fn describe(self) -> &'static str {
        match self {
            Strategy::Random => "random moves",
            Strategy::Greedy => "greedy heuristic moves",
            Strategy::PureMcts => "pure Monte Carlo tree search",
            Strategy::HeuristicMcts => "heuristic Monte Carlo tree search",
        }
    }

    /// Playout policy used by the search strategies.
    pub fn playout_policy(self) -> Option<PlayoutPolicy> {
        match self {
            Strategy::PureMcts => Some(PlayoutPolicy::Random),
            Strategy::HeuristicMcts => Some(PlayoutPolicy::Combined),
            _ => None,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Random => "random",
            Strategy::Greedy => "greedy",
            Strategy::PureMcts => "mcts",
            Strategy::HeuristicMcts => "mcts-combined",
        };
        f.write_str(name)
    }
}

/// Accepts the names printed by `Display` or the menu numbers 1-4.
impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "random" => Ok(Strategy::Random),
            "2" | "greedy" => Ok(Strategy::Greedy),
            "3" | "mcts" | "pure" => Ok(Strategy::PureMcts),
            "4" | "mcts-combined" | "combined" => Ok(Strategy::HeuristicMcts),
            other => Err(format!(
                "unknown strategy {other:?}, expected one of: random, greedy, mcts, mcts-combined"
            )),
        }
    }
}

/// Who is in control of a side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Controller {
    Human,
    Computer(Strategy),
}

/// A side together with its controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Player {
    color: Color,
    controller: Controller,
}

impl Player {
    pub fn human(color: Color) -> Self {
        Self {
            color,
            controller: Controller::Human,
        }
    }

    pub fn computer(color: Color, strategy: Strategy) -> Self {
        Self {
            color,
            controller: Controller::Computer(strategy),
        }
    }

    /// The side this player moves.
    pub fn id(&self) -> Color {
        self.color
    }

    pub fn controller(&self) -> Controller {
        self.controller
    }

    /// Message announcing the start of this player's turn.
    pub fn start_turn(&self) -> String {
        match self.controller {
            Controller::Human => "Player please enter a move:".to_string(),
            Controller::Computer(_) => "Computer calculating optimal move...".to_string(),
        }
    }

    /// Message announcing that this player has no move and must pass.
    pub fn skip_turn(&self) -> String {
        match self.controller {
            Controller::Human => {
                "Player, you are unable to make a move, skipping your turn.".to_string()
            }
            Controller::Computer(_) => {
                format!("{} cannot make a move, skipping turn.", self.color.glyph())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::is_legal;
    use std::time::Duration;

    #[test]
    fn test_strategy_parse_roundtrip() {
        for s in Strategy::ALL {
            assert_eq!(s.to_string().parse::<Strategy>(), Ok(s));
        }
        assert_eq!("3".parse::<Strategy>(), Ok(Strategy::PureMcts));
        assert_eq!("Combined".parse::<Strategy>(), Ok(Strategy::HeuristicMcts));
        assert!("minimax".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_every_strategy_returns_legal_move() {
        let pos = Position::new();
        let config = SearchConfig {
            budget: Duration::from_millis(200),
            max_playouts: 4,
        };
        let mut rng = Rng::with_seed(31);
        for s in Strategy::ALL {
            let mv = s.choose_move(&pos, Color::White, &config, &mut rng).unwrap();
            assert!(is_legal(&pos, mv, Color::White), "{s} chose {mv}");
        }
    }

    #[test]
    fn test_playout_policy() {
        assert_eq!(Strategy::PureMcts.playout_policy(), Some(PlayoutPolicy::Random));
        assert_eq!(
            Strategy::HeuristicMcts.playout_policy(),
            Some(PlayoutPolicy::Combined)
        );
        assert_eq!(Strategy::Greedy.playout_policy(), None);
    }

    #[test]
    fn test_player_messages() {
        let human = Player::human(Color::Black);
        let cpu = Player::computer(Color::White, Strategy::Greedy);
        assert_eq!(human.id(), Color::Black);
        assert_eq!(cpu.id(), Color::White);
        assert_eq!(cpu.controller(), Controller::Computer(Strategy::Greedy));
        assert!(human.start_turn().contains("enter a move"));
        assert_eq!(cpu.skip_turn(), "x cannot make a move, skipping turn.");
    }
}

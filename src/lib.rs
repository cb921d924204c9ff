//! Reversi-MCTS: a Reversi (Othello) engine with heuristic and Monte Carlo players.
//!
//! This crate provides the board engine (legality, move application,
//! scoring) and three ways of choosing a move: uniform random, a weighted
//! greedy heuristic, and a time-boxed Monte Carlo search.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, search budget, heuristic weights
//! - [`position`] - Core game logic (board state, rays, flips, scoring)
//! - [`heuristic`] - Greedy weighted move evaluation and random moves
//! - [`playout`] - Game simulation to completion
//! - [`mcts`] - Flat Monte Carlo search under a wall-clock budget
//! - [`player`] - Strategies and player roles
//! - [`game`] - Turn loop, passes, and computer-vs-computer matches
//! - [`error`] - Error type for broken move preconditions
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//!
//! use reversi_mcts::mcts::{SearchConfig, search};
//! use reversi_mcts::playout::PlayoutPolicy;
//! use reversi_mcts::position::{Color, Position, parse_coord, play_move, str_coord};
//!
//! // Create a new game and play Black's opening move
//! let mut pos = Position::new();
//! play_move(&mut pos, parse_coord("d3").unwrap(), Color::Black).unwrap();
//!
//! // Search White's reply with a short budget
//! let config = SearchConfig { budget: Duration::from_millis(100), max_playouts: 20 };
//! let mut rng = fastrand::Rng::with_seed(1);
//! let result = search(&pos, Color::White, PlayoutPolicy::Random, &config, &mut rng).unwrap();
//! println!("Best move: {}", str_coord(result.best));
//! ```

pub mod constants;
pub mod error;
pub mod game;
pub mod heuristic;
pub mod mcts;
pub mod player;
pub mod playout;
pub mod position;

pub use error::GameError;

//! Reversi position representation and move execution.
//!
//! This module provides the core game logic:
//! - An 8x8 grid of cells plus the positional weight table
//! - Ray casting in the 8 directions for legality and capture
//! - Move application with simultaneous flips
//! - Disc counts and positional scoring
//!
//! Operations are free functions over [`Position`], mirroring how callers
//! drive the board: ask for [`legal_moves`], pick one, then [`play_move`].

use std::fmt;

use crate::constants::{DIRECTIONS, N, POSITIONAL_TABLE};
use crate::error::GameError;

/// One of the two competing sides. Black moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The other side.
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// The cell value occupied by this side.
    pub fn cell(self) -> Cell {
        match self {
            Color::Black => Cell::Black,
            Color::White => Cell::White,
        }
    }

    /// Character used when rendering the board.
    pub fn glyph(self) -> char {
        match self {
            Color::Black => 'o',
            Color::White => 'x',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// Contents of a single board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    /// The side occupying this cell, if any.
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Color::Black),
            Cell::White => Some(Color::White),
        }
    }

    fn glyph(self) -> char {
        self.color().map_or('.', Color::glyph)
    }
}

/// A ray direction as (row delta, column delta).
pub type Direction = (isize, isize);

/// A cell coordinate. Rows and columns are in `0..8`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    /// Create a location. Both coordinates must be below 8.
    pub const fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < N && col < N);
        Self { row, col }
    }

    /// Create a location from signed coordinates, rejecting anything off the board.
    pub fn try_new(row: isize, col: isize) -> Result<Self, GameError> {
        if on_board(row, col) {
            Ok(Self {
                row: row as usize,
                col: col as usize,
            })
        } else {
            Err(GameError::OutOfBounds { row, col })
        }
    }

    /// The neighboring location one step along `dir`, if it is on the board.
    fn step(self, (dr, dc): Direction) -> Option<Location> {
        let row = self.row as isize + dr;
        let col = self.col as isize + dc;
        on_board(row, col).then(|| Location {
            row: row as usize,
            col: col as usize,
        })
    }

    /// Iterate over all 64 locations in row-major order.
    pub fn all() -> impl Iterator<Item = Location> {
        (0..N).flat_map(|row| (0..N).map(move |col| Location { row, col }))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&str_coord(*self))
    }
}

/// Per-cell strategic value of control, fixed once a game is set up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PositionalWeights([[i32; N]; N]);

impl Default for PositionalWeights {
    fn default() -> Self {
        Self(POSITIONAL_TABLE)
    }
}

impl PositionalWeights {
    pub const fn new(table: [[i32; N]; N]) -> Self {
        Self(table)
    }

    /// Weight of a single cell.
    #[inline]
    pub fn get(&self, loc: Location) -> i32 {
        self.0[loc.row][loc.col]
    }

    /// True if the table is unchanged under horizontal and vertical reflection.
    pub fn is_symmetric(&self) -> bool {
        Location::all().all(|loc| {
            let w = self.get(loc);
            w == self.0[N - 1 - loc.row][loc.col] && w == self.0[loc.row][N - 1 - loc.col]
        })
    }
}

/// A Reversi position: the grid plus the weight table used to score it.
///
/// Cloning is a deep copy, so simulations can play forward on a clone
/// without touching the caller's board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    cells: [[Cell; N]; N],
    weights: PositionalWeights,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// Standard opening position with the default weight table.
    pub fn new() -> Self {
        Self::with_weights(PositionalWeights::default())
    }

    /// Standard opening position scored with a caller-supplied weight table.
    pub fn with_weights(weights: PositionalWeights) -> Self {
        let mut p = Position {
            cells: [[Cell::Empty; N]; N],
            weights,
        };
        reset(&mut p);
        p
    }

    /// Contents of a cell.
    #[inline]
    pub fn get(&self, loc: Location) -> Cell {
        self.cells[loc.row][loc.col]
    }

    /// Overwrite a cell directly, bypassing the rules.
    ///
    /// Intended for setting up positions; normal play goes through [`play_move`].
    pub fn set(&mut self, loc: Location, cell: Cell) {
        self.cells[loc.row][loc.col] = cell;
    }

    pub fn weights(&self) -> &PositionalWeights {
        &self.weights
    }
}

/// Reset a position to the standard opening, keeping its weight table.
///
/// The four center cells are split two and two, with each side's pair on a diagonal.
pub fn reset(pos: &mut Position) {
    pos.cells = [[Cell::Empty; N]; N];
    let lo = N / 2 - 1;
    let hi = N / 2;
    pos.cells[lo][lo] = Cell::White;
    pos.cells[lo][hi] = Cell::Black;
    pos.cells[hi][hi] = Cell::White;
    pos.cells[hi][lo] = Cell::Black;
}

/// Check whether signed coordinates fall on the board.
#[inline]
pub fn on_board(row: isize, col: isize) -> bool {
    (0..N as isize).contains(&row) && (0..N as isize).contains(&col)
}

/// Length of the opponent run captured along `dir` by `color` playing at `loc`.
///
/// Returns 0 unless the ray starts with an opponent disc and ends, after an
/// unbroken run of opponent discs, on one of `color`'s own discs.
fn capture_run(pos: &Position, loc: Location, dir: Direction, color: Color) -> usize {
    let own = color.cell();
    let opp = color.opponent().cell();
    let mut run = 0;
    let mut cur = loc.step(dir);

    while let Some(l) = cur {
        match pos.get(l) {
            c if c == opp => run += 1,
            c if c == own => return run,
            _ => return 0,
        }
        cur = l.step(dir);
    }
    0
}

/// Capture run length for every direction, in [`DIRECTIONS`] order.
///
/// Computed entirely on the pre-move board, so flips in one direction can
/// never influence the test for another.
fn capture_runs(pos: &Position, loc: Location, color: Color) -> [usize; 8] {
    DIRECTIONS.map(|dir| capture_run(pos, loc, dir, color))
}

/// Check if walking from `loc` along `dir` captures opponent discs for `color`.
///
/// The adjacent cell must be the opponent's; the walk continues over opponent
/// discs and captures only if it ends on one of `color`'s discs.
pub fn is_capturing_ray(pos: &Position, loc: Location, dir: Direction, color: Color) -> bool {
    capture_run(pos, loc, dir, color) > 0
}

/// Check if `color` may play at `loc`: the cell is empty and some ray captures.
pub fn is_legal(pos: &Position, loc: Location, color: Color) -> bool {
    pos.get(loc) == Cell::Empty
        && DIRECTIONS
            .iter()
            .any(|&dir| is_capturing_ray(pos, loc, dir, color))
}

/// All legal moves for `color`, in row-major order.
pub fn legal_moves(pos: &Position, color: Color) -> Vec<Location> {
    Location::all()
        .filter(|&loc| is_legal(pos, loc, color))
        .collect()
}

/// Number of legal moves for `color`, without collecting them.
pub fn move_count(pos: &Position, color: Color) -> usize {
    Location::all()
        .filter(|&loc| is_legal(pos, loc, color))
        .count()
}

/// True if `color` has at least one legal move. Stops at the first one found.
pub fn has_any_move(pos: &Position, color: Color) -> bool {
    Location::all().any(|loc| is_legal(pos, loc, color))
}

/// Number of opponent discs that `color` playing at `loc` would flip.
///
/// Returns 0 for an illegal move.
pub fn flip_count(pos: &Position, loc: Location, color: Color) -> usize {
    if pos.get(loc) != Cell::Empty {
        return 0;
    }
    capture_runs(pos, loc, color).iter().sum()
}

/// Play a move, checking that it is legal first.
///
/// Returns the number of opponent discs flipped.
///
/// # Errors
/// - [`GameError::IllegalMove`] if the cell is occupied or captures nothing
pub fn play_move(pos: &mut Position, loc: Location, color: Color) -> Result<usize, GameError> {
    if !is_legal(pos, loc, color) {
        return Err(GameError::IllegalMove(loc));
    }
    Ok(apply_move(pos, loc, color))
}

/// Place a disc and flip every captured run. The move must already be legal.
pub(crate) fn apply_move(pos: &mut Position, loc: Location, color: Color) -> usize {
    debug_assert!(is_legal(pos, loc, color), "illegal move {loc} for {color}");

    let runs = capture_runs(pos, loc, color);
    let own = color.cell();
    pos.set(loc, own);

    let mut flipped = 0;
    for (&dir, &run) in DIRECTIONS.iter().zip(runs.iter()) {
        let mut cur = loc;
        for _ in 0..run {
            match cur.step(dir) {
                Some(next) => cur = next,
                None => break,
            }
            pos.set(cur, own);
            flipped += 1;
        }
    }
    flipped
}

/// Number of discs `color` has on the board.
pub fn piece_count(pos: &Position, color: Color) -> usize {
    let own = color.cell();
    pos.cells.iter().flatten().filter(|&&c| c == own).count()
}

/// Number of empty cells.
pub fn empty_count(pos: &Position) -> usize {
    pos.cells
        .iter()
        .flatten()
        .filter(|&&c| c == Cell::Empty)
        .count()
}

/// Positional strength of `color`: the weights of its cells minus the
/// weights of the opponent's cells.
pub fn positional_score(pos: &Position, color: Color) -> i32 {
    let own = color.cell();
    let opp = color.opponent().cell();
    Location::all()
        .map(|loc| match pos.get(loc) {
            c if c == own => pos.weights.get(loc),
            c if c == opp => -pos.weights.get(loc),
            _ => 0,
        })
        .sum()
}

/// The game is over once neither side can move.
pub fn is_terminal(pos: &Position) -> bool {
    !has_any_move(pos, Color::Black) && !has_any_move(pos, Color::White)
}

/// The side with more discs, or `None` on a tie.
pub fn winner(pos: &Position) -> Option<Color> {
    let black = piece_count(pos, Color::Black);
    let white = piece_count(pos, Color::White);
    match black.cmp(&white) {
        std::cmp::Ordering::Greater => Some(Color::Black),
        std::cmp::Ordering::Less => Some(Color::White),
        std::cmp::Ordering::Equal => None,
    }
}

/// Parse a move string such as `"g6"` into a Location.
///
/// The letter `a`-`h` selects the column and the digit `1`-`8` the row,
/// so `"g6"` is column 6, row 5.
///
/// # Errors
/// - [`GameError::InvalidCoord`] if the string is not exactly two such characters
pub fn parse_coord(s: &str) -> Result<Location, GameError> {
    let invalid = || GameError::InvalidCoord(s.to_string());
    let bytes = s.trim().as_bytes();
    if bytes.len() != 2 {
        return Err(invalid());
    }

    let col = bytes[0].to_ascii_lowercase() as isize - b'a' as isize;
    let row = bytes[1] as isize - b'1' as isize;
    Location::try_new(row, col).map_err(|_| invalid())
}

/// Convert a Location to a move string (e.g., `"g6"`).
pub fn str_coord(loc: Location) -> String {
    let col = (b'a' + loc.col as u8) as char;
    let row = (b'1' + loc.row as u8) as char;
    format!("{col}{row}")
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 0..N {
            write!(f, " {}", (b'a' + col as u8) as char)?;
        }
        writeln!(f)?;
        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{}", row + 1)?;
            for cell in cells {
                write!(f, " {}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        for color in [Color::Black, Color::White] {
            writeln!(
                f,
                " {color} ({}): {}",
                color.glyph(),
                piece_count(self, color)
            )?;
        }
        Ok(())
    }
}

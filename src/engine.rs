//! Core board model for peg solitaire.
//!
//! This module defines the game's fundamental components:
//! - `Cell`: the state of a single grid position (peg, empty hole or off-board).
//! - `Move`: a jump from a source over a peg into an empty destination.
//! - `Board`: the 7x7 grid with cell queries, checked mutation and jump application.
//! - `Game`: a live game session with an undo log and the removed-piece stack.
use crate::error::BoardError;
use crate::moves;
use crate::solver::{self, SearchResult, SolveOptions};
use crate::topology::{Direction, Layout, Topology};
use std::fmt;

/// Side length of the square grid. Large enough for every topology.
pub const BOARD_SIZE: usize = 7;

/// A `(row, column)` grid position.
pub type Pos = (usize, usize);

/// State of a single grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// A hole holding a peg.
    Peg,
    /// A hole without a peg.
    Empty,
    /// Not part of the board. Never changes once a layout is chosen.
    OffBoard,
}

impl Cell {
    /// Converts the cell to its character representation.
    ///
    /// ```
    /// use peg_solitaire_solver::engine::Cell;
    /// assert_eq!(Cell::Peg.to_char(), 'O');
    /// assert_eq!(Cell::Empty.to_char(), '.');
    /// assert_eq!(Cell::OffBoard.to_char(), '#');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Cell::Peg => 'O',
            Cell::Empty => '.',
            Cell::OffBoard => '#',
        }
    }

    pub fn from_char(ch: char) -> Option<Cell> {
        match ch {
            'O' => Some(Cell::Peg),
            '.' => Some(Cell::Empty),
            '#' => Some(Cell::OffBoard),
            _ => None,
        }
    }

    pub fn is_playable(&self) -> bool {
        *self != Cell::OffBoard
    }
}

/// A jump: the peg at `from` jumps over the peg at `over` into the hole at `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Pos,
    pub over: Pos,
    pub to: Pos,
}

impl Move {
    /// Builds the jump from `from` to `to`, or `None` if the two positions are
    /// not exactly two cells apart along a row, a column or a diagonal.
    pub fn new(from: Pos, to: Pos) -> Option<Move> {
        let dr = to.0 as isize - from.0 as isize;
        let dc = to.1 as isize - from.1 as isize;
        let straight = (dr.abs() == 2 && (dc == 0 || dc.abs() == 2)) || (dr == 0 && dc.abs() == 2);
        if !straight {
            return None;
        }
        Some(Move {
            from,
            over: ((from.0 + to.0) / 2, (from.1 + to.1) / 2),
            to,
        })
    }

    /// The jump starting at `from` in direction `dir`, if it stays on the grid.
    pub fn from_direction(from: Pos, dir: Direction) -> Option<Move> {
        let step = |p: usize, d: isize| -> Option<usize> {
            let q = p.checked_add_signed(d)?;
            (q < BOARD_SIZE).then_some(q)
        };
        let over = (step(from.0, dir.0 / 2)?, step(from.1, dir.1 / 2)?);
        let to = (step(from.0, dir.0)?, step(from.1, dir.1)?);
        Some(Move { from, over, to })
    }

    /// Displacement from source to destination.
    pub fn direction(&self) -> Direction {
        (
            self.to.0 as isize - self.from.0 as isize,
            self.to.1 as isize - self.from.1 as isize,
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) -> ({}, {})",
            self.from.0, self.from.1, self.to.0, self.to.1
        )
    }
}

/// The game board as a 2D grid of `Cell`s.
///
/// The set of off-board cells is fixed when the board is created from a
/// layout or a grid; afterwards only `Peg` <-> `Empty` transitions happen.
/// The board also remembers which catalogue layout it was started from, if any.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    layout: Option<Layout>,
}

impl Board {
    /// Creates a board with every hole of `topology` empty.
    ///
    /// ```
    /// use peg_solitaire_solver::engine::{Board, Cell};
    /// use peg_solitaire_solver::topology::Topology;
    /// let board = Board::new_empty(Topology::Cross);
    /// assert_eq!(board.get_cell(0, 0), Cell::OffBoard);
    /// assert_eq!(board.get_cell(3, 3), Cell::Empty);
    /// assert_eq!(board.peg_count(), 0);
    /// ```
    pub fn new_empty(topology: Topology) -> Self {
        let mut grid = [[Cell::OffBoard; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in grid.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                if topology.is_on_board(r, c) {
                    *cell = Cell::Empty;
                }
            }
        }
        Board { grid, layout: None }
    }

    /// Creates a board holding the starting pattern of `layout`.
    pub fn from_layout(layout: Layout) -> Self {
        let mut board = Board {
            grid: [[Cell::OffBoard; BOARD_SIZE]; BOARD_SIZE],
            layout: None,
        };
        board.load_layout(layout);
        board
    }

    /// Creates a board from a predefined grid. The board has no catalogue layout.
    pub fn from_grid(grid: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Board { grid, layout: None }
    }

    /// Resets the grid to the starting pattern of `layout` and returns the
    /// number of pegs it starts with.
    pub fn load_layout(&mut self, layout: Layout) -> usize {
        for (r, row) in self.grid.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = layout.initial_cell(r, c);
            }
        }
        self.layout = Some(layout);
        self.peg_count()
    }

    /// The catalogue layout this board was started from, if any.
    pub fn layout(&self) -> Option<Layout> {
        self.layout
    }

    /// Returns the cell at `pos`, or `OutOfRange` if `pos` is off the grid.
    pub fn cell_at(&self, pos: Pos) -> Result<Cell, BoardError> {
        let (r, c) = pos;
        if r >= BOARD_SIZE || c >= BOARD_SIZE {
            return Err(BoardError::OutOfRange { row: r, col: c });
        }
        Ok(self.grid[r][c])
    }

    /// Returns the cell at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside the grid.
    pub fn get_cell(&self, r: usize, c: usize) -> Cell {
        self.grid[r][c]
    }

    /// Sets the cell at `pos` to `Peg` or `Empty`.
    ///
    /// Off-board cells are fixed for the lifetime of the layout: writing to
    /// one, or writing `OffBoard` anywhere, is an `InvariantViolation`.
    pub fn set_cell(&mut self, pos: Pos, cell: Cell) -> Result<(), BoardError> {
        let current = self.cell_at(pos)?;
        if !current.is_playable() || !cell.is_playable() {
            return Err(BoardError::InvariantViolation(format!(
                "cannot change ({}, {}) from {:?} to {:?}",
                pos.0, pos.1, current, cell
            )));
        }
        self.grid[pos.0][pos.1] = cell;
        Ok(())
    }

    /// Number of cells currently holding a peg.
    pub fn peg_count(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|&&cell| cell == Cell::Peg)
            .count()
    }

    /// Returns `true` if the off-board cells are exactly those of `topology`.
    pub fn matches_topology(&self, topology: Topology) -> bool {
        (0..BOARD_SIZE).all(|r| {
            (0..BOARD_SIZE).all(|c| self.grid[r][c].is_playable() == topology.is_on_board(r, c))
        })
    }

    /// Returns an immutable reference to the underlying grid.
    pub fn get_grid(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.grid
    }

    /// Performs the jump without checking legality.
    ///
    /// Used by the solver, which only applies moves it has just generated.
    /// Pair every call with [`Board::undo_jump`] to restore the board.
    pub fn apply_jump(&mut self, mv: Move) {
        debug_assert_eq!(self.grid[mv.from.0][mv.from.1], Cell::Peg);
        debug_assert_eq!(self.grid[mv.over.0][mv.over.1], Cell::Peg);
        debug_assert_eq!(self.grid[mv.to.0][mv.to.1], Cell::Empty);
        self.grid[mv.from.0][mv.from.1] = Cell::Empty;
        self.grid[mv.over.0][mv.over.1] = Cell::Empty;
        self.grid[mv.to.0][mv.to.1] = Cell::Peg;
    }

    /// Exact inverse of [`Board::apply_jump`].
    pub fn undo_jump(&mut self, mv: Move) {
        debug_assert_eq!(self.grid[mv.to.0][mv.to.1], Cell::Peg);
        self.grid[mv.from.0][mv.from.1] = Cell::Peg;
        self.grid[mv.over.0][mv.over.1] = Cell::Peg;
        self.grid[mv.to.0][mv.to.1] = Cell::Empty;
    }

    /// Performs the jump if it is legal on `topology`.
    pub fn play(&mut self, topology: Topology, mv: Move) -> Result<(), BoardError> {
        for pos in [mv.from, mv.over, mv.to] {
            self.cell_at(pos)?;
        }
        if !moves::is_legal(self, topology, mv) {
            return Err(BoardError::IllegalMove(mv));
        }
        self.apply_jump(mv);
        Ok(())
    }

    /// Plays a sequence of moves in order, stopping at the first illegal one.
    pub fn replay(&mut self, topology: Topology, path: &[Move]) -> Result<(), BoardError> {
        for &mv in path {
            self.play(topology, mv)?;
        }
        Ok(())
    }

    /// Generates a string representation of the board with an optional
    /// highlighted position.
    ///
    /// The output includes row and column numbers. Off-board cells are blank,
    /// pegs are `O` and empty holes `.`. A highlighted cell is drawn in
    /// reverse video using ANSI escape codes.
    pub fn to_string_with_highlight(&self, pos: Option<Pos>) -> String {
        let mut output = String::new();

        output.push_str("  ");
        for c_idx in 0..BOARD_SIZE {
            output.push_str(&format!("{:<2}", c_idx));
        }
        output.push('\n');

        for (r_idx, row) in self.grid.iter().enumerate() {
            output.push_str(&format!("{:<2}", r_idx));
            for (c_idx, cell) in row.iter().enumerate() {
                let symbol = match cell {
                    Cell::OffBoard => ' ',
                    other => other.to_char(),
                };
                if pos == Some((r_idx, c_idx)) {
                    output.push_str(&format!("\x1b[7m{}\x1b[m ", symbol));
                } else {
                    output.push(symbol);
                    output.push(' ');
                }
            }
            if r_idx < BOARD_SIZE - 1 {
                output.push('\n');
            }
        }

        output
    }
}

impl fmt::Display for Board {
    /// Formats the board for display using `to_string_with_highlight(None)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Exactly one peg remains.
    Win,
    /// No moves remain and more than one peg is left.
    Lose,
}

/// A live game session on one layout.
///
/// Besides the board, the game keeps the positions of the active pieces, a
/// last-in-first-out stack of removed pieces and the ordered list of moves
/// played, so that the most recent move can always be taken back exactly.
///
/// ```
/// use peg_solitaire_solver::engine::Game;
/// use peg_solitaire_solver::topology::Layout;
///
/// let mut game = Game::new(Layout::Solitaire);
/// assert_eq!(game.board().peg_count(), 32);
///
/// game.process_move((1, 3), (3, 3)).unwrap();
/// assert_eq!(game.board().peg_count(), 31);
///
/// assert!(game.undo_last_move().is_some());
/// assert_eq!(game.board().peg_count(), 32);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    layout: Layout,
    pieces: Vec<Pos>,
    removed: Vec<Pos>,
    history: Vec<Move>,
}

impl Game {
    pub fn new(layout: Layout) -> Self {
        let board = Board::from_layout(layout);
        let pieces = peg_positions(&board);
        Game {
            board,
            layout,
            pieces,
            removed: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Starts the same layout over, clearing the history.
    pub fn restart(&mut self) {
        *self = Game::new(self.layout);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn topology(&self) -> Topology {
        self.layout.topology()
    }

    /// Positions of the pieces still in play.
    pub fn pieces(&self) -> &[Pos] {
        &self.pieces
    }

    /// Positions the removed pieces were taken from, oldest first.
    pub fn removed_pieces(&self) -> &[Pos] {
        &self.removed
    }

    /// Moves played so far, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Moves the peg at `from` to `to`, removing the peg jumped over.
    pub fn process_move(&mut self, from: Pos, to: Pos) -> Result<Move, BoardError> {
        self.board.cell_at(from)?;
        self.board.cell_at(to)?;
        let mv = Move::new(from, to).ok_or(BoardError::NotAJump { from, to })?;
        self.board.play(self.topology(), mv)?;

        if let Some(piece) = self.pieces.iter_mut().find(|p| **p == mv.from) {
            *piece = mv.to;
        }
        if let Some(idx) = self.pieces.iter().position(|p| *p == mv.over) {
            self.removed.push(self.pieces.remove(idx));
        }
        self.history.push(mv);
        Ok(mv)
    }

    /// Takes back the most recent move.
    ///
    /// Returns the undone move, or `None` when no move has been played.
    pub fn undo_last_move(&mut self) -> Option<Move> {
        let mv = self.history.pop()?;
        self.board.undo_jump(mv);

        if let Some(piece) = self.pieces.iter_mut().find(|p| **p == mv.to) {
            *piece = mv.from;
        }
        if let Some(piece) = self.removed.pop() {
            self.pieces.push(piece);
        }
        Some(mv)
    }

    pub fn has_moves_left(&self) -> bool {
        moves::has_legal_move(&self.board, self.topology())
    }

    pub fn is_game_over(&self) -> bool {
        !self.has_moves_left()
    }

    /// The result of the game, or `None` while moves remain.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.has_moves_left() {
            return None;
        }
        if self.board.peg_count() == 1 {
            Some(Outcome::Win)
        } else {
            Some(Outcome::Lose)
        }
    }

    /// Runs the solver on a copy of the current board.
    pub fn analyze(&self, options: &SolveOptions) -> Result<SearchResult, BoardError> {
        let mut board = self.board.clone();
        solver::solve_with(&mut board, self.topology(), options)
    }
}

fn peg_positions(board: &Board) -> Vec<Pos> {
    let mut pieces = Vec::new();
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            if board.get_cell(r, c) == Cell::Peg {
                pieces.push((r, c));
            }
        }
    }
    pieces
}

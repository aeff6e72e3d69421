//! # Peg Solitaire Solver Library
//!
//! This library provides the board model for peg solitaire on three board
//! shapes and an exhaustive, deadline-bounded solver that finds the fewest
//! pegs a position can be reduced to, together with a move sequence that
//! gets there.
//!
//! It is used by three binaries:
//! - `peg_player`: interactive play on the command line, with undo, hints
//!   and solution playback.
//! - `peg_solver`: solves a catalogue layout or a board file and prints the
//!   moves of the best line found.
//! - `layout_survey`: solves every catalogue layout and prints a summary.
//!
//! ## Modules
//! - `engine`: cells, moves, the `Board` grid and the live `Game` with its undo log.
//! - `topology`: the Cross, Octagon and Triangle shapes and the layout catalogue.
//! - `moves`: legal jump checks and ordered enumeration.
//! - `encoder`: packs board configurations into `u64` keys.
//! - `solver`: depth-first search with a visited set and a deadline.
//! - `config`: hint and playback settings.
//! - `error`: the `BoardError` type.
//! - `utils`: text board parsing, random playouts and replay helpers.

pub mod config;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod moves;
pub mod solver;
pub mod topology;
pub mod utils;

pub use error::BoardError;
pub use solver::{solve, SearchResult, SearchStatus, Solvability};

//! Legal jump enumeration.
//!
//! Moves are produced in a fixed order: sources in row-major order, and for
//! each source the topology's directions in table order. The solver relies on
//! this order to pick the same solution every time.
use crate::engine::{Board, Cell, Move, BOARD_SIZE};
use crate::topology::Topology;

/// Returns `true` if `mv` is a legal jump on `board` for `topology`.
///
/// A jump is legal when its direction is one of the topology's, its midpoint
/// is halfway between source and destination, the source and midpoint hold
/// pegs and the destination is an empty hole.
pub fn is_legal(board: &Board, topology: Topology, mv: Move) -> bool {
    let on_grid = |(r, c): (usize, usize)| r < BOARD_SIZE && c < BOARD_SIZE;
    if !(on_grid(mv.from) && on_grid(mv.to)) || !topology.directions().contains(&mv.direction()) {
        return false;
    }
    match Move::from_direction(mv.from, mv.direction()) {
        Some(expected) if expected == mv => {}
        _ => return false,
    }
    board.get_cell(mv.from.0, mv.from.1) == Cell::Peg
        && board.get_cell(mv.over.0, mv.over.1) == Cell::Peg
        && board.get_cell(mv.to.0, mv.to.1) == Cell::Empty
}

/// Finds every legal jump on the board.
///
/// # Returns
/// The jumps in generation order. Empty when the game is over.
pub fn legal_moves(board: &Board, topology: Topology) -> Vec<Move> {
    let mut found = Vec::new();
    for_each_legal_move(board, topology, |mv| {
        found.push(mv);
        true
    });
    found
}

/// Returns `true` if at least one legal jump exists.
pub fn has_legal_move(board: &Board, topology: Topology) -> bool {
    let mut any = false;
    for_each_legal_move(board, topology, |_| {
        any = true;
        false
    });
    any
}

/// Calls `visit` for each legal jump in generation order until it returns `false`.
fn for_each_legal_move(board: &Board, topology: Topology, mut visit: impl FnMut(Move) -> bool) {
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            if board.get_cell(r, c) != Cell::Peg {
                continue;
            }
            for &dir in topology.directions() {
                let Some(mv) = Move::from_direction((r, c), dir) else {
                    continue;
                };
                if board.get_cell(mv.over.0, mv.over.1) == Cell::Peg
                    && board.get_cell(mv.to.0, mv.to.1) == Cell::Empty
                    && !visit(mv)
                {
                    return;
                }
            }
        }
    }
}

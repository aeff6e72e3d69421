use crate::engine::{Board, Cell, Move, BOARD_SIZE};
use crate::error::BoardError;
use crate::moves;
use crate::topology::{Layout, Topology};
use rand::seq::SliceRandom;
use rand::Rng;

/// Parses an array of string slices into a `Board`.
///
/// Each string slice represents a row, starting from row 0. Exactly
/// `BOARD_SIZE` rows are expected. A row shorter than `BOARD_SIZE`
/// characters is padded with off-board cells.
///
/// Valid characters are:
/// - 'O': `Cell::Peg`
/// - '.': `Cell::Empty`
/// - '#': `Cell::OffBoard`
///
/// The resulting board is not tied to a catalogue layout.
///
/// # Examples
/// ```
/// use peg_solitaire_solver::utils::board_from_str_array;
/// use peg_solitaire_solver::engine::Cell;
/// use peg_solitaire_solver::topology::Topology;
///
/// let board = board_from_str_array(&[
///     "##...##",
///     "##.O.##",
///     "..OOO..",
///     "...O...",
///     "...O...",
///     "##...##",
///     "##...##",
/// ]).unwrap();
/// assert_eq!(board.get_cell(1, 3), Cell::Peg);
/// assert_eq!(board.get_cell(0, 0), Cell::OffBoard);
/// assert_eq!(board.peg_count(), 6);
/// assert_eq!(Topology::detect(&board), Some(Topology::Cross));
///
/// assert!(board_from_str_array(&["#X"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, BoardError> {
    if s.len() != BOARD_SIZE {
        return Err(BoardError::Parse(format!(
            "Invalid number of rows. Expected {}, found {}",
            BOARD_SIZE,
            s.len()
        )));
    }

    let mut grid = [[Cell::OffBoard; BOARD_SIZE]; BOARD_SIZE];

    for (r, row_str) in s.iter().enumerate() {
        if row_str.chars().count() > BOARD_SIZE {
            return Err(BoardError::Parse(format!(
                "Row {} is too long. Expected at most {} characters, found {}",
                r,
                BOARD_SIZE,
                row_str.chars().count()
            )));
        }

        for (c, ch) in row_str.chars().enumerate() {
            grid[r][c] = Cell::from_char(ch).ok_or_else(|| {
                BoardError::Parse(format!(
                    "Unrecognized character '{}' in row {} col {}",
                    ch, r, c
                ))
            })?;
        }
    }
    Ok(Board::from_grid(grid))
}

/// Parses a text board and identifies its topology from the off-board mask.
pub fn parse_board(text: &str) -> Result<(Board, Topology), BoardError> {
    let lines: Vec<&str> = text
        .lines()
        .map(|line| line.trim_end())
        .filter(|line| !line.is_empty())
        .collect();
    let board = board_from_str_array(&lines)?;
    let topology = Topology::detect(&board).ok_or_else(|| {
        BoardError::InvariantViolation(
            "off-board cells do not match any known topology".to_string(),
        )
    })?;
    Ok((board, topology))
}

/// Plays up to `steps` uniformly random legal moves from the start of `layout`.
///
/// Stops early when no move is left. Returns the reached board and the moves
/// played, so every returned board is reachable from the layout.
pub fn random_playout(layout: Layout, steps: usize, rng: &mut impl Rng) -> (Board, Vec<Move>) {
    let mut board = Board::from_layout(layout);
    let topology = layout.topology();
    let mut played = Vec::with_capacity(steps);
    for _ in 0..steps {
        let options = moves::legal_moves(&board, topology);
        let Some(&mv) = options.choose(rng) else {
            break;
        };
        board.apply_jump(mv);
        played.push(mv);
    }
    (board, played)
}

/// The boards passed through while playing `path` from `start`, including
/// `start` itself. Used to show a solution step by step.
pub fn replay_boards(start: &Board, topology: Topology, path: &[Move]) -> Result<Vec<Board>, BoardError> {
    let mut boards = Vec::with_capacity(path.len() + 1);
    let mut board = start.clone();
    boards.push(board.clone());
    for &mv in path {
        board.play(topology, mv)?;
        boards.push(board.clone());
    }
    Ok(boards)
}

//! Compact state keys for the solver's visited set.
use crate::engine::{Board, Cell, BOARD_SIZE};
use crate::error::BoardError;

/// Largest number of holes a 64-bit key can describe.
pub const MAX_HOLES: usize = 64;

/// Maps every hole of a board to a bit index and packs peg patterns into `u64` keys.
///
/// Indices are assigned in row-major order over the holes, skipping
/// off-board cells, when the encoder is built. Two boards with the same
/// off-board mask get equal keys exactly when the same holes hold pegs.
#[derive(Clone, Debug)]
pub struct StateEncoder {
    hole_index: [[Option<u8>; BOARD_SIZE]; BOARD_SIZE],
    holes: usize,
}

impl StateEncoder {
    pub fn new(board: &Board) -> Result<Self, BoardError> {
        let mut hole_index = [[None; BOARD_SIZE]; BOARD_SIZE];
        let mut holes = 0;
        for (r, row) in board.get_grid().iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.is_playable() {
                    if holes == MAX_HOLES {
                        return Err(BoardError::InvariantViolation(format!(
                            "more than {} holes cannot be encoded",
                            MAX_HOLES
                        )));
                    }
                    hole_index[r][c] = Some(holes as u8);
                    holes += 1;
                }
            }
        }
        Ok(StateEncoder { hole_index, holes })
    }

    /// Number of holes covered by the index map.
    pub fn holes(&self) -> usize {
        self.holes
    }

    /// Bit index of `(r, c)`, or `None` for off-board cells.
    pub fn index_of(&self, r: usize, c: usize) -> Option<u8> {
        self.hole_index[r][c]
    }

    /// The key of the current peg pattern: bit `i` is set iff hole `i` holds a peg.
    pub fn key(&self, board: &Board) -> u64 {
        let mut key = 0u64;
        for (r, row) in board.get_grid().iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if *cell == Cell::Peg {
                    if let Some(bit) = self.hole_index[r][c] {
                        key |= 1u64 << bit;
                    }
                }
            }
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{Layout, Topology};
    use crate::utils::random_playout;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;

    #[test]
    fn test_index_map_is_row_major_over_holes() {
        let board = Board::from_layout(Layout::Solitaire);
        let encoder = StateEncoder::new(&board).unwrap();
        assert_eq!(encoder.holes(), 33);
        assert_eq!(encoder.index_of(0, 0), None);
        assert_eq!(encoder.index_of(0, 2), Some(0));
        assert_eq!(encoder.index_of(0, 4), Some(2));
        assert_eq!(encoder.index_of(1, 2), Some(3));
        assert_eq!(encoder.index_of(2, 0), Some(6));
        assert_eq!(encoder.index_of(3, 3), Some(16));
        assert_eq!(encoder.index_of(6, 4), Some(32));
    }

    #[test]
    fn test_key_of_solitaire_start() {
        let board = Board::from_layout(Layout::Solitaire);
        let encoder = StateEncoder::new(&board).unwrap();
        let all_holes = (1u64 << 33) - 1;
        assert_eq!(encoder.key(&board), all_holes & !(1u64 << 16));
        assert_eq!(encoder.key(&board).count_ones() as usize, board.peg_count());
    }

    #[test]
    fn test_empty_board_has_zero_key() {
        for topology in Topology::ALL {
            let board = Board::new_empty(topology);
            let encoder = StateEncoder::new(&board).unwrap();
            assert_eq!(encoder.holes(), topology.hole_count());
            assert_eq!(encoder.key(&board), 0);
        }
    }

    /// Keys are equal exactly when peg patterns are equal, across many random
    /// reachable positions of every layout.
    #[test]
    fn test_key_equality_is_configuration_equality() {
        let mut rng = SmallRng::seed_from_u64(7);
        for layout in Layout::ALL {
            let encoder = StateEncoder::new(&Board::from_layout(layout)).unwrap();
            let mut seen: HashMap<u64, Board> = HashMap::new();
            for _ in 0..200 {
                let steps = rng.gen_range(0..layout.start_peg_count());
                let (board, _) = random_playout(layout, steps, &mut rng);
                let key = encoder.key(&board);
                assert_eq!(key.count_ones() as usize, board.peg_count());
                if let Some(previous) = seen.get(&key) {
                    assert_eq!(previous.get_grid(), board.get_grid(), "{} key collision", layout);
                }
                for other in seen.values() {
                    if other.get_grid() == board.get_grid() {
                        assert_eq!(encoder.key(other), key);
                    }
                }
                seen.insert(key, board);
            }
        }
    }
}

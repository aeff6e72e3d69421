use crate::encoder::StateEncoder;
use crate::engine::{Board, Move};
use crate::error::BoardError;
use crate::moves;
use crate::topology::{Layout, Topology};
use log::{debug, trace, warn};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Deadline used for triangle searches when the fixed-deadline behaviour is requested.
pub const TRIANGLE_DEADLINE: Duration = Duration::from_secs(3);

/// Cross "Solitaire" positions with at least this many pegs are always
/// solvable to one peg, so the search can be skipped.
pub const SOLITAIRE_SHORTCUT_PEGS: usize = 29;

/// Whether the search ran to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// The minimum is exact.
    Solved,
    /// The deadline fired first. Says nothing about solvability.
    Unknown,
}

/// How a position is reported to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Solvability {
    /// Can be reduced to a single peg.
    Solvable,
    /// At least this many pegs must remain.
    Unsolvable(usize),
    Unknown,
}

/// Outcome of one solver invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Fewest pegs that can remain. Equal to `start_peg_count` when the
    /// status is `Unknown`.
    pub minimum_peg_count: usize,
    pub status: SearchStatus,
    /// Moves from the start position to a position with the minimum peg
    /// count. Empty for `Unknown` results and for the Solitaire shortcut.
    pub move_path: Vec<Move>,
    pub start_peg_count: usize,
    /// Distinct positions expanded.
    pub states_visited: usize,
    /// Search nodes entered, including ones pruned as already visited.
    pub nodes: u64,
    pub elapsed: Duration,
}

impl SearchResult {
    pub fn solvability(&self) -> Solvability {
        match self.status {
            SearchStatus::Unknown => Solvability::Unknown,
            SearchStatus::Solved if self.minimum_peg_count <= 1 => Solvability::Solvable,
            SearchStatus::Solved => Solvability::Unsolvable(self.minimum_peg_count),
        }
    }

    /// Returns `true` if `move_path` leads all the way to the minimum.
    pub fn has_full_path(&self) -> bool {
        self.status == SearchStatus::Solved
            && self.move_path.len() + self.minimum_peg_count == self.start_peg_count
    }
}

/// Source of elapsed time for the deadline check.
pub trait Clock {
    /// Time since the search started.
    fn elapsed(&self) -> Duration;
}

/// Wall-clock time measured with [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        MonotonicClock {
            start: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Knobs for one solver invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveOptions {
    pub deadline: Duration,
    /// Use [`TRIANGLE_DEADLINE`] for triangle boards regardless of `deadline`.
    pub fixed_triangle_deadline: bool,
    /// Allow the Solitaire shortcut, which answers without a move path.
    pub allow_shortcut: bool,
}

impl SolveOptions {
    /// Options for hint checks: the shortcut is allowed.
    pub fn with_deadline(deadline: Duration) -> Self {
        SolveOptions {
            deadline,
            fixed_triangle_deadline: false,
            allow_shortcut: true,
        }
    }

    /// Options for finding a solution to play back: always searches, so the
    /// result carries a full move path.
    pub fn for_playback(deadline: Duration) -> Self {
        SolveOptions {
            allow_shortcut: false,
            ..SolveOptions::with_deadline(deadline)
        }
    }

    /// The deadline that applies to a search on `topology`.
    pub fn effective_deadline(&self, topology: Topology) -> Duration {
        if self.fixed_triangle_deadline && topology == Topology::Triangle {
            TRIANGLE_DEADLINE
        } else {
            self.deadline
        }
    }
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions::with_deadline(Duration::from_secs(3))
    }
}

/// Finds the fewest pegs that can remain on `board`.
///
/// The board is used as scratch space during the search and holds its
/// original configuration again when the call returns.
pub fn solve(
    board: &mut Board,
    topology: Topology,
    deadline_seconds: u64,
) -> Result<SearchResult, BoardError> {
    solve_with(
        board,
        topology,
        &SolveOptions::with_deadline(Duration::from_secs(deadline_seconds)),
    )
}

/// [`solve`] with explicit options, timed by a [`MonotonicClock`].
pub fn solve_with(
    board: &mut Board,
    topology: Topology,
    options: &SolveOptions,
) -> Result<SearchResult, BoardError> {
    solve_with_clock(board, topology, options, &MonotonicClock::start())
}

/// [`solve_with`] driven by an arbitrary clock.
pub fn solve_with_clock<C: Clock>(
    board: &mut Board,
    topology: Topology,
    options: &SolveOptions,
    clock: &C,
) -> Result<SearchResult, BoardError> {
    if !board.matches_topology(topology) {
        return Err(BoardError::InvariantViolation(format!(
            "board does not have the {} shape",
            topology
        )));
    }
    let start_peg_count = board.peg_count();

    if options.allow_shortcut
        && board.layout() == Some(Layout::Solitaire)
        && start_peg_count >= SOLITAIRE_SHORTCUT_PEGS
    {
        debug!("Solitaire shortcut with {} pegs", start_peg_count);
        return Ok(SearchResult {
            minimum_peg_count: 1,
            status: SearchStatus::Solved,
            move_path: Vec::new(),
            start_peg_count,
            states_visited: 0,
            nodes: 0,
            elapsed: clock.elapsed(),
        });
    }

    let deadline = options.effective_deadline(topology);
    debug!(
        "Searching {} board with {} pegs, deadline {:?}",
        topology, start_peg_count, deadline
    );

    let mut context = SearchContext {
        topology,
        encoder: StateEncoder::new(board)?,
        visited: HashSet::new(),
        clock,
        deadline,
        best_pegs: start_peg_count,
        best_path: Vec::new(),
        path: Vec::with_capacity(start_peg_count),
        timed_out: false,
        nodes: 0,
    };
    context.search(board);

    let elapsed = clock.elapsed();
    let states_visited = context.visited.len();
    let result = if context.timed_out {
        warn!(
            "Deadline of {:?} reached after {} positions; result unknown",
            deadline, states_visited
        );
        SearchResult {
            minimum_peg_count: start_peg_count,
            status: SearchStatus::Unknown,
            move_path: Vec::new(),
            start_peg_count,
            states_visited,
            nodes: context.nodes,
            elapsed,
        }
    } else {
        debug!(
            "Minimum of {} pegs found in {:?} ({} positions, {} nodes)",
            context.best_pegs, elapsed, states_visited, context.nodes
        );
        SearchResult {
            minimum_peg_count: context.best_pegs,
            status: SearchStatus::Solved,
            move_path: context.best_path,
            start_peg_count,
            states_visited,
            nodes: context.nodes,
            elapsed,
        }
    };
    debug_assert_eq!(board.peg_count(), start_peg_count);
    Ok(result)
}

/// Mutable state owned by a single solver invocation.
struct SearchContext<'c, C: Clock> {
    topology: Topology,
    encoder: StateEncoder,
    visited: HashSet<u64>,
    clock: &'c C,
    deadline: Duration,
    best_pegs: usize,
    best_path: Vec<Move>,
    path: Vec<Move>,
    timed_out: bool,
    nodes: u64,
}

impl<C: Clock> SearchContext<'_, C> {
    /// Nothing left to learn: either time is up or one peg has been reached.
    fn finished(&self) -> bool {
        self.timed_out || self.best_pegs <= 1
    }

    fn search(&mut self, board: &mut Board) {
        self.nodes += 1;
        let key = self.encoder.key(board);
        if self.clock.elapsed() > self.deadline {
            self.timed_out = true;
            return;
        }
        if self.finished() || !self.visited.insert(key) {
            return;
        }

        let pegs = board.peg_count();
        if pegs == 2 {
            if let Some(mv) = self.center_finish(board) {
                self.explore(board, mv);
            }
        }

        for mv in moves::legal_moves(board, self.topology) {
            if self.finished() {
                break;
            }
            self.explore(board, mv);
        }

        if !self.timed_out && pegs < self.best_pegs {
            trace!("New minimum of {} pegs at depth {}", pegs, self.path.len());
            self.best_pegs = pegs;
            self.best_path.clone_from(&self.path);
        }
    }

    /// Plays `mv`, searches below it and takes it back.
    fn explore(&mut self, board: &mut Board, mv: Move) {
        board.apply_jump(mv);
        self.path.push(mv);
        self.search(board);
        self.path.pop();
        board.undo_jump(mv);
    }

    /// With two pegs left, the jump that ends on the centre hole, if any.
    fn center_finish(&self, board: &Board) -> Option<Move> {
        let (cr, cc) = self.topology.center()?;
        [(cr - 2, cc), (cr + 2, cc), (cr, cc - 2), (cr, cc + 2)]
            .into_iter()
            .filter_map(|from| Move::new(from, (cr, cc)))
            .find(|&mv| moves::is_legal(board, self.topology, mv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Cell;
    use crate::utils::board_from_str_array;
    use std::cell::Cell as Counter;

    /// Reports zero elapsed time for the first `ticks` samples, then a day.
    struct StepClock {
        remaining: Counter<u32>,
    }

    impl StepClock {
        fn expiring_after(ticks: u32) -> Self {
            StepClock {
                remaining: Counter::new(ticks),
            }
        }
    }

    impl Clock for StepClock {
        fn elapsed(&self) -> Duration {
            match self.remaining.get() {
                0 => Duration::from_secs(86_400),
                n => {
                    self.remaining.set(n - 1);
                    Duration::ZERO
                }
            }
        }
    }

    fn never_expires() -> StepClock {
        StepClock::expiring_after(u32::MAX)
    }

    fn ample() -> SolveOptions {
        SolveOptions::for_playback(Duration::from_secs(120))
    }

    fn assert_path_reaches_minimum(layout: Layout, result: &SearchResult) {
        let mut board = Board::from_layout(layout);
        board.replay(layout.topology(), &result.move_path).unwrap();
        assert_eq!(board.peg_count(), result.minimum_peg_count, "{}", layout);
    }

    #[test]
    fn test_solve_cross_layout() {
        let mut board = Board::from_layout(Layout::Cross);
        let result = solve_with_clock(&mut board, Topology::Cross, &ample(), &never_expires()).unwrap();
        assert_eq!(result.status, SearchStatus::Solved);
        assert_eq!(result.minimum_peg_count, 1);
        assert_eq!(result.solvability(), Solvability::Solvable);
        assert_eq!(result.move_path.len(), 5);
        assert!(result.has_full_path());
        assert_path_reaches_minimum(Layout::Cross, &result);
    }

    #[test]
    fn test_solve_diamond_with_ample_deadline() {
        let mut board = Board::from_layout(Layout::Diamond);
        let original = board.clone();
        let result = solve(&mut board, Topology::Cross, 120).unwrap();
        assert_eq!(result.status, SearchStatus::Solved);
        assert_eq!(result.start_peg_count, 24);
        assert_eq!(
            result.move_path.len(),
            result.start_peg_count - result.minimum_peg_count
        );
        assert_eq!(board, original);

        let mut replayed = original.clone();
        replayed.replay(Topology::Cross, &result.move_path).unwrap();
        assert_eq!(replayed.peg_count(), result.minimum_peg_count);
        if result.minimum_peg_count > 1 {
            assert!(!moves::has_legal_move(&replayed, Topology::Cross));
        }
    }

    #[test]
    fn test_solve_restores_board() {
        for layout in [Layout::Cross, Layout::Plus, Layout::Fireplace, Layout::TriangleHole21] {
            let mut board = Board::from_layout(layout);
            let original = board.clone();
            solve_with_clock(&mut board, layout.topology(), &ample(), &never_expires()).unwrap();
            assert_eq!(board, original, "{}", layout);
        }
    }

    #[test]
    fn test_solve_is_deterministic() {
        let layout = Layout::Fireplace;
        let mut first = Board::from_layout(layout);
        let mut second = Board::from_layout(layout);
        let a = solve_with_clock(&mut first, Topology::Cross, &ample(), &never_expires()).unwrap();
        let b = solve_with_clock(&mut second, Topology::Cross, &ample(), &never_expires()).unwrap();
        assert_eq!(a.minimum_peg_count, b.minimum_peg_count);
        assert_eq!(a.move_path, b.move_path);
        assert_eq!(a.states_visited, b.states_visited);
    }

    #[test]
    fn test_triangle_layout_solves_to_one() {
        let mut board = Board::from_layout(Layout::TriangleHole00);
        let result =
            solve_with_clock(&mut board, Topology::Triangle, &ample(), &never_expires()).unwrap();
        assert_eq!(result.status, SearchStatus::Solved);
        assert_eq!(result.minimum_peg_count, 1);
        assert_eq!(result.move_path.len(), 13);
        assert_path_reaches_minimum(Layout::TriangleHole00, &result);
    }

    #[test]
    fn test_solitaire_shortcut() {
        let mut board = Board::from_layout(Layout::Solitaire);
        let result = solve(&mut board, Topology::Cross, 1).unwrap();
        assert_eq!(result.minimum_peg_count, 1);
        assert_eq!(result.status, SearchStatus::Solved);
        assert!(result.move_path.is_empty());
        assert!(!result.has_full_path());

        board.play(Topology::Cross, Move::new((1, 3), (3, 3)).unwrap()).unwrap();
        board.play(Topology::Cross, Move::new((2, 1), (2, 3)).unwrap()).unwrap();
        board.play(Topology::Cross, Move::new((0, 2), (2, 2)).unwrap()).unwrap();
        assert_eq!(board.peg_count(), 29);
        let result = solve(&mut board, Topology::Cross, 1).unwrap();
        assert_eq!(result.minimum_peg_count, 1);
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn test_shortcut_needs_the_solitaire_layout() {
        // Same pattern as the Solitaire start, but parsed from text.
        let mut board = board_from_str_array(&Layout::Solitaire.art()).unwrap();
        assert_eq!(board.layout(), None);
        let clock = StepClock::expiring_after(20);
        let result =
            solve_with_clock(&mut board, Topology::Cross, &SolveOptions::default(), &clock).unwrap();
        assert_eq!(result.status, SearchStatus::Unknown);
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_deadline_yields_unknown_and_restores_board() {
        for ticks in [0, 1, 10, 15] {
            let mut board = Board::from_layout(Layout::DoubleArrow);
            let original = board.clone();
            let clock = StepClock::expiring_after(ticks);
            let result =
                solve_with_clock(&mut board, Topology::Cross, &ample(), &clock).unwrap();
            assert_eq!(result.status, SearchStatus::Unknown, "ticks {}", ticks);
            assert_eq!(result.solvability(), Solvability::Unknown);
            assert!(result.move_path.is_empty());
            assert_eq!(result.minimum_peg_count, result.start_peg_count);
            assert_eq!(board, original);
        }
    }

    #[test]
    fn test_fixed_triangle_deadline() {
        let options = SolveOptions {
            fixed_triangle_deadline: true,
            ..SolveOptions::with_deadline(Duration::from_secs(7))
        };
        assert_eq!(options.effective_deadline(Topology::Triangle), TRIANGLE_DEADLINE);
        assert_eq!(options.effective_deadline(Topology::Octagon), Duration::from_secs(7));
        let unified = SolveOptions::with_deadline(Duration::from_secs(7));
        assert_eq!(unified.effective_deadline(Topology::Triangle), Duration::from_secs(7));
    }

    #[test]
    fn test_mismatched_topology_is_rejected() {
        let mut board = Board::from_layout(Layout::Snowflake);
        let err = solve(&mut board, Topology::Cross, 1).unwrap_err();
        assert!(matches!(err, BoardError::InvariantViolation(_)));
    }

    #[test]
    fn test_two_pegs_finish_on_center() {
        let mut board = board_from_str_array(&[
            "##...##",
            "##...##",
            ".OO....",
            ".......",
            ".......",
            "##...##",
            "##...##",
        ])
        .unwrap();
        let result =
            solve_with_clock(&mut board, Topology::Cross, &ample(), &never_expires()).unwrap();
        assert_eq!(result.minimum_peg_count, 1);
        assert_eq!(result.move_path, vec![Move::new((2, 1), (2, 3)).unwrap()]);

        // Row-major order alone would jump (3,4) -> (3,6) first.
        let mut board = board_from_str_array(&[
            "##...##",
            "##...##",
            ".......",
            "....OO.",
            ".......",
            "##...##",
            "##...##",
        ])
        .unwrap();
        let result =
            solve_with_clock(&mut board, Topology::Cross, &ample(), &never_expires()).unwrap();
        assert_eq!(result.move_path, vec![Move::new((3, 5), (3, 3)).unwrap()]);
        assert_eq!(board.get_cell(3, 5), Cell::Peg);
        assert_eq!(board.get_cell(3, 3), Cell::Empty);
    }

    #[test]
    fn test_dead_position_reports_its_own_count() {
        let mut board = board_from_str_array(&[
            "##O.O##",
            "##...##",
            ".......",
            "...O...",
            ".......",
            "##...##",
            "##...##",
        ])
        .unwrap();
        let result =
            solve_with_clock(&mut board, Topology::Cross, &ample(), &never_expires()).unwrap();
        assert_eq!(result.status, SearchStatus::Solved);
        assert_eq!(result.minimum_peg_count, 3);
        assert_eq!(result.solvability(), Solvability::Unsolvable(3));
        assert!(result.move_path.is_empty());
        assert_eq!(result.states_visited, 1);
    }
}

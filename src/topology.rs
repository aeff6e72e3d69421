//! Board topologies and the catalogue of named starting layouts.
//!
//! - `Topology`: the three board shapes, their playable-cell masks and jump
//!   direction tables.
//! - `Layout`: the fixed starting patterns offered for each topology, drawn as
//!   seven rows of text (`O` peg, `.` empty hole, `#` off-board).
use crate::engine::{Board, Cell, Pos, BOARD_SIZE};
use crate::error::BoardError;
use std::fmt;
use std::str::FromStr;

/// Side length of the triangular region in the top-left corner of the grid.
pub const TRIANGLE_SIZE: usize = 5;

/// The centre hole shared by the Cross and Octagon boards.
pub const CENTER: Pos = (3, 3);

/// A jump displacement `(d_row, d_col)`. The jumped-over peg sits halfway.
pub type Direction = (isize, isize);

const ORTHOGONAL_DIRECTIONS: [Direction; 4] = [(0, -2), (2, 0), (-2, 0), (0, 2)];

// The triangle is stored sheared into the lower-left half of the grid, so
// the grid column axis and the (1, 1) axis are its two diagonals.
const TRIANGLE_DIRECTIONS: [Direction; 6] =
    [(0, -2), (0, 2), (-2, 0), (2, 0), (-2, -2), (2, 2)];

/// Shape and connectivity class of a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topology {
    /// The English 33-hole cross.
    Cross,
    /// The 37-hole octagon (French board).
    Octagon,
    /// The 15-hole triangle.
    Triangle,
}

impl Topology {
    pub const ALL: [Topology; 3] = [Topology::Cross, Topology::Octagon, Topology::Triangle];

    pub fn name(&self) -> &'static str {
        match self {
            Topology::Cross => "Cross",
            Topology::Octagon => "Octagon",
            Topology::Triangle => "Triangle",
        }
    }

    /// Jump directions in the order the move generator tries them.
    ///
    /// This order decides which of several equally good solutions the solver
    /// reports, so it is part of the observable behaviour.
    pub fn directions(&self) -> &'static [Direction] {
        match self {
            Topology::Cross | Topology::Octagon => &ORTHOGONAL_DIRECTIONS,
            Topology::Triangle => &TRIANGLE_DIRECTIONS,
        }
    }

    /// Returns `true` if `(r, c)` is a hole of this topology (as opposed to
    /// permanently off-board). Positions outside the grid are never on board.
    pub fn is_on_board(&self, r: usize, c: usize) -> bool {
        if r >= BOARD_SIZE || c >= BOARD_SIZE {
            return false;
        }
        let edge = |i: usize| i <= 1 || i >= BOARD_SIZE - 2;
        let rim = |i: usize| i == 0 || i == BOARD_SIZE - 1;
        match self {
            Topology::Cross => !(edge(r) && edge(c)),
            Topology::Octagon => !((rim(r) && edge(c)) || (edge(r) && rim(c))),
            Topology::Triangle => r < TRIANGLE_SIZE && c <= r,
        }
    }

    /// Number of holes on this topology.
    pub fn hole_count(&self) -> usize {
        (0..BOARD_SIZE)
            .flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c)))
            .filter(|&(r, c)| self.is_on_board(r, c))
            .count()
    }

    /// The cell the two-peg endgame prefers to finish on, if the topology has one.
    pub fn center(&self) -> Option<Pos> {
        match self {
            Topology::Cross | Topology::Octagon => Some(CENTER),
            Topology::Triangle => None,
        }
    }

    /// Layouts offered for this topology, in menu order.
    pub fn layouts(&self) -> &'static [Layout] {
        match self {
            Topology::Cross => &[
                Layout::Solitaire,
                Layout::Cross,
                Layout::Plus,
                Layout::Fireplace,
                Layout::Pyramid,
                Layout::Arrow,
                Layout::DoubleArrow,
                Layout::Diamond,
            ],
            Topology::Octagon => &[Layout::Snowflake, Layout::XIt, Layout::Pinpoint],
            Topology::Triangle => &[
                Layout::TriangleHole21,
                Layout::TriangleHole00,
                Layout::TriangleHole10,
                Layout::TriangleHole20,
            ],
        }
    }

    /// Identifies the topology whose off-board mask matches `board` exactly.
    pub fn detect(board: &Board) -> Option<Topology> {
        Topology::ALL
            .into_iter()
            .find(|topology| board.matches_topology(*topology))
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Topology {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topology::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BoardError::UnknownTopology(s.to_string()))
    }
}

/// A named starting pattern of pegs and holes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    Solitaire,
    Cross,
    Plus,
    Fireplace,
    Pyramid,
    Arrow,
    DoubleArrow,
    Diamond,
    Snowflake,
    XIt,
    Pinpoint,
    /// Full triangle with the hole at (2, 1).
    TriangleHole21,
    TriangleHole00,
    TriangleHole10,
    TriangleHole20,
}

impl Layout {
    pub const ALL: [Layout; 15] = [
        Layout::Solitaire,
        Layout::Cross,
        Layout::Plus,
        Layout::Fireplace,
        Layout::Pyramid,
        Layout::Arrow,
        Layout::DoubleArrow,
        Layout::Diamond,
        Layout::Snowflake,
        Layout::XIt,
        Layout::Pinpoint,
        Layout::TriangleHole21,
        Layout::TriangleHole00,
        Layout::TriangleHole10,
        Layout::TriangleHole20,
    ];

    pub fn topology(&self) -> Topology {
        match self {
            Layout::Solitaire
            | Layout::Cross
            | Layout::Plus
            | Layout::Fireplace
            | Layout::Pyramid
            | Layout::Arrow
            | Layout::DoubleArrow
            | Layout::Diamond => Topology::Cross,
            Layout::Snowflake | Layout::XIt | Layout::Pinpoint => Topology::Octagon,
            Layout::TriangleHole21
            | Layout::TriangleHole00
            | Layout::TriangleHole10
            | Layout::TriangleHole20 => Topology::Triangle,
        }
    }

    /// Display name as shown in the layout menu.
    pub fn name(&self) -> &'static str {
        match self {
            Layout::Solitaire => "Solitaire",
            Layout::Cross => "Cross",
            Layout::Plus => "Plus",
            Layout::Fireplace => "Fireplace",
            Layout::Pyramid => "Pyramid",
            Layout::Arrow => "Arrow",
            Layout::DoubleArrow => "Double Arrow",
            Layout::Diamond => "Diamond",
            Layout::Snowflake => "Snowflake",
            Layout::XIt => "X-It",
            Layout::Pinpoint => "Pinpoint",
            Layout::TriangleHole21 => "Hole at (2,1)",
            Layout::TriangleHole00 => "Hole at (0,0)",
            Layout::TriangleHole10 => "Hole at (1,0)",
            Layout::TriangleHole20 => "Hole at (2,0)",
        }
    }

    /// Short command-line friendly identifier.
    pub fn slug(&self) -> &'static str {
        match self {
            Layout::Solitaire => "solitaire",
            Layout::Cross => "cross",
            Layout::Plus => "plus",
            Layout::Fireplace => "fireplace",
            Layout::Pyramid => "pyramid",
            Layout::Arrow => "arrow",
            Layout::DoubleArrow => "double-arrow",
            Layout::Diamond => "diamond",
            Layout::Snowflake => "snowflake",
            Layout::XIt => "x-it",
            Layout::Pinpoint => "pinpoint",
            Layout::TriangleHole21 => "tri-hole-2-1",
            Layout::TriangleHole00 => "tri-hole-0-0",
            Layout::TriangleHole10 => "tri-hole-1-0",
            Layout::TriangleHole20 => "tri-hole-2-0",
        }
    }

    /// The starting pattern, one string per grid row.
    pub fn art(&self) -> [&'static str; BOARD_SIZE] {
        match self {
            Layout::Solitaire => [
                "##OOO##",
                "##OOO##",
                "OOOOOOO",
                "OOO.OOO",
                "OOOOOOO",
                "##OOO##",
                "##OOO##",
            ],
            Layout::Cross => [
                "##...##",
                "##.O.##",
                "..OOO..",
                "...O...",
                "...O...",
                "##...##",
                "##...##",
            ],
            Layout::Plus => [
                "##...##",
                "##.O.##",
                "...O...",
                ".OOOOO.",
                "...O...",
                "##.O.##",
                "##...##",
            ],
            Layout::Fireplace => [
                "##OOO##",
                "##OOO##",
                "..OOO..",
                "..O.O..",
                ".......",
                "##...##",
                "##...##",
            ],
            Layout::Pyramid => [
                "##...##",
                "##.O.##",
                "..OOO..",
                ".OOOOO.",
                "OOOOOOO",
                "##...##",
                "##...##",
            ],
            Layout::Arrow => [
                "##.O.##",
                "##OOO##",
                ".OOOOO.",
                "...O...",
                "...O...",
                "##OOO##",
                "##OOO##",
            ],
            Layout::DoubleArrow => [
                "##.O.##",
                "##OOO##",
                ".OOOOO.",
                "..OOO..",
                ".OOOOO.",
                "##OOO##",
                "##.O.##",
            ],
            Layout::Diamond => [
                "##.O.##",
                "##OOO##",
                ".OOOOO.",
                "OOO.OOO",
                ".OOOOO.",
                "##OOO##",
                "##.O.##",
            ],
            Layout::Snowflake => [
                "##.O.##",
                "#O.O.O#",
                "..OOO..",
                "OOOOOOO",
                "..OOO..",
                "#O.O.O#",
                "##.O.##",
            ],
            Layout::XIt => [
                "##...##",
                "#OOOOO#",
                ".OO.OO.",
                ".O.O.O.",
                ".OO.OO.",
                "#OOOOO#",
                "##...##",
            ],
            Layout::Pinpoint => [
                "##.O.##",
                "#OO.OO#",
                ".O...O.",
                "OO.O.OO",
                ".O...O.",
                "#OO.OO#",
                "##.O.##",
            ],
            Layout::TriangleHole21 => [
                "O######",
                "OO#####",
                "O.O####",
                "OOOO###",
                "OOOOO##",
                "#######",
                "#######",
            ],
            Layout::TriangleHole00 => [
                ".######",
                "OO#####",
                "OOO####",
                "OOOO###",
                "OOOOO##",
                "#######",
                "#######",
            ],
            Layout::TriangleHole10 => [
                "O######",
                ".O#####",
                "OOO####",
                "OOOO###",
                "OOOOO##",
                "#######",
                "#######",
            ],
            Layout::TriangleHole20 => [
                "O######",
                "OO#####",
                ".OO####",
                "OOOO###",
                "OOOOO##",
                "#######",
                "#######",
            ],
        }
    }

    /// Cell state of `(r, c)` in the starting pattern.
    ///
    /// The topology's mask is authoritative for off-board cells; the art only
    /// distinguishes pegs from empty holes.
    pub fn initial_cell(&self, r: usize, c: usize) -> Cell {
        if !self.topology().is_on_board(r, c) {
            return Cell::OffBoard;
        }
        match self.art()[r].as_bytes().get(c) {
            Some(b'O') => Cell::Peg,
            _ => Cell::Empty,
        }
    }

    /// Peg count of the starting pattern.
    pub fn start_peg_count(&self) -> usize {
        self.art()
            .iter()
            .map(|row| row.bytes().filter(|&b| b == b'O').count())
            .sum()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layout {
    type Err = BoardError;

    /// Accepts either the slug (`double-arrow`) or the display name
    /// (`Double Arrow`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Layout::ALL
            .into_iter()
            .find(|l| l.slug().eq_ignore_ascii_case(wanted) || l.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BoardError::UnknownLayout(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hole_counts() {
        assert_eq!(Topology::Cross.hole_count(), 33);
        assert_eq!(Topology::Octagon.hole_count(), 37);
        assert_eq!(Topology::Triangle.hole_count(), 15);
    }

    #[test]
    fn test_art_agrees_with_topology_mask() {
        for layout in Layout::ALL {
            let topology = layout.topology();
            for (r, row) in layout.art().iter().enumerate() {
                assert_eq!(row.len(), BOARD_SIZE, "{} row {} has wrong width", layout, r);
                for (c, ch) in row.chars().enumerate() {
                    assert_eq!(
                        ch == '#',
                        !topology.is_on_board(r, c),
                        "{} disagrees with the {} mask at ({}, {})",
                        layout,
                        topology,
                        r,
                        c
                    );
                }
            }
        }
    }

    #[test]
    fn test_start_peg_counts() {
        let expected = [
            (Layout::Solitaire, 32),
            (Layout::Cross, 6),
            (Layout::Plus, 9),
            (Layout::Fireplace, 11),
            (Layout::Pyramid, 16),
            (Layout::Arrow, 17),
            (Layout::DoubleArrow, 21),
            (Layout::Diamond, 24),
            (Layout::Snowflake, 21),
            (Layout::XIt, 21),
            (Layout::Pinpoint, 19),
            (Layout::TriangleHole21, 14),
            (Layout::TriangleHole00, 14),
            (Layout::TriangleHole10, 14),
            (Layout::TriangleHole20, 14),
        ];
        for (layout, pegs) in expected {
            assert_eq!(layout.start_peg_count(), pegs, "{}", layout);
        }
    }

    #[test]
    fn test_every_layout_listed_under_its_topology() {
        for layout in Layout::ALL {
            assert!(layout.topology().layouts().contains(&layout));
        }
        let listed: usize = Topology::ALL.iter().map(|t| t.layouts().len()).sum();
        assert_eq!(listed, Layout::ALL.len());
    }

    #[test]
    fn test_triangle_holes_are_where_named() {
        assert_eq!(Layout::TriangleHole21.initial_cell(2, 1), Cell::Empty);
        assert_eq!(Layout::TriangleHole00.initial_cell(0, 0), Cell::Empty);
        assert_eq!(Layout::TriangleHole10.initial_cell(1, 0), Cell::Empty);
        assert_eq!(Layout::TriangleHole20.initial_cell(2, 0), Cell::Empty);
        assert_eq!(Layout::TriangleHole21.initial_cell(0, 1), Cell::OffBoard);
    }

    #[test]
    fn test_parse_layout_and_topology() {
        assert_eq!("double-arrow".parse::<Layout>().unwrap(), Layout::DoubleArrow);
        assert_eq!("Double Arrow".parse::<Layout>().unwrap(), Layout::DoubleArrow);
        assert_eq!("X-IT".parse::<Layout>().unwrap(), Layout::XIt);
        assert_eq!("Hole at (2,0)".parse::<Layout>().unwrap(), Layout::TriangleHole20);
        assert!(matches!("hexagon".parse::<Layout>(), Err(BoardError::UnknownLayout(_))));

        assert_eq!("octagon".parse::<Topology>().unwrap(), Topology::Octagon);
        assert!(matches!("hex".parse::<Topology>(), Err(BoardError::UnknownTopology(_))));
    }

    #[test]
    fn test_directions_and_center() {
        assert_eq!(Topology::Cross.directions().len(), 4);
        assert_eq!(Topology::Triangle.directions().len(), 6);
        assert_eq!(Topology::Octagon.center(), Some(CENTER));
        assert_eq!(Topology::Triangle.center(), None);
    }
}

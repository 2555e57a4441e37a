use crate::tile::Tile;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::fmt;

pub const GRID_LEN: usize = 4;

/// Probability that a spawned tile is a 2 (otherwise a 4).
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

pub type Row = [Tile; GRID_LEN];
pub type Cells = [Row; GRID_LEN];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// Number of 90° clockwise turns that make this direction point left.
    fn rotations(self) -> u8 {
        match self {
            Direction::Left => 0,
            Direction::Down => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        }
    }
}

/// What a single move did to the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub moved: bool,
    /// Sum of all tiles created by merges during the move.
    pub gained: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: Cells,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from raw values. Used for setup and tests.
    pub fn from_values(values: [[u32; GRID_LEN]; GRID_LEN]) -> Self {
        let mut cells = [[Tile::EMPTY; GRID_LEN]; GRID_LEN];
        for r in 0..GRID_LEN {
            for c in 0..GRID_LEN {
                cells[r][c] = Tile::new(values[r][c]);
            }
        }
        Self { cells }
    }

    pub fn values(&self) -> [[u32; GRID_LEN]; GRID_LEN] {
        self.cells.map(|row| row.map(|t| t.value))
    }

    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.cells[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, tile: Tile) {
        self.cells[row][col] = tile;
    }

    pub fn rows(&self) -> &Cells {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells = [[Tile::EMPTY; GRID_LEN]; GRID_LEN];
    }

    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut empty = Vec::with_capacity(GRID_LEN * GRID_LEN);
        for r in 0..GRID_LEN {
            for c in 0..GRID_LEN {
                if self.cells[r][c].is_empty() {
                    empty.push((r, c));
                }
            }
        }
        empty
    }

    pub fn count_tiles(&self) -> usize {
        self.cells.iter().flatten().filter(|t| !t.is_empty()).count()
    }

    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().flatten().map(|t| t.value).max().unwrap_or(0)
    }

    /// Places a 2 (90%) or a 4 (10%) on a uniformly chosen empty cell.
    /// Returns the cell and value placed, or `None` when the board is full.
    pub fn spawn_tile<R: Rng>(&mut self, rng: &mut R) -> Option<(usize, usize, u32)> {
        let &(r, c) = self.empty_cells().choose(rng)?;
        let value = if rng.random_bool(SPAWN_TWO_PROBABILITY) { 2 } else { 4 };
        self.cells[r][c] = Tile::new(value);
        Some((r, c, value))
    }

    /// Slides every tile towards `dir`, merging equal neighbours once.
    /// Does not spawn.
    pub fn slide(&mut self, dir: Direction) -> MoveOutcome {
        let rot = dir.rotations();

        // Canonicalize so that `dir` points left.
        self.rotate_clockwise(rot);

        let mut outcome = MoveOutcome::default();
        for row in self.cells.iter_mut() {
            let (packed, gained) = compact_row_left(row);
            if packed != *row {
                outcome.moved = true;
            }
            outcome.gained += gained;
            *row = packed;
        }

        self.rotate_clockwise((4 - rot) % 4);
        outcome
    }

    /// True iff no cell is empty and no two orthogonal neighbours are equal.
    pub fn is_terminal(&self) -> bool {
        for r in 0..GRID_LEN {
            for c in 0..GRID_LEN {
                let value = self.cells[r][c].value;
                if value == 0 {
                    return false;
                }
                if c + 1 < GRID_LEN && value == self.cells[r][c + 1].value {
                    return false;
                }
                if r + 1 < GRID_LEN && value == self.cells[r + 1][c].value {
                    return false;
                }
            }
        }
        true
    }

    fn rotate_clockwise(&mut self, times: u8) {
        for _ in 0..times % 4 {
            self.transpose();
            self.reverse_rows();
        }
    }

    fn transpose(&mut self) {
        for r in 0..GRID_LEN {
            for c in (r + 1)..GRID_LEN {
                let tmp = self.cells[r][c];
                self.cells[r][c] = self.cells[c][r];
                self.cells[c][r] = tmp;
            }
        }
    }

    fn reverse_rows(&mut self) {
        for row in self.cells.iter_mut() {
            row.reverse();
        }
    }
}

/// Left compaction pass for one row: pack non-empty tiles, merge equal
/// neighbours left to right (a merged tile never merges again), pad with
/// empties. Returns the new row and the merge points it produced.
pub fn compact_row_left(row: &Row) -> (Row, u32) {
    let mut out = [Tile::EMPTY; GRID_LEN];
    let mut gained = 0;
    let mut len = 0;
    let mut pending: Option<Tile> = None;

    for tile in row.iter().copied().filter(|t| !t.is_empty()) {
        match pending {
            Some(prev) if prev == tile => {
                let merged = prev.merged();
                gained += merged.value;
                out[len] = merged;
                len += 1;
                pending = None;
            }
            Some(prev) => {
                out[len] = prev;
                len += 1;
                pending = Some(tile);
            }
            None => pending = Some(tile),
        }
    }
    if let Some(last) = pending {
        out[len] = last;
    }

    (out, gained)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: Vec<String> = row.iter().map(|t| format!("{:>5}", t.value)).collect();
            writeln!(f, "{}", line.join(""))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn row(values: [u32; 4]) -> Row {
        values.map(Tile::new)
    }

    fn random_board(rng: &mut StdRng, fill: f64) -> Board {
        let mut values = [[0u32; 4]; 4];
        for r in 0..4 {
            for c in 0..4 {
                if rng.random_bool(fill) {
                    values[r][c] = 1u32 << rng.random_range(1u32..=6);
                }
            }
        }
        Board::from_values(values)
    }

    #[test]
    fn test_row_pair_then_distinct() {
        let (out, gained) = compact_row_left(&row([2, 2, 4, 0]));
        assert_eq!(out, row([4, 4, 0, 0]));
        assert_eq!(gained, 4);
    }

    #[test]
    fn test_row_merge_across_gap() {
        let (out, gained) = compact_row_left(&row([2, 0, 0, 2]));
        assert_eq!(out, row([4, 0, 0, 0]));
        assert_eq!(gained, 4);
    }

    #[test]
    fn test_row_unchanged() {
        let input = row([2, 4, 8, 16]);
        let (out, gained) = compact_row_left(&input);
        assert_eq!(out, input);
        assert_eq!(gained, 0);
    }

    #[test]
    fn test_row_no_chained_merge() {
        let (out, gained) = compact_row_left(&row([2, 2, 2, 2]));
        assert_eq!(out, row([4, 4, 0, 0]));
        assert_eq!(gained, 8);

        let (out, gained) = compact_row_left(&row([4, 2, 2, 0]));
        assert_eq!(out, row([4, 4, 0, 0]));
        assert_eq!(gained, 4);

        let (out, _) = compact_row_left(&row([2, 2, 2, 0]));
        assert_eq!(out, row([4, 2, 0, 0]));
    }

    #[test]
    fn test_slide_left_board() {
        let mut board = Board::from_values([
            [2, 2, 4, 0],
            [2, 0, 0, 2],
            [2, 4, 8, 16],
            [0, 0, 0, 0],
        ]);
        let outcome = board.slide(Direction::Left);
        assert!(outcome.moved);
        assert_eq!(outcome.gained, 8);
        assert_eq!(
            board.values(),
            [[4, 4, 0, 0], [4, 0, 0, 0], [2, 4, 8, 16], [0, 0, 0, 0]]
        );
    }

    #[test]
    fn test_each_direction_moves_towards_its_edge() {
        let start = Board::from_values([
            [0, 0, 0, 0],
            [0, 2, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);

        let mut b = start;
        b.slide(Direction::Up);
        assert_eq!(b.get(0, 1).value, 2);

        let mut b = start;
        b.slide(Direction::Down);
        assert_eq!(b.get(3, 1).value, 2);

        let mut b = start;
        b.slide(Direction::Right);
        assert_eq!(b.get(1, 3).value, 2);

        let mut b = start;
        b.slide(Direction::Left);
        assert_eq!(b.get(1, 0).value, 2);
    }

    #[test]
    fn test_vertical_merge() {
        let mut board = Board::from_values([
            [2, 0, 0, 0],
            [2, 0, 0, 0],
            [4, 0, 0, 0],
            [4, 0, 0, 8],
        ]);
        let outcome = board.slide(Direction::Down);
        assert!(outcome.moved);
        assert_eq!(outcome.gained, 12);
        assert_eq!(
            board.values(),
            [[0, 0, 0, 0], [0, 0, 0, 0], [4, 0, 0, 0], [8, 0, 0, 8]]
        );
    }

    #[test]
    fn test_rotation_round_trip() {
        let mut board = Board::from_values([
            [1, 2, 3, 4],
            [5, 6, 7, 8],
            [9, 10, 11, 12],
            [13, 14, 15, 16],
        ]);
        let original = board;
        board.rotate_clockwise(1);
        assert_eq!(board.values()[0], [13, 9, 5, 1]);
        board.rotate_clockwise(3);
        assert_eq!(board, original);
    }

    #[test]
    fn test_repeated_move_is_noop() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut board = random_board(&mut rng, 0.5);
            for dir in Direction::ALL {
                let before = board;
                let first = board.slide(dir);
                assert_eq!(first.moved, board != before);
                if !first.moved {
                    let second = board.slide(dir);
                    assert!(!second.moved, "second {:?} moved:\n{}", dir, before);
                    assert_eq!(board, before);
                }
            }
        }
    }

    #[test]
    fn test_settled_row_does_not_move_again() {
        let mut board = Board::from_values([
            [2, 2, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        assert!(board.slide(Direction::Left).moved);
        assert!(!board.slide(Direction::Left).moved);
        assert_eq!(board.get(0, 0).value, 4);
    }

    #[test]
    fn test_slide_keeps_values_well_formed() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let mut board = random_board(&mut rng, 0.7);
            let total_before: u32 = board.values().iter().flatten().sum();
            let dir = Direction::ALL[rng.random_range(0..4)];
            board.slide(dir);
            assert!(board.rows().iter().flatten().all(Tile::is_valid));
            let total_after: u32 = board.values().iter().flatten().sum();
            assert_eq!(total_before, total_after);
        }
    }

    #[test]
    fn test_terminal_matches_definition() {
        let mut rng = StdRng::seed_from_u64(3);
        for i in 0..2000 {
            // Mostly full boards with few distinct values, so both outcomes occur.
            let fill = if i % 2 == 0 { 1.0 } else { 0.95 };
            let board = random_board(&mut rng, fill);
            let v = board.values();
            let mut expected = true;
            for r in 0..4 {
                for c in 0..4 {
                    if v[r][c] == 0
                        || (c < 3 && v[r][c] == v[r][c + 1])
                        || (r < 3 && v[r][c] == v[r + 1][c])
                    {
                        expected = false;
                    }
                }
            }
            assert_eq!(board.is_terminal(), expected, "\n{}", board);
        }
    }

    #[test]
    fn test_terminal_boundaries() {
        let checker = Board::from_values([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(checker.is_terminal());
        for dir in Direction::ALL {
            let mut b = checker;
            assert!(!b.slide(dir).moved);
        }

        let mut vertical_pair = checker;
        vertical_pair.set(3, 3, Tile::new(4));
        assert!(!vertical_pair.is_terminal());

        let mut one_hole = checker;
        one_hole.set(0, 0, Tile::EMPTY);
        assert!(!one_hole.is_terminal());

        assert!(!Board::new().is_terminal());
    }

    #[test]
    fn test_spawn_fills_empty_cell_with_two_or_four() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut board = Board::new();
        for placed in 1..=16 {
            let (r, c, value) = board.spawn_tile(&mut rng).unwrap();
            assert!(value == 2 || value == 4);
            assert_eq!(board.get(r, c).value, value);
            assert_eq!(board.count_tiles(), placed);
        }
        assert!(board.spawn_tile(&mut rng).is_none());
    }

    #[test]
    fn test_spawn_distribution() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut fours = 0;
        let trials = 10_000;
        for _ in 0..trials {
            let mut board = Board::new();
            let (_, _, value) = board.spawn_tile(&mut rng).unwrap();
            if value == 4 {
                fours += 1;
            }
        }
        // 10% expected; allow a wide margin.
        assert!((700..1300).contains(&fours), "fours = {}", fours);
    }
}

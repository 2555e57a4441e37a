use crate::grid::{Board, Direction, MoveOutcome};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Active,
    Terminal,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    score: u32,
    status: Status,
    num_move: u32,
    rng: StdRng,
}

impl Game {
    /// Starts a game seeded from the operating system.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Starts a reproducible game.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        let mut game = Game {
            board: Board::new(),
            score: 0,
            status: Status::Active,
            num_move: 0,
            rng,
        };
        game.reset();
        game
    }

    /// Creates a game with a specific board state, skipping the opening spawns.
    pub fn new_with_board(board: Board, score: u32, seed: u64) -> Self {
        let mut game = Game {
            board,
            score,
            status: Status::Active,
            num_move: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        game.check_terminal();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn num_move(&self) -> u32 {
        self.num_move
    }

    /// Clears the board, zeroes the score and seeds two tiles.
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.num_move = 0;
        self.spawn_tile();
        self.spawn_tile();
        self.status = Status::Active;
        info!("new game:\n{}", self.board);
    }

    /// Spawns one tile on a random empty cell. No-op on a full board.
    pub fn spawn_tile(&mut self) {
        if let Some((r, c, value)) = self.board.spawn_tile(&mut self.rng) {
            debug!("spawned {} at ({}, {})", value, r, c);
        }
    }

    /// Applies a move; when anything changed, adds the merge points to the
    /// score and spawns exactly one tile.
    pub fn apply_move(&mut self, dir: Direction) -> MoveOutcome {
        let outcome = self.board.slide(dir);
        if outcome.moved {
            self.score += outcome.gained;
            self.num_move += 1;
            self.spawn_tile();
            debug!(
                "move {:?}: +{} (score {}, moves {})",
                dir, outcome.gained, self.score, self.num_move
            );
        }
        self.check_terminal();
        outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.board.is_terminal()
    }

    /// Re-evaluates the terminal state of the current board.
    pub fn check_terminal(&mut self) -> bool {
        if self.board.is_terminal() {
            if self.status == Status::Active {
                info!(
                    "game over: score {}, highest tile {}, moves {}",
                    self.score,
                    self.board.highest_tile(),
                    self.num_move
                );
            }
            self.status = Status::Terminal;
            true
        } else {
            self.status = Status::Active;
            false
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

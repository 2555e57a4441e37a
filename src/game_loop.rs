use crate::best_score::BestScore;
use crate::error::Result;
use crate::game::Game;
use crate::grid::{Board, Direction};
use log::{debug, info};
use std::io;
use std::ops::ControlFlow;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Move(Direction),
    Restart,
    Quit,
}

/// Read-only snapshot handed to the frontend each frame.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    pub board: &'a Board,
    pub score: u32,
    pub best: u32,
}

/// Display and input collaborator driven by [`GameLoop`].
pub trait Frontend {
    /// Clears the display and draws header and board.
    fn render(&mut self, scene: &Scene<'_>) -> io::Result<()>;

    /// Draws the game-over overlay on top of the last rendered frame.
    fn render_game_over(&mut self, scene: &Scene<'_>) -> io::Result<()>;

    fn pause(&mut self, duration: Duration);

    /// Drains queued input. Must not wait for input that has not arrived
    /// beyond one frame.
    fn poll_input(&mut self) -> io::Result<Vec<InputEvent>>;
}

pub struct GameLoop {
    game: Game,
    best: BestScore,
    game_over_pause: Duration,
}

impl GameLoop {
    pub fn new(game: Game, best: BestScore, game_over_pause: Duration) -> Self {
        Self {
            game,
            best,
            game_over_pause,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn best(&self) -> u32 {
        self.best.value()
    }

    fn scene(&self) -> Scene<'_> {
        Scene {
            board: self.game.board(),
            score: self.game.score(),
            best: self.best.value(),
        }
    }

    /// Runs frames until the player quits.
    pub fn run<F: Frontend>(&mut self, ui: &mut F) -> Result<()> {
        info!("starting, best score {}", self.best.value());
        while self.frame(ui)?.is_continue() {}
        info!("quit with score {}", self.game.score());
        Ok(())
    }

    /// One iteration: render, handle a finished game, then drain input.
    pub fn frame<F: Frontend>(&mut self, ui: &mut F) -> Result<ControlFlow<()>> {
        ui.render(&self.scene())?;

        if self.game.check_terminal() {
            ui.render_game_over(&self.scene())?;
            ui.pause(self.game_over_pause);
            self.best.submit(self.game.score());
            self.game.reset();
        }

        for event in ui.poll_input()? {
            debug!("input {:?}", event);
            match event {
                InputEvent::Quit => {
                    self.best.submit(self.game.score());
                    return Ok(ControlFlow::Break(()));
                }
                InputEvent::Move(dir) => {
                    self.game.apply_move(dir);
                }
                InputEvent::Restart => self.game.reset(),
            }
        }

        Ok(ControlFlow::Continue(()))
    }
}

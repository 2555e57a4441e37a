use crate::game_loop::{Frontend, InputEvent, Scene};
use crate::grid::{Direction, GRID_LEN};
use crate::layout::{self, Rect};
use crate::theme::{self, Rgb};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
    ExecutableCommand, QueueableCommand,
};
use log::warn;
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

/// Logical units covered by one terminal column.
pub const UNITS_PER_COL: u32 = 10;
/// Logical units covered by one terminal row (cells are about twice as tall as wide).
pub const UNITS_PER_ROW: u32 = 20;

pub const COLS: u16 = (layout::SURFACE_WIDTH / UNITS_PER_COL) as u16;
pub const ROWS: u16 = (layout::SURFACE_HEIGHT / UNITS_PER_ROW) as u16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

/// Character-cell raster of the logical surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new() -> Self {
        let blank = Cell {
            ch: ' ',
            fg: theme::TEXT,
            bg: Rgb::WHITE,
        };
        Self {
            cells: vec![blank; COLS as usize * ROWS as usize],
        }
    }

    pub fn cell(&self, col: u16, row: u16) -> Cell {
        self.cells[row as usize * COLS as usize + col as usize]
    }

    fn cell_mut(&mut self, col: u16, row: u16) -> Option<&mut Cell> {
        if col < COLS && row < ROWS {
            Some(&mut self.cells[row as usize * COLS as usize + col as usize])
        } else {
            None
        }
    }

    /// Paints the rect's area, erasing any text under it.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let col0 = rect.x / UNITS_PER_COL;
        let col1 = (rect.x + rect.w) / UNITS_PER_COL;
        let row0 = rect.y / UNITS_PER_ROW;
        let row1 = (rect.y + rect.h) / UNITS_PER_ROW;
        for row in row0..row1 {
            for col in col0..col1 {
                if let Some(cell) = self.cell_mut(col as u16, row as u16) {
                    *cell = Cell {
                        ch: ' ',
                        fg: theme::TEXT,
                        bg: color,
                    };
                }
            }
        }
    }

    /// Writes text starting at a logical anchor, keeping the background.
    pub fn text_at(&mut self, x: u32, y: u32, text: &str, color: Rgb) {
        let col = (x / UNITS_PER_COL) as i32;
        let row = (y / UNITS_PER_ROW) as i32;
        self.put_text(col, row, text, color);
    }

    /// Writes text centered on a logical point.
    pub fn text_centered(&mut self, (x, y): (u32, u32), text: &str, color: Rgb) {
        let len = text.chars().count() as i32;
        let col = (x / UNITS_PER_COL) as i32 - len / 2;
        let row = (y / UNITS_PER_ROW) as i32;
        self.put_text(col, row, text, color);
    }

    fn put_text(&mut self, col: i32, row: i32, text: &str, color: Rgb) {
        if row < 0 {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let c = col + i as i32;
            if c < 0 {
                continue;
            }
            if let Some(cell) = self.cell_mut(c as u16, row as u16) {
                cell.ch = ch;
                cell.fg = color;
            }
        }
    }

    /// Composites a translucent color over every cell.
    pub fn veil(&mut self, color: Rgb, alpha: u8) {
        for cell in self.cells.iter_mut() {
            cell.bg = cell.bg.blend(color, alpha);
            cell.fg = cell.fg.blend(color, alpha);
        }
    }

    pub fn row_text(&self, row: u16) -> String {
        (0..COLS).map(|col| self.cell(col, row).ch).collect()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

/// Header with score, best and restart hint, then the board.
pub fn paint_scene(canvas: &mut Canvas, scene: &Scene<'_>) {
    canvas.fill_rect(layout::SURFACE, Rgb::WHITE);

    canvas.fill_rect(layout::HEADER, theme::HEADER_BG);
    let (x, y) = layout::SCORE_ANCHOR;
    canvas.text_at(x, y, &format!("Score: {}", scene.score), theme::TEXT);
    let (x, y) = layout::BEST_ANCHOR;
    canvas.text_at(x, y, &format!("Best: {}", scene.best), theme::TEXT);
    let (x, y) = layout::RESTART_ANCHOR;
    canvas.text_at(x, y, "R - Restart", theme::TEXT);

    canvas.fill_rect(layout::GRID, theme::GRID_BG);
    for r in 0..GRID_LEN {
        for c in 0..GRID_LEN {
            let value = scene.board.get(r, c).value;
            let rect = layout::cell_rect(r, c);
            canvas.fill_rect(rect, theme::tile_color(value));
            if value != 0 {
                canvas.text_centered(rect.center(), &value.to_string(), theme::TEXT);
            }
        }
    }
}

pub fn paint_game_over(canvas: &mut Canvas) {
    canvas.veil(theme::OVERLAY, theme::OVERLAY_ALPHA);
    canvas.text_centered(layout::SURFACE.center(), "Game Over!", theme::TEXT);
}

/// Translates a key press into a game input.
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputEvent::Quit);
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputEvent::Move(Direction::Left))
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(InputEvent::Move(Direction::Up))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputEvent::Move(Direction::Right))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(InputEvent::Move(Direction::Down))
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputEvent::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
        _ => None,
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

/// Raw-mode terminal frontend. Restores the terminal when dropped.
pub struct ConsoleUI {
    stdout: Stdout,
    canvas: Canvas,
    shown: Option<Canvas>,
    frame_interval: Duration,
}

impl ConsoleUI {
    pub fn init(frame_interval: Duration) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        if cols < COLS || rows < ROWS {
            warn!(
                "terminal is {}x{}, the board needs {}x{}",
                cols, rows, COLS, ROWS
            );
        }

        terminal::enable_raw_mode()?;
        // From here on, Drop restores the terminal if setup fails.
        let mut ui = Self {
            stdout: io::stdout(),
            canvas: Canvas::new(),
            shown: None,
            frame_interval,
        };
        ui.stdout.execute(terminal::EnterAlternateScreen)?;
        ui.stdout.execute(cursor::Hide)?;
        ui.stdout.execute(terminal::SetTitle("2048"))?;
        Ok(ui)
    }

    pub fn cleanup() -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.execute(ResetColor)?;
        stdout.execute(cursor::Show)?;
        stdout.execute(terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Pushes the canvas to the terminal, skipping unchanged frames.
    fn present(&mut self) -> io::Result<()> {
        if self.shown.as_ref() == Some(&self.canvas) {
            return Ok(());
        }

        let mut colors: Option<(Rgb, Rgb)> = None;
        for row in 0..ROWS {
            self.stdout.queue(cursor::MoveTo(0, row))?;
            for col in 0..COLS {
                let cell = self.canvas.cell(col, row);
                if colors != Some((cell.fg, cell.bg)) {
                    self.stdout.queue(SetForegroundColor(to_color(cell.fg)))?;
                    self.stdout.queue(SetBackgroundColor(to_color(cell.bg)))?;
                    colors = Some((cell.fg, cell.bg));
                }
                self.stdout.queue(Print(cell.ch))?;
            }
        }
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;

        self.shown = Some(self.canvas.clone());
        Ok(())
    }
}

impl Drop for ConsoleUI {
    fn drop(&mut self) {
        if let Err(e) = Self::cleanup() {
            warn!("failed to restore terminal: {}", e);
        }
    }
}

impl Frontend for ConsoleUI {
    fn render(&mut self, scene: &Scene<'_>) -> io::Result<()> {
        paint_scene(&mut self.canvas, scene);
        self.present()
    }

    fn render_game_over(&mut self, scene: &Scene<'_>) -> io::Result<()> {
        paint_scene(&mut self.canvas, scene);
        paint_game_over(&mut self.canvas);
        self.present()
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }

    fn poll_input(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        // Wait up to one frame for the first event, then drain the rest.
        let mut timeout = self.frame_interval;
        while event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => events.extend(map_key(key)),
                Event::Resize(..) => {
                    self.stdout.queue(terminal::Clear(ClearType::All))?;
                    self.shown = None;
                }
                _ => {}
            }
            timeout = Duration::ZERO;
        }
        Ok(events)
    }
}

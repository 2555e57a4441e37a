//! Geometry of the logical drawing surface.
//!
//! Everything is expressed in logical units: a 400×500 surface whose top
//! 100-unit band is the header and whose remaining 400×400 square holds the
//! 4×4 grid of 100×100 cells. Frontends scale these units to their own
//! pixels or character cells.

use crate::grid::GRID_LEN;

pub const SURFACE_WIDTH: u32 = 400;
pub const SURFACE_HEIGHT: u32 = 500;
pub const HEADER_HEIGHT: u32 = 100;
pub const TILE_SIZE: u32 = 100;

pub const SCORE_ANCHOR: (u32, u32) = (10, 10);
pub const BEST_ANCHOR: (u32, u32) = (10, 50);
pub const RESTART_ANCHOR: (u32, u32) = (250, 30);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> (u32, u32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }
}

pub const SURFACE: Rect = Rect::new(0, 0, SURFACE_WIDTH, SURFACE_HEIGHT);
pub const HEADER: Rect = Rect::new(0, 0, SURFACE_WIDTH, HEADER_HEIGHT);
pub const GRID: Rect = Rect::new(
    0,
    HEADER_HEIGHT,
    SURFACE_WIDTH,
    SURFACE_HEIGHT - HEADER_HEIGHT,
);

/// Area covered by the cell at (row, col).
pub fn cell_rect(row: usize, col: usize) -> Rect {
    debug_assert!(row < GRID_LEN && col < GRID_LEN);
    Rect::new(
        col as u32 * TILE_SIZE,
        HEADER_HEIGHT + row as u32 * TILE_SIZE,
        TILE_SIZE,
        TILE_SIZE,
    )
}

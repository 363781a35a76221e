//! Text-mode renderer: one character per tile-sized screen cell.

use std::fmt;

use glam::IVec2;
use tq_core::{TileGrid, TILE_SIZE};

use crate::draw::{PaletteColor, Renderer, Sprite};

pub struct AsciiFrame {
    cols: i32,
    rows: i32,
    cells: Vec<char>,
}

impl AsciiFrame {
    /// Cell grid covering `screen` pixels, rounded up to whole tiles.
    pub fn new(screen: IVec2) -> Self {
        let cols = (screen.x + TILE_SIZE - 1) / TILE_SIZE;
        let rows = (screen.y + TILE_SIZE - 1) / TILE_SIZE;
        Self {
            cols,
            rows,
            cells: vec![' '; (cols * rows).max(0) as usize],
        }
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.cols, self.rows)
    }

    pub fn cell(&self, col: i32, row: i32) -> Option<char> {
        self.index(col, row).map(|i| self.cells[i])
    }

    pub fn row_string(&self, row: i32) -> String {
        (0..self.cols).filter_map(|col| self.cell(col, row)).collect()
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.cols || row >= self.rows {
            return None;
        }
        Some((row * self.cols + col) as usize)
    }

    fn put(&mut self, col: i32, row: i32, glyph: char) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = glyph;
        }
    }
}

impl Renderer for AsciiFrame {
    fn draw_tilemap(&mut self, tiles: &TileGrid, offset: IVec2) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                // Sample the world at the cell center.
                let screen = IVec2::new(col * TILE_SIZE, row * TILE_SIZE) + TILE_SIZE / 2;
                let world = screen - offset;
                self.put(col, row, tiles.tile_type_at(world.x, world.y).glyph());
            }
        }
    }

    fn draw_sprite(&mut self, sprite: Sprite, position: IVec2) {
        let center = position + TILE_SIZE / 2;
        self.put(
            center.x.div_euclid(TILE_SIZE),
            center.y.div_euclid(TILE_SIZE),
            sprite.glyph(),
        );
    }

    fn fill_rect(&mut self, position: IVec2, size: IVec2, _color: PaletteColor) {
        let start = position.div_euclid(IVec2::splat(TILE_SIZE));
        let end = (position + size - 1).div_euclid(IVec2::splat(TILE_SIZE));
        for row in start.y..=end.y {
            for col in start.x..=end.x {
                self.put(col, row, ' ');
            }
        }
    }

    fn draw_text(&mut self, position: IVec2, text: &str, _color: PaletteColor) {
        let row = position.y.div_euclid(TILE_SIZE);
        let first = position.x.div_euclid(TILE_SIZE);
        for (i, ch) in text.chars().enumerate() {
            self.put(first + i as i32, row, ch);
        }
    }
}

impl fmt::Display for AsciiFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            writeln!(f, "{}", self.row_string(row))?;
        }
        Ok(())
    }
}

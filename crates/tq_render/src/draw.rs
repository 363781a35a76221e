//! Renderer seam.
//!
//! The game decides *what* goes *where* in screen pixels; a [`Renderer`]
//! decides how it gets on the display. [`DrawList`] records the calls in order
//! so a frame can be inspected, replayed or dumped.

use glam::IVec2;
use tq_core::TileGrid;

/// Palette index, as used by the handheld's indexed display.
pub type PaletteColor = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    Enemy,
}

impl Sprite {
    pub fn glyph(self) -> char {
        match self {
            Self::Player => 'P',
            Self::Enemy => 'E',
        }
    }
}

pub trait Renderer {
    /// Blit the whole tile map translated by `offset`.
    fn draw_tilemap(&mut self, tiles: &TileGrid, offset: IVec2);
    fn draw_sprite(&mut self, sprite: Sprite, position: IVec2);
    fn fill_rect(&mut self, position: IVec2, size: IVec2, color: PaletteColor);
    fn draw_text(&mut self, position: IVec2, text: &str, color: PaletteColor);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    TileMap {
        offset: IVec2,
    },
    Sprite {
        sprite: Sprite,
        position: IVec2,
    },
    FillRect {
        position: IVec2,
        size: IVec2,
        color: PaletteColor,
    },
    Text {
        position: IVec2,
        text: String,
        color: PaletteColor,
    },
}

#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Screen positions of every sprite of one kind, in draw order.
    pub fn sprite_positions(&self, kind: Sprite) -> Vec<IVec2> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Sprite { sprite, position } if *sprite == kind => Some(*position),
                _ => None,
            })
            .collect()
    }

    pub fn tilemap_offset(&self) -> Option<IVec2> {
        self.commands.iter().find_map(|cmd| match cmd {
            DrawCommand::TileMap { offset } => Some(*offset),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.commands
            .iter()
            .any(|cmd| matches!(cmd, DrawCommand::Text { text, .. } if text.contains(needle)))
    }
}

impl Renderer for DrawList {
    fn draw_tilemap(&mut self, _tiles: &TileGrid, offset: IVec2) {
        self.commands.push(DrawCommand::TileMap { offset });
    }

    fn draw_sprite(&mut self, sprite: Sprite, position: IVec2) {
        self.commands.push(DrawCommand::Sprite { sprite, position });
    }

    fn fill_rect(&mut self, position: IVec2, size: IVec2, color: PaletteColor) {
        self.commands.push(DrawCommand::FillRect {
            position,
            size,
            color,
        });
    }

    fn draw_text(&mut self, position: IVec2, text: &str, color: PaletteColor) {
        self.commands.push(DrawCommand::Text {
            position,
            text: text.to_string(),
            color,
        });
    }
}

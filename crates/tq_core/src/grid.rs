//! World tile storage addressed by pixel coordinate.
//!
//! Every world shares the same fixed dimensions; only the contents change when
//! the active world is swapped. Cells are stored either one code per byte or,
//! on memory-tight builds, two codes per byte (even index in the high nibble,
//! odd index in the low nibble). The packing never leaks past this module:
//! callers only see [`TileType`] values and flat tile indices.

use serde::Deserialize;

use crate::tile::TileType;

/// Edge length of one square tile in pixels.
pub const TILE_SIZE: i32 = 16;
/// Map width in tiles.
pub const MAP_TILE_WIDTH: i32 = 16;
/// Map height in tiles.
pub const MAP_TILE_HEIGHT: i32 = 16;
pub const TILE_COUNT: usize = (MAP_TILE_WIDTH * MAP_TILE_HEIGHT) as usize;
/// World width in pixels.
pub const WORLD_WIDTH: i32 = MAP_TILE_WIDTH * TILE_SIZE;
/// World height in pixels.
pub const WORLD_HEIGHT: i32 = MAP_TILE_HEIGHT * TILE_SIZE;

/// Storage density for tile codes.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TileDensity {
    /// One code per byte.
    Byte,
    /// Two codes per byte.
    Packed,
}

impl Default for TileDensity {
    #[cfg(feature = "packed-tiles")]
    fn default() -> Self {
        Self::Packed
    }

    #[cfg(not(feature = "packed-tiles"))]
    fn default() -> Self {
        Self::Byte
    }
}

impl TileDensity {
    /// Bytes needed to hold one full map.
    pub fn storage_len(self) -> usize {
        match self {
            Self::Byte => TILE_COUNT,
            Self::Packed => TILE_COUNT / 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    density: TileDensity,
    cells: Vec<u8>,
}

impl TileGrid {
    /// A grid where every cell is water.
    pub fn new(density: TileDensity) -> Self {
        Self {
            density,
            cells: vec![0; density.storage_len()],
        }
    }

    pub fn filled(density: TileDensity, tile: TileType) -> Self {
        let mut grid = Self::new(density);
        for index in 0..TILE_COUNT {
            grid.set_tile_type(index, tile);
        }
        grid
    }

    pub fn from_tiles(density: TileDensity, tiles: &[TileType]) -> Result<Self, String> {
        let mut grid = Self::new(density);
        grid.replace_all(tiles)?;
        Ok(grid)
    }

    /// Overwrite every cell, row-major. The slice must cover the whole map.
    pub fn replace_all(&mut self, tiles: &[TileType]) -> Result<(), String> {
        if tiles.len() != TILE_COUNT {
            return Err(format!(
                "Tile grid expects {TILE_COUNT} tiles, got {}",
                tiles.len()
            ));
        }
        for (index, &tile) in tiles.iter().enumerate() {
            self.set_tile_type(index, tile);
        }
        Ok(())
    }

    pub fn density(&self) -> TileDensity {
        self.density
    }

    /// Raw storage, mostly useful to check the packing.
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    /// Flat tile index for a pixel position, or `None` outside the world.
    pub fn tile_index(pixel_x: i32, pixel_y: i32) -> Option<usize> {
        if pixel_x < 0 || pixel_y < 0 || pixel_x >= WORLD_WIDTH || pixel_y >= WORLD_HEIGHT {
            return None;
        }
        let col = pixel_x / TILE_SIZE;
        let row = pixel_y / TILE_SIZE;
        Some((row * MAP_TILE_WIDTH + col) as usize)
    }

    /// Tile under a pixel. Pixels outside the world read as water.
    pub fn tile_type_at(&self, pixel_x: i32, pixel_y: i32) -> TileType {
        match Self::tile_index(pixel_x, pixel_y) {
            Some(index) => self.tile_at_index(index),
            None => TileType::Water,
        }
    }

    /// Tile by column/row. Out-of-range cells read as water.
    pub fn tile_at(&self, col: i32, row: i32) -> TileType {
        if col < 0 || row < 0 || col >= MAP_TILE_WIDTH || row >= MAP_TILE_HEIGHT {
            return TileType::Water;
        }
        self.tile_at_index((row * MAP_TILE_WIDTH + col) as usize)
    }

    pub fn tile_at_index(&self, index: usize) -> TileType {
        let code = match self.density {
            TileDensity::Byte => self.cells.get(index).copied(),
            TileDensity::Packed => self.cells.get(index / 2).map(|&byte| {
                if index % 2 == 0 {
                    byte >> 4
                } else {
                    byte & 0x0f
                }
            }),
        };
        code.and_then(TileType::from_code).unwrap_or_default()
    }

    /// Overwrite one cell. In packed mode the sibling nibble is preserved.
    pub fn set_tile_type(&mut self, index: usize, tile: TileType) {
        if index >= TILE_COUNT {
            log::warn!("Ignoring write of {tile} to out-of-range tile index {index}");
            return;
        }
        let code = tile.code();
        match self.density {
            TileDensity::Byte => self.cells[index] = code,
            TileDensity::Packed => {
                let byte = &mut self.cells[index / 2];
                *byte = if index % 2 == 0 {
                    (*byte & 0x0f) | (code << 4)
                } else {
                    (*byte & 0xf0) | code
                };
            }
        }
    }
}

//! Shared vocabulary for the tile-world engine: tile types, the world grid,
//! button input and frame pacing.

pub mod grid;
pub mod input;
pub mod tile;
pub mod time;

pub use grid::{
    TileDensity, TileGrid, MAP_TILE_HEIGHT, MAP_TILE_WIDTH, TILE_COUNT, TILE_SIZE, WORLD_HEIGHT,
    WORLD_WIDTH,
};
pub use input::{InputState, Key};
pub use tile::TileType;
pub use time::{is_cadence_frame, FramePacer};

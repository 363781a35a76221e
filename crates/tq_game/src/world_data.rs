//! World pack: the static per-world tile tables and enemy spawn records.
//!
//! A pack is JSON. Each world is 16 row strings of tile glyphs (see
//! [`TileType::glyph`]) plus a flat spawn record `[count, x0, y0, x1, y1, ...]`
//! in world pixels. The demo pack ships inside the binary.

use glam::IVec2;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tq_core::{TileGrid, TileType, MAP_TILE_HEIGHT, MAP_TILE_WIDTH, TILE_COUNT};

use crate::entity::{ENTITY_HEIGHT, ENTITY_WIDTH, MAX_ENEMIES};

const DEMO_PACK_JSON: &str = include_str!("../../../assets/worlds/demo_worlds.json");

#[derive(Debug, Deserialize)]
struct WorldPackJson {
    version: String,
    pack_id: String,
    worlds: Vec<WorldJson>,
}

#[derive(Debug, Deserialize)]
struct WorldJson {
    name: String,
    rows: Vec<String>,
    #[serde(default = "default_spawns")]
    spawns: Vec<i32>,
}

/// Enemy start positions for one world.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnTable {
    positions: Vec<IVec2>,
}

impl SpawnTable {
    /// Parse a `[count, x0, y0, ...]` record.
    pub fn from_record(record: &[i32]) -> Result<Self, String> {
        let Some((&count, coords)) = record.split_first() else {
            return Err("spawn record is empty (expected at least the enemy count)".to_string());
        };
        if count < 0 || count as usize > MAX_ENEMIES {
            return Err(format!(
                "spawn record declares {count} enemies (allowed 0..={MAX_ENEMIES})"
            ));
        }
        if coords.len() != count as usize * 2 {
            return Err(format!(
                "spawn record declares {count} enemies but carries {} coordinates",
                coords.len()
            ));
        }
        let positions = coords
            .chunks_exact(2)
            .map(|pair| IVec2::new(pair[0], pair[1]))
            .collect();
        Ok(Self { positions })
    }

    pub fn positions(&self) -> &[IVec2] {
        &self.positions
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldDef {
    pub name: String,
    /// Row-major, `TILE_COUNT` entries.
    pub tiles: Vec<TileType>,
    pub spawns: SpawnTable,
}

impl WorldDef {
    /// Build a world from glyph rows. Mostly used by tests and tools.
    #[allow(dead_code)]
    pub fn from_rows(name: &str, rows: &[&str], spawn_record: &[i32]) -> Result<Self, String> {
        let rows: Vec<String> = rows.iter().map(|r| r.to_string()).collect();
        let tiles = parse_rows(name, &rows)?;
        let spawns = SpawnTable::from_record(spawn_record)
            .map_err(|e| format!("world '{name}': {e}"))?;
        Ok(Self {
            name: name.to_string(),
            tiles,
            spawns,
        })
    }

    /// A world where every tile is the same.
    #[allow(dead_code)]
    pub fn uniform(name: &str, tile: TileType, spawn_record: &[i32]) -> Result<Self, String> {
        let spawns = SpawnTable::from_record(spawn_record)
            .map_err(|e| format!("world '{name}': {e}"))?;
        Ok(Self {
            name: name.to_string(),
            tiles: vec![tile; TILE_COUNT],
            spawns,
        })
    }
}

#[derive(Debug, Clone)]
pub struct WorldPack {
    pub version: String,
    pub pack_id: String,
    worlds: Vec<WorldDef>,
}

impl WorldPack {
    #[allow(dead_code)]
    pub fn new(pack_id: &str, worlds: Vec<WorldDef>) -> Result<Self, String> {
        let pack = Self {
            version: "0.1".to_string(),
            pack_id: pack_id.to_string(),
            worlds,
        };
        validate_pack(&pack)?;
        Ok(pack)
    }

    pub fn get(&self, index: usize) -> Option<&WorldDef> {
        self.worlds.get(index)
    }

    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }
}

pub fn load_world_pack_from_path(path: &Path) -> Result<WorldPack, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    parse_world_pack(&raw, &path.display().to_string())
}

/// The pack compiled into the binary.
pub fn demo_world_pack() -> Result<WorldPack, String> {
    parse_world_pack(DEMO_PACK_JSON, "embedded demo pack")
}

pub fn parse_world_pack(raw: &str, source: &str) -> Result<WorldPack, String> {
    let json: WorldPackJson = serde_json::from_str(raw)
        .map_err(|e| format!("Failed to parse world pack JSON {source}: {e}"))?;

    let mut worlds = Vec::with_capacity(json.worlds.len());
    for world in json.worlds {
        let tiles = parse_rows(&world.name, &world.rows)
            .map_err(|e| format!("World pack validation failed ({source}): {e}"))?;
        let spawns = SpawnTable::from_record(&world.spawns).map_err(|e| {
            format!(
                "World pack validation failed ({source}): world '{}': {e}",
                world.name
            )
        })?;
        worlds.push(WorldDef {
            name: world.name,
            tiles,
            spawns,
        });
    }

    let pack = WorldPack {
        version: json.version,
        pack_id: json.pack_id,
        worlds,
    };
    validate_pack(&pack).map_err(|e| format!("{e} ({source})"))?;
    log::debug!(
        "Loaded world pack '{}' v{} with {} worlds from {source}",
        pack.pack_id,
        pack.version,
        pack.len()
    );
    Ok(pack)
}

fn parse_rows(name: &str, rows: &[String]) -> Result<Vec<TileType>, String> {
    if rows.len() != MAP_TILE_HEIGHT as usize {
        return Err(format!(
            "world '{name}' has {} rows, expected {MAP_TILE_HEIGHT}",
            rows.len()
        ));
    }
    let mut tiles = Vec::with_capacity(TILE_COUNT);
    for (row_index, row) in rows.iter().enumerate() {
        let glyphs: Vec<char> = row.chars().collect();
        if glyphs.len() != MAP_TILE_WIDTH as usize {
            return Err(format!(
                "world '{name}' row {row_index} has {} tiles, expected {MAP_TILE_WIDTH}",
                glyphs.len()
            ));
        }
        for (col, glyph) in glyphs.into_iter().enumerate() {
            let tile = TileType::from_glyph(glyph).ok_or_else(|| {
                format!("world '{name}' has unknown tile glyph '{glyph}' at ({col}, {row_index})")
            })?;
            tiles.push(tile);
        }
    }
    Ok(tiles)
}

fn validate_pack(pack: &WorldPack) -> Result<(), String> {
    if pack.worlds.is_empty() {
        return Err("World pack validation failed: worlds array is empty".to_string());
    }

    let mut names = HashSet::new();
    for world in &pack.worlds {
        if !names.insert(world.name.as_str()) {
            return Err(format!(
                "World pack validation failed: duplicate world name '{}'",
                world.name
            ));
        }
        if world.tiles.len() != TILE_COUNT {
            return Err(format!(
                "World pack validation failed: world '{}' has {} tiles, expected {TILE_COUNT}",
                world.name,
                world.tiles.len()
            ));
        }
        for &pos in world.spawns.positions() {
            if !spawn_is_clear(&world.tiles, pos) {
                log::warn!(
                    "World '{}' spawns an enemy at ({}, {}) overlapping a blocking tile. \
                     This is allowed but the enemy may never move.",
                    world.name,
                    pos.x,
                    pos.y
                );
            }
        }
    }
    Ok(())
}

fn spawn_is_clear(tiles: &[TileType], pos: IVec2) -> bool {
    let corners = [
        pos,
        pos + IVec2::new(ENTITY_WIDTH, 0),
        pos + IVec2::new(0, ENTITY_HEIGHT),
        pos + IVec2::new(ENTITY_WIDTH, ENTITY_HEIGHT),
    ];
    corners.iter().all(|c| {
        TileGrid::tile_index(c.x, c.y)
            .and_then(|i| tiles.get(i))
            .is_some_and(|t| t.is_walkable())
    })
}

fn default_spawns() -> Vec<i32> {
    vec![0]
}

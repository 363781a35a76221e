//! Active world: the live tile grid, the enemy slots and the world index.
//!
//! Loading a world replaces the grid contents wholesale and resets the enemies
//! from that world's spawn table. Enemy slots past the new count keep whatever
//! they held before; nothing reads them because every loop is bounded by
//! `enemy_count`.

use glam::IVec2;
use serde::Deserialize;
use tq_core::{TileDensity, TileGrid};

use crate::entity::{Entity, MAX_ENEMIES};
use crate::world_data::WorldPack;

/// What happens when the player walks off the outer edge of the first or
/// last world.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// The player stops at the edge.
    #[default]
    Block,
    /// The world index wraps around the pack.
    Wrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldStep {
    Previous,
    Next,
}

pub struct WorldManager {
    pack: WorldPack,
    edge_policy: EdgePolicy,
    current: usize,
    grid: TileGrid,
    enemies: [Entity; MAX_ENEMIES],
    enemy_count: usize,
}

impl WorldManager {
    /// Nothing is loaded yet: the grid is all water and there are no enemies.
    pub fn new(pack: WorldPack, density: TileDensity, edge_policy: EdgePolicy) -> Self {
        Self {
            pack,
            edge_policy,
            current: 0,
            grid: TileGrid::new(density),
            enemies: [Entity::default(); MAX_ENEMIES],
            enemy_count: 0,
        }
    }

    pub fn load_world(&mut self, index: usize) -> Result<(), String> {
        let world = self.pack.get(index).ok_or_else(|| {
            format!(
                "World index {index} is outside pack '{}' ({} worlds)",
                self.pack.pack_id,
                self.pack.len()
            )
        })?;

        self.grid.replace_all(&world.tiles)?;

        let spawns = world.spawns.positions();
        self.enemy_count = spawns.len().min(MAX_ENEMIES);
        for (slot, &pos) in self.enemies.iter_mut().zip(spawns) {
            *slot = Entity::at(pos);
        }
        self.current = index;

        log::info!(
            "Loaded world {index} '{}' with {} enemies",
            world.name,
            self.enemy_count
        );
        Ok(())
    }

    /// The index one step away, or `None` when the edge policy blocks it.
    pub fn neighbour(&self, step: WorldStep) -> Option<usize> {
        let count = self.pack.len();
        match (step, self.edge_policy) {
            (WorldStep::Previous, EdgePolicy::Block) => self.current.checked_sub(1),
            (WorldStep::Next, EdgePolicy::Block) => {
                Some(self.current + 1).filter(|&next| next < count)
            }
            (WorldStep::Previous, EdgePolicy::Wrap) => Some((self.current + count - 1) % count),
            (WorldStep::Next, EdgePolicy::Wrap) => Some((self.current + 1) % count),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_name(&self) -> &str {
        self.pack
            .get(self.current)
            .map(|w| w.name.as_str())
            .unwrap_or("")
    }

    pub fn world_count(&self) -> usize {
        self.pack.len()
    }

    pub fn edge_policy(&self) -> EdgePolicy {
        self.edge_policy
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut TileGrid {
        &mut self.grid
    }

    #[allow(dead_code)]
    pub fn enemy_count(&self) -> usize {
        self.enemy_count
    }

    /// Live enemies only.
    pub fn enemies(&self) -> &[Entity] {
        &self.enemies[..self.enemy_count]
    }

    #[allow(dead_code)]
    pub fn enemy_positions(&self) -> Vec<IVec2> {
        self.enemies().iter().map(|e| e.pos).collect()
    }

    /// Split borrow for enemy motion, which reads the grid while moving enemies.
    pub fn grid_and_enemies_mut(&mut self) -> (&mut TileGrid, &mut [Entity]) {
        (&mut self.grid, &mut self.enemies[..self.enemy_count])
    }
}

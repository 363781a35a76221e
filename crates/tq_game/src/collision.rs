//! Tile collision and interaction rules.
//!
//! A move is checked against the tiles under the *leading edge* of the hitbox
//! at the target position. Because the hitbox (12x15) is smaller than a tile
//! (16x16), that edge touches at most two tiles, so exactly two points are
//! sampled:
//!
//! | direction | sample 1       | sample 2           |
//! |-----------|----------------|--------------------|
//! | Left      | (x, y)         | (x, y + h)         |
//! | Right     | (x + w, y)     | (x + w, y + h)     |
//! | Up        | (x, y)         | (x + w, y)         |
//! | Down      | (x, y + h)     | (x + w, y + h)     |
//!
//! The check runs in three phases: sample, apply player interactions (key
//! pickup, door opening), then decide. The verdict re-reads the grid, so a key
//! or door consumed in this call is already walkable.

use glam::IVec2;
use tq_core::{TileGrid, TileType};

use crate::entity::{Direction, Entity, Player};

/// Who is trying to move. Only the player interacts with keys and doors.
pub enum Actor<'a> {
    Player(&'a mut Player),
    Enemy(&'a Entity),
}

impl Actor<'_> {
    fn size(&self) -> IVec2 {
        match self {
            Actor::Player(player) => player.body.size,
            Actor::Enemy(enemy) => enemy.size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSample {
    pub point: IVec2,
    /// `None` when the point lies outside the world.
    pub index: Option<usize>,
    pub tile: TileType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCheck {
    pub allowed: bool,
    pub samples: [TileSample; 2],
    /// Tile index of a key collected by this check.
    pub key_collected: Option<usize>,
    /// Tile index of a door opened by this check.
    pub door_opened: Option<usize>,
}

/// The two leading-edge points for a hitbox of `size` placed at `target`.
pub fn sample_points(size: IVec2, target: IVec2, direction: Direction) -> [IVec2; 2] {
    let IVec2 { x, y } = target;
    let IVec2 { x: w, y: h } = size;
    match direction {
        Direction::Left => [IVec2::new(x, y), IVec2::new(x, y + h)],
        Direction::Right => [IVec2::new(x + w, y), IVec2::new(x + w, y + h)],
        Direction::Up => [IVec2::new(x, y), IVec2::new(x + w, y)],
        Direction::Down => [IVec2::new(x, y + h), IVec2::new(x + w, y + h)],
    }
}

pub fn can_move(grid: &mut TileGrid, actor: Actor<'_>, target: IVec2, direction: Direction) -> bool {
    check_move_detailed(grid, actor, target, direction).allowed
}

pub fn check_move_detailed(
    grid: &mut TileGrid,
    actor: Actor<'_>,
    target: IVec2,
    direction: Direction,
) -> MoveCheck {
    let samples = sample_points(actor.size(), target, direction).map(|point| sample(grid, point));

    let mut key_collected = None;
    let mut door_opened = None;
    if let Actor::Player(player) = actor {
        key_collected = collect_key(grid, player, &samples);
        door_opened = open_door(grid, player, &samples);
    }

    let allowed = samples
        .iter()
        .all(|s| grid.tile_type_at(s.point.x, s.point.y).is_walkable());
    if !allowed {
        log::trace!(
            "Move {:?} to ({}, {}) blocked by {} / {}",
            direction,
            target.x,
            target.y,
            samples[0].tile,
            samples[1].tile
        );
    }

    MoveCheck {
        allowed,
        samples,
        key_collected,
        door_opened,
    }
}

fn sample(grid: &TileGrid, point: IVec2) -> TileSample {
    TileSample {
        point,
        index: TileGrid::tile_index(point.x, point.y),
        tile: grid.tile_type_at(point.x, point.y),
    }
}

/// First sampled key wins; it turns into carpet.
fn collect_key(grid: &mut TileGrid, player: &mut Player, samples: &[TileSample; 2]) -> Option<usize> {
    let index = samples
        .iter()
        .find(|s| s.tile == TileType::Key)
        .and_then(|s| s.index)?;
    player.has_key = true;
    grid.set_tile_type(index, TileType::Carpet);
    log::info!("Key collected at tile {index}");
    Some(index)
}

/// A held key opens the first sampled closed door and is used up.
fn open_door(grid: &mut TileGrid, player: &mut Player, samples: &[TileSample; 2]) -> Option<usize> {
    if !player.has_key {
        return None;
    }
    let index = samples
        .iter()
        .find(|s| s.tile == TileType::DoorClosed)
        .and_then(|s| s.index)?;
    player.has_key = false;
    grid.set_tile_type(index, TileType::DoorOpen);
    log::info!("Door opened at tile {index}");
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tq_core::{TileDensity, MAP_TILE_WIDTH};

    fn tile_index(col: i32, row: i32) -> usize {
        (row * MAP_TILE_WIDTH + col) as usize
    }

    fn green_grid() -> TileGrid {
        TileGrid::filled(TileDensity::Byte, TileType::Green)
    }

    fn grid_with(tiles: &[((i32, i32), TileType)]) -> TileGrid {
        let mut grid = green_grid();
        for &((col, row), tile) in tiles {
            grid.set_tile_type(tile_index(col, row), tile);
        }
        grid
    }

    #[test]
    fn sample_points_follow_leading_edge() {
        let size = IVec2::new(12, 15);
        let t = IVec2::new(20, 30);
        assert_eq!(
            sample_points(size, t, Direction::Left),
            [IVec2::new(20, 30), IVec2::new(20, 45)]
        );
        assert_eq!(
            sample_points(size, t, Direction::Right),
            [IVec2::new(32, 30), IVec2::new(32, 45)]
        );
        assert_eq!(
            sample_points(size, t, Direction::Up),
            [IVec2::new(20, 30), IVec2::new(32, 30)]
        );
        assert_eq!(
            sample_points(size, t, Direction::Down),
            [IVec2::new(20, 45), IVec2::new(32, 45)]
        );
    }

    #[test]
    fn verdict_requires_both_samples_walkable_in_every_direction() {
        let enemy = Entity::new(0, 0);
        // Target (20, 20): hitbox spans cols 1..=2 and rows 1..=2.
        let target = IVec2::new(20, 20);
        let cases = [
            (Direction::Left, [(1, 1), (1, 2)]),
            (Direction::Right, [(2, 1), (2, 2)]),
            (Direction::Up, [(1, 1), (2, 1)]),
            (Direction::Down, [(1, 2), (2, 2)]),
        ];

        for &walkable in &[TileType::Green, TileType::Carpet, TileType::DoorOpen] {
            for &(direction, cells) in &cases {
                let mut grid = grid_with(&[(cells[0], walkable), (cells[1], walkable)]);
                assert!(
                    can_move(&mut grid, Actor::Enemy(&enemy), target, direction),
                    "{direction:?} onto {walkable} should pass"
                );
            }
        }

        for &blocking in &[
            TileType::Water,
            TileType::Tree,
            TileType::Grass,
            TileType::Brick,
            TileType::DoorClosed,
            TileType::Key,
        ] {
            for &(direction, cells) in &cases {
                for &cell in &cells {
                    let mut grid = grid_with(&[(cell, blocking)]);
                    assert!(
                        !can_move(&mut grid, Actor::Enemy(&enemy), target, direction),
                        "{direction:?} with {blocking} at {cell:?} should be blocked"
                    );
                }
            }
        }
    }

    #[test]
    fn samples_outside_world_block() {
        let mut grid = green_grid();
        let enemy = Entity::new(0, 0);
        assert!(!can_move(&mut grid, Actor::Enemy(&enemy), IVec2::new(-1, 20), Direction::Left));
        assert!(!can_move(&mut grid, Actor::Enemy(&enemy), IVec2::new(20, 242), Direction::Down));
    }

    #[test]
    fn enemies_never_collect_keys() {
        let mut grid = grid_with(&[((1, 1), TileType::Key)]);
        let enemy = Entity::new(0, 16);
        let check = check_move_detailed(
            &mut grid,
            Actor::Enemy(&enemy),
            IVec2::new(5, 16),
            Direction::Right,
        );
        assert!(!check.allowed);
        assert_eq!(check.key_collected, None);
        assert_eq!(grid.tile_at(1, 1), TileType::Key);
    }

    #[test]
    fn key_pickup_turns_tile_into_carpet_once() {
        let mut grid = grid_with(&[((1, 1), TileType::Key)]);
        let mut player = Player::new(IVec2::new(4, 16));

        let check = check_move_detailed(
            &mut grid,
            Actor::Player(&mut player),
            IVec2::new(5, 16),
            Direction::Right,
        );
        assert!(check.allowed);
        assert_eq!(check.key_collected, Some(tile_index(1, 1)));
        assert!(player.has_key);
        assert_eq!(grid.tile_at(1, 1), TileType::Carpet);

        // Re-sampling the same tile never triggers a second pickup.
        player.has_key = false;
        let again = check_move_detailed(
            &mut grid,
            Actor::Player(&mut player),
            IVec2::new(5, 16),
            Direction::Right,
        );
        assert!(again.allowed);
        assert_eq!(again.key_collected, None);
        assert!(!player.has_key);
    }

    #[test]
    fn closed_door_without_key_stays_closed_and_blocks() {
        let mut grid = grid_with(&[((2, 2), TileType::DoorClosed)]);
        let mut player = Player::new(IVec2::new(20, 16));
        let check = check_move_detailed(
            &mut grid,
            Actor::Player(&mut player),
            IVec2::new(20, 17),
            Direction::Down,
        );
        assert!(!check.allowed);
        assert_eq!(check.door_opened, None);
        assert_eq!(grid.tile_at(2, 2), TileType::DoorClosed);
    }

    #[test]
    fn key_then_door_scenario() {
        let mut grid = grid_with(&[
            ((1, 1), TileType::Key),
            ((2, 2), TileType::DoorClosed),
            ((5, 5), TileType::DoorClosed),
        ]);
        let mut player = Player::new(IVec2::new(4, 16));

        // Step right onto the key at (1, 1).
        let target = player.pos() + Direction::Right.delta();
        assert!(can_move(&mut grid, Actor::Player(&mut player), target, Direction::Right));
        player.body.pos = target;
        assert!(player.has_key);
        assert_eq!(grid.tile_at(1, 1), TileType::Carpet);

        // From (20, 16) step down: the right sample lands on the door at (2, 2).
        player.body.pos = IVec2::new(20, 16);
        let target = player.pos() + Direction::Down.delta();
        let check = check_move_detailed(
            &mut grid,
            Actor::Player(&mut player),
            target,
            Direction::Down,
        );
        assert!(check.allowed);
        assert_eq!(check.door_opened, Some(tile_index(2, 2)));
        assert!(!player.has_key);
        assert_eq!(grid.tile_at(2, 2), TileType::DoorOpen);

        // A second door with no key left: blocked and untouched.
        player.body.pos = IVec2::new(84, 64);
        let target = player.pos() + Direction::Down.delta();
        assert!(!can_move(&mut grid, Actor::Player(&mut player), target, Direction::Down));
        assert_eq!(grid.tile_at(5, 5), TileType::DoorClosed);
        assert!(!player.has_key);
    }

    #[test]
    fn key_and_door_in_one_check_opens_immediately() {
        // Leading edge moving down covers the key at (1, 2) and the door at (2, 2).
        let mut grid = grid_with(&[((1, 2), TileType::Key), ((2, 2), TileType::DoorClosed)]);
        let mut player = Player::new(IVec2::new(20, 16));
        let check = check_move_detailed(
            &mut grid,
            Actor::Player(&mut player),
            IVec2::new(20, 17),
            Direction::Down,
        );
        assert!(check.allowed);
        assert_eq!(check.key_collected, Some(tile_index(1, 2)));
        assert_eq!(check.door_opened, Some(tile_index(2, 2)));
        assert!(!player.has_key);
    }

    #[test]
    fn packed_grid_behaves_like_byte_grid() {
        let mut grid = TileGrid::filled(TileDensity::Packed, TileType::Green);
        grid.set_tile_type(tile_index(1, 1), TileType::Key);
        let mut player = Player::new(IVec2::new(4, 16));
        assert!(can_move(
            &mut grid,
            Actor::Player(&mut player),
            IVec2::new(5, 16),
            Direction::Right
        ));
        assert!(player.has_key);
        assert_eq!(grid.tile_at(1, 1), TileType::Carpet);
        assert_eq!(grid.tile_at(0, 1), TileType::Green);
        assert_eq!(grid.tile_at(2, 1), TileType::Green);
    }
}

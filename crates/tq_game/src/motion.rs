//! Per-frame movement for the player and the enemies.
//!
//! Every move is a single pixel. The player is driven by [`PlayerIntent`] and
//! handles world transitions at the left/right edges; enemies step toward the
//! player on each axis independently.

use glam::IVec2;
use tq_core::{InputState, Key, TileGrid, WORLD_HEIGHT, WORLD_WIDTH};

use crate::collision::{can_move, check_move_detailed, Actor, MoveCheck};
use crate::entity::{Direction, Entity, Player};
use crate::world::{WorldManager, WorldStep};

/// Directions the player wants to move in this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl PlayerIntent {
    /// A direction is eligible when it was just pressed or is auto-repeating.
    pub fn from_input(input: &InputState, repeat_period: u32) -> Self {
        let eligible =
            |key: Key| input.is_just_pressed(key) || input.is_repeating(key, repeat_period);
        Self {
            left: eligible(Key::Left),
            right: eligible(Key::Right),
            up: eligible(Key::Up),
            down: eligible(Key::Down),
        }
    }

    pub fn is_idle(&self) -> bool {
        !(self.left || self.right || self.up || self.down)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldChange {
    pub from: usize,
    pub to: usize,
    pub step: WorldStep,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStepResult {
    /// Last transition of the frame.
    pub world_change: Option<WorldChange>,
    /// Left and right held together at a seam can load two worlds in one frame.
    pub world_changes: u32,
    pub keys_collected: u32,
    pub doors_opened: u32,
}

impl PlayerStepResult {
    fn record_change(&mut self, change: WorldChange) {
        log::info!(
            "Player crossed {:?} from world {} to {}",
            change.step,
            change.from,
            change.to
        );
        self.world_change = Some(change);
        self.world_changes += 1;
    }

    fn record(&mut self, check: &MoveCheck) {
        if check.key_collected.is_some() {
            self.keys_collected += 1;
        }
        if check.door_opened.is_some() {
            self.doors_opened += 1;
        }
    }
}

/// Move the player one pixel along each eligible direction, in the order
/// left, right, up, down. Fails only if a world transition cannot load.
pub fn step_player(
    player: &mut Player,
    world: &mut WorldManager,
    intent: PlayerIntent,
) -> Result<PlayerStepResult, String> {
    let mut result = PlayerStepResult::default();
    if intent.left {
        step_left(player, world, &mut result)?;
    }
    if intent.right {
        step_right(player, world, &mut result)?;
    }
    if intent.up && player.body.pos.y > 0 {
        try_player_step(player, world, Direction::Up, &mut result);
    }
    if intent.down && player.body.pos.y < WORLD_HEIGHT {
        try_player_step(player, world, Direction::Down, &mut result);
    }
    Ok(result)
}

fn step_left(
    player: &mut Player,
    world: &mut WorldManager,
    result: &mut PlayerStepResult,
) -> Result<(), String> {
    let x = player.body.pos.x;
    if x - 1 > 0 {
        try_player_step(player, world, Direction::Left, result);
        return Ok(());
    }

    // Edge strip: no tile check.
    if x - 1 >= 0 {
        player.body.pos.x = x - 1;
        return Ok(());
    }

    let Some(index) = world.neighbour(WorldStep::Previous) else {
        log::debug!("No world before {}, player held at the edge", world.current_index());
        return Ok(());
    };
    let from = world.current_index();
    world.load_world(index)?;
    player.body.pos.x = WORLD_WIDTH - 1;
    result.record_change(WorldChange {
        from,
        to: index,
        step: WorldStep::Previous,
    });
    Ok(())
}

fn step_right(
    player: &mut Player,
    world: &mut WorldManager,
    result: &mut PlayerStepResult,
) -> Result<(), String> {
    let x = player.body.pos.x;
    let width = player.body.size.x;
    if x + 1 < WORLD_WIDTH - width {
        try_player_step(player, world, Direction::Right, result);
        return Ok(());
    }

    // Edge strip: no tile check. Without a next world the hitbox stays inside.
    if x + 1 < WORLD_WIDTH {
        let last_world = world.neighbour(WorldStep::Next).is_none();
        if !(last_world && x + 1 > WORLD_WIDTH - width) {
            player.body.pos.x = x + 1;
        }
        return Ok(());
    }

    let Some(index) = world.neighbour(WorldStep::Next) else {
        log::debug!("No world after {}, player held at the edge", world.current_index());
        return Ok(());
    };
    let from = world.current_index();
    world.load_world(index)?;
    player.body.pos.x = -width + 1;
    result.record_change(WorldChange {
        from,
        to: index,
        step: WorldStep::Next,
    });
    Ok(())
}

fn try_player_step(
    player: &mut Player,
    world: &mut WorldManager,
    direction: Direction,
    result: &mut PlayerStepResult,
) {
    let target = player.pos() + direction.delta();
    let check = check_move_detailed(world.grid_mut(), Actor::Player(player), target, direction);
    result.record(&check);
    if check.allowed {
        player.body.pos = target;
    }
}

/// Chase step for every live enemy. Axes are checked in the order left,
/// right, up, down and are not exclusive, so a diagonal step is possible.
/// Returns how many enemies moved.
pub fn step_enemies(world: &mut WorldManager, target: IVec2) -> usize {
    let (grid, enemies) = world.grid_and_enemies_mut();
    let mut moved = 0;
    for enemy in enemies.iter_mut() {
        let start = enemy.pos;
        if target.x < enemy.pos.x {
            try_enemy_step(grid, enemy, Direction::Left);
        }
        if target.x > enemy.pos.x {
            try_enemy_step(grid, enemy, Direction::Right);
        }
        if target.y < enemy.pos.y {
            try_enemy_step(grid, enemy, Direction::Up);
        }
        if target.y > enemy.pos.y {
            try_enemy_step(grid, enemy, Direction::Down);
        }
        if enemy.pos != start {
            moved += 1;
        }
    }
    log::trace!("Enemy tick: {moved} of {} moved", enemies.len());
    moved
}

fn try_enemy_step(grid: &mut TileGrid, enemy: &mut Entity, direction: Direction) {
    let target = enemy.pos + direction.delta();
    if can_move(grid, Actor::Enemy(&*enemy), target, direction) {
        enemy.pos = target;
    }
}

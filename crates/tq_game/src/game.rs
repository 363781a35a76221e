//! Frame orchestration.
//!
//! One frame runs, in order:
//!
//!   1. player motion from the frame's intent (may switch worlds)
//!   2. enemy chase, only on cadence frames
//!   3. camera for the player's new position
//!   4. render calls: tile map, player, live enemies
//!   5. player/enemy overlap check, drawing the "Game Over" banner on contact
//!
//! All state sits in [`GameState`]; the frame counter comes from the caller's
//! pacer so the cadence stays deterministic in tests and replays.

use glam::IVec2;
use tq_core::{is_cadence_frame, WORLD_HEIGHT, WORLD_WIDTH};
use tq_render::{Camera, CameraView, Renderer, Sprite};

use crate::config::{validate_config, GameConfig};
use crate::entity::Player;
use crate::motion::{step_enemies, step_player, PlayerIntent, WorldChange};
use crate::world::WorldManager;
use crate::world_data::WorldPack;

const BANNER_POS: IVec2 = IVec2::new(78, 78);
const BANNER_SIZE: IVec2 = IVec2::new(80, 10);
const BANNER_COLOR: u8 = 2;
const BANNER_TEXT_POS: IVec2 = IVec2::new(80, 80);
const BANNER_TEXT_COLOR: u8 = 0;
const BANNER_TEXT: &str = "Game Over";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub frame: u64,
    pub world_index: usize,
    pub view: CameraView,
    pub world_change: Option<WorldChange>,
    pub world_changes: u32,
    pub enemies_ticked: bool,
    pub keys_collected: u32,
    pub doors_opened: u32,
    /// True when any live enemy overlaps the player this frame.
    pub caught: bool,
}

pub struct GameState {
    pub config: GameConfig,
    pub world: WorldManager,
    pub player: Player,
    camera: Camera,
}

impl GameState {
    /// Place the player at the configured spawn and load the start world.
    pub fn new(config: GameConfig, pack: WorldPack) -> Result<Self, String> {
        validate_config(&config)?;
        let mut world = WorldManager::new(pack, config.tile_density, config.edge_policy);
        world.load_world(config.start_world)?;
        let player = Player::new(config.player_spawn.into());
        let camera = Camera::new(config.screen(), IVec2::new(WORLD_WIDTH, WORLD_HEIGHT));
        log::info!(
            "Game ready: player at ({}, {}) in world {} '{}'",
            player.pos().x,
            player.pos().y,
            world.current_index(),
            world.current_name()
        );
        Ok(Self {
            config,
            world,
            player,
            camera,
        })
    }

    /// Simulation half of a frame: motion, enemies, camera, overlap.
    pub fn update(&mut self, intent: PlayerIntent, frame: u64) -> Result<FrameReport, String> {
        let step = step_player(&mut self.player, &mut self.world, intent)?;

        let enemies_ticked = is_cadence_frame(frame, self.config.enemy_update_interval);
        if enemies_ticked {
            step_enemies(&mut self.world, self.player.pos());
        }

        let view = self.camera.view(self.player.pos());
        let caught = self.caught_by().is_some();

        Ok(FrameReport {
            frame,
            world_index: self.world.current_index(),
            view,
            world_change: step.world_change,
            world_changes: step.world_changes,
            enemies_ticked,
            keys_collected: step.keys_collected,
            doors_opened: step.doors_opened,
            caught,
        })
    }

    /// Render half of a frame, using the view computed by `update`.
    pub fn render(&self, report: &FrameReport, renderer: &mut dyn Renderer) {
        renderer.draw_tilemap(self.world.grid(), report.view.offset);
        renderer.draw_sprite(Sprite::Player, report.view.focus);
        for enemy in self.world.enemies() {
            renderer.draw_sprite(Sprite::Enemy, report.view.to_screen(enemy.pos));
        }
        if report.caught {
            renderer.fill_rect(BANNER_POS, BANNER_SIZE, BANNER_COLOR);
            renderer.draw_text(BANNER_TEXT_POS, BANNER_TEXT, BANNER_TEXT_COLOR);
        }
    }

    pub fn run_frame(
        &mut self,
        intent: PlayerIntent,
        frame: u64,
        renderer: &mut dyn Renderer,
    ) -> Result<FrameReport, String> {
        let report = self.update(intent, frame)?;
        self.render(&report, renderer);
        Ok(report)
    }

    /// Index of the first live enemy touching the player.
    pub fn caught_by(&self) -> Option<usize> {
        self.world
            .enemies()
            .iter()
            .position(|enemy| self.player.body.overlaps(enemy))
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}

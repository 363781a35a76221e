mod collision;
mod config;
mod entity;
mod game;
mod motion;
mod replay;
mod world;
mod world_data;

use clap::Parser;
use glam::IVec2;
use std::path::PathBuf;
use std::process::ExitCode;
use tq_core::{FramePacer, InputState};
use tq_render::{AsciiFrame, DrawList};

use config::{load_config_from_path, GameConfig};
use game::{FrameReport, GameState};
use motion::PlayerIntent;
use replay::load_replay_from_path;
use world_data::{demo_world_pack, load_world_pack_from_path};

#[derive(Parser, Debug)]
#[command(name = "tq_game", about = "Tile quest, driven by a scripted button replay")]
struct Args {
    /// World pack JSON. Defaults to the pack built into the binary.
    #[arg(long)]
    worlds: Option<PathBuf>,

    /// Game config JSON. Missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "assets/replays/demo_walk.json")]
    replay: PathBuf,

    /// Pace frames against the wall clock instead of stepping as fast as possible.
    #[arg(long)]
    realtime: bool,

    /// Print the last frame as text.
    #[arg(long)]
    ascii: bool,
}

#[derive(Debug, Default)]
struct RunSummary {
    frames: u64,
    idle_frames: u64,
    caught_frames: u64,
    world_changes: u32,
    keys_collected: u32,
    doors_opened: u32,
}

impl RunSummary {
    fn record(&mut self, intent: PlayerIntent, report: &FrameReport) {
        self.frames += 1;
        if intent.is_idle() {
            self.idle_frames += 1;
        }
        if report.caught {
            self.caught_frames += 1;
        }
        self.world_changes += report.world_changes;
        self.keys_collected += report.keys_collected;
        self.doors_opened += report.doors_opened;
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => GameConfig::default(),
    };
    let pack = match &args.worlds {
        Some(path) => load_world_pack_from_path(path)?,
        None => demo_world_pack()?,
    };
    let replay = load_replay_from_path(&args.replay)?;

    let mut game = GameState::new(config, pack)?;
    let screen = game.camera().screen;
    log::info!(
        "Tile quest starting: {} worlds, edge policy {:?}, {}x{} screen, {} replay frames",
        game.world.world_count(),
        game.world.edge_policy(),
        screen.x,
        screen.y,
        replay.frame_total()
    );

    let mut pacer = FramePacer::new(game.config.frame_rate);
    let mut input = InputState::new();
    let mut draw_list = DrawList::new();
    let mut summary = RunSummary::default();
    let mut last_report = None;

    for keys in replay.expanded_keys() {
        if args.realtime {
            while !pacer.update() {
                std::thread::sleep(pacer.time_until_next_frame());
            }
        } else {
            pacer.advance();
        }

        input.set_held(&keys);
        let intent = PlayerIntent::from_input(&input, game.config.key_repeat_period);
        draw_list.clear();
        let report = game.run_frame(intent, pacer.frame_count(), &mut draw_list)?;
        input.end_frame();

        if report.caught && summary.caught_frames == 0 {
            log::info!("Caught by an enemy on frame {}", report.frame);
        }
        log::trace!("Frame {}: {} draw calls", report.frame, draw_list.len());
        summary.record(intent, &report);
        last_report = Some(report);
    }

    if args.realtime {
        log::info!("Average pace {:.1} fps", pacer.smoothed_fps);
    }
    log_summary(&game, &summary);

    if args.ascii {
        if let Some(report) = last_report {
            let mut frame = AsciiFrame::new(screen);
            game.render(&report, &mut frame);
            print!("{frame}");
        }
    }
    Ok(())
}

fn log_summary(game: &GameState, summary: &RunSummary) {
    let pos: IVec2 = game.player.pos();
    log::info!(
        "Replay finished after {} frames ({} idle): world {} '{}', player at ({}, {}), key held: {}",
        summary.frames,
        summary.idle_frames,
        game.world.current_index(),
        game.world.current_name(),
        pos.x,
        pos.y,
        game.player.has_key
    );
    log::info!(
        "World changes: {}, keys collected: {}, doors opened: {}, frames caught: {}",
        summary.world_changes,
        summary.keys_collected,
        summary.doors_opened,
        summary.caught_frames
    );
    if let Some(enemy) = game.caught_by() {
        log::info!("Enemy {enemy} is still touching the player");
    }
}

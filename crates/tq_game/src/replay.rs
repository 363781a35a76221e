use serde::Deserialize;
use std::fs;
use std::path::Path;
use tq_core::Key;

/// Scripted button input, one entry per run of identical frames.
#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReplayFrame {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub up: bool,
    #[serde(default)]
    pub down: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplayFrame {
    /// Buttons held during this frame.
    pub fn held_keys(&self) -> Vec<Key> {
        [
            (self.left, Key::Left),
            (self.right, Key::Right),
            (self.up, Key::Up),
            (self.down, Key::Down),
        ]
        .into_iter()
        .filter_map(|(down, key)| down.then_some(key))
        .collect()
    }
}

impl ReplaySequence {
    /// One held-button snapshot per simulated frame.
    pub fn expanded_keys(&self) -> Vec<Vec<Key>> {
        let mut out = Vec::new();
        for frame in &self.frames {
            let keys = frame.held_keys();
            for _ in 0..frame.repeat.max(1) {
                out.push(keys.clone());
            }
        }
        out
    }

    pub fn frame_total(&self) -> u64 {
        self.frames
            .iter()
            .map(|f| u64::from(f.repeat.max(1)))
            .sum()
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}

//! Button state tracking with edge-triggered, level-triggered and auto-repeat
//! queries.
//!
//! - **Held:** `is_held(key)` is true every frame the button is down.
//! - **Just pressed / just released:** true only during the frame the
//!   transition happened; cleared by `end_frame()`.
//! - **Repeat:** `is_repeating(key, period)` is true on every `period`-th frame
//!   a button has been held, counting the press frame as frame 0. The frame
//!   count advances in `end_frame()`, so the loop must call it exactly once per
//!   simulated frame.

use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    A,
    B,
    C,
}

impl Key {
    pub const DIRECTIONS: &'static [Key] = &[Key::Left, Key::Right, Key::Up, Key::Down];
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,
    held_frames: HashMap<Key, u32>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
            self.held_frames.insert(key, 0);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.just_released.insert(key);
            self.held_frames.remove(&key);
        }
    }

    /// Apply a full level-triggered snapshot: everything in `down` is pressed,
    /// everything else released.
    pub fn set_held(&mut self, down: &[Key]) {
        let released: Vec<Key> = self
            .held
            .iter()
            .copied()
            .filter(|key| !down.contains(key))
            .collect();
        for key in released {
            self.key_up(key);
        }
        for &key in down {
            self.key_down(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    /// Auto-repeat query. A period of 0 never repeats.
    pub fn is_repeating(&self, key: Key, period: u32) -> bool {
        if period == 0 {
            return false;
        }
        match self.held_frames.get(&key) {
            Some(frames) => frames % period == 0,
            None => false,
        }
    }

    /// Frames the key has been held since its press frame.
    pub fn held_frames(&self, key: Key) -> Option<u32> {
        self.held_frames.get(&key).copied()
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        for frames in self.held_frames.values_mut() {
            *frames = frames.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_sets_held_and_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        assert!(input.is_held(Key::Left));
        assert!(input.is_just_pressed(Key::Left));
    }

    #[test]
    fn test_key_up_clears_held_sets_just_released() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.key_up(Key::Left);
        assert!(!input.is_held(Key::Left));
        assert!(input.is_just_released(Key::Left));
        assert_eq!(input.held_frames(Key::Left), None);
    }

    #[test]
    fn test_key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        input.key_up(Key::A);
        assert!(!input.is_just_released(Key::A));
        assert!(!input.is_held(Key::A));
    }

    #[test]
    fn test_end_frame_clears_transient_state() {
        let mut input = InputState::new();
        input.key_down(Key::Up);
        input.key_down(Key::B);
        input.end_frame();
        assert!(!input.is_just_pressed(Key::Up));
        assert!(!input.is_just_pressed(Key::B));
        assert!(input.is_held(Key::Up));
        assert!(input.is_held(Key::B));
    }

    #[test]
    fn test_repeat_period_one_fires_every_held_frame() {
        let mut input = InputState::new();
        input.key_down(Key::Right);
        for _ in 0..5 {
            assert!(input.is_repeating(Key::Right, 1));
            input.end_frame();
        }
    }

    #[test]
    fn test_repeat_period_three_fires_on_multiples() {
        let mut input = InputState::new();
        input.key_down(Key::Down);
        let mut fired = Vec::new();
        for frame in 0..7 {
            if input.is_repeating(Key::Down, 3) {
                fired.push(frame);
            }
            input.end_frame();
        }
        assert_eq!(fired, vec![0, 3, 6]);
    }

    #[test]
    fn test_repeat_period_zero_never_fires() {
        let mut input = InputState::new();
        input.key_down(Key::Down);
        assert!(!input.is_repeating(Key::Down, 0));
    }

    #[test]
    fn test_repeat_requires_held_key() {
        let input = InputState::new();
        assert!(!input.is_repeating(Key::Left, 1));
    }

    #[test]
    fn test_set_held_presses_and_releases() {
        let mut input = InputState::new();
        input.set_held(&[Key::Left, Key::Up]);
        assert!(input.is_just_pressed(Key::Left));
        assert!(input.is_just_pressed(Key::Up));
        input.end_frame();

        input.set_held(&[Key::Up]);
        assert!(input.is_just_released(Key::Left));
        assert!(!input.is_held(Key::Left));
        assert!(input.is_held(Key::Up));
        // Up stays held: no second press edge.
        assert!(!input.is_just_pressed(Key::Up));
        assert_eq!(input.held_frames(Key::Up), Some(1));
    }

    #[test]
    fn test_default_state_is_empty() {
        let input = InputState::new();
        for &key in Key::DIRECTIONS {
            assert!(!input.is_held(key));
            assert!(!input.is_just_pressed(key));
            assert!(!input.is_just_released(key));
        }
    }
}

//! Cat Nap - level controller for a physics puzzle
//!
//! Core modules:
//! - `sim`: Deterministic contact/touch resolution (win, lose, hook, bounces)
//! - `session`: Level lifecycle (start, reload after an outcome)
//! - `tuning`: Data-driven gameplay constants
//!
//! Rigid-body dynamics, rendering and audio live in the host engine. This crate
//! only decides what happens and emits [`sim::Command`]s for the engine to run.

pub mod error;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::{SessionError, TuningError};
pub use session::{LevelSession, LevelSource};
pub use tuning::Tuning;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz, matches the engine's physics step)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Widest aspect ratio the playable area is clamped to
    pub const MAX_ASPECT_RATIO: f32 = 16.0 / 9.0;
}

/// Convert a delay in seconds to whole simulation ticks (at least one)
#[inline]
pub fn secs_to_ticks(secs: f32) -> u64 {
    ((secs / consts::SIM_DT).round() as u64).max(1)
}

/// Axis-aligned rectangle in scene coordinates (y up)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Bottom-left corner
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Rectangle of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: center - size * 0.5,
            size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    /// Midpoint of the top edge
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x * 0.5, self.origin.y + self.size.y)
    }
}

/// Playable area for a scene: full width, height clamped to `max_aspect`
/// and centered vertically.
pub fn playable_rect(scene_size: Vec2, max_aspect: f32) -> Rect {
    let max_height = scene_size.x / max_aspect;
    let margin = ((scene_size.y - max_height) / 2.0).max(0.0);
    Rect::new(
        Vec2::new(0.0, margin),
        Vec2::new(scene_size.x, scene_size.y - margin * 2.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_to_ticks() {
        assert_eq!(secs_to_ticks(1.0), 120);
        assert_eq!(secs_to_ticks(5.0), 600);
        assert_eq!(secs_to_ticks(0.0), 1);
    }

    #[test]
    fn test_playable_rect_clamps_tall_scene() {
        // 2048x1536 (4:3) scene: 16:9 band is 1152 tall, margin 192
        let rect = playable_rect(Vec2::new(2048.0, 1536.0), consts::MAX_ASPECT_RATIO);
        assert!((rect.origin.y - 192.0).abs() < 0.01);
        assert!((rect.size.y - 1152.0).abs() < 0.01);
        assert_eq!(rect.size.x, 2048.0);
    }

    #[test]
    fn test_playable_rect_wide_scene_untouched() {
        let rect = playable_rect(Vec2::new(2000.0, 900.0), consts::MAX_ASPECT_RATIO);
        assert_eq!(rect.origin, Vec2::ZERO);
        assert_eq!(rect.size, Vec2::new(2000.0, 900.0));
    }

    #[test]
    fn test_rect_top_center() {
        let rect = Rect::from_center(Vec2::new(100.0, 50.0), Vec2::new(40.0, 20.0));
        assert_eq!(rect.top_center(), Vec2::new(100.0, 60.0));
        assert_eq!(rect.center(), Vec2::new(100.0, 50.0));
    }
}

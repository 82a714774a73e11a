//! Gameplay tuning
//!
//! Data-driven constants for the level controller. Every field has a default,
//! so a tuning file only needs to list what it overrides.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_ASPECT_RATIO;
use crate::error::TuningError;

/// Longest delay or animation a tuning file may ask for (seconds)
pub const MAX_DELAY_SECS: f32 = 3600.0;

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Contact rules ===
    /// Boundary contacts a message survives (removed on this count)
    pub bounce_limit: u32,
    /// Actor tilt from upright that counts as falling over (degrees)
    pub lose_tilt_degrees: f32,

    // === Springs ===
    /// Upward impulse applied to a tapped spring
    pub spring_impulse: f32,
    /// Delay before a tapped spring despawns (seconds)
    pub spring_pop_delay: f32,

    // === Outcome ===
    /// Delay between win/lose and the level reload (seconds)
    pub reload_delay: f32,
    /// Time for the actor to slide onto the bed on win (seconds)
    pub curl_move_duration: f32,
    /// Time for the actor to rotate upright on win (seconds)
    pub curl_rotate_duration: f32,
    /// Frame time of the curl-up animation (seconds)
    pub curl_frame_time: f32,

    // === Message overlay ===
    pub message_font_size: f32,
    /// Radius of the message's physics body
    pub message_body_radius: f32,
    pub message_restitution: f32,

    // === Scene ===
    /// Horizontal impulse that starts the hook swinging
    pub hook_swing_impulse: f32,
    /// Size of the goal's (bed's) physics body
    pub goal_body_size: Vec2,
    /// Widest aspect ratio of the playable area
    pub max_aspect_ratio: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            bounce_limit: 4,
            lose_tilt_degrees: 45.0,

            spring_impulse: 160.0,
            spring_pop_delay: 1.0,

            reload_delay: 5.0,
            curl_move_duration: 0.66,
            curl_rotate_duration: 0.5,
            curl_frame_time: 0.25,

            message_font_size: 128.0,
            message_body_radius: 10.0,
            message_restitution: 0.7,

            hook_swing_impulse: 50.0,
            goal_body_size: Vec2::new(40.0, 30.0),
            max_aspect_ratio: MAX_ASPECT_RATIO,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.bounce_limit == 0 {
            return Err(TuningError::Invalid {
                field: "bounce_limit",
                reason: "must be at least 1",
            });
        }
        if !(self.lose_tilt_degrees > 0.0 && self.lose_tilt_degrees < 180.0) {
            return Err(TuningError::Invalid {
                field: "lose_tilt_degrees",
                reason: "must be between 0 and 180",
            });
        }
        let delays = [
            ("spring_pop_delay", self.spring_pop_delay),
            ("reload_delay", self.reload_delay),
            ("curl_move_duration", self.curl_move_duration),
            ("curl_rotate_duration", self.curl_rotate_duration),
            ("curl_frame_time", self.curl_frame_time),
        ];
        for (field, value) in delays {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be a non-negative number of seconds",
                });
            }
            if value > MAX_DELAY_SECS {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be at most an hour",
                });
            }
        }
        if !(self.max_aspect_ratio > 0.0) {
            return Err(TuningError::Invalid {
                field: "max_aspect_ratio",
                reason: "must be positive",
            });
        }
        Ok(())
    }

    /// Lose tilt threshold in radians
    pub fn lose_tilt_radians(&self) -> f32 {
        self.lose_tilt_degrees.to_radians()
    }

    /// Spring despawn delay in ticks
    pub fn spring_pop_ticks(&self) -> u64 {
        crate::secs_to_ticks(self.spring_pop_delay)
    }

    /// Reload delay in ticks
    pub fn reload_ticks(&self) -> u64 {
        crate::secs_to_ticks(self.reload_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.bounce_limit, 4);
        assert_eq!(tuning.spring_pop_ticks(), 120);
        assert_eq!(tuning.reload_ticks(), 600);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "bounce_limit": 6, "reload_delay": 2.5 }"#).unwrap();
        assert_eq!(tuning.bounce_limit, 6);
        assert_eq!(tuning.reload_ticks(), 300);
        assert_eq!(tuning.spring_impulse, 160.0);
    }

    #[test]
    fn test_rejects_zero_bounce_limit() {
        let err = Tuning::from_json(r#"{ "bounce_limit": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "bounce_limit",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_delay() {
        let err = Tuning::from_json(r#"{ "spring_pop_delay": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "spring_pop_delay", .. }));
    }

    #[test]
    fn test_rejects_huge_delay() {
        let err = Tuning::from_json(r#"{ "spring_pop_delay": 1e30 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "spring_pop_delay", .. }));

        let err = Tuning::from_json(r#"{ "reload_delay": 3601.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "reload_delay", .. }));

        let tuning = Tuning::from_json(r#"{ "reload_delay": 3600.0 }"#).unwrap();
        assert_eq!(tuning.reload_ticks(), 432_000);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ bounce_limit"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Tuning::load("/nonexistent/cat-nap-tuning.json"),
            Err(TuningError::Io(_))
        ));
    }
}

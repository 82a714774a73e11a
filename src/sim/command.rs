//! Outbound commands to the engine
//!
//! Commands are fire-and-forget. Joint handles are allocated on this side so
//! attaching never has to wait for an engine reply.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::category::{BodyFilter, CategoryMask};
use super::events::EntityId;
use crate::Rect;

/// Handle to a joint created through [`Command::AttachJoint`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JointId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum JointKind {
    /// Rigid pin at `anchor`
    Fixed { anchor: Vec2 },
    /// Spring between two anchors (the hook's rope)
    Spring { anchor_a: Vec2, anchor_b: Vec2 },
}

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sound {
    /// Obstacle destroyed
    Pop,
    Win,
    Lose,
}

impl Sound {
    pub fn file_name(self) -> &'static str {
        match self {
            Sound::Pop => "pop.mp3",
            Sound::Win => "win.mp3",
            Sound::Lose => "lose.mp3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Texture {
    /// Actor after falling off
    CatAwake,
    CatCurlUp1,
    CatCurlUp2,
    CatCurlUp3,
}

impl Texture {
    pub fn image_name(self) -> &'static str {
        match self {
            Texture::CatAwake => "cat_awake",
            Texture::CatCurlUp1 => "cat_curlup1",
            Texture::CatCurlUp2 => "cat_curlup2",
            Texture::CatCurlUp3 => "cat_curlup3",
        }
    }
}

/// Background track started with the level
pub const BACKGROUND_MUSIC: &str = "backgroundMusic.mp3";

/// Floating outcome label; the engine spawns it as a [`Category::Message`] body
///
/// [`Category::Message`]: super::Category::Message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSpec {
    pub text: String,
    pub font_size: f32,
    pub position: Vec2,
    /// Radius of the circular physics body
    pub body_radius: f32,
    pub restitution: f32,
    pub filter: BodyFilter,
}

/// Side effects for the engine to perform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    RemoveObject(EntityId),
    ApplyImpulse {
        target: EntityId,
        impulse: Vec2,
        /// Point of application; `None` applies at the center of mass
        point: Option<Vec2>,
    },
    SetVelocity {
        target: EntityId,
        linear: Vec2,
        angular: f32,
    },
    SetRotation {
        target: EntityId,
        radians: f32,
    },
    AttachJoint {
        joint: JointId,
        body_a: EntityId,
        body_b: EntityId,
        kind: JointKind,
    },
    DetachJoint(JointId),
    /// Replace a body's masks
    ConfigureBody {
        target: EntityId,
        filter: BodyFilter,
    },
    /// Only touch the contact-test mask
    SetContactTestMask {
        target: EntityId,
        mask: CategoryMask,
    },
    /// Give `target` a static rectangular body
    CreateStaticBody {
        target: EntityId,
        size: Vec2,
    },
    /// Give `target` an edge-loop body around `rect`
    CreateEdgeLoop {
        target: EntityId,
        rect: Rect,
    },
    /// Drop `target`'s physics body; the node becomes decorative
    RemovePhysicsBody(EntityId),
    /// Keep `target` rotated toward `toward`
    OrientToward {
        target: EntityId,
        toward: EntityId,
    },
    MoveTo {
        target: EntityId,
        point: Vec2,
        duration: f32,
    },
    RotateTo {
        target: EntityId,
        radians: f32,
        duration: f32,
    },
    SetTexture {
        target: EntityId,
        texture: Texture,
    },
    AnimateTextures {
        target: EntityId,
        frames: Vec<Texture>,
        frame_time: f32,
    },
    PlaySound(Sound),
    PlayMusic(String),
    PauseMusic,
    DisplayMessage(MessageSpec),
    RequestReload {
        level: u32,
    },
}

impl Command {
    /// Sound and image files this command needs loaded
    pub fn asset_names(&self) -> Vec<&'static str> {
        match self {
            Command::PlaySound(sound) => vec![sound.file_name()],
            Command::PlayMusic(_) => vec![BACKGROUND_MUSIC],
            Command::SetTexture { texture, .. } => vec![texture.image_name()],
            Command::AnimateTextures { frames, .. } => {
                frames.iter().map(|t| t.image_name()).collect()
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_names() {
        assert_eq!(Command::PlaySound(Sound::Pop).asset_names(), vec!["pop.mp3"]);
        assert_eq!(
            Command::SetTexture {
                target: EntityId(1),
                texture: Texture::CatAwake,
            }
            .asset_names(),
            vec!["cat_awake"]
        );
        assert_eq!(
            Command::AnimateTextures {
                target: EntityId(1),
                frames: vec![Texture::CatCurlUp1, Texture::CatCurlUp2, Texture::CatCurlUp3],
                frame_time: 0.25,
            }
            .asset_names(),
            vec!["cat_curlup1", "cat_curlup2", "cat_curlup3"]
        );
        assert_eq!(
            Command::PlayMusic(BACKGROUND_MUSIC.to_string()).asset_names(),
            vec!["backgroundMusic.mp3"]
        );
        assert!(Command::PauseMusic.asset_names().is_empty());
    }

    #[test]
    fn test_sound_files() {
        assert_eq!(Sound::Win.file_name(), "win.mp3");
        assert_eq!(Sound::Lose.file_name(), "lose.mp3");
    }
}

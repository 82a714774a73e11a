//! Level layout and scene setup
//!
//! The engine loads the level file and spawns the nodes. This module only
//! turns the resulting handles into the physics setup the rules depend on.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::category::{BodyFilter, Category};
use super::command::{BACKGROUND_MUSIC, Command, JointKind, MessageSpec};
use super::events::EntityId;
use super::state::JointIds;
use crate::{Tuning, playable_rect};

/// Ceiling hook: base pinned to the boundary, rope, and the swinging hook
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HookRig {
    pub base: EntityId,
    pub base_position: Vec2,
    pub rope: EntityId,
    /// Length of the rope sprite; the hook hangs this far below the base
    pub rope_length: f32,
    pub hook: EntityId,
    pub hook_size: Vec2,
}

impl HookRig {
    /// Resting position of the hook
    pub fn hook_position(&self) -> Vec2 {
        self.base_position - Vec2::new(0.0, self.rope_length)
    }

    /// Top of the hook, where the rope connects
    pub fn hook_top(&self) -> Vec2 {
        self.hook_position() + Vec2::new(0.0, self.hook_size.y / 2.0)
    }
}

/// Handles for one loaded level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub index: u32,
    pub scene_size: Vec2,
    /// Scene root; carries the edge-loop body
    pub boundary: EntityId,
    pub actor: EntityId,
    pub goal: EntityId,
    #[serde(default)]
    pub hook: Option<HookRig>,
}

impl LevelLayout {
    pub fn scene_center(&self) -> Vec2 {
        self.scene_size / 2.0
    }
}

/// Physics setup for a freshly loaded level
pub fn setup_commands(layout: &LevelLayout, tuning: &Tuning, joints: &mut JointIds) -> Vec<Command> {
    let mut out = vec![
        Command::CreateEdgeLoop {
            target: layout.boundary,
            rect: playable_rect(layout.scene_size, tuning.max_aspect_ratio),
        },
        Command::ConfigureBody {
            target: layout.boundary,
            filter: BodyFilter::for_category(Category::Boundary),
        },
        Command::CreateStaticBody {
            target: layout.goal,
            size: tuning.goal_body_size,
        },
        Command::ConfigureBody {
            target: layout.goal,
            filter: BodyFilter::for_category(Category::Goal),
        },
        Command::ConfigureBody {
            target: layout.actor,
            filter: BodyFilter::for_category(Category::Actor),
        },
        Command::PlayMusic(BACKGROUND_MUSIC.to_string()),
    ];

    if let Some(rig) = &layout.hook {
        add_hook(rig, layout.boundary, tuning, joints, &mut out);
    }

    out
}

fn add_hook(rig: &HookRig, boundary: EntityId, tuning: &Tuning, joints: &mut JointIds, out: &mut Vec<Command>) {
    out.push(Command::AttachJoint {
        joint: joints.next_id(),
        body_a: rig.base,
        body_b: boundary,
        kind: JointKind::Fixed { anchor: Vec2::ZERO },
    });
    out.push(Command::OrientToward {
        target: rig.rope,
        toward: rig.hook,
    });
    out.push(Command::ConfigureBody {
        target: rig.hook,
        filter: BodyFilter::for_category(Category::HookActor),
    });
    out.push(Command::AttachJoint {
        joint: joints.next_id(),
        body_a: rig.base,
        body_b: rig.hook,
        kind: JointKind::Spring {
            anchor_a: rig.base_position,
            anchor_b: rig.hook_top(),
        },
    });
    out.push(Command::ApplyImpulse {
        target: rig.hook,
        impulse: Vec2::new(tuning.hook_swing_impulse, 0.0),
        point: None,
    });
}

/// Floating label shown at the scene center
pub fn message(text: &str, scene_center: Vec2, tuning: &Tuning) -> MessageSpec {
    MessageSpec {
        text: text.to_string(),
        font_size: tuning.message_font_size,
        position: scene_center,
        body_radius: tuning.message_body_radius,
        restitution: tuning.message_restitution,
        filter: BodyFilter::for_category(Category::Message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(hook: Option<HookRig>) -> LevelLayout {
        LevelLayout {
            index: 1,
            scene_size: Vec2::new(2048.0, 1536.0),
            boundary: EntityId(0),
            actor: EntityId(1),
            goal: EntityId(2),
            hook,
        }
    }

    fn rig() -> HookRig {
        HookRig {
            base: EntityId(10),
            base_position: Vec2::new(1024.0, 1300.0),
            rope: EntityId(11),
            rope_length: 300.0,
            hook: EntityId(12),
            hook_size: Vec2::new(60.0, 80.0),
        }
    }

    #[test]
    fn test_setup_without_hook() {
        let mut joints = JointIds::default();
        let out = setup_commands(&layout(None), &Tuning::default(), &mut joints);

        assert!(out.iter().any(|c| matches!(
            c,
            Command::CreateStaticBody { target: EntityId(2), size } if *size == Vec2::new(40.0, 30.0)
        )));
        assert!(out.iter().any(|c| matches!(c, Command::PlayMusic(m) if m == BACKGROUND_MUSIC)));
        assert!(!out.iter().any(|c| matches!(c, Command::AttachJoint { .. })));
    }

    #[test]
    fn test_setup_edge_loop_uses_playable_rect() {
        let mut joints = JointIds::default();
        let out = setup_commands(&layout(None), &Tuning::default(), &mut joints);
        let rect = out
            .iter()
            .find_map(|c| match c {
                Command::CreateEdgeLoop { rect, .. } => Some(*rect),
                _ => None,
            })
            .unwrap();
        assert!((rect.origin.y - 192.0).abs() < 0.01);
    }

    #[test]
    fn test_setup_hook_rig() {
        let mut joints = JointIds::default();
        let out = setup_commands(&layout(Some(rig())), &Tuning::default(), &mut joints);

        let joint_count = out
            .iter()
            .filter(|c| matches!(c, Command::AttachJoint { .. }))
            .count();
        assert_eq!(joint_count, 2);

        // Rope connects at the top of the hook
        assert!(out.iter().any(|c| matches!(
            c,
            Command::AttachJoint { kind: JointKind::Spring { anchor_b, .. }, .. }
                if *anchor_b == Vec2::new(1024.0, 1040.0)
        )));
        assert!(out.iter().any(|c| matches!(
            c,
            Command::ApplyImpulse { target: EntityId(12), impulse, .. } if impulse.x == 50.0
        )));
    }

    #[test]
    fn test_message_spec() {
        let spec = message("Nice job!", Vec2::new(100.0, 50.0), &Tuning::default());
        assert_eq!(spec.text, "Nice job!");
        assert_eq!(spec.font_size, 128.0);
        assert_eq!(spec.filter, BodyFilter::for_category(Category::Message));
    }
}

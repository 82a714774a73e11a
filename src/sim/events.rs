//! Inbound events from the engine

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::Rect;

/// Opaque handle to an engine-owned entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Snapshot of a body taking part in an event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    pub category: Category,
    /// Center of the node in scene coordinates
    pub position: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(id: EntityId, category: Category, position: Vec2, size: Vec2) -> Self {
        Self {
            id,
            category,
            position,
            size,
        }
    }

    /// Bounding box in scene coordinates
    pub fn frame(&self) -> Rect {
        Rect::from_center(self.position, self.size)
    }
}

/// Contact-begin between two bodies (unordered)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactEvent {
    pub a: Body,
    pub b: Body,
}

impl ContactEvent {
    pub fn new(a: Body, b: Body) -> Self {
        Self { a, b }
    }

    /// The participant with `category`, if any
    pub fn body_with(&self, category: Category) -> Option<&Body> {
        if self.a.category == category {
            Some(&self.a)
        } else if self.b.category == category {
            Some(&self.b)
        } else {
            None
        }
    }
}

/// Tap on the scene; `target` is the body under the touch point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchEvent {
    pub target: Option<Body>,
}

impl TouchEvent {
    pub fn on(body: Body) -> Self {
        Self { target: Some(body) }
    }

    /// Tap on empty space
    pub fn empty() -> Self {
        Self { target: None }
    }
}

/// Fired once per simulated step, after physics integration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PostStepTick {
    /// Actor rotation from upright (radians)
    pub actor_rotation: f32,
    /// Whether the actor's contact-test mask is non-zero
    pub actor_contact_test_enabled: bool,
}

/// Everything the resolver consumes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    Contact(ContactEvent),
    Touch(TouchEvent),
    PostStep(PostStepTick),
    /// The engine removed an entity on its own
    Despawned(EntityId),
}

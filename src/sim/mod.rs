//! Deterministic level rules
//!
//! All gameplay decisions live here. This module must stay pure:
//! - Fixed timestep only (delays are counted in ticks)
//! - Stable iteration order (ordered maps keyed by entity id)
//! - No rendering, audio or physics; effects leave as `Command`s

pub mod category;
pub mod command;
pub mod events;
pub mod resolver;
pub mod scene;
pub mod state;
pub mod timeline;

pub use category::{BodyFilter, Category, CategoryMask, ContactKind};
pub use command::{Command, JointId, JointKind, MessageSpec, Sound, Texture};
pub use events::{Body, ContactEvent, EntityId, PostStepTick, SceneEvent, TouchEvent};
pub use resolver::ContactResolver;
pub use scene::{HookRig, LevelLayout};
pub use state::{BounceCounter, HookAttachment, LevelOutcome};
pub use timeline::{DeferredAction, Timeline};

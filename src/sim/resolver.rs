//! Contact resolution
//!
//! Maps contact-begin, touch and post-step events to outcome changes and
//! engine commands. Events are handled one at a time to completion; every
//! effect goes out through the `out` buffer.

use std::collections::BTreeSet;

use glam::Vec2;

use super::category::{Category, CategoryMask, ContactKind};
use super::command::{Command, JointKind, Sound, Texture};
use super::events::{Body, ContactEvent, EntityId, PostStepTick, SceneEvent, TouchEvent};
use super::scene::{self, LevelLayout};
use super::state::{BounceCounters, HookAttachment, JointIds, LevelOutcome};
use super::timeline::{DeferredAction, Timeline};
use crate::Tuning;

const WIN_MESSAGE: &str = "Nice job!";
const LOSE_MESSAGE: &str = "Try again...";

/// Per-level rules engine
#[derive(Debug, Clone)]
pub struct ContactResolver {
    layout: LevelLayout,
    tuning: Tuning,
    outcome: LevelOutcome,
    hook: Option<HookAttachment>,
    /// Cleared on hook release; the hook stops reporting actor contacts
    hook_contact_enabled: bool,
    /// Cleared by Lose so it cannot fire twice
    actor_lose_armed: bool,
    bounces: BounceCounters,
    /// Entities already removed by us or reported gone by the engine.
    /// Never pruned; it lives only as long as the level, a reload starts empty.
    removed: BTreeSet<EntityId>,
    joints: JointIds,
    timeline: Timeline,
}

impl ContactResolver {
    pub fn new(layout: LevelLayout, tuning: Tuning) -> Self {
        Self {
            layout,
            tuning,
            outcome: LevelOutcome::InProgress,
            hook: None,
            hook_contact_enabled: true,
            actor_lose_armed: true,
            bounces: BounceCounters::default(),
            removed: BTreeSet::new(),
            joints: JointIds::default(),
            timeline: Timeline::new(),
        }
    }

    /// Emit the physics setup for the level
    pub fn begin(&mut self, out: &mut Vec<Command>) {
        log::info!("Level {} started", self.layout.index);
        out.extend(scene::setup_commands(&self.layout, &self.tuning, &mut self.joints));
    }

    pub fn level(&self) -> u32 {
        self.layout.index
    }

    pub fn layout(&self) -> &LevelLayout {
        &self.layout
    }

    pub fn outcome(&self) -> LevelOutcome {
        self.outcome
    }

    pub fn hook_attachment(&self) -> Option<&HookAttachment> {
        self.hook.as_ref()
    }

    pub fn bounce_count(&self, id: EntityId) -> Option<u32> {
        self.bounces.get(id)
    }

    pub fn is_removed(&self, id: EntityId) -> bool {
        self.removed.contains(&id)
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Route any inbound event
    pub fn handle(&mut self, event: &SceneEvent, out: &mut Vec<Command>) {
        match event {
            SceneEvent::Contact(contact) => self.on_contact(contact, out),
            SceneEvent::Touch(touch) => self.on_touch(touch, out),
            SceneEvent::PostStep(tick) => self.on_post_step(tick, out),
            SceneEvent::Despawned(id) => self.on_despawned(*id),
        }
    }

    /// Tap on the scene
    pub fn on_touch(&mut self, touch: &TouchEvent, out: &mut Vec<Command>) {
        let Some(body) = touch.target else { return };

        if self.outcome.is_terminal() {
            log::debug!("Touch on {:?} ignored, level already {:?}", body.id, self.outcome);
            return;
        }
        if self.removed.contains(&body.id) {
            log::debug!("Touch on removed entity {:?}", body.id);
            return;
        }

        match body.category {
            Category::Obstacle => {
                self.remove_object(body.id, out);
                out.push(Command::PlaySound(Sound::Pop));
            }
            Category::Spring => {
                out.push(Command::ApplyImpulse {
                    target: body.id,
                    impulse: Vec2::new(0.0, self.tuning.spring_impulse),
                    point: Some(body.frame().top_center()),
                });
                self.timeline.schedule(
                    self.tuning.spring_pop_ticks(),
                    DeferredAction::RemoveObject(body.id),
                );
            }
            Category::Actor if self.hook.is_some() => self.release_hook(out),
            _ => {}
        }
    }

    /// Contact-begin between two bodies
    pub fn on_contact(&mut self, contact: &ContactEvent, out: &mut Vec<Command>) {
        let Some(kind) = ContactKind::classify(contact.a.category, contact.b.category) else {
            log::debug!(
                "Ignoring contact {:?}|{:?}",
                contact.a.category,
                contact.b.category
            );
            return;
        };
        if self.removed.contains(&contact.a.id) || self.removed.contains(&contact.b.id) {
            log::debug!("Contact {:?} involves a removed entity", kind);
            return;
        }

        // The outcome label only appears after the level ends, so its bounces
        // are tracked regardless of outcome
        if kind != ContactKind::MessageBounced && self.outcome.is_terminal() {
            log::debug!("Contact {:?} after level {:?}", kind, self.outcome);
            return;
        }

        match kind {
            ContactKind::ActorReachedGoal => {
                if let (Some(actor), Some(goal)) = (
                    contact.body_with(Category::Actor),
                    contact.body_with(Category::Goal),
                ) {
                    let (actor, goal) = (*actor, *goal);
                    self.win(&actor, &goal, out);
                }
            }
            ContactKind::ActorFellOff => {
                if self.hook.is_some() {
                    log::debug!("Boundary contact while on the hook");
                } else {
                    self.lose(out);
                }
            }
            ContactKind::MessageBounced => {
                if let Some(message) = contact.body_with(Category::Message) {
                    self.bounce(message.id, out);
                }
            }
            ContactKind::ActorCaughtHook => {
                if let (Some(actor), Some(hook)) = (
                    contact.body_with(Category::Actor),
                    contact.body_with(Category::HookActor),
                ) {
                    let (actor, hook) = (*actor, *hook);
                    self.attach_hook(&actor, &hook, out);
                }
            }
        }
    }

    /// Runs once per simulated step: due timers, then the tip-over check
    pub fn on_post_step(&mut self, tick: &PostStepTick, out: &mut Vec<Command>) {
        for action in self.timeline.advance() {
            self.run_deferred(action, out);
        }

        if self.outcome.is_terminal()
            || self.hook.is_some()
            || !self.actor_lose_armed
            || !tick.actor_contact_test_enabled
        {
            return;
        }
        if tick.actor_rotation.abs() > self.tuning.lose_tilt_radians() {
            log::info!(
                "Actor tipped over ({:.1} degrees)",
                tick.actor_rotation.to_degrees()
            );
            self.lose(out);
        }
    }

    /// The engine removed an entity on its own
    pub fn on_despawned(&mut self, id: EntityId) {
        self.removed.insert(id);
        self.bounces.remove(id);
    }

    fn run_deferred(&mut self, action: DeferredAction, out: &mut Vec<Command>) {
        match action {
            DeferredAction::RemoveObject(id) => {
                if self.removed.contains(&id) {
                    log::debug!("Deferred removal of {:?} skipped, already gone", id);
                } else {
                    self.remove_object(id, out);
                }
            }
            DeferredAction::ReloadLevel { level } => {
                if self.outcome.is_terminal() {
                    log::info!("Reloading level {}", level);
                    out.push(Command::RequestReload { level });
                } else {
                    log::debug!("Reload of level {} skipped, level in progress", level);
                }
            }
        }
    }

    fn remove_object(&mut self, id: EntityId, out: &mut Vec<Command>) {
        self.removed.insert(id);
        self.bounces.remove(id);
        out.push(Command::RemoveObject(id));
    }

    fn bounce(&mut self, message: EntityId, out: &mut Vec<Command>) {
        let count = self.bounces.record(message);
        if count >= self.tuning.bounce_limit {
            self.remove_object(message, out);
        }
    }

    fn attach_hook(&mut self, actor: &Body, hook: &Body, out: &mut Vec<Command>) {
        if !self.hook_contact_enabled {
            log::debug!("Hook contact after release ignored");
            return;
        }
        if let Some(existing) = &self.hook {
            log::warn!(
                "Actor {:?} already pinned to hook {:?}, ignoring re-attach",
                existing.actor,
                existing.hook
            );
            return;
        }

        out.push(Command::SetVelocity {
            target: actor.id,
            linear: Vec2::ZERO,
            angular: 0.0,
        });

        let anchor = hook.position + Vec2::new(0.0, hook.size.y / 2.0);
        let joint = self.joints.next_id();
        out.push(Command::AttachJoint {
            joint,
            body_a: actor.id,
            body_b: hook.id,
            kind: JointKind::Fixed { anchor },
        });
        self.hook = Some(HookAttachment {
            joint,
            actor: actor.id,
            hook: hook.id,
            anchor,
        });
    }

    fn release_hook(&mut self, out: &mut Vec<Command>) {
        let Some(attachment) = self.hook.take() else { return };

        out.push(Command::SetRotation {
            target: attachment.actor,
            radians: 0.0,
        });
        out.push(Command::SetContactTestMask {
            target: attachment.hook,
            mask: CategoryMask::NONE,
        });
        out.push(Command::DetachJoint(attachment.joint));
        self.hook_contact_enabled = false;
    }

    fn win(&mut self, actor: &Body, goal: &Body, out: &mut Vec<Command>) {
        if self.outcome.is_terminal() {
            return;
        }
        self.outcome = LevelOutcome::Won;
        log::info!("Level {} won", self.layout.index);

        out.push(Command::RemovePhysicsBody(actor.id));

        let curl_point = Vec2::new(goal.position.x, goal.position.y + actor.size.y / 3.0);
        out.push(Command::MoveTo {
            target: actor.id,
            point: curl_point,
            duration: self.tuning.curl_move_duration,
        });
        out.push(Command::RotateTo {
            target: actor.id,
            radians: 0.0,
            duration: self.tuning.curl_rotate_duration,
        });

        out.push(Command::DisplayMessage(scene::message(
            WIN_MESSAGE,
            self.layout.scene_center(),
            &self.tuning,
        )));
        self.schedule_reload();

        out.push(Command::AnimateTextures {
            target: actor.id,
            frames: vec![Texture::CatCurlUp1, Texture::CatCurlUp2, Texture::CatCurlUp3],
            frame_time: self.tuning.curl_frame_time,
        });
        out.push(Command::PauseMusic);
        out.push(Command::PlaySound(Sound::Win));
    }

    fn lose(&mut self, out: &mut Vec<Command>) {
        if self.outcome.is_terminal() || !self.actor_lose_armed {
            return;
        }
        self.outcome = LevelOutcome::Lost;
        self.actor_lose_armed = false;
        log::info!("Level {} lost", self.layout.index);

        let actor = self.layout.actor;
        out.push(Command::SetContactTestMask {
            target: actor,
            mask: CategoryMask::NONE,
        });
        out.push(Command::SetTexture {
            target: actor,
            texture: Texture::CatAwake,
        });
        out.push(Command::PauseMusic);
        out.push(Command::PlaySound(Sound::Lose));
        out.push(Command::DisplayMessage(scene::message(
            LOSE_MESSAGE,
            self.layout.scene_center(),
            &self.tuning,
        )));
        self.schedule_reload();
    }

    fn schedule_reload(&mut self) {
        self.timeline.schedule(
            self.tuning.reload_ticks(),
            DeferredAction::ReloadLevel {
                level: self.layout.index,
            },
        );
    }
}

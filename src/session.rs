//! Level session
//!
//! Owns the resolver for the level being played and swaps in a fresh one when
//! the resolver asks for a reload.

use crate::Tuning;
use crate::error::SessionError;
use crate::sim::{Command, ContactResolver, LevelLayout, SceneEvent};

/// Provides layouts by level index (the engine loads the level files)
pub trait LevelSource {
    fn layout(&self, index: u32) -> Option<LevelLayout>;
}

impl LevelSource for Vec<LevelLayout> {
    fn layout(&self, index: u32) -> Option<LevelLayout> {
        self.iter().find(|l| l.index == index).cloned()
    }
}

/// Current level plus the rules engine running it
pub struct LevelSession<S: LevelSource> {
    source: S,
    tuning: Tuning,
    resolver: ContactResolver,
    /// Completed reloads since the session started
    reloads: u32,
}

impl<S: LevelSource> LevelSession<S> {
    /// Load `index` and return the session with its setup commands
    pub fn start(source: S, tuning: Tuning, index: u32) -> Result<(Self, Vec<Command>), SessionError> {
        let layout = source.layout(index).ok_or(SessionError::UnknownLevel(index))?;
        let mut resolver = ContactResolver::new(layout, tuning.clone());
        let mut out = Vec::new();
        resolver.begin(&mut out);

        let session = Self {
            source,
            tuning,
            resolver,
            reloads: 0,
        };
        Ok((session, out))
    }

    pub fn level(&self) -> u32 {
        self.resolver.level()
    }

    pub fn resolver(&self) -> &ContactResolver {
        &self.resolver
    }

    pub fn reloads(&self) -> u32 {
        self.reloads
    }

    /// Feed one event; a reload request is followed by the new level's setup
    pub fn dispatch(&mut self, event: &SceneEvent) -> Result<Vec<Command>, SessionError> {
        let mut out = Vec::new();
        self.resolver.handle(event, &mut out);

        let reload = out.iter().find_map(|c| match c {
            Command::RequestReload { level } => Some(*level),
            _ => None,
        });
        if let Some(level) = reload {
            self.load(level, &mut out)?;
        }
        Ok(out)
    }

    fn load(&mut self, index: u32, out: &mut Vec<Command>) -> Result<(), SessionError> {
        let layout = self
            .source
            .layout(index)
            .ok_or(SessionError::UnknownLevel(index))?;
        self.resolver = ContactResolver::new(layout, self.tuning.clone());
        self.resolver.begin(out);
        self.reloads += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{
        Body, Category, ContactEvent, EntityId, LevelOutcome, PostStepTick, TouchEvent,
    };
    use glam::Vec2;

    fn levels() -> Vec<LevelLayout> {
        (1..=2)
            .map(|index| LevelLayout {
                index,
                scene_size: Vec2::new(1024.0, 768.0),
                boundary: EntityId(0),
                actor: EntityId(1),
                goal: EntityId(2),
                hook: None,
            })
            .collect()
    }

    fn body(id: u32, category: Category) -> Body {
        Body::new(EntityId(id), category, Vec2::new(100.0, 100.0), Vec2::new(50.0, 50.0))
    }

    #[test]
    fn test_unknown_level() {
        let err = LevelSession::start(levels(), Tuning::default(), 9).err();
        assert_eq!(err, Some(SessionError::UnknownLevel(9)));
    }

    #[test]
    fn test_reload_after_lose_resets_outcome() {
        let (mut session, setup) = LevelSession::start(levels(), Tuning::default(), 2).unwrap();
        assert!(!setup.is_empty());

        let lose = SceneEvent::Contact(ContactEvent::new(
            body(1, Category::Actor),
            body(0, Category::Boundary),
        ));
        session.dispatch(&lose).unwrap();
        assert_eq!(session.resolver().outcome(), LevelOutcome::Lost);

        let tick = SceneEvent::PostStep(PostStepTick::default());
        let mut reloaded = None;
        for _ in 0..600 {
            let out = session.dispatch(&tick).unwrap();
            if out.contains(&Command::RequestReload { level: 2 }) {
                reloaded = Some(out);
            }
        }

        let out = reloaded.expect("reload requested");
        assert!(out.iter().any(|c| matches!(c, Command::CreateEdgeLoop { .. })));
        assert_eq!(session.reloads(), 1);
        assert_eq!(session.level(), 2);
        assert_eq!(session.resolver().outcome(), LevelOutcome::InProgress);

        // Fresh level accepts taps again
        let tap = SceneEvent::Touch(TouchEvent::on(body(5, Category::Obstacle)));
        assert!(!session.dispatch(&tap).unwrap().is_empty());
    }
}

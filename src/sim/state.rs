//! Level state owned by the resolver
//!
//! The engine owns bodies and joints. Everything here is bookkeeping about
//! them, keyed by opaque ids.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::command::JointId;
use super::events::EntityId;

/// Outcome of the current level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LevelOutcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl LevelOutcome {
    /// Won or Lost; nothing changes the outcome until the level reloads
    pub fn is_terminal(self) -> bool {
        !matches!(self, LevelOutcome::InProgress)
    }
}

/// Fixed joint pinning the actor to the hook
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HookAttachment {
    pub joint: JointId,
    pub actor: EntityId,
    pub hook: EntityId,
    pub anchor: Vec2,
}

/// Boundary contacts seen by one message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BounceCounter {
    pub count: u32,
}

/// Bounce counters keyed by message id (ordered for deterministic iteration)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BounceCounters {
    counters: BTreeMap<EntityId, BounceCounter>,
}

impl BounceCounters {
    /// Count a bounce for `id`, creating the counter at 1; returns the new count
    pub fn record(&mut self, id: EntityId) -> u32 {
        let counter = self
            .counters
            .entry(id)
            .and_modify(|c| c.count += 1)
            .or_insert(BounceCounter { count: 1 });
        counter.count
    }

    pub fn get(&self, id: EntityId) -> Option<u32> {
        self.counters.get(&id).map(|c| c.count)
    }

    /// Drop the counter along with its message
    pub fn remove(&mut self, id: EntityId) -> Option<BounceCounter> {
        self.counters.remove(&id)
    }
}

/// Allocates joint handles for this level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JointIds {
    next: u32,
}

impl JointIds {
    pub fn next_id(&mut self) -> JointId {
        let id = JointId(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounce_counter_lifecycle() {
        let mut counters = BounceCounters::default();
        let label = EntityId(9);

        assert_eq!(counters.get(label), None);
        assert_eq!(counters.record(label), 1);
        assert_eq!(counters.record(label), 2);
        assert_eq!(counters.record(EntityId(10)), 1);
        assert_eq!(counters.get(label), Some(2));

        assert!(counters.remove(label).is_some());
        assert_eq!(counters.get(label), None);
        assert_eq!(counters.get(EntityId(10)), Some(1));
    }

    #[test]
    fn test_terminal_outcomes() {
        assert!(!LevelOutcome::InProgress.is_terminal());
        assert!(LevelOutcome::Won.is_terminal());
        assert!(LevelOutcome::Lost.is_terminal());
    }

    #[test]
    fn test_joint_ids_are_unique() {
        let mut ids = JointIds::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
    }
}

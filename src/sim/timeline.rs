//! Single-threaded timer queue
//!
//! Delayed effects are plain data, not closures. Each one is checked against
//! the current level state when it fires, because the target may be gone or
//! the level may already be on its way out.

use serde::{Deserialize, Serialize};

use super::events::EntityId;

/// Effect to run once its delay has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Despawn an entity if it is still alive
    RemoveObject(EntityId),
    /// Ask for a reload if the level still has an outcome
    ReloadLevel { level: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub due_tick: u64,
    /// Scheduling order, breaks ties between tasks due on the same tick
    pub seq: u64,
    pub action: DeferredAction,
}

/// Timer queue driven by the fixed simulation step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    /// Simulation tick counter
    now: u64,
    next_seq: u64,
    /// Pending tasks, sorted by `(due_tick, seq)`
    tasks: Vec<ScheduledTask>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of tasks not yet fired
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Queue `action` to fire `delay_ticks` steps from now
    pub fn schedule(&mut self, delay_ticks: u64, action: DeferredAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due_tick = self.now.saturating_add(delay_ticks.max(1));

        // seq only grows, so a new task goes after every task due the same tick
        let at = self.tasks.partition_point(|t| t.due_tick <= due_tick);
        self.tasks.insert(
            at,
            ScheduledTask {
                due_tick,
                seq,
                action,
            },
        );
    }

    /// Advance one step and return the actions now due, in firing order
    pub fn advance(&mut self) -> Vec<DeferredAction> {
        self.now += 1;
        let now = self.now;

        let due = self.tasks.partition_point(|t| t.due_tick <= now);
        if due == 0 {
            return Vec::new();
        }
        self.tasks.drain(..due).map(|t| t.action).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_exact_delay() {
        let mut timeline = Timeline::new();
        timeline.schedule(3, DeferredAction::RemoveObject(EntityId(7)));

        assert!(timeline.advance().is_empty());
        assert!(timeline.advance().is_empty());
        assert_eq!(
            timeline.advance(),
            vec![DeferredAction::RemoveObject(EntityId(7))]
        );
        assert_eq!(timeline.pending(), 0);
        assert_eq!(timeline.now(), 3);
    }

    #[test]
    fn test_same_tick_fires_in_schedule_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(2, DeferredAction::ReloadLevel { level: 1 });
        timeline.schedule(2, DeferredAction::RemoveObject(EntityId(1)));
        timeline.schedule(1, DeferredAction::RemoveObject(EntityId(2)));

        assert_eq!(
            timeline.advance(),
            vec![DeferredAction::RemoveObject(EntityId(2))]
        );
        assert_eq!(
            timeline.advance(),
            vec![
                DeferredAction::ReloadLevel { level: 1 },
                DeferredAction::RemoveObject(EntityId(1)),
            ]
        );
    }

    #[test]
    fn test_huge_delay_saturates() {
        let mut timeline = Timeline::new();
        timeline.advance();
        timeline.schedule(u64::MAX, DeferredAction::RemoveObject(EntityId(4)));
        timeline.schedule(2, DeferredAction::RemoveObject(EntityId(5)));

        assert!(timeline.advance().is_empty());
        assert_eq!(
            timeline.advance(),
            vec![DeferredAction::RemoveObject(EntityId(5))]
        );
        assert_eq!(timeline.pending(), 1);
    }

    #[test]
    fn test_zero_delay_waits_one_step() {
        let mut timeline = Timeline::new();
        timeline.schedule(0, DeferredAction::RemoveObject(EntityId(3)));
        assert_eq!(timeline.pending(), 1);
        assert_eq!(timeline.advance().len(), 1);
    }
}

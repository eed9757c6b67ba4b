//! Animation scheduler
//!
//! Owns a set of springs and advances them once per frame.

use crate::spring::Spring;
use slotmap::{new_key_type, SlotMap};
use std::time::Instant;

new_key_type! {
    pub struct SpringId;
}

/// The animation scheduler that ticks all active springs
pub struct AnimationScheduler {
    springs: SlotMap<SpringId, Spring>,
    last_frame: Instant,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            springs: SlotMap::with_key(),
            last_frame: Instant::now(),
        }
    }

    pub fn add_spring(&mut self, spring: Spring) -> SpringId {
        self.springs.insert(spring)
    }

    pub fn get_spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    pub fn get_spring_mut(&mut self, id: SpringId) -> Option<&mut Spring> {
        self.springs.get_mut(id)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> Option<Spring> {
        self.springs.remove(id)
    }

    /// Current value of a spring
    pub fn value(&self, id: SpringId) -> Option<f32> {
        self.springs.get(id).map(Spring::value)
    }

    /// Tick all animations using wall-clock time since the previous tick
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.tick_by(dt);
    }

    /// Tick all animations by a fixed step
    pub fn tick_by(&mut self, dt: f32) {
        for (_, spring) in self.springs.iter_mut() {
            spring.step(dt);
        }
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.springs.iter().any(|(_, s)| !s.is_settled())
    }

    /// Remove and return every spring that has come to rest
    pub fn drain_settled(&mut self) -> Vec<(SpringId, Spring)> {
        let settled: Vec<SpringId> = self
            .springs
            .iter()
            .filter(|(_, s)| s.is_settled())
            .map(|(id, _)| id)
            .collect();

        if !settled.is_empty() {
            tracing::trace!(count = settled.len(), "draining settled springs");
        }

        settled
            .into_iter()
            .filter_map(|id| self.springs.remove(id).map(|s| (id, s)))
            .collect()
    }

    /// Get the number of springs in the scheduler
    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

//! Hook-driven orchestration with per-second throttling
//!
//! The host calls [`TickScheduler::on_tick`] for every entity every
//! tick; expensive evaluation only runs once per simulated second and
//! skips entities with nothing left to buy. Correctness never depends
//! on tick delivery: evaluation works from cumulative state, so a
//! missed tick delays a purchase, it cannot lose one.

use crate::config::registry::SpeciesProfile;
use crate::core::types::{EntityId, Tick, WorldClock, TICKS_PER_SECOND};
use crate::progression::profile::PowerProfile;
use crate::progression::selector::{self, EvaluationOutcome};

/// Default evaluation cadence: once per simulated second
pub const EVAL_INTERVAL_TICKS: Tick = TICKS_PER_SECOND;

#[derive(Debug, Clone, Copy)]
pub struct TickScheduler {
    interval: Tick,
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self {
            interval: EVAL_INTERVAL_TICKS,
        }
    }
}

impl TickScheduler {
    /// Scheduler with a custom throttle interval (minimum one tick)
    pub fn with_interval(interval: Tick) -> Self {
        Self {
            interval: interval.max(1),
        }
    }

    /// Per-entity per-tick hook
    ///
    /// Returns `None` on throttled ticks and for maxed entities,
    /// otherwise the selector's outcome.
    pub fn on_tick(
        &self,
        entity: EntityId,
        profile: &mut PowerProfile,
        species: &SpeciesProfile,
        clock: &WorldClock,
    ) -> Option<EvaluationOutcome> {
        if clock.tick % self.interval != 0 {
            return None;
        }
        if selector::is_maxed(entity, profile, species) {
            return None;
        }
        Some(selector::evaluate(entity, profile, species, clock))
    }
}

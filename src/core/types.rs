//! Core type definitions used throughout the engine

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Simulation ticks per second of simulated time
pub const TICKS_PER_SECOND: Tick = 20;

/// Simulation ticks per simulated day
pub const TICKS_PER_DAY: Tick = 24_000;

/// Unique identifier for entities
///
/// The uuid doubles as the stable seed source for all per-entity
/// randomness, so an entity's rolls are reproducible across restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Species identifier, matching the `species` field of a config document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesId(pub String);

impl SpeciesId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Skill node identifier, unique within one species document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(pub String);

impl SkillId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Equipment slots an entity can hold upgradeable gear in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    Mainhand,
    Offhand,
    Head,
    Chest,
    Legs,
    Feet,
}

impl fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EquipSlot::Mainhand => "mainhand",
            EquipSlot::Offhand => "offhand",
            EquipSlot::Head => "head",
            EquipSlot::Chest => "chest",
            EquipSlot::Legs => "legs",
            EquipSlot::Feet => "feet",
        };
        f.write_str(name)
    }
}

/// Global elapsed-time counter, read-only to this engine
///
/// The host simulation owns the tick; everything here derives from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldClock {
    pub tick: Tick,
}

impl WorldClock {
    pub fn at_tick(tick: Tick) -> Self {
        Self { tick }
    }

    /// Clock positioned at the first tick of the given day
    pub fn at_day(day: u32) -> Self {
        Self {
            tick: Tick::from(day) * TICKS_PER_DAY,
        }
    }

    /// Whole elapsed days since world creation
    pub fn day(&self) -> u32 {
        (self.tick / TICKS_PER_DAY) as u32
    }
}

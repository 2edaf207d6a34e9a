//! Per-entity mutable progression state

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::config::registry::{SkillEffect, SkillNode, SpeciesProfile};
use crate::core::types::{EntityId, EquipSlot, SkillId, SpeciesId};

/// Everything an entity has earned, spent, and become
///
/// Exclusively owned by the evaluation for its entity; the engine never
/// shares one profile across entities. Serialized verbatim at save
/// boundaries, see [`crate::progression::persist`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerProfile {
    pub total_points_earned: i64,
    pub total_points_spent: i64,
    pub skill_levels: AHashMap<SkillId, u32>,
    pub equipment_tier: AHashMap<EquipSlot, u32>,
    pub kills_by_species: AHashMap<SpeciesId, u32>,
    pub last_attempt_day: Option<u32>,
}

impl PowerProfile {
    /// Fresh zero state
    pub fn new() -> Self {
        Self::default()
    }

    /// Profile for a newly spawned entity of the given species
    ///
    /// Species that start armed get the bottom weapon tier seeded for
    /// free; everything else begins at zero.
    pub fn on_spawn(species: &SpeciesProfile) -> Self {
        let mut profile = Self::new();
        if species.starts_with_weapon && species.ladder_for(EquipSlot::Mainhand).is_some() {
            profile.equipment_tier.insert(EquipSlot::Mainhand, 0);
        }
        profile
    }

    /// Current level of a node: for equipment nodes this is the number
    /// of ladder steps owned (tier + 1, empty slot = 0), for everything
    /// else the stored skill level.
    pub fn node_level(&self, node: &SkillNode) -> u32 {
        match &node.effect {
            SkillEffect::EquipmentTier { slot, .. } => {
                self.equipment_tier.get(slot).map_or(0, |tier| tier + 1)
            }
            _ => self.skill_levels.get(&node.id).copied().unwrap_or(0),
        }
    }

    /// Points not yet spent, against the last refreshed earned total
    pub fn unspent(&self) -> i64 {
        self.total_points_earned - self.total_points_spent
    }

    /// Record that this entity killed a member of `victim`
    pub fn record_kill(&mut self, victim: &SpeciesId) {
        *self.kills_by_species.entry(victim.clone()).or_insert(0) += 1;
    }
}

/// A kill observed by the host simulation, fed into the killer's ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillEvent {
    pub killer: EntityId,
    pub victim_species: SpeciesId,
}

/// Host-implemented eligibility filter, consulted before any profile
/// is created. The engine never decides spawning itself.
pub trait SpawnGate {
    fn allow_spawn(&self, species: &SpeciesId) -> bool;
}

/// Gate that admits everything (demos, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGate;

impl SpawnGate for OpenGate {
    fn allow_spawn(&self, _species: &SpeciesId) -> bool {
        true
    }
}

/// Create a spawn profile if the host's gate admits the species
pub fn spawn_profile(gate: &dyn SpawnGate, species: &SpeciesProfile) -> Option<PowerProfile> {
    if gate.allow_spawn(&species.id) {
        Some(PowerProfile::on_spawn(species))
    } else {
        None
    }
}

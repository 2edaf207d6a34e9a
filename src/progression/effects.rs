//! Materializes purchases as concrete entity state changes
//!
//! Purchases advance the equipment ladder, raise an enchant, or bump an
//! ability's potency row. Durability exhaustion runs the ladder the
//! other way and is not gated by points.

use serde::Serialize;

use crate::config::registry::{SkillEffect, SkillNode, SpeciesProfile};
use crate::config::schema::PotencyRow;
use crate::core::types::{EquipSlot, SkillId};
use crate::progression::profile::PowerProfile;

/// Concrete result of one purchase, for the host to mirror onto the
/// live entity (equip the item, refresh the attribute, ...)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AppliedEffect {
    EquipmentAdvanced {
        slot: EquipSlot,
        tier: u32,
        item: String,
    },
    EnchantRaised {
        slot: EquipSlot,
        enchant: String,
        level: u32,
    },
    AbilityAdjusted {
        skill: SkillId,
        level: u32,
        potency: PotencyRow,
    },
}

/// Result of a durability-exhaustion transition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DurabilityOutcome {
    /// Dropped one tier; the named item replaces the broken one
    Downgraded {
        slot: EquipSlot,
        tier: u32,
        item: String,
    },
    /// Broke at the bottom tier: the slot is now empty
    Removed { slot: EquipSlot },
    /// Nothing was equipped in the slot
    Empty,
}

/// Mutate the profile for a node freshly purchased to `new_level`
///
/// The selector has already validated affordability; this only
/// materializes the step. Levels clamp at the node max in release
/// builds (reaching the clamp is a defect, asserted in debug).
pub fn apply(profile: &mut PowerProfile, node: &SkillNode, new_level: u32) -> AppliedEffect {
    debug_assert!(
        new_level >= 1 && new_level <= node.max_level(),
        "purchase outside node level range: {} of {}",
        new_level,
        node.max_level()
    );
    let level = new_level.clamp(1, node.max_level());

    match &node.effect {
        SkillEffect::EquipmentTier { slot, ladder } => {
            let tier = level - 1;
            profile.equipment_tier.insert(*slot, tier);
            AppliedEffect::EquipmentAdvanced {
                slot: *slot,
                tier,
                item: ladder[tier as usize].clone(),
            }
        }
        SkillEffect::Enchant { slot, enchant } => {
            profile.skill_levels.insert(node.id.clone(), level);
            AppliedEffect::EnchantRaised {
                slot: *slot,
                enchant: enchant.clone(),
                level,
            }
        }
        SkillEffect::Ability => {
            profile.skill_levels.insert(node.id.clone(), level);
            let potency = node
                .potency
                .get((level - 1) as usize)
                .cloned()
                .unwrap_or_default();
            AppliedEffect::AbilityAdjusted {
                skill: node.id.clone(),
                level,
                potency,
            }
        }
    }
}

/// One-way downgrade when an equipped item's durability runs out
///
/// Tier 0 items are removed outright, never downgraded below the
/// ladder. May fire at any time between purchases.
pub fn on_durability_exhausted(
    profile: &mut PowerProfile,
    species: &SpeciesProfile,
    slot: EquipSlot,
) -> DurabilityOutcome {
    match profile.equipment_tier.get(&slot).copied() {
        None => DurabilityOutcome::Empty,
        Some(0) => {
            profile.equipment_tier.remove(&slot);
            tracing::debug!(slot = %slot, "equipment broke at bottom tier, removed");
            DurabilityOutcome::Removed { slot }
        }
        Some(tier) => {
            let tier = tier - 1;
            profile.equipment_tier.insert(slot, tier);
            let item = species
                .ladder_for(slot)
                .and_then(|ladder| ladder.get(tier as usize))
                .cloned()
                .unwrap_or_else(|| format!("tier_{}", tier));
            DurabilityOutcome::Downgraded { slot, tier, item }
        }
    }
}

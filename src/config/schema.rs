//! Serde document model for per-species configuration files
//!
//! One JSON document per species describes its base equipment, point
//! earning rates, and every purchasable skill node. Documents are parsed
//! here and validated/frozen in [`crate::config::registry`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::EquipSlot;

/// Top-level per-species document
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesDoc {
    pub species: String,
    #[serde(default)]
    pub category: MobCategory,
    #[serde(default)]
    pub equipment: BaseEquipment,
    #[serde(default)]
    pub starts_with_weapon: bool,
    pub point_system: PointSystemDoc,
    pub skills: Vec<SkillDoc>,
    #[serde(default)]
    pub special_weapon: Option<SpecialWeaponDoc>,
}

/// Broad behavioral category, carried through for host-side filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MobCategory {
    #[default]
    Hostile,
    Neutral,
    Passive,
}

/// Base slot assignment before any purchases
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BaseEquipment {
    #[serde(default)]
    pub weapon: Option<String>,
    #[serde(default)]
    pub armor: Option<String>,
    #[serde(default)]
    pub offhand: Option<String>,
}

/// Point earning and spending knobs
///
/// `daily_scaling_map` keys are day-bucket specs: `"0-10"` (inclusive
/// range) or `"31+"` (open-ended tail). Every day must fall in exactly
/// one bucket.
#[derive(Debug, Clone, Deserialize)]
pub struct PointSystemDoc {
    pub daily_scaling_map: BTreeMap<String, f64>,
    #[serde(default = "default_points_per_kill")]
    pub points_per_kill: i64,
    #[serde(default = "default_buy_chance")]
    pub buy_chance: f64,
    #[serde(default = "default_save_chance")]
    pub save_chance: f64,
}

fn default_points_per_kill() -> i64 {
    1
}

fn default_buy_chance() -> f64 {
    0.8
}

fn default_save_chance() -> f64 {
    0.2
}

/// One purchasable skill node
///
/// `costs[k]` is the price of advancing from level `k` to `k + 1`;
/// the table length is the node's max level.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillDoc {
    pub id: String,
    pub effect: EffectDoc,
    pub costs: Vec<i64>,
    #[serde(default)]
    pub potency: Vec<PotencyRow>,
}

/// What a purchase of this node materializes as
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectDoc {
    /// Advance one step on an ordered item ladder for a slot.
    /// `ladder.len()` must equal `costs.len()`; the first purchase
    /// equips the bottom tier.
    EquipmentTier {
        slot: EquipSlot,
        ladder: Vec<String>,
    },
    /// Raise an enchantment one level on the given slot
    Enchant { slot: EquipSlot, enchant: String },
    /// Adjust an ability; per-level knobs come from the `potency` table
    Ability,
}

/// Free-form per-level ability knobs (chance, duration, radius, ...)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PotencyRow(pub BTreeMap<String, f64>);

impl PotencyRow {
    pub fn get(&self, knob: &str) -> Option<f64> {
        self.0.get(knob).copied()
    }
}

/// Two-option deterministic weapon path split (e.g. sword line vs
/// crossbow line); which option an entity follows is a pure function
/// of its uuid.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecialWeaponDoc {
    pub option_a: WeaponPathDoc,
    pub option_b: WeaponPathDoc,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeaponPathDoc {
    pub skills: Vec<String>,
}

/// Parse a bucket spec into `(start, inclusive_end)`; `None` end means
/// open-ended. Returns `None` for anything malformed.
pub fn parse_bucket_spec(spec: &str) -> Option<(u32, Option<u32>)> {
    if let Some(start) = spec.strip_suffix('+') {
        return start.trim().parse().ok().map(|s| (s, None));
    }
    let (a, b) = spec.split_once('-')?;
    let start: u32 = a.trim().parse().ok()?;
    let end: u32 = b.trim().parse().ok()?;
    (start <= end).then_some((start, Some(end)))
}

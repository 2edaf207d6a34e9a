//! Load and validate species documents into an immutable registry
//!
//! `ConfigRegistry` is built once at startup and then shared by
//! reference with every consumer. Any malformed document aborts the
//! load with a [`ConfigError`] naming the species and field; nothing is
//! defaulted silently.

use ahash::AHashMap;
use std::path::Path;

use crate::config::schema::{
    parse_bucket_spec, BaseEquipment, EffectDoc, MobCategory, PotencyRow, SkillDoc, SpeciesDoc,
};
use crate::core::error::{ConfigError, EngineError};
use crate::core::types::{EquipSlot, SkillId, SpeciesId};

/// One day-bucket of the daily scaling table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayBucket {
    pub start: u32,
    /// Inclusive end; `None` for the open-ended tail bucket
    pub end: Option<u32>,
    pub rate: f64,
}

/// Validated point earning/spending rules for one species
#[derive(Debug, Clone)]
pub struct PointSystem {
    /// Sorted by `start`; contiguous from day 0 with one open tail
    pub buckets: Vec<DayBucket>,
    pub points_per_kill: i64,
    pub buy_chance: f64,
    pub save_chance: f64,
}

impl PointSystem {
    /// Per-day point rate for the bucket containing `day`
    pub fn rate_for_day(&self, day: u32) -> f64 {
        self.buckets
            .iter()
            .find(|b| day >= b.start && b.end.map_or(true, |e| day <= e))
            .map_or(0.0, |b| b.rate)
    }
}

/// Validated skill node
#[derive(Debug, Clone)]
pub struct SkillNode {
    pub id: SkillId,
    pub effect: SkillEffect,
    /// `costs[k]` = price of the purchase taking the node to level `k + 1`;
    /// strictly increasing, length = max level
    pub costs: Vec<i64>,
    /// Ability nodes only: one row per level
    pub potency: Vec<PotencyRow>,
}

impl SkillNode {
    pub fn max_level(&self) -> u32 {
        self.costs.len() as u32
    }

    /// Cost of the next purchase from `current_level`, or `None` at max
    pub fn next_cost(&self, current_level: u32) -> Option<i64> {
        self.costs.get(current_level as usize).copied()
    }
}

/// Effect descriptor, mirrors [`EffectDoc`] with owned validated data
#[derive(Debug, Clone, PartialEq)]
pub enum SkillEffect {
    EquipmentTier { slot: EquipSlot, ladder: Vec<String> },
    Enchant { slot: EquipSlot, enchant: String },
    Ability,
}

/// Resolved dual-path rule: two disjoint sets of node ids
#[derive(Debug, Clone)]
pub struct SpecialWeapon {
    pub path_a: Vec<SkillId>,
    pub path_b: Vec<SkillId>,
}

impl SpecialWeapon {
    /// True when the node belongs to one of the two option sets
    pub fn is_path_node(&self, id: &SkillId) -> bool {
        self.path_a.contains(id) || self.path_b.contains(id)
    }
}

/// Immutable per-species configuration
#[derive(Debug, Clone)]
pub struct SpeciesProfile {
    pub id: SpeciesId,
    pub category: MobCategory,
    pub base_equipment: BaseEquipment,
    pub starts_with_weapon: bool,
    pub point_system: PointSystem,
    pub skills: Vec<SkillNode>,
    pub special_weapon: Option<SpecialWeapon>,
    skill_index: AHashMap<SkillId, usize>,
}

impl SpeciesProfile {
    pub fn skill(&self, id: &SkillId) -> Option<&SkillNode> {
        self.skill_index.get(id).map(|&i| &self.skills[i])
    }

    /// Item ladder configured for a slot, if any equipment node covers it
    pub fn ladder_for(&self, slot: EquipSlot) -> Option<&[String]> {
        self.skills.iter().find_map(|node| match &node.effect {
            SkillEffect::EquipmentTier { slot: s, ladder } if *s == slot => {
                Some(ladder.as_slice())
            }
            _ => None,
        })
    }
}

/// All loaded species, immutable after construction
#[derive(Debug, Clone, Default)]
pub struct ConfigRegistry {
    species: AHashMap<SpeciesId, SpeciesProfile>,
}

impl ConfigRegistry {
    /// Load every `*.json` document in a directory
    pub fn load_dir(path: &Path) -> Result<Self, EngineError> {
        let mut entries: Vec<_> = std::fs::read_dir(path)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|e| e.path())
            .filter(|p| p.extension().map_or(false, |ext| ext == "json"))
            .collect();
        entries.sort();

        let mut docs = Vec::new();
        for file in entries {
            let content = std::fs::read_to_string(&file)?;
            let doc: SpeciesDoc = serde_json::from_str(&content).map_err(|e| {
                ConfigError::new(
                    file.file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    "document",
                    e.to_string(),
                )
            })?;
            docs.push(doc);
        }
        Ok(Self::from_docs(docs)?)
    }

    /// Load a single species from a JSON string (tests, embedded data)
    pub fn load_str(json: &str) -> Result<Self, EngineError> {
        let doc: SpeciesDoc = serde_json::from_str(json)
            .map_err(|e| ConfigError::new("<inline>", "document", e.to_string()))?;
        Ok(Self::from_docs(vec![doc])?)
    }

    /// Validate and freeze a set of parsed documents
    pub fn from_docs(docs: Vec<SpeciesDoc>) -> Result<Self, ConfigError> {
        let mut species = AHashMap::new();
        for doc in docs {
            let profile = validate_species(doc)?;
            if species.contains_key(&profile.id) {
                return Err(ConfigError::new(
                    profile.id.0.clone(),
                    "species",
                    "duplicate species id",
                ));
            }
            species.insert(profile.id.clone(), profile);
        }
        tracing::info!("Loaded {} species definitions", species.len());
        Ok(Self { species })
    }

    pub fn get(&self, id: &SpeciesId) -> Option<&SpeciesProfile> {
        self.species.get(id)
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeciesProfile> {
        self.species.values()
    }
}

fn validate_species(doc: SpeciesDoc) -> Result<SpeciesProfile, ConfigError> {
    let name = doc.species.trim().to_string();
    if name.is_empty() {
        return Err(ConfigError::new("<unnamed>", "species", "must be non-empty"));
    }

    let point_system = validate_point_system(&name, &doc.point_system)?;

    let mut skills = Vec::with_capacity(doc.skills.len());
    let mut skill_index = AHashMap::new();
    for skill in &doc.skills {
        let node = validate_skill(&name, skill)?;
        if skill_index.contains_key(&node.id) {
            return Err(ConfigError::new(
                &name,
                format!("skills.{}", node.id),
                "duplicate skill id",
            ));
        }
        skill_index.insert(node.id.clone(), skills.len());
        skills.push(node);
    }

    let special_weapon = match &doc.special_weapon {
        None => None,
        Some(sw) => {
            let path_a = resolve_path(&name, "special_weapon.option_a", &sw.option_a.skills, &skill_index)?;
            let path_b = resolve_path(&name, "special_weapon.option_b", &sw.option_b.skills, &skill_index)?;
            if path_a.iter().any(|id| path_b.contains(id)) {
                return Err(ConfigError::new(
                    &name,
                    "special_weapon",
                    "option_a and option_b must not share skills",
                ));
            }
            Some(SpecialWeapon { path_a, path_b })
        }
    };

    Ok(SpeciesProfile {
        id: SpeciesId::new(name),
        category: doc.category,
        base_equipment: doc.equipment,
        starts_with_weapon: doc.starts_with_weapon,
        point_system,
        skills,
        special_weapon,
        skill_index,
    })
}

fn validate_point_system(
    species: &str,
    doc: &crate::config::schema::PointSystemDoc,
) -> Result<PointSystem, ConfigError> {
    let field = "point_system.daily_scaling_map";
    if doc.daily_scaling_map.is_empty() {
        return Err(ConfigError::new(species, field, "must not be empty"));
    }

    let mut buckets = Vec::with_capacity(doc.daily_scaling_map.len());
    for (spec, &rate) in &doc.daily_scaling_map {
        let (start, end) = parse_bucket_spec(spec).ok_or_else(|| {
            ConfigError::new(species, field, format!("bad bucket spec '{}'", spec))
        })?;
        if rate < 0.0 || !rate.is_finite() {
            return Err(ConfigError::new(
                species,
                field,
                format!("bucket '{}' has invalid rate {}", spec, rate),
            ));
        }
        buckets.push(DayBucket { start, end, rate });
    }
    buckets.sort_by_key(|b| b.start);

    // Buckets must tile the day line: start at 0, touch end-to-end, and
    // finish with exactly one open-ended tail.
    let mut expected_start = 0u32;
    for (i, bucket) in buckets.iter().enumerate() {
        if bucket.start != expected_start {
            return Err(ConfigError::new(
                species,
                field,
                format!("gap or overlap at day {}", expected_start.min(bucket.start)),
            ));
        }
        match bucket.end {
            Some(end) => {
                if i == buckets.len() - 1 {
                    return Err(ConfigError::new(species, field, "last bucket must be open-ended"));
                }
                expected_start = end + 1;
            }
            None => {
                if i != buckets.len() - 1 {
                    return Err(ConfigError::new(
                        species,
                        field,
                        "open-ended bucket must come last",
                    ));
                }
            }
        }
    }

    if doc.points_per_kill < 0 {
        return Err(ConfigError::new(
            species,
            "point_system.points_per_kill",
            "must be >= 0",
        ));
    }
    for (name, value) in [
        ("point_system.buy_chance", doc.buy_chance),
        ("point_system.save_chance", doc.save_chance),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::new(species, name, "must be within [0, 1]"));
        }
    }
    if (doc.buy_chance + doc.save_chance - 1.0).abs() > 1e-9 {
        return Err(ConfigError::new(
            species,
            "point_system.buy_chance",
            "buy_chance + save_chance must equal 1.0",
        ));
    }

    Ok(PointSystem {
        buckets,
        points_per_kill: doc.points_per_kill,
        buy_chance: doc.buy_chance,
        save_chance: doc.save_chance,
    })
}

fn validate_skill(species: &str, doc: &SkillDoc) -> Result<SkillNode, ConfigError> {
    let id = doc.id.trim();
    if id.is_empty() {
        return Err(ConfigError::new(species, "skills.id", "must be non-empty"));
    }
    let field = format!("skills.{}.costs", id);

    if doc.costs.is_empty() {
        return Err(ConfigError::new(species, field, "cost table must not be empty"));
    }
    for window in doc.costs.windows(2) {
        if window[1] <= window[0] {
            return Err(ConfigError::new(
                species,
                field,
                format!("costs must be strictly increasing ({} then {})", window[0], window[1]),
            ));
        }
    }
    if doc.costs[0] <= 0 {
        return Err(ConfigError::new(species, field, "costs must be positive"));
    }

    let effect = match &doc.effect {
        EffectDoc::EquipmentTier { slot, ladder } => {
            if ladder.is_empty() {
                return Err(ConfigError::new(
                    species,
                    format!("skills.{}.effect.ladder", id),
                    "ladder must not be empty",
                ));
            }
            if ladder.len() != doc.costs.len() {
                return Err(ConfigError::new(
                    species,
                    format!("skills.{}.effect.ladder", id),
                    "ladder and cost table must be the same length",
                ));
            }
            SkillEffect::EquipmentTier {
                slot: *slot,
                ladder: ladder.clone(),
            }
        }
        EffectDoc::Enchant { slot, enchant } => SkillEffect::Enchant {
            slot: *slot,
            enchant: enchant.clone(),
        },
        EffectDoc::Ability => {
            if doc.potency.len() != doc.costs.len() {
                return Err(ConfigError::new(
                    species,
                    format!("skills.{}.potency", id),
                    "ability nodes need one potency row per level",
                ));
            }
            SkillEffect::Ability
        }
    };

    if !matches!(effect, SkillEffect::Ability) && !doc.potency.is_empty() {
        return Err(ConfigError::new(
            species,
            format!("skills.{}.potency", id),
            "potency table is only valid on ability nodes",
        ));
    }

    Ok(SkillNode {
        id: SkillId::new(id),
        effect,
        costs: doc.costs.clone(),
        potency: doc.potency.clone(),
    })
}

fn resolve_path(
    species: &str,
    field: &str,
    ids: &[String],
    skill_index: &AHashMap<SkillId, usize>,
) -> Result<Vec<SkillId>, ConfigError> {
    ids.iter()
        .map(|raw| {
            let id = SkillId::new(raw.clone());
            if skill_index.contains_key(&id) {
                Ok(id)
            } else {
                Err(ConfigError::new(
                    species,
                    field,
                    format!("references unknown skill '{}'", raw),
                ))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZOMBIE: &str = r#"{
        "species": "zombie",
        "category": "hostile",
        "equipment": { "weapon": "sword", "armor": "standard" },
        "point_system": {
            "daily_scaling_map": { "0-10": 0.1, "11-15": 0.5, "16+": 1.0 },
            "points_per_kill": 1,
            "buy_chance": 0.8,
            "save_chance": 0.2
        },
        "skills": [
            { "id": "weapon_tier",
              "effect": { "kind": "equipment_tier", "slot": "mainhand",
                          "ladder": ["wooden_sword", "stone_sword", "iron_sword"] },
              "costs": [2, 4, 8] },
            { "id": "sharpness",
              "effect": { "kind": "enchant", "slot": "mainhand", "enchant": "sharpness" },
              "costs": [3, 5, 8] },
            { "id": "health_boost",
              "effect": { "kind": "ability" },
              "costs": [3, 5, 8],
              "potency": [ { "amount": 4.0 }, { "amount": 8.0 }, { "amount": 12.0 } ] }
        ]
    }"#;

    #[test]
    fn test_load_valid_species() {
        let registry = ConfigRegistry::load_str(ZOMBIE).unwrap();
        let zombie = registry.get(&SpeciesId::new("zombie")).unwrap();
        assert_eq!(zombie.skills.len(), 3);
        assert_eq!(zombie.skill(&SkillId::new("sharpness")).unwrap().max_level(), 3);
        assert_eq!(zombie.ladder_for(EquipSlot::Mainhand).unwrap().len(), 3);
    }

    #[test]
    fn test_rate_for_day() {
        let registry = ConfigRegistry::load_str(ZOMBIE).unwrap();
        let ps = &registry.get(&SpeciesId::new("zombie")).unwrap().point_system;
        assert!((ps.rate_for_day(0) - 0.1).abs() < 1e-9);
        assert!((ps.rate_for_day(10) - 0.1).abs() < 1e-9);
        assert!((ps.rate_for_day(11) - 0.5).abs() < 1e-9);
        assert!((ps.rate_for_day(400) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_monotonic_costs_rejected() {
        let json = ZOMBIE.replace("[2, 4, 8]", "[2, 4, 4]");
        let err = ConfigRegistry::load_str(&json).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("zombie"), "error should name the species: {}", msg);
        assert!(msg.contains("weapon_tier"), "error should name the field: {}", msg);
    }

    #[test]
    fn test_scaling_gap_rejected() {
        let json = ZOMBIE.replace("\"11-15\": 0.5", "\"12-15\": 0.5");
        assert!(ConfigRegistry::load_str(&json).is_err());
    }

    #[test]
    fn test_missing_open_tail_rejected() {
        let json = ZOMBIE.replace("\"16+\": 1.0", "\"16-20\": 1.0");
        assert!(ConfigRegistry::load_str(&json).is_err());
    }

    #[test]
    fn test_ladder_cost_mismatch_rejected() {
        let json = ZOMBIE.replace("\"stone_sword\", ", "");
        assert!(ConfigRegistry::load_str(&json).is_err());
    }

    #[test]
    fn test_unknown_path_skill_rejected() {
        let json = ZOMBIE.replace(
            "\"skills\": [",
            r#""special_weapon": {
                "option_a": { "skills": ["weapon_tier"] },
                "option_b": { "skills": ["no_such_skill"] }
            },
            "skills": ["#,
        );
        let err = ConfigRegistry::load_str(&json).unwrap_err();
        assert!(err.to_string().contains("no_such_skill"));
    }
}

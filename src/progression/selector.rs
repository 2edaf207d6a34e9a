//! Rate-limited, probabilistic upgrade purchasing
//!
//! One generic evaluator runs for every species: the candidate set is
//! built from the species' skill table, an 80/20 buy/save roll decides
//! whether to spend, and at most one level is purchased per evaluation.
//! "Nothing affordable" is an ordinary quiet outcome, never an error.

use rand::Rng;

use crate::config::registry::{SkillNode, SpeciesProfile};
use crate::core::types::{EntityId, SkillId, WorldClock};
use crate::progression::effects::{self, AppliedEffect};
use crate::progression::ledger;
use crate::progression::profile::PowerProfile;
use crate::progression::rng::{evaluation_rng, weapon_path, WeaponPathChoice};

/// One completed purchase
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub skill: SkillId,
    pub new_level: u32,
    pub cost: i64,
    pub effect: AppliedEffect,
}

/// What an evaluation did
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationOutcome {
    /// Less than one full day since the previous attempt
    NotDue,
    /// Evaluated, but saved the roll or had nothing affordable
    Held { available: i64 },
    /// Bought exactly one upgrade level
    Purchased(Purchase),
}

/// Read-only progression snapshot for the host's stats surface
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStats {
    pub day: u32,
    pub earned: i64,
    pub spent: i64,
    pub available: i64,
    /// (skill, current level), sorted by skill id
    pub levels: Vec<(SkillId, u32)>,
    pub maxed: bool,
}

/// Evaluate one entity: maybe spend, always stamp the attempt day
///
/// Triggered on first spawn (no prior attempt day) and thereafter at
/// most once per world day. The attempt day updates whether or not a
/// purchase happened.
pub fn evaluate(
    entity: EntityId,
    profile: &mut PowerProfile,
    species: &SpeciesProfile,
    clock: &WorldClock,
) -> EvaluationOutcome {
    let day = clock.day();
    if let Some(last) = profile.last_attempt_day {
        if day <= last {
            return EvaluationOutcome::NotDue;
        }
    }

    let earned = ledger::earned_total(profile, species, clock);
    // earned only grows; a stored higher value would mean clock rollback
    profile.total_points_earned = profile.total_points_earned.max(earned);
    let available = earned - profile.total_points_spent;

    let candidates = candidate_set(entity, profile, species, available);

    let mut rng = evaluation_rng(entity, day);
    let buy_roll = rng.gen::<f64>() < species.point_system.buy_chance;

    let outcome = if buy_roll && !candidates.is_empty() {
        let node = candidates[rng.gen_range(0..candidates.len())];
        match purchase(profile, node, available) {
            Some(purchase) => EvaluationOutcome::Purchased(purchase),
            None => EvaluationOutcome::Held { available },
        }
    } else {
        EvaluationOutcome::Held { available }
    };

    profile.last_attempt_day = Some(day);
    outcome
}

/// Admin/boss entry point: one purchase, no day gate, no save roll
///
/// Still restricted to affordable, not-yet-maxed candidates, and does
/// not consume the entity's regular daily attempt.
pub fn force_upgrade(
    entity: EntityId,
    profile: &mut PowerProfile,
    species: &SpeciesProfile,
    clock: &WorldClock,
) -> Option<Purchase> {
    let earned = ledger::earned_total(profile, species, clock);
    profile.total_points_earned = profile.total_points_earned.max(earned);
    let available = earned - profile.total_points_spent;

    let candidates = candidate_set(entity, profile, species, available);
    if candidates.is_empty() {
        return None;
    }
    let mut rng = evaluation_rng(entity, clock.day());
    let node = candidates[rng.gen_range(0..candidates.len())];
    purchase(profile, node, available)
}

/// True when no reachable node has a next level to buy
///
/// Off-path nodes of a dual-path species are unreachable and do not
/// count against being maxed.
pub fn is_maxed(entity: EntityId, profile: &PowerProfile, species: &SpeciesProfile) -> bool {
    reachable_nodes(entity, species).all(|node| {
        node.next_cost(profile.node_level(node)).is_none()
    })
}

/// Snapshot for the read-only query surface
pub fn collect_stats(
    entity: EntityId,
    profile: &PowerProfile,
    species: &SpeciesProfile,
    clock: &WorldClock,
) -> ProfileStats {
    let earned = ledger::earned_total(profile, species, clock);
    let mut levels: Vec<(SkillId, u32)> = species
        .skills
        .iter()
        .map(|node| (node.id.clone(), profile.node_level(node)))
        .collect();
    levels.sort_by(|a, b| a.0 .0.cmp(&b.0 .0));

    ProfileStats {
        day: clock.day(),
        earned,
        spent: profile.total_points_spent,
        available: earned - profile.total_points_spent,
        levels,
        maxed: is_maxed(entity, profile, species),
    }
}

/// Nodes this entity can ever buy: all common nodes, plus the nodes of
/// its deterministically chosen weapon path.
fn reachable_nodes<'a>(
    entity: EntityId,
    species: &'a SpeciesProfile,
) -> impl Iterator<Item = &'a SkillNode> {
    let chosen: Option<&[SkillId]> = species.special_weapon.as_ref().map(|sw| {
        match weapon_path(entity) {
            WeaponPathChoice::OptionA => sw.path_a.as_slice(),
            WeaponPathChoice::OptionB => sw.path_b.as_slice(),
        }
    });
    species.skills.iter().filter(move |node| {
        match (&species.special_weapon, chosen) {
            (Some(sw), Some(path)) if sw.is_path_node(&node.id) => path.contains(&node.id),
            _ => true,
        }
    })
}

fn candidate_set<'a>(
    entity: EntityId,
    profile: &PowerProfile,
    species: &'a SpeciesProfile,
    available: i64,
) -> Vec<&'a SkillNode> {
    reachable_nodes(entity, species)
        .filter(|node| {
            node.next_cost(profile.node_level(node))
                .map_or(false, |cost| cost <= available)
        })
        .collect()
}

/// Spend and materialize one level of `node`
///
/// The candidate filter already guaranteed affordability; hitting the
/// guard here is a defect. Debug builds assert, release builds keep the
/// last valid state and report the held points instead.
fn purchase(profile: &mut PowerProfile, node: &SkillNode, available: i64) -> Option<Purchase> {
    let level = profile.node_level(node);
    let cost = match node.next_cost(level) {
        Some(cost) => cost,
        None => {
            debug_assert!(false, "selector offered maxed node {}", node.id);
            tracing::warn!(skill = %node.id, "purchase of maxed node suppressed");
            return None;
        }
    };
    if cost > available {
        debug_assert!(false, "selector offered unaffordable node {}", node.id);
        tracing::warn!(skill = %node.id, cost, available, "overspend suppressed");
        return None;
    }

    profile.total_points_spent += cost;
    let new_level = level + 1;
    let effect = effects::apply(profile, node, new_level);
    tracing::debug!(skill = %node.id, new_level, cost, "upgrade purchased");

    Some(Purchase {
        skill: node.id.clone(),
        new_level,
        cost,
        effect,
    })
}

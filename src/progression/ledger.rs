//! Pure computation of points earned to date
//!
//! Everything here is a function of cumulative state (world day, kill
//! counts, spent total). Re-evaluating with the same inputs always
//! returns the same answer: truncation happens once per call on the
//! summed time term, and no fractional carry is ever stored.

use crate::config::registry::{PointSystem, SpeciesProfile};
use crate::core::types::WorldClock;
use crate::progression::profile::PowerProfile;

/// Fractional points earned from world age alone
///
/// Sums the per-day rate over every fully elapsed day `1..=today`;
/// day 0 contributes nothing because no day has elapsed yet.
pub fn earned_from_time(points: &PointSystem, day: u32) -> f64 {
    let mut total = 0.0;
    for bucket in &points.buckets {
        if bucket.start > day {
            break;
        }
        let lo = bucket.start.max(1);
        let hi = bucket.end.map_or(day, |end| end.min(day));
        if hi >= lo {
            total += f64::from(hi - lo + 1) * bucket.rate;
        }
    }
    total
}

/// Whole points earned from recorded kills
pub fn earned_from_kills(profile: &PowerProfile, points: &PointSystem) -> i64 {
    profile
        .kills_by_species
        .values()
        .map(|&kills| i64::from(kills) * points.points_per_kill)
        .sum()
}

/// Total earned points: `floor(time term) + kill term`
pub fn earned_total(profile: &PowerProfile, species: &SpeciesProfile, clock: &WorldClock) -> i64 {
    let time = earned_from_time(&species.point_system, clock.day());
    time.floor() as i64 + earned_from_kills(profile, &species.point_system)
}

/// Points available to spend right now
pub fn available_points(
    profile: &PowerProfile,
    species: &SpeciesProfile,
    clock: &WorldClock,
) -> i64 {
    earned_total(profile, species, clock) - profile.total_points_spent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::registry::ConfigRegistry;
    use crate::core::types::{SpeciesId, WorldClock};

    const RATES: &str = r#"{
        "species": "test_mob",
        "point_system": {
            "daily_scaling_map": { "0-10": 0.1, "11+": 0.5 },
            "points_per_kill": 1
        },
        "skills": [
            { "id": "filler", "effect": { "kind": "ability" },
              "costs": [1], "potency": [ {} ] }
        ]
    }"#;

    fn registry() -> ConfigRegistry {
        ConfigRegistry::load_str(RATES).unwrap()
    }

    #[test]
    fn test_day_zero_earns_nothing() {
        let registry = registry();
        let species = registry.get(&SpeciesId::new("test_mob")).unwrap();
        let profile = PowerProfile::new();
        assert_eq!(available_points(&profile, species, &WorldClock::at_day(0)), 0);
    }

    #[test]
    fn test_bucket_boundary_truncation() {
        // 10 days at 0.1 plus day 11 at 0.5 = 1.5, floor = 1
        let registry = registry();
        let species = registry.get(&SpeciesId::new("test_mob")).unwrap();
        let profile = PowerProfile::new();
        let clock = WorldClock::at_day(11);
        assert!((earned_from_time(&species.point_system, 11) - 1.5).abs() < 1e-9);
        assert_eq!(available_points(&profile, species, &clock), 1);
    }

    #[test]
    fn test_kills_add_whole_points() {
        let registry = registry();
        let species = registry.get(&SpeciesId::new("test_mob")).unwrap();
        let mut profile = PowerProfile::new();
        let victim = SpeciesId::new("villager");
        for _ in 0..3 {
            profile.record_kill(&victim);
        }
        assert_eq!(available_points(&profile, species, &WorldClock::at_day(0)), 3);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let registry = registry();
        let species = registry.get(&SpeciesId::new("test_mob")).unwrap();
        let profile = PowerProfile::new();
        let clock = WorldClock::at_day(23);
        let first = available_points(&profile, species, &clock);
        for _ in 0..100 {
            assert_eq!(available_points(&profile, species, &clock), first);
        }
    }

    #[test]
    fn test_spent_points_reduce_available() {
        let registry = registry();
        let species = registry.get(&SpeciesId::new("test_mob")).unwrap();
        let mut profile = PowerProfile::new();
        let victim = SpeciesId::new("villager");
        for _ in 0..5 {
            profile.record_kill(&victim);
        }
        profile.total_points_spent = 2;
        assert_eq!(available_points(&profile, species, &WorldClock::at_day(0)), 3);
    }
}

//! Per-tick cost of the upgrade evaluation across a large population

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mobwar_engine::config::ConfigRegistry;
use mobwar_engine::core::types::{EntityId, SpeciesId, WorldClock};
use mobwar_engine::progression::{evaluate, PowerProfile, TickScheduler};

const ARENA: &str = r#"{
    "species": "arena_mob",
    "point_system": {
        "daily_scaling_map": { "0-10": 0.1, "11-15": 0.5, "16+": 1.0 },
        "points_per_kill": 1
    },
    "skills": [
        { "id": "claw_tier",
          "effect": { "kind": "equipment_tier", "slot": "mainhand",
                      "ladder": ["bone_claw", "iron_claw", "steel_claw"] },
          "costs": [2, 5, 11] },
        { "id": "hide_tier",
          "effect": { "kind": "equipment_tier", "slot": "chest",
                      "ladder": ["hide", "scaled_hide", "plated_hide"] },
          "costs": [3, 7, 15] },
        { "id": "rend", "effect": { "kind": "enchant", "slot": "mainhand", "enchant": "rend" },
          "costs": [3, 5, 8, 12] },
        { "id": "frenzy", "effect": { "kind": "ability" },
          "costs": [1, 3, 7],
          "potency": [ { "haste": 1.0 }, { "haste": 2.0 }, { "haste": 3.0 } ] }
    ]
}"#;

fn bench_evaluation(c: &mut Criterion) {
    let registry = ConfigRegistry::load_str(ARENA).unwrap();
    let species = registry.get(&SpeciesId::new("arena_mob")).unwrap();

    let mut population: Vec<(EntityId, PowerProfile)> = (0..1000)
        .map(|_| {
            let mut profile = PowerProfile::new();
            for _ in 0..10 {
                profile.record_kill(&SpeciesId::new("prey"));
            }
            (EntityId::new(), profile)
        })
        .collect();

    c.bench_function("evaluate_1000_entities_one_day", |b| {
        let mut day = 1u32;
        b.iter(|| {
            let clock = WorldClock::at_day(day);
            for (entity, profile) in &mut population {
                black_box(evaluate(*entity, profile, species, &clock));
            }
            day += 1;
        });
    });

    c.bench_function("throttled_tick_noop", |b| {
        let scheduler = TickScheduler::default();
        let (entity, profile) = &mut population[0];
        // Off-interval tick: measures the fast path the host pays for
        // every entity on most ticks.
        let clock = WorldClock::at_tick(24_001);
        b.iter(|| {
            black_box(scheduler.on_tick(*entity, profile, species, &clock));
        });
    });
}

criterion_group!(benches, bench_evaluation);
criterion_main!(benches);

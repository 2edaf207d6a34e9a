//! Headless progression demo
//!
//! Loads the species documents from `data/`, spawns a small population,
//! and fast-forwards forty days of upgrade evaluations, logging every
//! purchase. Run with `RUST_LOG=debug` for per-purchase detail.

use std::path::Path;

use mobwar_engine::config::ConfigRegistry;
use mobwar_engine::core::types::{EntityId, EquipSlot, SpeciesId, WorldClock};
use mobwar_engine::progression::{
    collect_stats, load_or_reset, on_durability_exhausted, save, spawn_profile, EvaluationOutcome,
    OpenGate, PowerProfile, TickScheduler,
};

const DAYS: u32 = 40;
const PER_SPECIES: usize = 4;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let registry = match ConfigRegistry::load_dir(Path::new("data")) {
        Ok(registry) => registry,
        Err(err) => {
            tracing::error!(error = %err, "species config failed to load");
            std::process::exit(1);
        }
    };

    let mut population: Vec<(EntityId, SpeciesId, PowerProfile)> = Vec::new();
    for species in registry.iter() {
        for _ in 0..PER_SPECIES {
            if let Some(profile) = spawn_profile(&OpenGate, species) {
                population.push((EntityId::new(), species.id.clone(), profile));
            }
        }
    }
    tracing::info!("Spawned {} entities across {} species", population.len(), registry.species_count());

    let scheduler = TickScheduler::default();
    let prey = SpeciesId::new("villager");

    for day in 0..=DAYS {
        let clock = WorldClock::at_day(day);
        for (entity, species_id, profile) in &mut population {
            let species = registry.get(species_id).expect("spawned from registry");

            // A few kills and the occasional broken weapon keep the
            // economy moving in both directions.
            if day % 5 == 3 {
                profile.record_kill(&prey);
            }
            if day % 13 == 12 {
                on_durability_exhausted(profile, species, EquipSlot::Mainhand);
            }

            match scheduler.on_tick(*entity, profile, species, &clock) {
                Some(EvaluationOutcome::Purchased(purchase)) => {
                    tracing::info!(
                        day,
                        species = %species_id,
                        skill = %purchase.skill,
                        level = purchase.new_level,
                        cost = purchase.cost,
                        "upgrade bought"
                    );
                }
                Some(_) | None => {}
            }

            // Exercise the save/load boundary the way a host would on
            // entities drifting in and out of simulation range.
            if day % 7 == 6 {
                let blob = save(profile).expect("profile encodes");
                *profile = load_or_reset(&blob);
            }
        }
    }

    let clock = WorldClock::at_day(DAYS);
    for (entity, species_id, profile) in &population {
        let species = registry.get(species_id).expect("spawned from registry");
        let stats = collect_stats(*entity, profile, species, &clock);
        tracing::info!(
            species = %species_id,
            earned = stats.earned,
            spent = stats.spent,
            available = stats.available,
            maxed = stats.maxed,
            "final standing"
        );
    }
}

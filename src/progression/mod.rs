//! The progression economy: points in, upgrades out
//!
//! Entities earn power points from world age and kills, and spend them
//! through a rate-limited, probabilistic purchase process. All mutable
//! state lives in one [`PowerProfile`] per entity; species rules come
//! from the immutable [`crate::config::ConfigRegistry`].

pub mod effects;
pub mod ledger;
pub mod persist;
pub mod profile;
pub mod rng;
pub mod scheduler;
pub mod selector;

pub use effects::{apply, on_durability_exhausted, AppliedEffect, DurabilityOutcome};
pub use ledger::{available_points, earned_from_kills, earned_from_time, earned_total};
pub use persist::{load, load_or_reset, save};
pub use profile::{spawn_profile, KillEvent, OpenGate, PowerProfile, SpawnGate};
pub use rng::{evaluation_rng, weapon_path, WeaponPathChoice};
pub use scheduler::{TickScheduler, EVAL_INTERVAL_TICKS};
pub use selector::{
    collect_stats, evaluate, force_upgrade, is_maxed, EvaluationOutcome, ProfileStats, Purchase,
};

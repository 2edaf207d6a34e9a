//! Declarative per-species skill trees, loaded once at startup

pub mod registry;
pub mod schema;

pub use registry::{
    ConfigRegistry, DayBucket, PointSystem, SkillEffect, SkillNode, SpecialWeapon, SpeciesProfile,
};
pub use schema::{
    BaseEquipment, EffectDoc, MobCategory, PointSystemDoc, PotencyRow, SkillDoc, SpeciesDoc,
};

pub mod error;
pub mod types;

pub use error::{ConfigError, EngineError, PersistenceError, Result};
pub use types::{
    EntityId, EquipSlot, SkillId, SpeciesId, Tick, WorldClock, TICKS_PER_DAY, TICKS_PER_SECOND,
};

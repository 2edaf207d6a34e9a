use thiserror::Error;

/// A species configuration document failed validation
///
/// Always fatal at startup: the registry refuses to load rather than
/// defaulting a malformed field silently.
#[derive(Error, Debug)]
#[error("species config '{species}', field '{field}': {reason}")]
pub struct ConfigError {
    pub species: String,
    pub field: String,
    pub reason: String,
}

impl ConfigError {
    pub fn new(
        species: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            species: species.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// A per-entity state blob could not be round-tripped
///
/// Never fatal to the process: callers recover by resetting the single
/// affected entity to a fresh profile.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("profile blob is corrupt: {0}")]
    Corrupt(serde_json::Error),

    #[error("profile could not be encoded: {0}")]
    Encode(serde_json::Error),

    #[error("empty profile blob")]
    Empty,
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

//! Serialize per-entity progression state across save/load boundaries
//!
//! The blob is JSON and round-trips every profile field losslessly.
//! A corrupt blob costs that one entity its progression (reset to
//! zero with a warning), never the process.

use crate::core::error::PersistenceError;
use crate::progression::profile::PowerProfile;

/// Encode a profile for the host's save pipeline
pub fn save(profile: &PowerProfile) -> Result<Vec<u8>, PersistenceError> {
    serde_json::to_vec(profile).map_err(PersistenceError::Encode)
}

/// Decode a profile from a previously saved blob
pub fn load(blob: &[u8]) -> Result<PowerProfile, PersistenceError> {
    if blob.is_empty() {
        return Err(PersistenceError::Empty);
    }
    serde_json::from_slice(blob).map_err(PersistenceError::Corrupt)
}

/// Decode, or recover locally with a fresh zero profile
pub fn load_or_reset(blob: &[u8]) -> PowerProfile {
    match load(blob) {
        Ok(profile) => profile,
        Err(err) => {
            tracing::warn!(error = %err, "power profile blob unreadable, resetting entity");
            PowerProfile::new()
        }
    }
}

use thiserror::Error;

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::protocols::openspool::{DecodeError, EncodeError, decode_with, encode};
use crate::tag::{SessionError, TagSession};
use crate::validation::{Outcome, ValidationError, Validator, validate_write_preconditions};
use crate::{SpoolProfile, TemperatureRange};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("tag session error: {0}")]
    Session(#[from] SessionError),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
}

/// Read and decode the record of a tag.
///
/// # Examples
/// ```
/// use openspool_core::{EngineConfig, MemoryTag, TagSession, read_profile};
///
/// let mut tag = MemoryTag::default();
/// tag.write_payload(br#"{"color_hex":"f330f9","type":"pla","min_temp":180,"max_temp":230}"#)?;
/// let profile = read_profile(&mut tag, &EngineConfig::default())?;
/// assert_eq!(profile.color_value, "pink");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn read_profile<S: TagSession>(
    session: &mut S,
    config: &EngineConfig,
) -> Result<SpoolProfile, PipelineError> {
    let payload = session.read_payload()?;
    let profile = decode_with(&payload, Catalog::builtin(), config.inverted_range_on_read)?;
    Ok(profile)
}

/// Validate, encode, and write a profile; returns the payload written.
///
/// Off-ladder temperatures are logged, and block the write under the strict
/// edit policy. Nothing is written when the write gate, the policy, or the
/// encoder rejects the profile.
pub fn write_profile<S: TagSession>(
    session: &mut S,
    profile: &SpoolProfile,
    config: &EngineConfig,
) -> Result<Vec<u8>, PipelineError> {
    validate_write_preconditions(profile)?;
    let outcome = check_temperatures(profile, config).into_result()?;
    for warning in &outcome.warnings {
        log::warn!("{}", warning);
    }
    let payload = encode(profile)?;
    session.write_payload(&payload)?;
    log::info!(
        "wrote {} {} profile ({} bytes)",
        profile.material,
        profile.color_value,
        payload.len()
    );
    Ok(payload)
}

fn check_temperatures(profile: &SpoolProfile, config: &EngineConfig) -> Outcome {
    let validator = Validator::from_config(config);
    let TemperatureRange { min_c, max_c } = profile.temperature;
    let min = validator.validate_min_temp(min_c, max_c);
    let max = validator.validate_max_temp(max_c, min_c);
    Outcome {
        blocking: min.blocking || max.blocking,
        warnings: min.warnings.into_iter().chain(max.warnings).collect(),
        corrected_max: None,
    }
}

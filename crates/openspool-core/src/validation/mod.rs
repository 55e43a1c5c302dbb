//! Field-level and cross-field checks for profiles being edited.
//!
//! The validator never fails an edit outright: it returns an [`Outcome`]
//! carrying warnings and, under the clamp policy, a corrected maximum. The
//! only hard gate is [`validate_write_preconditions`], which applies the same
//! strict `min < max` rule as the encoder so callers can stop before any tag
//! I/O.

mod error;

pub use error::{ValidationError, ValidationWarning};

use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, TemperatureLadder};
use crate::{SpoolProfile, TemperatureRange};

/// How the validator reacts to an out-of-order edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditPolicy {
    /// Warn and propose a max one step above the new min.
    #[default]
    Clamp,
    /// Warn only; the stale max is kept and encode rejects it later.
    WarnOnly,
    /// Warn, and mark every warning as blocking.
    Strict,
}

/// Result of checking one edited field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Outcome {
    pub warnings: Vec<ValidationWarning>,
    /// Replacement max proposed by the clamp policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_max: Option<i32>,
    /// True when the policy forbids proceeding with these warnings.
    pub blocking: bool,
}

impl Outcome {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// `Err` when the outcome is blocking, otherwise the outcome itself.
    pub fn into_result(self) -> Result<Outcome, ValidationError> {
        if self.blocking {
            Err(ValidationError::Blocked {
                warnings: self.warnings,
            })
        } else {
            Ok(self)
        }
    }
}

/// Edit-time validator over a temperature ladder and policy.
///
/// # Examples
/// ```
/// use openspool_core::{EditPolicy, TemperatureLadder, ValidationWarning, Validator};
///
/// let validator = Validator::new(TemperatureLadder::default(), EditPolicy::Clamp);
/// let outcome = validator.validate_min_temp(230, 220);
/// assert_eq!(
///     outcome.warnings,
///     vec![ValidationWarning::MinNotBelowMax { min: 230, max: 220 }]
/// );
/// assert_eq!(outcome.corrected_max, Some(235));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    ladder: TemperatureLadder,
    policy: EditPolicy,
}

impl Validator {
    pub fn new(ladder: TemperatureLadder, policy: EditPolicy) -> Self {
        Self { ladder, policy }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.temperatures, config.edit_policy)
    }

    pub fn policy(&self) -> EditPolicy {
        self.policy
    }

    /// Check a new minimum against the current maximum.
    pub fn validate_min_temp(&self, candidate: i32, current_max: i32) -> Outcome {
        let mut warnings = self.ladder_warning(candidate).into_iter().collect::<Vec<_>>();
        let mut corrected_max = None;
        if candidate >= current_max {
            warnings.push(ValidationWarning::MinNotBelowMax {
                min: candidate,
                max: current_max,
            });
            if self.policy == EditPolicy::Clamp {
                let proposed = candidate.saturating_add(self.ladder.step).min(self.ladder.highest);
                // At the top rung there is no max above the candidate.
                if proposed > candidate {
                    corrected_max = Some(proposed);
                }
            }
        }
        self.finish(warnings, corrected_max)
    }

    /// Check a new maximum against the current minimum; never touches the min.
    pub fn validate_max_temp(&self, candidate: i32, current_min: i32) -> Outcome {
        let mut warnings = self.ladder_warning(candidate).into_iter().collect::<Vec<_>>();
        if candidate <= current_min {
            warnings.push(ValidationWarning::MaxNotAboveMin {
                min: current_min,
                max: candidate,
            });
        }
        self.finish(warnings, None)
    }

    /// Set a profile's min temperature, applying any clamp correction.
    pub fn edit_min(&self, mut profile: SpoolProfile, candidate: i32) -> (SpoolProfile, Outcome) {
        let outcome = self.validate_min_temp(candidate, profile.temperature.max_c);
        profile.temperature.min_c = candidate;
        if let Some(max) = outcome.corrected_max {
            profile.temperature.max_c = max;
        }
        (profile, outcome)
    }

    /// Set a profile's max temperature.
    pub fn edit_max(&self, mut profile: SpoolProfile, candidate: i32) -> (SpoolProfile, Outcome) {
        let outcome = self.validate_max_temp(candidate, profile.temperature.min_c);
        profile.temperature.max_c = candidate;
        (profile, outcome)
    }

    fn ladder_warning(&self, value: i32) -> Option<ValidationWarning> {
        if self.ladder.contains(value) {
            None
        } else {
            Some(ValidationWarning::OffLadder {
                value,
                lowest: self.ladder.lowest,
                highest: self.ladder.highest,
                step: self.ladder.step,
            })
        }
    }

    fn finish(&self, warnings: Vec<ValidationWarning>, corrected_max: Option<i32>) -> Outcome {
        let blocking = self.policy == EditPolicy::Strict && !warnings.is_empty();
        Outcome {
            warnings,
            corrected_max,
            blocking,
        }
    }
}

/// Gate applied right before a profile is encoded for a write.
///
/// # Examples
/// ```
/// use openspool_core::{
///     Catalog, MaterialType, SpoolProfile, TemperatureRange, ValidationError,
///     validate_write_preconditions,
/// };
///
/// let white = Catalog::builtin().find_by_value("white").unwrap();
/// let range = TemperatureRange::new(210, 210);
/// let profile = SpoolProfile::from_color(white, MaterialType::Pla, range);
/// assert_eq!(
///     validate_write_preconditions(&profile),
///     Err(ValidationError::InvalidTemperatureRange { min: 210, max: 210 })
/// );
/// ```
pub fn validate_write_preconditions(profile: &SpoolProfile) -> Result<(), ValidationError> {
    let TemperatureRange { min_c, max_c } = profile.temperature;
    if min_c < max_c {
        Ok(())
    } else {
        Err(ValidationError::InvalidTemperatureRange {
            min: min_c,
            max: max_c,
        })
    }
}

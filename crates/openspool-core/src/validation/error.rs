use serde::Serialize;
use thiserror::Error;

/// Blocking validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid temperature range: min {min} must be below max {max}")]
    InvalidTemperatureRange { min: i32, max: i32 },
    #[error("edit blocked by strict policy: {}", first_warning(.warnings))]
    Blocked { warnings: Vec<ValidationWarning> },
}

fn first_warning(warnings: &[ValidationWarning]) -> String {
    warnings.first().map(ToString::to_string).unwrap_or_default()
}

/// Advisory findings on an in-progress edit.
///
/// # Examples
/// ```
/// use openspool_core::ValidationWarning;
///
/// let warning = ValidationWarning::MinNotBelowMax { min: 230, max: 220 };
/// assert!(warning.to_string().contains("not below"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    #[error("min temperature {min} is not below max temperature {max}")]
    MinNotBelowMax { min: i32, max: i32 },
    #[error("max temperature {max} is not above min temperature {min}")]
    MaxNotAboveMin { min: i32, max: i32 },
    #[error("{value} is not one of {lowest}..={highest} in steps of {step}")]
    OffLadder {
        value: i32,
        lowest: i32,
        highest: i32,
        step: i32,
    },
}

use thiserror::Error;

/// Errors returned when turning payload bytes into a profile.
///
/// # Examples
/// ```
/// use openspool_core::{DecodeError, decode};
///
/// let err = decode(br#"{"color_hex":"ffffff","type":"pla","max_temp":210}"#).unwrap_err();
/// assert!(matches!(err, DecodeError::MissingField(field) if field == "min_temp"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("payload is not valid UTF-8 (valid up to byte {valid_up_to})")]
    MalformedEncoding { valid_up_to: usize },
    #[error("malformed JSON: {message}")]
    MalformedJson { message: String },
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("unknown material type '{0}'")]
    UnknownMaterialType(String),
    #[error("invalid temperature range: min {min} must be below max {max}")]
    InvalidTemperatureRange { min: i32, max: i32 },
}

/// Errors returned when turning a profile into payload bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("invalid temperature range: min {min} must be below max {max}")]
    InvalidTemperatureRange { min: i32, max: i32 },
    #[error("color '{value}' has no catalog entry and hex '{hex}' is not six hex digits")]
    InvalidColor { value: String, hex: String },
    #[error("serialization failure: {0}")]
    SerializationFailure(String),
}

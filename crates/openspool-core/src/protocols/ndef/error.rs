use thiserror::Error;

/// Errors returned by NDEF message framing.
///
/// # Examples
/// ```
/// use openspool_core::{NdefError, find_json_payload};
///
/// let err = find_json_payload(&[]).unwrap_err();
/// assert_eq!(err, NdefError::EmptyMessage);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NdefError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("message too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("chunked records are not supported")]
    ChunkedRecord,
    #[error("no application/json record in message")]
    NoJsonRecord,
    #[error("payload too large for a single record: {length} bytes")]
    PayloadTooLarge { length: usize },
}

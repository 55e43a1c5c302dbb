use super::{SessionError, TagSession};
use crate::protocols::ndef::{build_json_message, find_json_payload};

/// Tag held entirely in memory, as a raw NDEF message.
///
/// # Examples
/// ```
/// use openspool_core::{MemoryTag, TagSession};
///
/// let mut tag = MemoryTag::default();
/// tag.write_payload(b"{}")?;
/// assert_eq!(tag.read_payload()?, b"{}");
/// # Ok::<(), openspool_core::SessionError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTag {
    message: Vec<u8>,
}

impl MemoryTag {
    pub fn with_message(message: Vec<u8>) -> Self {
        Self { message }
    }

    /// Current raw NDEF message.
    pub fn message(&self) -> &[u8] {
        &self.message
    }
}

impl TagSession for MemoryTag {
    fn read_payload(&mut self) -> Result<Vec<u8>, SessionError> {
        Ok(find_json_payload(&self.message)?)
    }

    fn write_payload(&mut self, payload: &[u8]) -> Result<(), SessionError> {
        self.message = build_json_message(payload)?;
        Ok(())
    }
}

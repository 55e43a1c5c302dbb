//! Tag-session boundary.
//!
//! A session hands the codec the raw record payload of a tag and accepts the
//! payload to write back. NDEF framing is handled here so the codec only ever
//! sees bare JSON bytes. Radio sessions live outside this crate; the
//! implementations here back a session with a dump file or with memory.

mod file;
mod memory;

pub use file::FileTag;
pub use memory::MemoryTag;

use thiserror::Error;

use crate::protocols::ndef::NdefError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("NDEF error: {0}")]
    Ndef(#[from] NdefError),
}

/// One acquired tag. Dropping the session releases it.
pub trait TagSession {
    /// Payload of the tag's `application/json` record.
    fn read_payload(&mut self) -> Result<Vec<u8>, SessionError>;

    /// Replace the tag content with a single record carrying `payload`.
    fn write_payload(&mut self, payload: &[u8]) -> Result<(), SessionError>;
}

use std::fs;
use std::path::{Path, PathBuf};

use super::{SessionError, TagSession};
use crate::protocols::ndef::{build_json_message, find_json_payload};

/// Tag backed by a dump file holding a raw NDEF message.
pub struct FileTag {
    path: PathBuf,
}

impl FileTag {
    /// Acquire an existing dump.
    pub fn open(path: &Path) -> Result<Self, SessionError> {
        let meta = fs::metadata(path)?;
        if !meta.is_file() {
            return Err(SessionError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("not a file: {}", path.display()),
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Target a dump that may not exist yet; it is created on first write.
    pub fn create(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl TagSession for FileTag {
    fn read_payload(&mut self) -> Result<Vec<u8>, SessionError> {
        let message = fs::read(&self.path)?;
        Ok(find_json_payload(&message)?)
    }

    fn write_payload(&mut self, payload: &[u8]) -> Result<(), SessionError> {
        let message = build_json_message(payload)?;
        fs::write(&self.path, message)?;
        Ok(())
    }
}

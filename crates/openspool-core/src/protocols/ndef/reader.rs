use super::error::NdefError;
use super::layout;

/// Forward-only cursor over a message buffer.
pub struct NdefReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> NdefReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    pub fn read_u8(&mut self) -> Result<u8, NdefError> {
        let value = self.read_slice(1)?;
        Ok(value[0])
    }

    pub fn read_u32_be(&mut self) -> Result<u32, NdefError> {
        let bytes = self.read_slice(layout::LONG_LENGTH_SIZE)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Payload length: one byte for short records, four otherwise.
    pub fn read_payload_length(&mut self, short: bool) -> Result<usize, NdefError> {
        if short {
            Ok(self.read_u8()? as usize)
        } else {
            Ok(self.read_u32_be()? as usize)
        }
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], NdefError> {
        let end = self.offset.checked_add(len).ok_or(NdefError::TooShort {
            needed: usize::MAX,
            actual: self.bytes.len(),
        })?;
        let slice = self.bytes.get(self.offset..end).ok_or(NdefError::TooShort {
            needed: end,
            actual: self.bytes.len(),
        })?;
        self.offset = end;
        Ok(slice)
    }
}

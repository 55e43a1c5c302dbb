use super::error::NdefError;
use super::layout;
use super::reader::NdefReader;
use crate::MEDIA_TYPE;

/// One decoded NDEF record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefRecord {
    pub tnf: u8,
    pub record_type: Vec<u8>,
    pub id: Vec<u8>,
    pub payload: Vec<u8>,
}

impl NdefRecord {
    pub fn is_json(&self) -> bool {
        self.tnf == layout::TNF_MEDIA
            && self
                .record_type
                .eq_ignore_ascii_case(MEDIA_TYPE.as_bytes())
    }
}

/// Parse records up to and including the one flagged ME.
///
/// Bytes after the last record are ignored (tag memory is often padded).
pub fn parse_message(bytes: &[u8]) -> Result<Vec<NdefRecord>, NdefError> {
    if bytes.is_empty() {
        return Err(NdefError::EmptyMessage);
    }

    let mut reader = NdefReader::new(bytes);
    let mut records = Vec::new();
    loop {
        let header = reader.read_u8()?;
        if header & layout::FLAG_CF != 0 {
            return Err(NdefError::ChunkedRecord);
        }
        let type_len = reader.read_u8()? as usize;
        let payload_len = reader.read_payload_length(header & layout::FLAG_SR != 0)?;
        let id_len = if header & layout::FLAG_IL != 0 {
            reader.read_u8()? as usize
        } else {
            0
        };

        let record_type = reader.read_slice(type_len)?.to_vec();
        let id = reader.read_slice(id_len)?.to_vec();
        let payload = reader.read_slice(payload_len)?.to_vec();
        records.push(NdefRecord {
            tnf: header & layout::TNF_MASK,
            record_type,
            id,
            payload,
        });

        if header & layout::FLAG_ME != 0 || reader.is_exhausted() {
            break;
        }
    }
    Ok(records)
}

/// Extract the payload of the first `application/json` media record.
pub fn find_json_payload(bytes: &[u8]) -> Result<Vec<u8>, NdefError> {
    parse_message(bytes)?
        .into_iter()
        .find(NdefRecord::is_json)
        .map(|record| record.payload)
        .ok_or(NdefError::NoJsonRecord)
}

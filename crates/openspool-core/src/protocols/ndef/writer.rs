use super::error::NdefError;
use super::layout;
use crate::MEDIA_TYPE;

/// Wrap a payload in a single-record `application/json` message.
pub fn build_json_message(payload: &[u8]) -> Result<Vec<u8>, NdefError> {
    let short = payload.len() <= layout::SHORT_PAYLOAD_MAX;
    let mut header = layout::FLAG_MB | layout::FLAG_ME | layout::TNF_MEDIA;
    if short {
        header |= layout::FLAG_SR;
    }

    let type_bytes = MEDIA_TYPE.as_bytes();
    let mut message = Vec::with_capacity(payload.len() + type_bytes.len() + 6);
    message.push(header);
    message.push(type_bytes.len() as u8);
    if short {
        message.push(payload.len() as u8);
    } else {
        let length = u32::try_from(payload.len()).map_err(|_| NdefError::PayloadTooLarge {
            length: payload.len(),
        })?;
        message.extend_from_slice(&length.to_be_bytes());
    }
    message.extend_from_slice(type_bytes);
    message.extend_from_slice(payload);
    Ok(message)
}

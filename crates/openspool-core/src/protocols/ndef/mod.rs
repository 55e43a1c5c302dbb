//! NDEF message framing for the JSON record.
//!
//! Only what a tag dump needs: walk the records of a message, pick the first
//! media-type record of type `application/json`, and build a one-record
//! message around an encoded payload. Chunked records are rejected.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod writer;

pub use error::NdefError;
pub use parser::{NdefRecord, find_json_payload, parse_message};
pub use writer::build_json_message;

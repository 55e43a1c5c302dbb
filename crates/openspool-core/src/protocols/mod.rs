//! Wire-format modules.
//!
//! Each format follows a layered structure:
//! - `layout`: field names, flags, and constants (source of truth)
//! - `reader`: safe access and wire conventions
//! - `parser`: domain-level decoding (no direct indexing)
//! - `writer`: domain-level encoding
//! - `error`: explicit, actionable errors
//!
//! Everything here is pure; sessions in `tag` handle storage.

pub mod ndef;
pub mod openspool;

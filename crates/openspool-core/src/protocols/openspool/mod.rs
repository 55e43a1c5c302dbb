//! OpenSpool JSON record codec.
//!
//! The parser reads a UTF-8 JSON object, checks required fields in a fixed
//! order, rejects unknown materials, and resolves the color through the
//! catalog (an uncataloged hex is kept with the `unknown` identifier). The
//! writer enforces the strict temperature ordering unconditionally and emits
//! compact JSON with the key order of [`WireRecord`].
//!
//! Field names live in `layout`; coercion and normalization conventions live
//! in `reader`.
//!
//! Version française (résumé):
//! Le module décode et encode l'enregistrement JSON OpenSpool. Les champs
//! obligatoires sont vérifiés dans un ordre fixe, les matériaux inconnus sont
//! rejetés, les couleurs inconnues conservées. L'écriture exige min < max.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod writer;

pub use error::{DecodeError, EncodeError};
pub use parser::{decode, decode_with};
pub use writer::{WireRecord, encode, encode_with};

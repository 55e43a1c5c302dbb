//! OpenSpool core library: spool-record codec and validation engine.
//!
//! This crate implements the on-tag data format used by OpenSpool-compatible
//! readers and writers: a small JSON record (color, material, temperature
//! range, brand) stored as a media-type NDEF record on a filament spool tag.
//! The catalog feeds the codec, the codec is the only consumer of raw payload
//! bytes and the only producer of tag-writable bytes, and the validator flags
//! in-progress edits before any write is attempted.
//!
//! Decoding and encoding are pure and synchronous; all I/O is isolated in the
//! `tag` module (sessions over dump files or memory). Wire conventions live in
//! `layout`/`reader` modules so parsers stay minimal.
//!
//! Invariants:
//! - Every encoded record satisfies `min_temp < max_temp`.
//! - Encoded JSON is compact with a fixed key order.
//! - Unknown materials are rejected; unknown colors are carried verbatim.
//!
//! Version française (résumé):
//! Cette crate fournit le codec des enregistrements OpenSpool : catalogue ->
//! codec (décodage/encodage JSON) -> validateur. Les E/S restent dans `tag`.
//! Garanties : plage de température strictement ordonnée à l'écriture, ordre
//! des clés fixe, matériaux inconnus rejetés, couleurs inconnues conservées.
//!
//! # Examples
//! ```
//! use openspool_core::{decode, encode};
//!
//! let payload = br#"{"color_hex":"2850e0","type":"pla","min_temp":180,"max_temp":210}"#;
//! let profile = decode(payload)?;
//! assert_eq!(profile.color_value, "blue");
//! assert_eq!(profile.brand, "Generic");
//!
//! let bytes = encode(&profile)?;
//! assert!(bytes.starts_with(br#"{"version":"1.0","protocol":"openspool""#));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod catalog;
mod config;
mod pipeline;
mod protocols;
mod tag;
mod validation;

pub use catalog::{Catalog, ColorEntry, KNOWN_BRANDS, MaterialType, UnknownMaterial};
pub use config::{CONFIG_VERSION, ConfigError, EngineConfig, RangeOnRead, TemperatureLadder};
pub use pipeline::{PipelineError, read_profile, write_profile};
pub use protocols::ndef::{
    NdefError, NdefRecord, build_json_message, find_json_payload, parse_message,
};
pub use protocols::openspool::{
    DecodeError, EncodeError, WireRecord, decode, decode_with, encode, encode_with,
};
pub use tag::{FileTag, MemoryTag, SessionError, TagSession};
pub use validation::{
    EditPolicy, Outcome, ValidationError, ValidationWarning, Validator,
    validate_write_preconditions,
};

/// Protocol identifier written into every record.
pub const PROTOCOL_NAME: &str = "openspool";
/// Protocol version written when a profile carries none.
pub const PROTOCOL_VERSION: &str = "1.0";
/// Brand substituted when a record or profile has no brand.
pub const DEFAULT_BRAND: &str = "Generic";
/// Color identifier used when a wire hex matches no catalog entry.
pub const UNKNOWN_COLOR_VALUE: &str = "unknown";
/// NDEF media type of the record carrying the JSON payload.
pub const MEDIA_TYPE: &str = "application/json";

/// Print temperature range in degrees Celsius.
///
/// A range may be provisional (out of order) while being edited; the codec
/// and the write gate only accept ranges where `min_c < max_c`.
///
/// # Examples
/// ```
/// use openspool_core::TemperatureRange;
///
/// let range = TemperatureRange::new(190, 220);
/// assert!(range.is_ordered());
/// assert!(!TemperatureRange::new(220, 220).is_ordered());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureRange {
    /// Minimum print temperature.
    pub min_c: i32,
    /// Maximum print temperature.
    pub max_c: i32,
}

impl TemperatureRange {
    pub const fn new(min_c: i32, max_c: i32) -> Self {
        Self { min_c, max_c }
    }

    /// True when the strict `min < max` ordering holds.
    pub fn is_ordered(&self) -> bool {
        self.min_c < self.max_c
    }
}

/// Decoded or edited spool profile.
///
/// Profiles are plain values: each read or write operates on its own copy.
///
/// # Examples
/// ```
/// use openspool_core::{Catalog, MaterialType, SpoolProfile, TemperatureRange};
///
/// let blue = Catalog::builtin().find_by_value("blue").unwrap();
/// let range = TemperatureRange::new(230, 250);
/// let profile = SpoolProfile::from_color(blue, MaterialType::Petg, range);
/// assert_eq!(profile.color_hex, "2850e0");
/// assert_eq!(profile.brand, "Generic");
/// assert_eq!(profile.protocol_name(), "openspool");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpoolProfile {
    /// Catalog color identifier, or [`UNKNOWN_COLOR_VALUE`] for custom colors.
    pub color_value: String,
    /// Six lowercase hex digits, no `#`.
    pub color_hex: String,
    /// Filament material.
    pub material: MaterialType,
    /// Print temperature range.
    pub temperature: TemperatureRange,
    /// Free-text brand.
    pub brand: String,
    /// Record version as read from (or to be written to) the tag.
    pub protocol_version: String,
}

impl SpoolProfile {
    /// Build a profile for a catalog color with default brand and version.
    pub fn from_color(
        color: &ColorEntry,
        material: MaterialType,
        temperature: TemperatureRange,
    ) -> Self {
        Self {
            color_value: color.value.to_string(),
            color_hex: color.hex.to_string(),
            material,
            temperature,
            brand: DEFAULT_BRAND.to_string(),
            protocol_version: PROTOCOL_VERSION.to_string(),
        }
    }

    /// Build a profile for an uncataloged color.
    ///
    /// The hex is stored as given; the codec checks it at encode time.
    pub fn from_custom_hex(
        hex: &str,
        material: MaterialType,
        temperature: TemperatureRange,
    ) -> Self {
        Self {
            color_value: UNKNOWN_COLOR_VALUE.to_string(),
            color_hex: hex.to_ascii_lowercase(),
            material,
            temperature,
            brand: DEFAULT_BRAND.to_string(),
            protocol_version: PROTOCOL_VERSION.to_string(),
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Protocol name; constant for every OpenSpool record.
    pub fn protocol_name(&self) -> &'static str {
        PROTOCOL_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serializes_material_lowercase() {
        let profile = SpoolProfile::from_custom_hex(
            "ABCDEF",
            MaterialType::Nylon,
            TemperatureRange::new(240, 270),
        );

        let value = serde_json::to_value(&profile).expect("profile json");
        assert_eq!(value["material"], "nylon");
        assert_eq!(value["color_hex"], "abcdef");
        assert_eq!(value["color_value"], UNKNOWN_COLOR_VALUE);
        assert_eq!(value["temperature"]["min_c"], 240);
    }

    #[test]
    fn with_brand_replaces_default() {
        let blue = Catalog::builtin().find_by_value("blue").expect("blue");
        let profile =
            SpoolProfile::from_color(blue, MaterialType::Pla, TemperatureRange::new(180, 210))
                .with_brand("Prusament");
        assert_eq!(profile.brand, "Prusament");
        assert_eq!(profile.protocol_version, PROTOCOL_VERSION);
    }
}

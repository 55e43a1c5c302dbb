use serde::{Deserialize, Serialize};

use super::error::EncodeError;
use crate::catalog::{Catalog, MaterialType, is_hex6};
use crate::{DEFAULT_BRAND, PROTOCOL_NAME, PROTOCOL_VERSION, SpoolProfile};

/// Exact JSON shape stored on a tag.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRecord {
    pub version: String,
    pub protocol: String,
    pub color_hex: String,
    #[serde(rename = "type")]
    pub material: MaterialType,
    pub min_temp: i32,
    pub max_temp: i32,
    pub brand: String,
}

impl WireRecord {
    /// Build the record for a profile, resolving its color via `catalog`.
    pub fn from_profile(profile: &SpoolProfile, catalog: &Catalog) -> Result<Self, EncodeError> {
        let range = profile.temperature;
        if !range.is_ordered() {
            return Err(EncodeError::InvalidTemperatureRange {
                min: range.min_c,
                max: range.max_c,
            });
        }

        let color_hex = match catalog.find_by_value(&profile.color_value) {
            Some(entry) => entry.hex.to_string(),
            None if is_hex6(&profile.color_hex) => profile.color_hex.to_ascii_lowercase(),
            None => {
                return Err(EncodeError::InvalidColor {
                    value: profile.color_value.clone(),
                    hex: profile.color_hex.clone(),
                });
            }
        };

        Ok(Self {
            version: non_blank(&profile.protocol_version, PROTOCOL_VERSION),
            protocol: PROTOCOL_NAME.to_string(),
            color_hex,
            material: profile.material,
            min_temp: range.min_c,
            max_temp: range.max_c,
            brand: non_blank(&profile.brand, DEFAULT_BRAND),
        })
    }
}

/// Encode a profile with the built-in catalog.
pub fn encode(profile: &SpoolProfile) -> Result<Vec<u8>, EncodeError> {
    encode_with(profile, Catalog::builtin())
}

/// Encode a profile as compact UTF-8 JSON.
///
/// Fails when `min_c >= max_c`, whatever the other fields hold.
pub fn encode_with(profile: &SpoolProfile, catalog: &Catalog) -> Result<Vec<u8>, EncodeError> {
    let record = WireRecord::from_profile(profile, catalog)?;
    let bytes = serde_json::to_vec(&record)
        .map_err(|err| EncodeError::SerializationFailure(err.to_string()))?;
    log::debug!(
        "encoded {} {} record ({} bytes)",
        record.material,
        record.color_hex,
        bytes.len()
    );
    Ok(bytes)
}

fn non_blank(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{WireRecord, encode, encode_with};
    use crate::catalog::{Catalog, ColorEntry, MaterialType};
    use crate::protocols::openspool::error::EncodeError;
    use crate::protocols::openspool::parser::decode;
    use crate::{SpoolProfile, TemperatureRange, UNKNOWN_COLOR_VALUE};

    fn blue_pla() -> SpoolProfile {
        let blue = Catalog::builtin().find_by_value("blue").unwrap();
        SpoolProfile::from_color(blue, MaterialType::Pla, TemperatureRange::new(180, 210))
    }

    #[test]
    fn encode_fixed_key_order() {
        let bytes = encode(&blue_pla()).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"version":"1.0","protocol":"openspool","color_hex":"2850e0","type":"pla","min_temp":180,"max_temp":210,"brand":"Generic"}"#
        );
    }

    #[test]
    fn encode_rejects_equal_and_inverted_ranges() {
        for (min, max) in [(200, 200), (230, 180)] {
            let mut profile = blue_pla();
            profile.temperature = TemperatureRange::new(min, max);
            assert_eq!(
                encode(&profile),
                Err(EncodeError::InvalidTemperatureRange { min, max })
            );
        }
    }

    #[test]
    fn encode_range_check_precedes_color_check() {
        let mut profile = blue_pla();
        profile.color_value = "nope".to_string();
        profile.color_hex = "zz".to_string();
        profile.temperature = TemperatureRange::new(250, 200);
        assert!(matches!(
            encode(&profile),
            Err(EncodeError::InvalidTemperatureRange { .. })
        ));
    }

    #[test]
    fn encode_catalog_value_wins_over_stale_hex() {
        let mut profile = blue_pla();
        profile.color_hex = "000000".to_string();
        let record = WireRecord::from_profile(&profile, Catalog::builtin()).unwrap();
        assert_eq!(record.color_hex, "2850e0");
    }

    #[test]
    fn encode_custom_color_falls_back_to_hex() {
        let profile = SpoolProfile::from_custom_hex(
            "123ABC",
            MaterialType::Abs,
            TemperatureRange::new(230, 260),
        );
        let record = WireRecord::from_profile(&profile, Catalog::builtin()).unwrap();
        assert_eq!(record.color_hex, "123abc");
    }

    #[test]
    fn encode_invalid_custom_color() {
        let mut profile = blue_pla();
        profile.color_value = UNKNOWN_COLOR_VALUE.to_string();
        profile.color_hex = "#12345".to_string();
        assert!(matches!(encode(&profile), Err(EncodeError::InvalidColor { .. })));
    }

    #[test]
    fn encode_blank_brand_and_version_get_defaults() {
        let mut profile = blue_pla();
        profile.brand = "   ".to_string();
        profile.protocol_version = String::new();
        let record = WireRecord::from_profile(&profile, Catalog::builtin()).unwrap();
        assert_eq!(record.brand, "Generic");
        assert_eq!(record.version, "1.0");
    }

    #[test]
    fn encode_with_custom_catalog() {
        static INK: [ColorEntry; 1] = [ColorEntry {
            name: "Ink",
            hex: "101820",
            value: "ink",
        }];
        let catalog = Catalog::new(&INK);
        let mut profile = blue_pla();
        profile.color_value = "ink".to_string();
        let bytes = encode_with(&profile, &catalog).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains(r#""color_hex":"101820""#));
    }

    #[test]
    fn round_trip_preserves_profile() {
        let materials = MaterialType::ALL;
        for (index, color) in Catalog::builtin().colors().iter().enumerate() {
            let material = materials[index % materials.len()];
            let profile = SpoolProfile::from_color(color, material, material.default_range())
                .with_brand("Overture");
            let decoded = decode(&encode(&profile).unwrap()).unwrap();
            assert_eq!(decoded, profile);
        }
    }

    #[test]
    fn round_trip_custom_color_uses_fallback_identifier() {
        let profile = SpoolProfile::from_custom_hex(
            "a1b2c3",
            MaterialType::Tpu,
            TemperatureRange::new(205, 225),
        );
        let decoded = decode(&encode(&profile).unwrap()).unwrap();
        assert_eq!(decoded.color_value, UNKNOWN_COLOR_VALUE);
        assert_eq!(decoded.color_hex, "a1b2c3");
        assert_eq!(decoded.temperature, profile.temperature);
        assert_eq!(decoded.material, profile.material);
    }
}

use serde_json::Value;

use super::error::DecodeError;
use super::layout;
use super::reader::RecordReader;
use crate::catalog::{Catalog, MaterialType};
use crate::config::RangeOnRead;
use crate::{DEFAULT_BRAND, PROTOCOL_VERSION, SpoolProfile, TemperatureRange, UNKNOWN_COLOR_VALUE};

/// Decode a record payload with the built-in catalog, rejecting inverted ranges.
pub fn decode(payload: &[u8]) -> Result<SpoolProfile, DecodeError> {
    decode_with(payload, Catalog::builtin(), RangeOnRead::Reject)
}

/// Decode a record payload into a profile.
///
/// `payload` is the bare record content; NDEF framing is stripped by the
/// caller. Checks run in a fixed order, and the first failure is returned:
/// presence of `color_hex`, `type`, `min_temp`, `max_temp`, then the
/// material, then the color code, then the temperatures and their ordering.
pub fn decode_with(
    payload: &[u8],
    catalog: &Catalog,
    on_inverted: RangeOnRead,
) -> Result<SpoolProfile, DecodeError> {
    let text = std::str::from_utf8(payload).map_err(|err| DecodeError::MalformedEncoding {
        valid_up_to: err.valid_up_to(),
    })?;
    let value: Value = serde_json::from_str(text).map_err(|err| DecodeError::MalformedJson {
        message: err.to_string(),
    })?;
    let Value::Object(fields) = value else {
        return Err(DecodeError::MalformedJson {
            message: "top-level value is not an object".to_string(),
        });
    };

    let reader = RecordReader::new(&fields);
    reader.require_fields()?;

    // Material is checked before color: an unknown material is never decoded.
    let material_raw = reader.read_str(layout::TYPE)?;
    let material = material_raw
        .parse::<MaterialType>()
        .map_err(|_| DecodeError::UnknownMaterialType(material_raw.to_string()))?;
    let color_hex = reader.read_hex(layout::COLOR_HEX)?;

    let color_value = match catalog.find_by_hex(&color_hex) {
        Some(entry) => entry.value.to_string(),
        None => {
            log::warn!("color {color_hex} is not cataloged; using '{UNKNOWN_COLOR_VALUE}'");
            UNKNOWN_COLOR_VALUE.to_string()
        }
    };

    let temperature = TemperatureRange::new(
        reader.read_temperature(layout::MIN_TEMP)?,
        reader.read_temperature(layout::MAX_TEMP)?,
    );
    if !temperature.is_ordered() {
        match on_inverted {
            RangeOnRead::Reject => {
                return Err(DecodeError::InvalidTemperatureRange {
                    min: temperature.min_c,
                    max: temperature.max_c,
                });
            }
            RangeOnRead::Accept => log::warn!(
                "accepting record with min_temp {} not below max_temp {}",
                temperature.min_c,
                temperature.max_c
            ),
        }
    }

    let brand = reader.read_optional_str(layout::BRAND)?.unwrap_or(DEFAULT_BRAND);
    let protocol_version = reader
        .read_optional_str(layout::VERSION)?
        .unwrap_or(PROTOCOL_VERSION);

    log::debug!("decoded {material} {color_value} record ({} bytes)", payload.len());

    Ok(SpoolProfile {
        color_value,
        color_hex,
        material,
        temperature,
        brand: brand.to_string(),
        protocol_version: protocol_version.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{decode, decode_with};
    use crate::catalog::{Catalog, MaterialType};
    use crate::config::RangeOnRead;
    use crate::protocols::openspool::error::DecodeError;
    use crate::{TemperatureRange, UNKNOWN_COLOR_VALUE};

    const BLUE_PLA: &[u8] = br#"{"version":"1.0","protocol":"openspool","color_hex":"2850e0","type":"pla","min_temp":180,"max_temp":210,"brand":"Generic"}"#;

    #[test]
    fn decode_catalog_color() {
        let profile = decode(BLUE_PLA).unwrap();
        assert_eq!(profile.color_value, "blue");
        assert_eq!(profile.color_hex, "2850e0");
        assert_eq!(profile.material, MaterialType::Pla);
        assert_eq!(profile.temperature, TemperatureRange::new(180, 210));
        assert_eq!(profile.brand, "Generic");
        assert_eq!(profile.protocol_version, "1.0");
    }

    #[test]
    fn decode_unknown_color_keeps_hex() {
        let payload = br#"{"color_hex":"123abc","type":"abs","min_temp":230,"max_temp":260}"#;
        let profile = decode(payload).unwrap();
        assert_eq!(profile.color_hex, "123abc");
        assert_eq!(profile.color_value, UNKNOWN_COLOR_VALUE);
    }

    #[test]
    fn decode_defaults_brand_and_version() {
        let payload = br#"{"color_hex":"ffffff","type":"tpu","min_temp":210,"max_temp":230}"#;
        let profile = decode(payload).unwrap();
        assert_eq!(profile.brand, "Generic");
        assert_eq!(profile.protocol_version, "1.0");
    }

    #[test]
    fn decode_keeps_custom_brand_and_version() {
        let payload = br#"{"version":"1.1","color_hex":"000000","type":"PETG","min_temp":"220","max_temp":250,"brand":"Polymaker"}"#;
        let profile = decode(payload).unwrap();
        assert_eq!(profile.material, MaterialType::Petg);
        assert_eq!(profile.brand, "Polymaker");
        assert_eq!(profile.protocol_version, "1.1");
        assert_eq!(profile.temperature.min_c, 220);
    }

    #[test]
    fn decode_missing_min_temp() {
        let payload = br#"{"color_hex":"ffffff","type":"pla","max_temp":210}"#;
        assert_eq!(decode(payload), Err(DecodeError::MissingField("min_temp")));
    }

    #[test]
    fn decode_missing_fields_reported_in_order() {
        let payload = br#"{"max_temp":210,"min_temp":180}"#;
        assert_eq!(decode(payload), Err(DecodeError::MissingField("color_hex")));
        let payload = br#"{"color_hex":"ffffff","min_temp":180}"#;
        assert_eq!(decode(payload), Err(DecodeError::MissingField("type")));
    }

    #[test]
    fn decode_malformed_utf8() {
        let payload = [b'{', 0xff, 0xfe, b'}'];
        assert_eq!(
            decode(&payload),
            Err(DecodeError::MalformedEncoding { valid_up_to: 1 })
        );
    }

    #[test]
    fn decode_malformed_json() {
        let err = decode(br#"{"color_hex":"#).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedJson { .. }));
        let err = decode(b"[1,2,3]").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedJson { .. }));
    }

    #[test]
    fn decode_unknown_material() {
        let payload = br#"{"color_hex":"ffffff","type":"wax","min_temp":180,"max_temp":210}"#;
        assert_eq!(
            decode(payload),
            Err(DecodeError::UnknownMaterialType("wax".to_string()))
        );
    }

    #[test]
    fn decode_reports_first_failing_step() {
        let cases: [(&[u8], DecodeError); 6] = [
            (
                br#"{"color_hex":"zz","type":"wax","min_temp":180,"max_temp":210}"#,
                DecodeError::UnknownMaterialType("wax".to_string()),
            ),
            (
                br#"{"color_hex":"zz","type":"wax","min_temp":"hot","max_temp":210}"#,
                DecodeError::UnknownMaterialType("wax".to_string()),
            ),
            (
                br#"{"color_hex":"zz","type":"pla","min_temp":"hot","max_temp":210}"#,
                DecodeError::InvalidField {
                    field: "color_hex",
                    reason: "expected 6 hex digits, got 'zz'".to_string(),
                },
            ),
            (
                br#"{"color_hex":"ffffff","type":"pla","min_temp":"hot","max_temp":100}"#,
                DecodeError::InvalidField {
                    field: "min_temp",
                    reason: "expected an integer, got 'hot'".to_string(),
                },
            ),
            (
                br#"{"color_hex":12,"type":"wax","min_temp":"hot"}"#,
                DecodeError::MissingField("max_temp"),
            ),
            (
                br#"{"color_hex":"zz","type":7,"min_temp":null,"max_temp":210}"#,
                DecodeError::MissingField("min_temp"),
            ),
        ];
        for (payload, expected) in cases {
            assert_eq!(
                decode(payload),
                Err(expected),
                "{}",
                String::from_utf8_lossy(payload)
            );
        }
    }

    #[test]
    fn decode_rejects_inverted_range_by_default() {
        let payload = br#"{"color_hex":"ffffff","type":"pla","min_temp":220,"max_temp":200}"#;
        assert_eq!(
            decode(payload),
            Err(DecodeError::InvalidTemperatureRange { min: 220, max: 200 })
        );
    }

    #[test]
    fn decode_accepts_inverted_range_when_lenient() {
        let payload = br#"{"color_hex":"ffffff","type":"pla","min_temp":200,"max_temp":200}"#;
        let profile = decode_with(payload, Catalog::builtin(), RangeOnRead::Accept).unwrap();
        assert_eq!(profile.temperature, TemperatureRange::new(200, 200));
    }

    #[test]
    fn decode_ignores_protocol_field() {
        let payload = br#"{"protocol":"other","color_hex":"f330f9","type":"nylon","min_temp":240,"max_temp":270}"#;
        let profile = decode(payload).unwrap();
        assert_eq!(profile.color_value, "pink");
        assert_eq!(profile.protocol_name(), "openspool");
    }
}

use serde_json::{Map, Value};

use super::error::DecodeError;
use super::layout;
use crate::catalog::is_hex6;

pub struct RecordReader<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RecordReader<'a> {
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Report the first required key that is absent or `null`.
    pub fn require_fields(&self) -> Result<(), DecodeError> {
        match layout::REQUIRED.iter().find(|key| self.get(key).is_none()) {
            Some(key) => Err(DecodeError::MissingField(*key)),
            None => Ok(()),
        }
    }

    pub fn read_str(&self, field: &'static str) -> Result<&'a str, DecodeError> {
        match self.get(field) {
            Some(Value::String(value)) => Ok(value.as_str()),
            Some(other) => Err(invalid(field, format!("expected a string, got {}", kind(other)))),
            None => Err(DecodeError::MissingField(field)),
        }
    }

    /// Absent, `null`, and blank strings all read as `None`.
    pub fn read_optional_str(&self, field: &'static str) -> Result<Option<&'a str>, DecodeError> {
        match self.get(field) {
            Some(Value::String(value)) if value.trim().is_empty() => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.as_str())),
            Some(other) => Err(invalid(field, format!("expected a string, got {}", kind(other)))),
            None => Ok(None),
        }
    }

    /// Read a color code, tolerating surrounding whitespace and one `#`.
    pub fn read_hex(&self, field: &'static str) -> Result<String, DecodeError> {
        let raw = self.read_str(field)?.trim();
        let digits = raw.strip_prefix(layout::HEX_PREFIX).unwrap_or(raw);
        if !is_hex6(digits) {
            return Err(invalid(
                field,
                format!("expected {} hex digits, got '{raw}'", layout::HEX_DIGITS),
            ));
        }
        Ok(digits.to_ascii_lowercase())
    }

    /// Read a temperature, coercing integral numbers and numeric strings.
    pub fn read_temperature(&self, field: &'static str) -> Result<i32, DecodeError> {
        match self.get(field) {
            Some(Value::Number(number)) => {
                if let Some(value) = number.as_i64() {
                    return i32::try_from(value)
                        .map_err(|_| invalid(field, format!("{value} is out of range")));
                }
                let value = number.as_f64().unwrap_or(f64::NAN);
                if value.fract() != 0.0 || value < i32::MIN as f64 || value > i32::MAX as f64 {
                    return Err(invalid(field, format!("expected an integer, got {number}")));
                }
                Ok(value as i32)
            }
            Some(Value::String(text)) => text
                .trim()
                .parse::<i32>()
                .map_err(|_| invalid(field, format!("expected an integer, got '{text}'"))),
            Some(other) => Err(invalid(field, format!("expected an integer, got {}", kind(other)))),
            None => Err(DecodeError::MissingField(field)),
        }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field).filter(|value| !value.is_null())
    }
}

fn invalid(field: &'static str, reason: String) -> DecodeError {
    DecodeError::InvalidField { field, reason }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value, json};

    use super::RecordReader;
    use crate::protocols::openspool::error::DecodeError;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn require_fields_reports_in_fixed_order() {
        let map = fields(json!({ "min_temp": 190 }));
        let reader = RecordReader::new(&map);
        assert_eq!(reader.require_fields(), Err(DecodeError::MissingField("color_hex")));

        let map = fields(json!({ "color_hex": "ffffff", "type": null, "max_temp": 200 }));
        let reader = RecordReader::new(&map);
        assert_eq!(reader.require_fields(), Err(DecodeError::MissingField("type")));
    }

    #[test]
    fn hex_is_normalized() {
        let map = fields(json!({ "color_hex": " #F330F9 " }));
        let reader = RecordReader::new(&map);
        assert_eq!(reader.read_hex("color_hex").unwrap(), "f330f9");
    }

    #[test]
    fn hex_rejects_wrong_length() {
        let map = fields(json!({ "color_hex": "fff" }));
        let reader = RecordReader::new(&map);
        let err = reader.read_hex("color_hex").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidField { field: "color_hex", .. }));
    }

    #[test]
    fn temperature_coercion() {
        let map = fields(json!({
            "a": 200,
            "b": "215",
            "c": 230.0,
            "d": 230.5,
            "e": true,
            "f": 9_999_999_999i64,
        }));
        let reader = RecordReader::new(&map);
        assert_eq!(reader.read_temperature("a"), Ok(200));
        assert_eq!(reader.read_temperature("b"), Ok(215));
        assert_eq!(reader.read_temperature("c"), Ok(230));
        assert!(reader.read_temperature("d").is_err());
        assert!(reader.read_temperature("e").is_err());
        assert!(reader.read_temperature("f").is_err());
    }

    #[test]
    fn optional_str_treats_blank_as_absent() {
        let map = fields(json!({ "brand": "  ", "version": 2 }));
        let reader = RecordReader::new(&map);
        assert_eq!(reader.read_optional_str("brand"), Ok(None));
        assert_eq!(reader.read_optional_str("missing"), Ok(None));
        assert!(reader.read_optional_str("version").is_err());
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TemperatureRange;

/// Filament material; the wire form is the lowercase identifier.
///
/// # Examples
/// ```
/// use openspool_core::MaterialType;
///
/// let material: MaterialType = "PETG".parse().unwrap();
/// assert_eq!(material, MaterialType::Petg);
/// assert_eq!(material.as_str(), "petg");
/// assert!("wax".parse::<MaterialType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Pla,
    Petg,
    Abs,
    Tpu,
    Nylon,
}

/// Material identifier outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown material type '{0}'")]
pub struct UnknownMaterial(pub String);

impl MaterialType {
    pub const ALL: [MaterialType; 5] = [
        MaterialType::Pla,
        MaterialType::Petg,
        MaterialType::Abs,
        MaterialType::Tpu,
        MaterialType::Nylon,
    ];

    /// Canonical wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialType::Pla => "pla",
            MaterialType::Petg => "petg",
            MaterialType::Abs => "abs",
            MaterialType::Tpu => "tpu",
            MaterialType::Nylon => "nylon",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            MaterialType::Pla => "PLA",
            MaterialType::Petg => "PETG",
            MaterialType::Abs => "ABS",
            MaterialType::Tpu => "TPU",
            MaterialType::Nylon => "Nylon",
        }
    }

    /// Suggested range for a freshly created profile.
    pub fn default_range(&self) -> TemperatureRange {
        match self {
            MaterialType::Pla => TemperatureRange::new(190, 220),
            MaterialType::Petg => TemperatureRange::new(220, 250),
            MaterialType::Abs => TemperatureRange::new(230, 260),
            MaterialType::Tpu => TemperatureRange::new(210, 230),
            MaterialType::Nylon => TemperatureRange::new(240, 270),
        }
    }
}

impl FromStr for MaterialType {
    type Err = UnknownMaterial;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        MaterialType::ALL
            .into_iter()
            .find(|material| material.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownMaterial(value.to_string()))
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{MaterialType, UnknownMaterial};

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Nylon".parse::<MaterialType>(), Ok(MaterialType::Nylon));
        assert_eq!("tPu".parse::<MaterialType>(), Ok(MaterialType::Tpu));
    }

    #[test]
    fn parse_rejects_without_coercion() {
        assert_eq!(
            "wax".parse::<MaterialType>(),
            Err(UnknownMaterial("wax".to_string()))
        );
        assert!(" pla".parse::<MaterialType>().is_err());
        assert!("".parse::<MaterialType>().is_err());
    }

    #[test]
    fn default_ranges_are_ordered() {
        for material in MaterialType::ALL {
            assert!(material.default_range().is_ordered(), "{material}");
        }
    }
}

//! Static reference data: known colors and materials.
//!
//! The catalog is built once and exposed by reference; it is never mutated,
//! so lookups need no synchronization. Hex matching is exact (no nearest
//! color), case-insensitive on the six-digit code.

mod colors;
mod materials;

pub use colors::ColorEntry;
pub use materials::{MaterialType, UnknownMaterial};

pub(crate) use colors::is_hex6;

use colors::BUILTIN_COLORS;

/// Brand suggestions offered alongside the free-text brand field.
pub const KNOWN_BRANDS: [&str; 6] = [
    "Generic",
    "Prusament",
    "Overture",
    "Hatchbox",
    "eSUN",
    "Polymaker",
];

static BUILTIN: Catalog = Catalog {
    colors: &BUILTIN_COLORS,
};

/// Immutable color lookup table.
///
/// # Examples
/// ```
/// use openspool_core::Catalog;
///
/// let catalog = Catalog::builtin();
/// assert_eq!(catalog.find_by_hex("2850E0").map(|c| c.value), Some("blue"));
/// assert_eq!(catalog.find_by_value("pink").map(|c| c.hex), Some("f330f9"));
/// assert!(catalog.find_by_hex("123abc").is_none());
/// assert!(catalog.is_known_material("PLA"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    colors: &'static [ColorEntry],
}

impl Catalog {
    /// Process-wide built-in catalog.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Catalog over a caller-supplied static table.
    pub const fn new(colors: &'static [ColorEntry]) -> Self {
        Self { colors }
    }

    /// Colors in stable catalog order.
    pub fn colors(&self) -> &'static [ColorEntry] {
        self.colors
    }

    pub fn find_by_hex(&self, hex: &str) -> Option<&'static ColorEntry> {
        self.colors
            .iter()
            .find(|color| color.hex.eq_ignore_ascii_case(hex))
    }

    pub fn find_by_value(&self, value: &str) -> Option<&'static ColorEntry> {
        self.colors
            .iter()
            .find(|color| color.value.eq_ignore_ascii_case(value))
    }

    pub fn find_by_label(&self, label: &str) -> Option<&'static ColorEntry> {
        self.colors
            .iter()
            .find(|color| color.name.eq_ignore_ascii_case(label))
    }

    /// Exact, case-insensitive membership in the material set.
    pub fn is_known_material(&self, value: &str) -> bool {
        value.parse::<MaterialType>().is_ok()
    }

    pub fn materials(&self) -> &'static [MaterialType] {
        &MaterialType::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, ColorEntry};

    static TWO: [ColorEntry; 2] = [
        ColorEntry {
            name: "Signal Orange",
            hex: "ff7f00",
            value: "signal-orange",
        },
        ColorEntry {
            name: "Ink",
            hex: "101820",
            value: "ink",
        },
    ];

    #[test]
    fn lookups_agree_in_both_directions() {
        let catalog = Catalog::builtin();
        for color in catalog.colors() {
            assert_eq!(catalog.find_by_hex(color.hex), Some(color));
            assert_eq!(catalog.find_by_value(color.value), Some(color));
            assert_eq!(catalog.find_by_label(color.name), Some(color));
        }
    }

    #[test]
    fn hex_lookup_is_exact() {
        let catalog = Catalog::builtin();
        assert!(catalog.find_by_hex("2850e1").is_none());
        assert!(catalog.find_by_hex("#2850e0").is_none());
        assert!(catalog.find_by_hex("").is_none());
    }

    #[test]
    fn custom_catalog_is_independent() {
        let catalog = Catalog::new(&TWO);
        assert_eq!(catalog.find_by_label("signal orange").map(|c| c.hex), Some("ff7f00"));
        assert!(catalog.find_by_value("blue").is_none());
        assert_eq!(catalog.colors().len(), 2);
    }

    #[test]
    fn material_membership() {
        let catalog = Catalog::builtin();
        assert!(catalog.is_known_material("petg"));
        assert!(catalog.is_known_material("NYLON"));
        assert!(!catalog.is_known_material("wax"));
        assert_eq!(catalog.materials().len(), 5);
    }
}

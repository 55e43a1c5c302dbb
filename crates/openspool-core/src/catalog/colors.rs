use serde::Serialize;

/// Catalog color: label, six-digit hex, and stable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorEntry {
    /// Human label, unique within the catalog.
    pub name: &'static str,
    /// Six lowercase hex digits, no `#`.
    pub hex: &'static str,
    /// Lowercase identifier used as the profile color key.
    pub value: &'static str,
}

const fn entry(name: &'static str, hex: &'static str, value: &'static str) -> ColorEntry {
    ColorEntry { name, hex, value }
}

pub const BUILTIN_COLORS: [ColorEntry; 12] = [
    entry("White", "ffffff", "white"),
    entry("Black", "000000", "black"),
    entry("Gray", "8e9089", "gray"),
    entry("Red", "c12e1f", "red"),
    entry("Orange", "f99963", "orange"),
    entry("Yellow", "f4ee2a", "yellow"),
    entry("Green", "00ae42", "green"),
    entry("Cyan", "0086d6", "cyan"),
    entry("Blue", "2850e0", "blue"),
    entry("Purple", "5e43b7", "purple"),
    entry("Pink", "f330f9", "pink"),
    entry("Brown", "9d432c", "brown"),
];

/// True for exactly six ASCII hex digits, either case.
pub fn is_hex6(value: &str) -> bool {
    value.len() == 6 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

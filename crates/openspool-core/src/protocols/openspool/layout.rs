pub const VERSION: &str = "version";
pub const COLOR_HEX: &str = "color_hex";
pub const TYPE: &str = "type";
pub const MIN_TEMP: &str = "min_temp";
pub const MAX_TEMP: &str = "max_temp";
pub const BRAND: &str = "brand";

/// Required keys, in the order their absence is reported.
pub const REQUIRED: [&str; 4] = [COLOR_HEX, TYPE, MIN_TEMP, MAX_TEMP];

pub const HEX_PREFIX: char = '#';
pub const HEX_DIGITS: usize = 6;

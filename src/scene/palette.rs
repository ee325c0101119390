//! Fixed color tables, stored as packed `0xRRGGBB`

use crate::math::Vec3;

pub const EMERALD: u32 = 0x022b1c;
pub const GOLD: u32 = 0xFFD700;
pub const RUBY: u32 = 0x8B0000;
pub const WARM_WHITE: u32 = 0xFFFDD0;

pub const GIFT_COLORS: &[u32] = &[RUBY, GOLD];

pub const BAUBLE_COLORS: &[u32] = &[
    // Reds
    RUBY,
    0x720e1e, // wine
    0xb91c1c, // vibrant red
    // Golds
    GOLD,
    0xDAA520, // goldenrod
    0xB8860B, // dark goldenrod
    0xF0E68C, // champagne
    0xCD7F32, // bronze
    // Greens
    EMERALD,
    0x1a472a, // hunter
    0x2d5a27, // forest
    // Accent
    0xE0E0E0, // platinum
];

pub const LIGHT_COLORS: &[u32] = &[WARM_WHITE, GOLD];

pub fn colors(table: &[u32]) -> Vec<Vec3> {
    table.iter().map(|&hex| Vec3::from_rgb_hex(hex)).collect()
}

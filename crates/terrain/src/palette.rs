//! Fixed color tables for terrain and crystals.

use skyreach_common::Color;

/// Terrain palettes, indexed by `Island::palette_index`.
pub const TERRAIN_PALETTES: [&[Color]; 4] = [
    // meadow
    &[
        Color::from_rgb8(0x6f, 0xc2, 0x7a),
        Color::from_rgb8(0x5a, 0xa8, 0x6b),
        Color::from_rgb8(0x8c, 0xd6, 0x8a),
        Color::from_rgb8(0x4e, 0x8f, 0x5e),
    ],
    // moss and slate
    &[
        Color::from_rgb8(0x7d, 0x9c, 0x85),
        Color::from_rgb8(0x64, 0x7c, 0x72),
        Color::from_rgb8(0x9a, 0xb8, 0x9c),
    ],
    // ember rock
    &[
        Color::from_rgb8(0xb0, 0x5e, 0x42),
        Color::from_rgb8(0x8e, 0x46, 0x36),
        Color::from_rgb8(0xd0, 0x7f, 0x4f),
    ],
    // prism sand
    &[
        Color::from_rgb8(0xe8, 0xd9, 0xb5),
        Color::from_rgb8(0xc9, 0xb8, 0xf0),
        Color::from_rgb8(0xa8, 0xe0, 0xf5),
    ],
];

/// Crystal shard colors, cycled by shard index.
pub const SHARD_PALETTE: [Color; 5] = [
    Color::from_rgb8(0x7c, 0xc3, 0xff),
    Color::from_rgb8(0x97, 0xff, 0xd6),
    Color::from_rgb8(0xc7, 0x9b, 0xff),
    Color::from_rgb8(0x5f, 0xd6, 0xff),
    Color::from_rgb8(0xff, 0xd4, 0x80),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_are_non_empty() {
        assert!(TERRAIN_PALETTES.iter().all(|p| !p.is_empty()));
        assert!(!SHARD_PALETTE.is_empty());
    }
}

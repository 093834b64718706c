use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use skyreach_common::Color;

use crate::height::HeightField;
use crate::palette::SHARD_PALETTE;

const SHARD_COUNT: usize = 28;

/// A floating resonance crystal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrystalShard {
    pub position: Vec3,
    pub scale: f32,
    pub color: Color,
}

/// Ring of shards hovering over the first island.
///
/// Positions and colors are fixed; only `scale` draws from `rng`.
pub fn resonance_cluster<R: Rng>(field: &HeightField, height_offset: f32, rng: &mut R) -> Vec<CrystalShard> {
    let Some(anchor) = field.islands().first() else {
        return Vec::new();
    };
    (0..SHARD_COUNT)
        .map(|i| {
            let fi = i as f32;
            let angle = fi / SHARD_COUNT as f32 * TAU;
            let distance = 6.0 + (fi * 1.2).sin() * 2.5;
            let lift = 12.0 + (fi * 1.1).cos() * 4.0;
            CrystalShard {
                position: Vec3::new(
                    anchor.center.x + angle.cos() * distance,
                    height_offset + lift,
                    anchor.center.y + angle.sin() * distance,
                ),
                scale: rng.gen_range(0.6_f32..1.4),
                color: SHARD_PALETTE[i % SHARD_PALETTE.len()],
            }
        })
        .collect()
}

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use skyreach_common::{Color, Transform};

use crate::height::HeightField;
use crate::island::WorldConfig;
use crate::noise::lattice_hash;
use crate::palette::TERRAIN_PALETTES;

/// Minimum island coverage for a grid cell to receive a column.
const FOOTPRINT_COVERAGE: f32 = 0.35;
/// Column depth at full coverage; thins out toward island edges.
const COLUMN_DEPTH: f32 = 6.0;

/// One décor column resting on the island surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainInstance {
    /// Box center in world space; the top face is flush with the surface.
    pub position: Vec3,
    /// Per-axis extent, every component positive.
    pub scale: Vec3,
    pub island: u32,
    /// Index into the island's palette.
    pub color_index: usize,
    pub color: Color,
}

impl TerrainInstance {
    pub fn transform(&self) -> Transform {
        Transform::from_position_scale(self.position, self.scale)
    }
}

/// Scans a square grid over the archipelago and drops a column on every cell
/// that lies inside an island footprint.
///
/// Row-major over `z` then `x`, so the sequence order is a stable contract
/// for consumers that keep a parallel per-instance buffer.
pub struct TerrainInstancer<'a> {
    field: &'a HeightField,
    height_offset: f32,
    terrain_radius: f32,
    spacing: f32,
}

impl<'a> TerrainInstancer<'a> {
    pub fn new(field: &'a HeightField, config: &WorldConfig) -> Self {
        Self {
            field,
            height_offset: config.height_offset,
            terrain_radius: config.terrain_radius,
            spacing: config.instance_spacing,
        }
    }

    /// Generate with entropy-seeded cosmetic jitter.
    pub fn generate(&self) -> Vec<TerrainInstance> {
        self.generate_with_rng(&mut SmallRng::from_entropy())
    }

    /// Generate with caller-provided jitter. `rng` only affects the horizontal
    /// footprint scale; count, order, positions and colors do not depend on it.
    pub fn generate_with_rng<R: Rng>(&self, rng: &mut R) -> Vec<TerrainInstance> {
        let _span = tracing::info_span!("generate_terrain").entered();
        let steps = (self.terrain_radius / self.spacing).floor() as i32;
        let mut instances = Vec::new();

        for iz in -steps..=steps {
            for ix in -steps..=steps {
                let x = ix as f32 * self.spacing;
                let z = iz as f32 * self.spacing;
                let Some((island, coverage)) = self.field.dominant(x, z) else {
                    continue;
                };
                if coverage < FOOTPRINT_COVERAGE {
                    continue;
                }

                let surface = self.field.height(x, z) + self.height_offset;
                let depth = COLUMN_DEPTH * coverage;
                let palette = TERRAIN_PALETTES[island.palette_index];
                let color_index = (lattice_hash(ix, iz) % palette.len() as u64) as usize;
                let footprint = self.spacing * rng.gen_range(0.9_f32..1.1);

                instances.push(TerrainInstance {
                    position: Vec3::new(x, surface - depth * 0.5, z),
                    scale: Vec3::new(footprint, depth, footprint),
                    island: island.id,
                    color_index,
                    color: palette[color_index],
                });
            }
        }

        tracing::info!(count = instances.len(), "terrain instances generated");
        instances
    }
}

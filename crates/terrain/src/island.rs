use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::height::RIPPLE_PEAK;
use crate::palette::TERRAIN_PALETTES;

/// A circular region of elevated terrain.
///
/// Islands are defined once at startup and never created or removed at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Island {
    pub id: u32,
    pub name: String,
    /// Horizontal center as `(x, z)`.
    pub center: Vec2,
    /// Core radius: full base height inside it.
    pub radius: f32,
    pub base_height: f32,
    /// Index into [`TERRAIN_PALETTES`].
    pub palette_index: usize,
}

impl Island {
    pub fn new(id: u32, name: &str, center: Vec2, radius: f32, base_height: f32, palette_index: usize) -> Self {
        Self {
            id,
            name: name.to_string(),
            center,
            radius,
            base_height,
            palette_index,
        }
    }

    /// Horizontal distance from `(x, z)` to the island center.
    pub fn distance(&self, x: f32, z: f32) -> f32 {
        self.center.distance(Vec2::new(x, z))
    }
}

/// The Skyreach archipelago.
pub fn default_islands() -> Vec<Island> {
    vec![
        Island::new(0, "Skyreach", Vec2::new(0.0, 0.0), 18.0, 6.0, 0),
        Island::new(1, "Verdant Shelf", Vec2::new(38.0, -14.0), 12.0, 3.0, 1),
        Island::new(2, "Ember Spire", Vec2::new(-34.0, 20.0), 10.0, 9.0, 2),
        Island::new(3, "Mistfall Reach", Vec2::new(-16.0, -38.0), 9.0, 2.0, 1),
        Island::new(4, "Prism Atoll", Vec2::new(28.0, 34.0), 8.0, 4.0, 3),
    ]
}

/// Errors from validating a world definition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    #[error("world has no islands")]
    NoIslands,
    #[error("island {id} has non-positive radius {radius}")]
    InvalidRadius { id: u32, radius: f32 },
    #[error("island {id} references unknown palette {index}")]
    UnknownPalette { id: u32, index: usize },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("ripple amplitude {amplitude} would reach below the void floor (headroom {headroom})")]
    RippleTooLarge { amplitude: f32, headroom: f32 },
}

/// Static description of the world: islands plus height-model parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub islands: Vec<Island>,
    /// World datum added to every height sample when placing things in world space.
    pub height_offset: f32,
    /// Elevation returned far from every island.
    pub void_floor: f32,
    /// Width of the smooth decay band outside each island's core radius.
    pub falloff_band: f32,
    pub ripple_amplitude: f32,
    /// Half-extent of the square that décor placement scans.
    pub terrain_radius: f32,
    /// Grid spacing between décor instances.
    pub instance_spacing: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            islands: default_islands(),
            height_offset: -4.0,
            void_floor: -60.0,
            falloff_band: 8.0,
            ripple_amplitude: 0.6,
            terrain_radius: 60.0,
            instance_spacing: 2.0,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.islands.is_empty() {
            return Err(WorldError::NoIslands);
        }
        for (name, value) in [
            ("falloff_band", self.falloff_band),
            ("terrain_radius", self.terrain_radius),
            ("instance_spacing", self.instance_spacing),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(WorldError::NonPositive { name, value });
            }
        }
        for island in &self.islands {
            if island.radius.is_nan() || island.radius <= 0.0 {
                return Err(WorldError::InvalidRadius {
                    id: island.id,
                    radius: island.radius,
                });
            }
            if island.palette_index >= TERRAIN_PALETTES.len() {
                return Err(WorldError::UnknownPalette {
                    id: island.id,
                    index: island.palette_index,
                });
            }
        }

        let lowest = self
            .islands
            .iter()
            .map(|i| i.base_height)
            .fold(f32::INFINITY, f32::min);
        let headroom = lowest - self.void_floor;
        if self.ripple_amplitude < 0.0 || self.ripple_amplitude * RIPPLE_PEAK >= headroom {
            return Err(WorldError::RippleTooLarge {
                amplitude: self.ripple_amplitude,
                headroom,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_world_is_valid() {
        let config = WorldConfig::default();
        assert_eq!(config.islands.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn island_ids_are_unique() {
        let islands = default_islands();
        let mut ids: Vec<u32> = islands.iter().map(|i| i.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), islands.len());
    }

    #[test]
    fn rejects_empty_world() {
        let config = WorldConfig {
            islands: Vec::new(),
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Err(WorldError::NoIslands));
    }

    #[test]
    fn rejects_degenerate_island() {
        let mut config = WorldConfig::default();
        config.islands[2].radius = 0.0;
        assert_eq!(
            config.validate(),
            Err(WorldError::InvalidRadius { id: 2, radius: 0.0 })
        );
    }

    #[test]
    fn rejects_unknown_palette() {
        let mut config = WorldConfig::default();
        config.islands[0].palette_index = 99;
        assert!(matches!(
            config.validate(),
            Err(WorldError::UnknownPalette { id: 0, index: 99 })
        ));
    }

    #[test]
    fn rejects_ripple_that_could_reach_void() {
        let config = WorldConfig {
            ripple_amplitude: 500.0,
            ..WorldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WorldError::RippleTooLarge { .. })
        ));
    }

    #[test]
    fn rejects_nan_spacing() {
        let config = WorldConfig {
            instance_spacing: f32::NAN,
            ..WorldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WorldError::NonPositive { name: "instance_spacing", .. })
        ));
    }

    #[test]
    fn distance_is_horizontal() {
        let island = Island::new(9, "Test", Vec2::new(3.0, 4.0), 1.0, 0.0, 0);
        assert_eq!(island.distance(0.0, 0.0), 5.0);
    }
}

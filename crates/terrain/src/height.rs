use crate::island::{Island, WorldConfig, WorldError};
use crate::noise::{smoothstep, value_noise};

/// Upper bound of `|ripple(x, z)|` before amplitude scaling.
pub(crate) const RIPPLE_PEAK: f32 = 1.0;

/// Anything that can answer "how high is the ground at `(x, z)`".
pub trait HeightSampler {
    fn height(&self, x: f32, z: f32) -> f32;
}

impl<F> HeightSampler for F
where
    F: Fn(f32, f32) -> f32,
{
    fn height(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}

/// Procedural elevation model built from a fixed island set.
///
/// Each island contributes its full base height inside its core radius and
/// decays smoothly to the void floor across the falloff band. Contributions
/// combine by maximum, then a bounded multi-frequency ripple is added,
/// weighted by island coverage so the void stays perfectly flat.
#[derive(Debug, Clone)]
pub struct HeightField {
    islands: Vec<Island>,
    void_floor: f32,
    falloff_band: f32,
    ripple_amplitude: f32,
}

impl HeightField {
    pub fn new(config: &WorldConfig) -> Result<Self, WorldError> {
        config.validate()?;
        Ok(Self {
            islands: config.islands.clone(),
            void_floor: config.void_floor,
            falloff_band: config.falloff_band,
            ripple_amplitude: config.ripple_amplitude,
        })
    }

    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    /// Elevation returned far from every island.
    pub fn void_floor(&self) -> f32 {
        self.void_floor
    }

    /// How much of `island` covers `(x, z)`: 1 inside the core, 0 past the band.
    pub fn coverage(&self, island: &Island, x: f32, z: f32) -> f32 {
        let d = island.distance(x, z);
        if d <= island.radius {
            return 1.0;
        }
        1.0 - smoothstep(island.radius, island.radius + self.falloff_band, d)
    }

    /// The island whose falloff raises `(x, z)` the most, with its coverage.
    pub fn dominant(&self, x: f32, z: f32) -> Option<(&Island, f32)> {
        let mut best: Option<(&Island, f32, f32)> = None;
        for island in &self.islands {
            let t = self.coverage(island, x, z);
            if t <= 0.0 {
                continue;
            }
            let h = self.contribution(island, t);
            if best.is_none_or(|(_, _, best_h)| h > best_h) {
                best = Some((island, t, h));
            }
        }
        best.map(|(island, t, _)| (island, t))
    }

    pub fn island_at(&self, x: f32, z: f32) -> Option<&Island> {
        self.dominant(x, z).map(|(island, _)| island)
    }

    /// Elevation at `(x, z)`. Pure and defined on the whole plane.
    pub fn height(&self, x: f32, z: f32) -> f32 {
        let mut surface = self.void_floor;
        let mut coverage = 0.0_f32;
        for island in &self.islands {
            let t = self.coverage(island, x, z);
            if t <= 0.0 {
                continue;
            }
            surface = surface.max(self.contribution(island, t));
            coverage = coverage.max(t);
        }
        if coverage <= 0.0 {
            return self.void_floor;
        }
        surface + ripple(x, z) * self.ripple_amplitude * coverage
    }

    fn contribution(&self, island: &Island, coverage: f32) -> f32 {
        self.void_floor + (island.base_height - self.void_floor) * coverage
    }
}

impl HeightSampler for HeightField {
    fn height(&self, x: f32, z: f32) -> f32 {
        HeightField::height(self, x, z)
    }
}

/// Three octaves in `[-RIPPLE_PEAK, RIPPLE_PEAK]`.
fn ripple(x: f32, z: f32) -> f32 {
    let broad = 0.5 * (x * 0.35).sin() * (z * 0.35).cos();
    let diagonal = 0.25 * (x * 0.9 + z * 0.7).sin();
    let grain = 0.25 * (2.0 * value_noise(x * 0.5, z * 0.5) - 1.0);
    broad + diagonal + grain
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn field() -> HeightField {
        HeightField::new(&WorldConfig::default()).unwrap()
    }

    #[test]
    fn height_is_finite_and_deterministic() {
        let f = field();
        for ix in -40..40 {
            for iz in -40..40 {
                let (x, z) = (ix as f32 * 3.7, iz as f32 * 2.9);
                let h = f.height(x, z);
                assert!(h.is_finite());
                assert_eq!(h.to_bits(), f.height(x, z).to_bits());
            }
        }
    }

    #[test]
    fn far_field_is_exactly_void() {
        let f = field();
        assert_eq!(f.height(1_000.0, -1_000.0), f.void_floor());
        assert_eq!(f.height(1.0e7, 1.0e7), f.void_floor());
        assert!(f.island_at(1_000.0, 0.0).is_none());
    }

    #[test]
    fn island_core_sits_near_base_height() {
        let f = field();
        let amplitude = WorldConfig::default().ripple_amplitude;
        for island in f.islands() {
            let h = f.height(island.center.x, island.center.y);
            assert!(
                (h - island.base_height).abs() <= amplitude * RIPPLE_PEAK,
                "{} at {h}",
                island.name
            );
        }
    }

    #[test]
    fn island_points_stay_above_void() {
        let f = field();
        for ix in -80..80 {
            for iz in -80..80 {
                let (x, z) = (ix as f32, iz as f32);
                if f.island_at(x, z).is_some() {
                    assert!(f.height(x, z) >= f.void_floor());
                }
            }
        }
    }

    #[test]
    fn falloff_decays_monotonically_outward() {
        let f = field();
        let island = &f.islands()[0];
        let mut last = f.coverage(island, 0.0, 0.0);
        for step in 1..60 {
            let c = f.coverage(island, step as f32 * 0.5, 0.0);
            assert!(c <= last);
            last = c;
        }
        assert_eq!(last, 0.0);
    }

    #[test]
    fn islands_do_not_depress_each_other() {
        let lone = WorldConfig {
            islands: vec![Island::new(0, "A", Vec2::ZERO, 10.0, 5.0, 0)],
            ripple_amplitude: 0.0,
            ..WorldConfig::default()
        };
        let mut pair = lone.clone();
        pair.islands
            .push(Island::new(1, "B", Vec2::new(14.0, 0.0), 6.0, 1.0, 0));
        let lone = HeightField::new(&lone).unwrap();
        let pair = HeightField::new(&pair).unwrap();
        for step in 0..60 {
            let x = step as f32 * 0.5;
            assert!(pair.height(x, 0.0) >= lone.height(x, 0.0), "x={x}");
        }
    }

    #[test]
    fn dominant_prefers_the_higher_contribution() {
        let f = field();
        let (island, coverage) = f.dominant(-34.0, 20.0).unwrap();
        assert_eq!(island.name, "Ember Spire");
        assert_eq!(coverage, 1.0);
    }

    #[test]
    fn closures_are_samplers() {
        let flat = |_: f32, _: f32| -> f32 { 2.5 };
        assert_eq!(HeightSampler::height(&flat, 9.0, -9.0), 2.5);
    }

    #[test]
    fn invalid_world_is_rejected() {
        let config = WorldConfig {
            islands: Vec::new(),
            ..WorldConfig::default()
        };
        assert_eq!(HeightField::new(&config).unwrap_err(), WorldError::NoIslands);
    }
}

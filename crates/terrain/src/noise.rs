//! Hash-based lattice noise. Every value is a pure function of its inputs.

/// Splitmix64 finalizer, used as an integer hash.
pub(crate) fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Hash a 2D lattice point.
pub(crate) fn lattice_hash(ix: i32, iz: i32) -> u64 {
    let packed = ((ix as u32 as u64) << 32) | iz as u32 as u64;
    splitmix64(packed)
}

/// Hermite smoothstep of `x` between `edge0` and `edge1`, clamped to `[0, 1]`.
pub(crate) fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn lattice_value(ix: i32, iz: i32) -> f32 {
    // Top 24 bits map exactly onto an f32 mantissa.
    (lattice_hash(ix, iz) >> 40) as f32 / (1u64 << 24) as f32
}

/// Smoothly interpolated value noise in `[0, 1)`.
pub(crate) fn value_noise(x: f32, z: f32) -> f32 {
    let (fx, fz) = (x.floor(), z.floor());
    let (ix, iz) = (fx as i32, fz as i32);
    let tx = smoothstep(0.0, 1.0, x - fx);
    let tz = smoothstep(0.0, 1.0, z - fz);

    let a = lattice_value(ix, iz);
    let b = lattice_value(ix.wrapping_add(1), iz);
    let c = lattice_value(ix, iz.wrapping_add(1));
    let d = lattice_value(ix.wrapping_add(1), iz.wrapping_add(1));

    let top = a + (b - a) * tx;
    let bottom = c + (d - c) * tx;
    top + (bottom - top) * tz
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothstep_clamps_outside_edges() {
        assert_eq!(smoothstep(0.0, 1.0, -3.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 4.0), 1.0);
        assert_eq!(smoothstep(0.0, 2.0, 1.0), 0.5);
    }

    #[test]
    fn lattice_hash_separates_axes() {
        assert_ne!(lattice_hash(1, 2), lattice_hash(2, 1));
        assert_eq!(lattice_hash(-7, 3), lattice_hash(-7, 3));
    }

    #[test]
    fn value_noise_stays_in_unit_range() {
        for i in -200..200 {
            let v = value_noise(i as f32 * 0.37, i as f32 * -0.91);
            assert!((0.0..1.0).contains(&v), "noise {v} out of range");
        }
    }

    #[test]
    fn value_noise_matches_lattice_at_integer_points() {
        assert_eq!(value_noise(3.0, -4.0), lattice_value(3, -4));
    }
}

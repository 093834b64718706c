//! Terrain: the floating-island height model and load-time décor placement.
//!
//! # Invariants
//! - `HeightField::height` is pure, total and finite for every `(x, z)`.
//! - Islands never depress each other; the surface is the max of their contributions.
//! - Instance count and order depend only on the world definition, never on RNG state.

mod crystals;
mod height;
mod instancer;
mod island;
mod noise;
pub mod palette;

pub use crystals::{CrystalShard, resonance_cluster};
pub use height::{HeightField, HeightSampler};
pub use instancer::{TerrainInstance, TerrainInstancer};
pub use island::{Island, WorldConfig, WorldError};

pub fn crate_info() -> &'static str {
    "skyreach-terrain v0.1.0"
}

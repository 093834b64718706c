//! Kernel: the per-frame movement and vitals simulation.
//!
//! # Invariants
//! - `MovementController::step` is infallible and pure with respect to its inputs.
//! - Every vitals pool stays within `[0, 1]` after every mutation.
//! - The controller exclusively owns player and vitals state; observers get copies.

pub mod config;
pub mod movement;
pub mod player;
pub mod vitals;

pub use config::{ConfigError, SessionConfig};
pub use movement::{FrameEvent, FrameOutput, MovementController, MovementTuning};
pub use player::PlayerState;
pub use vitals::{VitalsModel, VitalsRates, VitalsState};

pub fn crate_info() -> &'static str {
    "skyreach-kernel v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("kernel"));
    }
}

//! Shared value types used across the skyreach crates.
//!
//! # Invariants
//! - Types here are plain data: no hidden state, no I/O.

mod color;
mod types;

pub use color::{Color, ColorError};
pub use types::Transform;

pub fn crate_info() -> &'static str {
    "skyreach-common v0.1.0"
}

//! Input: raw key identifiers mapped to a persistent held/released action set.
//!
//! # Invariants
//! - The movement controller consumes actions, never raw key codes.
//! - Unrecognized key codes are ignored, never an error.
//! - Only the frame driver writes input state; the controller only reads it.

pub mod action;
mod bindings;
mod state;

pub use action::Action;
pub use bindings::KeyBindings;
pub use state::InputState;

pub fn crate_info() -> &'static str {
    "skyreach-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}

use glam::Vec3;
use serde::{Deserialize, Serialize};
use skyreach_input::{Action, InputState};

/// The avatar's kinematic state. One per session, mutated only by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Vec3,
    /// Units per second.
    pub velocity: Vec3,
    /// Actions held during the last step, indexed by `Action::index`.
    pub held: [bool; Action::COUNT],
    /// Whether the last step resolved contact with the ground.
    pub grounded: bool,
}

impl PlayerState {
    /// At rest at `position`, nothing held.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            held: [false; Action::COUNT],
            grounded: false,
        }
    }

    pub fn is_holding(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// Horizontal speed in units per second.
    pub fn planar_speed(&self) -> f32 {
        self.velocity.with_y(0.0).length()
    }

    pub(crate) fn latch_input(&mut self, input: &InputState) {
        for action in Action::ALL {
            self.held[action.index()] = input.is_held(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyreach_input::KeyBindings;

    #[test]
    fn starts_at_rest() {
        let p = PlayerState::at(Vec3::new(0.0, 25.0, 0.0));
        assert_eq!(p.velocity, Vec3::ZERO);
        assert_eq!(p.planar_speed(), 0.0);
        assert!(!p.grounded);
    }

    #[test]
    fn latch_copies_held_actions() {
        let mut input = InputState::new(KeyBindings::default());
        input.press(Action::Dash);
        let mut p = PlayerState::at(Vec3::ZERO);
        p.latch_input(&input);
        assert!(p.is_holding(Action::Dash));
        assert!(!p.is_holding(Action::Jump));
    }

    #[test]
    fn planar_speed_ignores_vertical() {
        let mut p = PlayerState::at(Vec3::ZERO);
        p.velocity = Vec3::new(3.0, -50.0, 4.0);
        assert_eq!(p.planar_speed(), 5.0);
    }
}

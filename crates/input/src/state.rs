use glam::Vec2;

use crate::action::Action;
use crate::bindings::KeyBindings;

/// Held/released flag per action, driven by key-down/key-up edges.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    bindings: KeyBindings,
    held: [bool; Action::COUNT],
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: [false; Action::COUNT],
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Key-down edge. Returns the action it mapped to, if any.
    pub fn on_press(&mut self, code: &str) -> Option<Action> {
        let action = self.resolve(code)?;
        self.press(action);
        Some(action)
    }

    /// Key-up edge. Returns the action it mapped to, if any.
    pub fn on_release(&mut self, code: &str) -> Option<Action> {
        let action = self.resolve(code)?;
        self.release(action);
        Some(action)
    }

    pub fn press(&mut self, action: Action) {
        self.held[action.index()] = true;
    }

    pub fn release(&mut self, action: Action) {
        self.held[action.index()] = false;
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held = [false; Action::COUNT];
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    pub fn held_actions(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(|a| self.is_held(*a))
    }

    /// Movement intent: `x` strafes right (+) / left (-), `y` moves forward (+) / back (-).
    pub fn move_axes(&self) -> Vec2 {
        let axis = |pos: Action, neg: Action| {
            f32::from(u8::from(self.is_held(pos))) - f32::from(u8::from(self.is_held(neg)))
        };
        Vec2::new(
            axis(Action::Right, Action::Left),
            axis(Action::Forward, Action::Backward),
        )
    }

    fn resolve(&self, code: &str) -> Option<Action> {
        let action = self.bindings.resolve(code);
        if action.is_none() {
            tracing::trace!(code, "ignoring unbound key");
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> InputState {
        InputState::new(KeyBindings::default())
    }

    #[test]
    fn press_and_release_edges() {
        let mut input = input();
        assert_eq!(input.on_press("KeyW"), Some(Action::Forward));
        assert!(input.is_held(Action::Forward));
        assert_eq!(input.on_release("ArrowUp"), Some(Action::Forward));
        assert!(!input.is_held(Action::Forward));
    }

    #[test]
    fn unbound_codes_are_ignored() {
        let mut input = input();
        assert_eq!(input.on_press("KeyZ"), None);
        assert_eq!(input.on_release("F13"), None);
        assert_eq!(input.held_actions().count(), 0);
    }

    #[test]
    fn held_state_persists_until_release() {
        let mut input = input();
        input.on_press("Space");
        input.on_press("KeyF");
        input.on_press("Space");
        let held: Vec<Action> = input.held_actions().collect();
        assert_eq!(held, vec![Action::Jump, Action::Glide]);
        input.clear();
        assert_eq!(input.held_actions().count(), 0);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut input = input();
        input.on_press("KeyW");
        input.on_press("KeyS");
        input.on_press("KeyD");
        assert_eq!(input.move_axes(), Vec2::new(1.0, 0.0));
        input.on_press("KeyA");
        input.on_release("KeyS");
        assert_eq!(input.move_axes(), Vec2::new(0.0, 1.0));
    }
}

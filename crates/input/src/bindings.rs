use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::action::Action;

/// Raw key code to action table.
///
/// Key codes use the physical-key naming shared by browsers and winit
/// (`KeyW`, `ArrowUp`, `ShiftLeft`, `Space`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    keys: BTreeMap<String, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        for (code, action) in [
            ("KeyW", Action::Forward),
            ("ArrowUp", Action::Forward),
            ("KeyS", Action::Backward),
            ("ArrowDown", Action::Backward),
            ("KeyA", Action::Left),
            ("ArrowLeft", Action::Left),
            ("KeyD", Action::Right),
            ("ArrowRight", Action::Right),
            ("Space", Action::Jump),
            ("ShiftLeft", Action::Dash),
            ("ShiftRight", Action::Dash),
            ("KeyF", Action::Glide),
        ] {
            bindings.bind(code, action);
        }
        bindings
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    /// Bind `code` to `action`, replacing any previous binding for that code.
    pub fn bind(&mut self, code: &str, action: Action) {
        self.keys.insert(code.to_string(), action);
    }

    pub fn resolve(&self, code: &str) -> Option<Action> {
        self.keys.get(code).copied()
    }

    /// All codes bound to `action`, in sorted order.
    pub fn codes_for(&self, action: Action) -> impl Iterator<Item = &str> {
        self.keys
            .iter()
            .filter(move |(_, a)| **a == action)
            .map(|(code, _)| code.as_str())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

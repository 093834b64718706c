use serde::{Deserialize, Serialize};

/// A movement action the avatar can hold.
///
/// Any input device maps onto this set; the controller never sees raw events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
    Dash,
    Glide,
}

impl Action {
    pub const COUNT: usize = 7;

    pub const ALL: [Action; Self::COUNT] = [
        Action::Forward,
        Action::Backward,
        Action::Left,
        Action::Right,
        Action::Jump,
        Action::Dash,
        Action::Glide,
    ];

    /// Dense index in `0..COUNT`.
    pub fn index(self) -> usize {
        self as usize
    }
}

use bevy::prelude::*;

#[derive(States, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    /// canvas and board are being built
    #[default]
    Load,
    Paused,
    /// the animation driver is running
    Running,
}

impl GameState {
    /// the state a play / pause toggle leads to, `None` while loading
    pub fn toggled(self) -> Option<Self> {
        match self {
            GameState::Load => None,
            GameState::Paused => Some(GameState::Running),
            GameState::Running => Some(GameState::Paused),
        }
    }
}

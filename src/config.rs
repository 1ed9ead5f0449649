//! Settings for a game session.

use crate::render::RenderStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Only let the side to move select pieces
    pub enforce_turns: bool,
    /// Captured points needed to win. The default is only reachable by taking a king.
    pub win_threshold: u32,
    pub style: RenderStyle,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            enforce_turns: false,
            win_threshold: 900,
            style: RenderStyle::Ansi,
        }
    }
}
